//! Per-network chain parameters for the deposit-side UTXO chain.
//!
//! A single canonical table of address/WIF version bytes, selected once per
//! run by an explicit [`Network`] value. Both the key codec and the address
//! codec consult this table, so a version byte is never written out twice.

use std::fmt;
use std::str::FromStr;

use crate::PrimitivesError;

/// The deposit-chain environment a run operates against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// Production network.
    Main,
    /// Public test network.
    Test,
    /// Local regression-test network.
    Regtest,
}

/// Version bytes for one network environment.
///
/// Immutable; every instance lives in static storage and is handed out by
/// [`Network::params`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainParams {
    /// First byte of Base58Check pay-to-public-key-hash addresses.
    pub pubkey_hash_version: u8,
    /// First byte of Base58Check script-hash addresses.
    pub script_hash_version: u8,
    /// First byte of WIF-encoded private keys.
    pub wif_version: u8,
}

const MAIN_PARAMS: ChainParams = ChainParams {
    pubkey_hash_version: 0x1e,
    script_hash_version: 0x16,
    wif_version: 0x9e,
};

const TEST_PARAMS: ChainParams = ChainParams {
    pubkey_hash_version: 0x71,
    script_hash_version: 0xc4,
    wif_version: 0xf1,
};

const REGTEST_PARAMS: ChainParams = ChainParams {
    pubkey_hash_version: 0x6f,
    script_hash_version: 0xc4,
    wif_version: 0xef,
};

impl Network {
    /// Return the chain parameters for this network.
    pub fn params(&self) -> &'static ChainParams {
        match self {
            Network::Main => &MAIN_PARAMS,
            Network::Test => &TEST_PARAMS,
            Network::Regtest => &REGTEST_PARAMS,
        }
    }

    /// The canonical selector string for this network.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "mainnet",
            Network::Test => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

impl FromStr for Network {
    type Err = PrimitivesError;

    /// Parse a network selector string.
    ///
    /// Accepts exactly `mainnet`, `testnet`, and `regtest`; anything else
    /// fails with `UnknownNetwork`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Main),
            "testnet" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            other => Err(PrimitivesError::UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
