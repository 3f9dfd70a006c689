//! Pay-to-Public-Key-Hash (P2PKH) script template.
//!
//! Creates standard P2PKH locking scripts (`OP_DUP OP_HASH160 <hash>
//! OP_EQUALVERIFY OP_CHECKSIG`) and unlocking scripts (`<sig> <pubkey>`).

use bridge_primitives::PrivateKey;
use bridge_script::opcodes::*;
use bridge_script::{Address, Script};

use crate::sighash::SIGHASH_ALL;
use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Create a P2PKH locking script from an address.
///
/// Produces: `OP_DUP OP_HASH160 <20-byte pubkey hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn lock(address: &Address) -> Script {
    let mut bytes = Vec::with_capacity(25);
    bytes.push(OP_DUP);
    bytes.push(OP_HASH160);
    bytes.push(OP_DATA_20);
    bytes.extend_from_slice(&address.public_key_hash);
    bytes.push(OP_EQUALVERIFY);
    bytes.push(OP_CHECKSIG);
    Script::from_bytes(&bytes)
}

/// Create a P2PKH unlocker for signing transaction inputs.
///
/// `sighash_flag` defaults to `SIGHASH_ALL` (0x01).
pub fn unlock(private_key: PrivateKey, sighash_flag: Option<u32>) -> P2pkhUnlocker {
    P2pkhUnlocker {
        private_key,
        sighash_flag: sighash_flag.unwrap_or(SIGHASH_ALL),
    }
}

/// P2PKH signing template holding a private key and sighash flag.
///
/// Produces unlocking scripts of the form
/// `<DER signature || sighash byte> <serialized pubkey>`; the public key
/// serialization follows the key's WIF compression flag.
pub struct P2pkhUnlocker {
    /// The private key used for ECDSA signing.
    private_key: PrivateKey,

    /// The sighash flag to use (e.g. `SIGHASH_ALL`).
    sighash_flag: u32,
}

impl UnlockingScriptTemplate for P2pkhUnlocker {
    fn sign(&self, tx: &Transaction, input_index: u32) -> Result<Script, TransactionError> {
        let idx = input_index as usize;

        if idx >= tx.inputs.len() {
            return Err(TransactionError::SigningError(format!(
                "input index {} out of range (tx has {} inputs)",
                idx,
                tx.inputs.len()
            )));
        }

        if tx.inputs[idx].source_output().is_none() {
            return Err(TransactionError::SigningError(
                "missing source output on input (no previous output info)".to_string(),
            ));
        }

        let sig_hash = tx.calc_input_signature_hash(idx, self.sighash_flag)?;

        // RFC6979 deterministic ECDSA, low-S normalized.
        let signature = self.private_key.sign(&sig_hash)?;

        let der_sig = signature.to_der();
        let mut sig_buf = Vec::with_capacity(der_sig.len() + 1);
        sig_buf.extend_from_slice(&der_sig);
        sig_buf.push(self.sighash_flag as u8);

        let pub_key_bytes = self.private_key.public_key_bytes();

        let mut script = Script::new();
        script.append_push_data(&sig_buf)?;
        script.append_push_data(&pub_key_bytes)?;

        Ok(script)
    }

    /// A typical P2PKH scriptSig is about 106 bytes with a compressed key:
    /// 1 (push len) + 72 (DER sig + sighash byte) + 1 (push len) + 33.
    fn estimate_length(&self, _tx: &Transaction, _input_index: u32) -> u32 {
        if self.private_key.compressed() {
            106
        } else {
            138
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_primitives::Network;

    /// The locking script is the canonical 25-byte P2PKH pattern.
    #[test]
    fn test_lock_script_shape() {
        let key = PrivateKey::new();
        let address = Address::from_public_key_hash(&key.public_key_hash(), Network::Main);
        let script = lock(&address);
        assert!(script.is_p2pkh());
        assert_eq!(script.p2pkh_hash().unwrap(), address.public_key_hash);
    }

    /// Signing an input without source output info fails before touching
    /// the key.
    #[test]
    fn test_sign_requires_source_output() {
        let mut tx = Transaction::new();
        tx.add_input(crate::input::TransactionInput::new([0xabu8; 32], 0));
        let unlocker = unlock(PrivateKey::new(), None);
        assert!(matches!(
            unlocker.sign(&tx, 0),
            Err(TransactionError::SigningError(_))
        ));
        assert!(unlocker.sign(&tx, 9).is_err());
    }
}
