//! Operator registry interface and capacity derivation.
//!
//! The registry is the ledger-chain contract that tracks collateralized
//! operators. The orchestrators only ever see it through the read/write
//! traits below, so the contract transport (and its consensus logic) stays
//! an external black box.

use std::future::Future;
use std::sync::Mutex;

use crate::units::SUBUNITS_PER_COIN;

/// A registry slot: an operator's key hash and whether it is active.
///
/// Slots of removed operators stay in place, so registry indices (and with
/// them the allocation walk order) are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorKey {
    /// The operator's deposit-chain public key hash.
    pub public_key_hash: [u8; 20],
    /// Whether the operator is active; inactive slots are skipped.
    pub active: bool,
}

/// Read-only snapshot of an operator's registry record.
///
/// Fetched fresh at each allocation step and never mutated locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorInfo {
    /// The operator's ledger-chain account.
    pub eth_address: [u8; 20],
    /// Deposit-chain value currently credited to the operator.
    pub available_balance: u64,
    /// Deposit-chain value in flight toward the operator.
    pub pending_balance: u64,
    /// The operator's posted collateral on the ledger chain.
    pub deposit_value: u64,
}

/// Errors reported by registry implementations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A contract call failed.
    #[error("registry call failed: {0}")]
    Call(String),

    /// No record exists for the given operator key hash.
    #[error("unknown operator {0}")]
    UnknownOperator(String),
}

/// Contract-defined pricing and collateral parameters.
///
/// Fetched once per run; they bound how much value an operator may
/// receive relative to its posted deposit.
#[derive(Clone, Copy, Debug)]
pub struct CollateralTerms {
    /// Deposit-chain/ledger-chain price ratio.
    pub price_ratio: u64,
    /// Required collateral ratio.
    pub collateral_ratio: u64,
    /// Scaling fraction applied to the collateral ratio.
    pub collateral_fraction: u64,
}

impl CollateralTerms {
    /// Derive how much more value an operator can receive.
    ///
    /// `deposit * 10^8 * fraction / price / ratio - (available + pending)`,
    /// saturating at zero. Capacity is always derived, never stored.
    pub fn receivable_capacity(&self, info: &OperatorInfo) -> u64 {
        if self.price_ratio == 0 || self.collateral_ratio == 0 {
            return 0;
        }
        let gross = info.deposit_value as u128 * SUBUNITS_PER_COIN as u128
            * self.collateral_fraction as u128
            / self.price_ratio as u128
            / self.collateral_ratio as u128;
        let committed = info.available_balance as u128 + info.pending_balance as u128;
        u64::try_from(gross.saturating_sub(committed)).unwrap_or(u64::MAX)
    }
}

/// Read interface over the operator registry contract.
pub trait OperatorRegistry {
    /// Number of registry slots (including inactive ones).
    fn operator_count(&self) -> impl Future<Output = Result<u64, RegistryError>> + Send;

    /// The slot at `index`, in contract insertion order.
    fn operator_at(
        &self,
        index: u64,
    ) -> impl Future<Output = Result<OperatorKey, RegistryError>> + Send;

    /// The record for an operator key hash.
    fn operator_info(
        &self,
        public_key_hash: &[u8; 20],
    ) -> impl Future<Output = Result<OperatorInfo, RegistryError>> + Send;

    /// Contract-defined minimum lock value.
    fn min_lock_value(&self) -> impl Future<Output = Result<u64, RegistryError>> + Send;

    /// Contract-defined minimum unlock value.
    fn min_unlock_value(&self) -> impl Future<Output = Result<u64, RegistryError>> + Send;

    /// Deposit-chain/ledger-chain price ratio.
    fn price_ratio(&self) -> impl Future<Output = Result<u64, RegistryError>> + Send;

    /// Required collateral ratio.
    fn collateral_ratio(&self) -> impl Future<Output = Result<u64, RegistryError>> + Send;

    /// Scaling fraction applied to the collateral ratio.
    fn collateral_fraction(&self) -> impl Future<Output = Result<u64, RegistryError>> + Send;
}

/// Write interface for the redemption leg.
pub trait RegistryWriter {
    /// Ask `operator` to pay `value` to `recipient` on the deposit chain.
    fn request_withdrawal(
        &self,
        recipient: &[u8; 20],
        value: u64,
        operator: &[u8; 20],
    ) -> impl Future<Output = Result<(), RegistryError>> + Send;
}

/// One recorded withdrawal request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalRequest {
    /// Deposit-chain public key hash receiving the value.
    pub recipient: [u8; 20],
    /// Requested value in base units.
    pub value: u64,
    /// The operator asked to pay out.
    pub operator: [u8; 20],
}

/// In-memory registry for tests and local tooling.
///
/// Holds a fixed operator table and records withdrawal requests instead of
/// submitting them anywhere.
#[derive(Debug)]
pub struct InMemoryRegistry {
    operators: Vec<(OperatorKey, OperatorInfo)>,
    min_lock_value: u64,
    min_unlock_value: u64,
    terms: CollateralTerms,
    withdrawals: Mutex<Vec<WithdrawalRequest>>,
}

impl InMemoryRegistry {
    /// Create an empty registry with the given minimums and terms.
    pub fn new(min_lock_value: u64, min_unlock_value: u64, terms: CollateralTerms) -> Self {
        InMemoryRegistry {
            operators: Vec::new(),
            min_lock_value,
            min_unlock_value,
            terms,
            withdrawals: Mutex::new(Vec::new()),
        }
    }

    /// Append an operator slot, preserving insertion order.
    pub fn with_operator(mut self, key: OperatorKey, info: OperatorInfo) -> Self {
        self.operators.push((key, info));
        self
    }

    /// The withdrawal requests recorded so far.
    pub fn withdrawals(&self) -> Vec<WithdrawalRequest> {
        self.withdrawals.lock().expect("registry lock poisoned").clone()
    }
}

impl OperatorRegistry for InMemoryRegistry {
    async fn operator_count(&self) -> Result<u64, RegistryError> {
        Ok(self.operators.len() as u64)
    }

    async fn operator_at(&self, index: u64) -> Result<OperatorKey, RegistryError> {
        self.operators
            .get(index as usize)
            .map(|(key, _)| *key)
            .ok_or_else(|| RegistryError::Call(format!("operator index {} out of range", index)))
    }

    async fn operator_info(&self, public_key_hash: &[u8; 20]) -> Result<OperatorInfo, RegistryError> {
        self.operators
            .iter()
            .find(|(key, _)| &key.public_key_hash == public_key_hash)
            .map(|(_, info)| *info)
            .ok_or_else(|| RegistryError::UnknownOperator(hex::encode(public_key_hash)))
    }

    async fn min_lock_value(&self) -> Result<u64, RegistryError> {
        Ok(self.min_lock_value)
    }

    async fn min_unlock_value(&self) -> Result<u64, RegistryError> {
        Ok(self.min_unlock_value)
    }

    async fn price_ratio(&self) -> Result<u64, RegistryError> {
        Ok(self.terms.price_ratio)
    }

    async fn collateral_ratio(&self) -> Result<u64, RegistryError> {
        Ok(self.terms.collateral_ratio)
    }

    async fn collateral_fraction(&self) -> Result<u64, RegistryError> {
        Ok(self.terms.collateral_fraction)
    }
}

impl RegistryWriter for InMemoryRegistry {
    async fn request_withdrawal(
        &self,
        recipient: &[u8; 20],
        value: u64,
        operator: &[u8; 20],
    ) -> Result<(), RegistryError> {
        self.withdrawals
            .lock()
            .expect("registry lock poisoned")
            .push(WithdrawalRequest {
                recipient: *recipient,
                value,
                operator: *operator,
            });
        Ok(())
    }
}
