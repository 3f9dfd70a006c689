//! The lock orchestrator: deposit-chain value in, wrapped balance out.
//!
//! Drives the outer loop of a lock run: fetch the registry constants,
//! walk the operator table in registry order, and for each operator build
//! and broadcast one transaction before moving on. The walk is
//! interleaved rather than planned wholesale because every step spends
//! the previous step's change output, which does not exist until the
//! prior transaction is signed. The live UTXO is an owned value moved
//! between steps; it is never aliased.

use bridge_node::Broadcaster;
use bridge_primitives::{Hash, Network, PrivateKey};
use bridge_script::Address;
use bridge_transaction::{build_lock_transaction, FeePolicy, Utxo};
use tracing::{debug, info, warn};

use crate::allocation::{operator_step, walk_continues};
use crate::error::BridgeError;
use crate::registry::{CollateralTerms, OperatorRegistry};
use crate::units::format_coin;

/// Everything a lock run needs from the caller.
#[derive(Clone, Debug)]
pub struct LockRequest {
    /// Amount of deposit-chain base units to lock.
    pub value: u64,
    /// Ledger-chain account credited with the wrapped balance; embedded
    /// byte-exact in each transaction's data output.
    pub recipient: [u8; 20],
    /// Key owning the input UTXO; signs every step.
    pub signing_key: PrivateKey,
    /// The UTXO funding the run. Must be a P2PKH output of the signing
    /// key.
    pub utxo: Utxo,
}

/// One completed lock step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockStep {
    /// The operator the value was deposited with.
    pub operator: [u8; 20],
    /// Amount locked with this operator.
    pub amount: u64,
    /// Id of the broadcast transaction.
    pub txid: Hash,
}

/// The outcome of a successful lock run.
///
/// `locked` can fall short of `requested` when operator capacity ran out
/// or the remainder dropped below the registry minimum; the steps record
/// what was actually broadcast.
#[derive(Clone, Debug)]
pub struct LockReceipt {
    /// The amount the caller asked to lock.
    pub requested: u64,
    /// The total amount actually locked.
    pub locked: u64,
    /// The broadcast steps, in registry order.
    pub steps: Vec<LockStep>,
}

/// Orchestrates lock runs against a registry and a chain node.
#[derive(Debug)]
pub struct LockRunner<'a, R, B> {
    registry: &'a R,
    broadcaster: &'a B,
    network: Network,
    fee_policy: FeePolicy,
}

impl<'a, R, B> LockRunner<'a, R, B>
where
    R: OperatorRegistry + Sync,
    B: Broadcaster + Sync,
{
    /// Create a runner with a zero-fee policy.
    pub fn new(registry: &'a R, broadcaster: &'a B, network: Network) -> Self {
        LockRunner {
            registry,
            broadcaster,
            network,
            fee_policy: FeePolicy::default(),
        }
    }

    /// Replace the fee policy.
    pub fn with_fee_policy(mut self, fee_policy: FeePolicy) -> Self {
        self.fee_policy = fee_policy;
        self
    }

    /// Execute one lock run.
    ///
    /// Any failure aborts immediately with the operator in progress
    /// attached; transactions already broadcast remain broadcast.
    pub async fn run(&self, request: LockRequest) -> Result<LockReceipt, BridgeError> {
        if request.value == 0 {
            return Err(BridgeError::Validation(
                "value to lock must be greater than zero".to_string(),
            ));
        }

        let min_lock = self.registry.min_lock_value().await?;
        if request.value < min_lock {
            return Err(BridgeError::Validation(format!(
                "value to lock {} is below the registry minimum {}",
                request.value, min_lock
            )));
        }

        let terms = CollateralTerms {
            price_ratio: self.registry.price_ratio().await?,
            collateral_ratio: self.registry.collateral_ratio().await?,
            collateral_fraction: self.registry.collateral_fraction().await?,
        };

        info!(value = %format_coin(request.value), "initiating lock");

        let operator_count = self.registry.operator_count().await?;
        let mut utxo = Some(request.utxo);
        let mut locked = 0u64;
        let mut steps = Vec::new();

        for index in 0..operator_count {
            let remaining = request.value - locked;
            if !walk_continues(remaining, min_lock) {
                break;
            }

            let key = self.registry.operator_at(index).await?;
            if !key.active {
                continue;
            }
            let operator_hex = hex::encode(key.public_key_hash);

            let operator = self.registry.operator_info(&key.public_key_hash).await?;
            let capacity = terms.receivable_capacity(&operator);
            let Some(amount) = operator_step(remaining, capacity, min_lock) else {
                debug!(operator = %operator_hex, capacity, "operator below minimum, skipping");
                continue;
            };

            let Some(current_utxo) = utxo.take() else {
                // The previous step spent its input exactly; without a
                // change output the chain of spendable value ends here.
                warn!(operator = %operator_hex, "change chain exhausted, stopping early");
                break;
            };

            let destination = Address::from_public_key_hash(&key.public_key_hash, self.network);
            info!(
                operator = %operator_hex,
                address = %destination,
                amount = %format_coin(amount),
                "locking with operator"
            );

            let signed = build_lock_transaction(
                &destination,
                amount,
                current_utxo,
                &request.recipient,
                &request.signing_key,
                self.network,
                &self.fee_policy,
            )?;

            self.broadcaster
                .send_raw_transaction(&signed.raw)
                .await
                .map_err(|source| BridgeError::Submit {
                    operator: operator_hex.clone(),
                    source,
                })?;

            info!(txid = %signed.txid, "sent lock transaction");

            utxo = signed.change;
            locked += amount;
            steps.push(LockStep {
                operator: key.public_key_hash,
                amount,
                txid: signed.txid,
            });
        }

        if locked == 0 {
            return Err(BridgeError::InsufficientCapacity {
                requested: request.value,
            });
        }

        if locked < request.value {
            warn!(
                requested = %format_coin(request.value),
                locked = %format_coin(locked),
                "partial fill: operator capacity ran out before the target"
            );
        }

        info!(total = %format_coin(locked), "lock done");

        Ok(LockReceipt {
            requested: request.value,
            locked,
            steps,
        })
    }
}
