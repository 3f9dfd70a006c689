//! The unlock orchestrator: wrapped balance in, deposit-chain value out.
//!
//! Redemption mirrors the lock walk: operators are visited in registry
//! order and each one with enough available balance is asked, through the
//! registry's write interface, to pay part of the requested value to the
//! destination address. No deposit-chain transaction is built here; the
//! operators construct and broadcast their own payout transactions.

use bridge_primitives::Network;
use bridge_script::Address;
use tracing::{info, warn};

use crate::error::BridgeError;
use crate::registry::{OperatorRegistry, RegistryWriter};
use crate::units::format_coin;

/// Everything an unlock run needs from the caller.
#[derive(Clone, Debug)]
pub struct UnlockRequest {
    /// Amount of wrapped base units to redeem.
    pub value: u64,
    /// Deposit-chain address receiving the redeemed value.
    pub destination: String,
}

/// One accepted withdrawal request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlockStep {
    /// The operator asked to pay out.
    pub operator: [u8; 20],
    /// Amount requested from this operator.
    pub amount: u64,
}

/// The outcome of a successful unlock run.
#[derive(Clone, Debug)]
pub struct UnlockReceipt {
    /// The amount the caller asked to redeem.
    pub requested: u64,
    /// The total amount actually requested from operators.
    pub unlocked: u64,
    /// The accepted steps, in registry order.
    pub steps: Vec<UnlockStep>,
}

/// Orchestrates unlock runs against a registry.
#[derive(Debug)]
pub struct UnlockRunner<'a, R, W> {
    registry: &'a R,
    writer: &'a W,
    network: Network,
}

impl<'a, R, W> UnlockRunner<'a, R, W>
where
    R: OperatorRegistry + Sync,
    W: RegistryWriter + Sync,
{
    /// Create a runner for the given network.
    pub fn new(registry: &'a R, writer: &'a W, network: Network) -> Self {
        UnlockRunner {
            registry,
            writer,
            network,
        }
    }

    /// Execute one unlock run.
    ///
    /// The destination address must decode under the selected network's
    /// parameters. Any failure aborts immediately with the operator in
    /// progress attached; withdrawal requests already written stay
    /// written.
    pub async fn run(&self, request: UnlockRequest) -> Result<UnlockReceipt, BridgeError> {
        if request.value == 0 {
            return Err(BridgeError::Validation(
                "value to unlock must be greater than zero".to_string(),
            ));
        }

        let min_unlock = self.registry.min_unlock_value().await?;
        if request.value < min_unlock {
            return Err(BridgeError::Validation(format!(
                "value to unlock {} is below the registry minimum {}",
                request.value, min_unlock
            )));
        }

        let destination = Address::from_string(&request.destination, self.network)?;

        info!(
            value = %format_coin(request.value),
            destination = %destination,
            "initiating unlock"
        );

        let operator_count = self.registry.operator_count().await?;
        let mut unlocked = 0u64;
        let mut steps = Vec::new();

        for index in 0..operator_count {
            let remaining = request.value - unlocked;
            if remaining == 0 {
                break;
            }

            let key = self.registry.operator_at(index).await?;
            if !key.active {
                continue;
            }

            let operator = self.registry.operator_info(&key.public_key_hash).await?;
            if operator.available_balance < min_unlock {
                continue;
            }
            let amount = remaining.min(operator.available_balance);
            let operator_hex = hex::encode(key.public_key_hash);

            info!(
                operator = %operator_hex,
                amount = %format_coin(amount),
                "requesting withdrawal from operator"
            );

            self.writer
                .request_withdrawal(&destination.public_key_hash, amount, &key.public_key_hash)
                .await
                .map_err(|source| BridgeError::Withdrawal {
                    operator: operator_hex,
                    source,
                })?;

            unlocked += amount;
            steps.push(UnlockStep {
                operator: key.public_key_hash,
                amount,
            });
        }

        if unlocked == 0 {
            return Err(BridgeError::InsufficientCapacity {
                requested: request.value,
            });
        }

        if unlocked < request.value {
            warn!(
                requested = %format_coin(request.value),
                unlocked = %format_coin(unlocked),
                "partial fill: operator balances ran out before the target"
            );
        }

        info!(total = %format_coin(unlocked), "unlock done");

        Ok(UnlockReceipt {
            requested: request.value,
            unlocked,
            steps,
        })
    }
}
