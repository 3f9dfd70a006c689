//! Greedy capacity-aware allocation of a requested amount across
//! operators.
//!
//! The walk visits operators in registry order, takes as much as each
//! active operator can receive, and stops once the remainder drops below
//! the minimum increment. This is deliberately a single greedy pass with
//! no backtracking: it is simple and deterministic, not capacity-optimal,
//! and its ordering must match the registry's own operator indexing so
//! runs are reproducible.

use crate::error::BridgeError;
use crate::registry::{CollateralTerms, OperatorInfo, OperatorKey};

/// A registry snapshot handed to the allocation engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorSnapshot {
    /// The operator's registry slot.
    pub key: OperatorKey,
    /// The operator's record at snapshot time.
    pub info: OperatorInfo,
}

/// One `(operator, amount)` pair of an allocation plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocationStep {
    /// The receiving operator's public key hash.
    pub operator: [u8; 20],
    /// The strictly positive amount allocated to this operator.
    pub amount: u64,
}

/// An ordered sequence of allocation steps.
#[derive(Clone, Debug)]
pub struct AllocationPlan {
    /// The amount the caller asked to allocate.
    pub requested: u64,
    /// The dust threshold the walk stopped at.
    pub min_increment: u64,
    steps: Vec<AllocationStep>,
}

impl AllocationPlan {
    /// The plan's steps, in registry order.
    pub fn steps(&self) -> &[AllocationStep] {
        &self.steps
    }

    /// The sum of all step amounts; never exceeds `requested`.
    pub fn allocated(&self) -> u64 {
        self.steps.iter().map(|s| s.amount).sum()
    }

    /// The amount left unallocated.
    pub fn shortfall(&self) -> u64 {
        self.requested - self.allocated()
    }

    /// Whether the plan reached the target within the dust tolerance.
    pub fn is_complete(&self) -> bool {
        self.shortfall() < self.min_increment.max(1)
    }
}

/// The amount one operator absorbs under the greedy rule.
///
/// Operators whose capacity is below the minimum increment never produce
/// a step, not even a zero-sized one.
pub(crate) fn operator_step(remaining: u64, capacity: u64, min_increment: u64) -> Option<u64> {
    if capacity == 0 || capacity < min_increment {
        return None;
    }
    Some(remaining.min(capacity))
}

/// Whether the allocation walk should keep visiting operators.
pub(crate) fn walk_continues(remaining: u64, min_increment: u64) -> bool {
    remaining > 0 && remaining >= min_increment
}

/// Split `requested` across `operators` in registry order.
///
/// Inactive operators are skipped; each active operator's capacity is
/// derived from `terms`. The walk stops when the remainder reaches zero,
/// falls below `min_increment` (the dust remainder is accepted), or the
/// operator sequence is exhausted.
///
/// Fails with `InsufficientCapacity` only when nothing at all could be
/// allocated; a partially filled plan is returned as `Ok` and reports its
/// own [`shortfall`](AllocationPlan::shortfall).
pub fn allocate(
    requested: u64,
    min_increment: u64,
    operators: &[OperatorSnapshot],
    terms: &CollateralTerms,
) -> Result<AllocationPlan, BridgeError> {
    let mut steps = Vec::new();
    let mut remaining = requested;

    for operator in operators {
        if !walk_continues(remaining, min_increment) {
            break;
        }
        if !operator.key.active {
            continue;
        }
        let capacity = terms.receivable_capacity(&operator.info);
        let Some(amount) = operator_step(remaining, capacity, min_increment) else {
            continue;
        };
        steps.push(AllocationStep {
            operator: operator.key.public_key_hash,
            amount,
        });
        remaining -= amount;
    }

    if steps.is_empty() {
        return Err(BridgeError::InsufficientCapacity { requested });
    }

    Ok(AllocationPlan {
        requested,
        min_increment,
        steps,
    })
}
