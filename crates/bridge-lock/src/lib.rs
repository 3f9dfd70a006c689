/// Bridge SDK - operator allocation and lock/unlock orchestration.
///
/// Provides the registry interface over the ledger-chain contract, the
/// greedy allocation engine, and the orchestrators driving the lock and
/// unlock legs of the bridge.

pub mod allocation;
pub mod lock;
pub mod registry;
pub mod unlock;
pub mod units;

mod error;
pub use allocation::{allocate, AllocationPlan, AllocationStep, OperatorSnapshot};
pub use error::BridgeError;
pub use lock::{LockReceipt, LockRequest, LockRunner, LockStep};
pub use registry::{
    CollateralTerms, InMemoryRegistry, OperatorInfo, OperatorKey, OperatorRegistry,
    RegistryError, RegistryWriter, WithdrawalRequest,
};
pub use unlock::{UnlockReceipt, UnlockRequest, UnlockRunner, UnlockStep};
