/// Bridge SDK - transaction building, signing, and serialization.
///
/// Provides the transaction wire model, the legacy signature hash, the
/// P2PKH and data-carrier script templates, and the lock-transaction
/// builder that chains change outputs across allocation steps.

pub mod builder;
pub mod input;
pub mod output;
pub mod sighash;
pub mod template;
pub mod transaction;

mod error;
pub use builder::{build_lock_transaction, FeePolicy, SignedTransaction, Utxo};
pub use error::TransactionError;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use transaction::Transaction;

#[cfg(test)]
mod tests;
