#![deny(missing_docs)]

//! Bridge SDK - complete facade.
//!
//! Re-exports all bridge components for convenient single-crate usage.

pub use bridge_lock as lock;
pub use bridge_node as node;
pub use bridge_primitives as primitives;
pub use bridge_script as script;
pub use bridge_transaction as transaction;
