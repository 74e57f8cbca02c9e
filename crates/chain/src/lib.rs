//! Ledger ownership and mining for powchain.
//!
//! This crate brings the chain and the pending pool together:
//! - **Ledger**: the chain of blocks, block assembly, and the mining protocol
//! - **Mempool**: transactions waiting for the next block
//! - **SharedLedger**: a lock-guarded handle for concurrent callers
//!
//! # Example
//!
//! ```rust
//! use powchain_chain::{Ledger, LedgerConfig, SharedLedger};
//! use powchain_core::Transaction;
//!
//! let ledger = SharedLedger::new(Ledger::new(LedgerConfig::with_node_id("node-a")));
//!
//! let index = ledger.add_transaction(Transaction::new("alice", "bob", 5)).unwrap();
//! assert_eq!(index, 2);
//!
//! let block = ledger.mine().unwrap();
//! assert_eq!(block.index, 2);
//! assert_eq!(block.transactions.len(), 2);
//! ```

pub mod ledger;
pub mod mempool;
pub mod shared;

// Re-export commonly used types
pub use ledger::{Ledger, LedgerConfig, LedgerError};
pub use mempool::Mempool;
pub use shared::SharedLedger;
