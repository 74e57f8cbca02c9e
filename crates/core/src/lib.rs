//! Core ledger primitives for powchain.
//!
//! This crate provides the fundamental types used throughout the node:
//! - Hashing and canonical encoding
//! - Transactions
//! - Blocks

pub mod block;
pub mod hash;
pub mod transaction;

// Re-export commonly used types at the crate root
pub use block::{current_timestamp, Block, BLOCK_VERSION, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
pub use hash::{canonical_json, hash, Hash, H256};
pub use transaction::{Transaction, REWARD_SENDER};
