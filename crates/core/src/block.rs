//! Block structure and hashing.

use crate::hash::{canonical_json, hash, Hash};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current block record format.
pub const BLOCK_VERSION: u32 = 1;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: Hash = Hash::ZERO;

/// A block of transactions linked to its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Record format version.
    pub version: u32,
    /// 1-based position in the chain.
    pub index: u64,
    /// Unix timestamp in seconds. Informational only.
    pub timestamp: u64,
    /// Transactions in the order they entered the pending pool.
    pub transactions: Vec<Transaction>,
    /// Proof-of-work nonce.
    pub proof: u64,
    /// Hash of the previous block.
    pub previous_hash: Hash,
}

impl Block {
    /// Create a new block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: Hash,
    ) -> Self {
        Self {
            version: BLOCK_VERSION,
            index,
            timestamp: current_timestamp(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Create the genesis block.
    ///
    /// Every field is fixed, including the timestamp, so all nodes start from
    /// the same first block.
    pub fn genesis() -> Self {
        Self {
            version: BLOCK_VERSION,
            index: 1,
            timestamp: 0,
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH,
        }
    }

    /// Canonical encoding of the block: compact JSON with sorted keys.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_json(self).expect("serialization should not fail")
    }

    /// Get the block hash.
    pub fn hash(&self) -> Hash {
        hash(&self.canonical_bytes())
    }

    /// Get the number of transactions in this block.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

/// Get the current Unix timestamp, or `0` if the clock reads before 1970.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
