//! Messages exchanged between nodes.

use powchain_core::Block;
use serde::{Deserialize, Serialize};

/// Body of `GET /chain`: a node's full chain and its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResponse {
    /// Blocks, genesis first.
    pub chain: Vec<Block>,
    /// Number of blocks the peer claims to have.
    pub length: usize,
}

impl ChainResponse {
    /// Wrap a chain, recording its length.
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len();
        Self { chain, length }
    }

    /// Check that the reported length matches the blocks sent.
    pub fn is_consistent(&self) -> bool {
        self.length == self.chain.len()
    }
}
