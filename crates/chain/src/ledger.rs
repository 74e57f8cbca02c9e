//! The node's ledger: the chain of blocks plus the pending pool.

use crate::mempool::Mempool;
use powchain_consensus::ProofOfWork;
use powchain_core::{Block, Hash, Transaction};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("chain has no blocks")]
    EmptyChain,

    #[error("cannot replace the chain with an empty one")]
    EmptyReplacement,
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Ledger configuration.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Identity credited with mining rewards.
    pub node_id: String,
    /// Amount paid to `node_id` for each forged block.
    pub mining_reward: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            node_id: uuid::Uuid::new_v4().simple().to_string(),
            mining_reward: 1,
        }
    }
}

impl LedgerConfig {
    /// Configuration for a node with the given identity.
    pub fn with_node_id(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            ..Self::default()
        }
    }
}

/// Chain of blocks and the transactions waiting for the next one.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Blocks, genesis first.
    chain: Vec<Block>,
    /// Transactions for the next block.
    mempool: Mempool,
    /// Configuration.
    config: LedgerConfig,
}

impl Ledger {
    /// Create a ledger holding only the genesis block.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            chain: vec![Block::genesis()],
            mempool: Mempool::new(),
            config,
        }
    }

    /// Identity credited with mining rewards.
    pub fn node_id(&self) -> &str {
        &self.config.node_id
    }

    /// All blocks, genesis first.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Number of blocks in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Check if the chain has no blocks.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Transactions waiting for the next block.
    pub fn pending_transactions(&self) -> &[Transaction] {
        self.mempool.transactions()
    }

    /// Get the latest block.
    pub fn tip(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Append a block holding every pending transaction.
    ///
    /// When `previous_hash` is `None` it is computed from the current tip.
    pub fn append_block(&mut self, proof: u64, previous_hash: Option<Hash>) -> Result<Block> {
        let previous_hash = match previous_hash {
            Some(hash) => hash,
            None => self.tip()?.hash(),
        };

        let index = self.chain.len() as u64 + 1;
        let block = Block::new(index, self.mempool.take_all(), proof, previous_hash);

        debug!(
            index,
            proof,
            transactions = block.tx_count(),
            "appended block"
        );

        self.chain.push(block.clone());
        Ok(block)
    }

    /// Queue a transaction for the next block.
    ///
    /// Returns the index of the block it is expected to land in. Another
    /// block may be appended first, so the value is only advisory.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<u64> {
        let next_index = self.tip()?.index + 1;
        self.mempool.add(tx);
        Ok(next_index)
    }

    /// Pay the mining reward and append a block with the given proof.
    ///
    /// The reward is queued before the block is assembled so that it is
    /// part of the block being forged.
    pub fn forge_block(&mut self, proof: u64) -> Result<Block> {
        let previous_hash = self.tip()?.hash();

        self.mempool.add(Transaction::reward(
            self.config.node_id.clone(),
            self.config.mining_reward,
        ));

        self.append_block(proof, Some(previous_hash))
    }

    /// Solve the puzzle for the current tip and forge the next block.
    ///
    /// The search runs on the caller's thread while the ledger is borrowed;
    /// [`crate::SharedLedger::mine`] searches without holding the lock.
    pub fn mine(&mut self) -> Result<Block> {
        let last_proof = self.tip()?.proof;
        let proof = ProofOfWork::solve(last_proof);
        let block = self.forge_block(proof)?;

        info!(index = block.index, proof, "forged new block");
        Ok(block)
    }

    /// Swap the whole chain for `chain`. Pending transactions are kept.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> Result<()> {
        if chain.is_empty() {
            return Err(LedgerError::EmptyReplacement);
        }

        info!(
            old_length = self.chain.len(),
            new_length = chain.len(),
            "replacing chain"
        );

        self.chain = chain;
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}
