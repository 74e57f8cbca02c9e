//! Lock-guarded ledger handle shared by request handlers.
//!
//! Every operation takes the ledger lock for its whole duration. Mining is
//! the exception: the proof search runs without the lock and only the final
//! commit is done under it, so transactions and chain reads are never stuck
//! behind a search.

use crate::ledger::{Ledger, Result};
use parking_lot::Mutex;
use powchain_consensus::{CancelToken, ProofOfWork};
use powchain_core::{Block, Transaction};
use std::sync::Arc;
use tracing::{debug, info};

/// Cloneable handle to a single [`Ledger`].
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
    /// Token handed to proof searches started against the current tip.
    mining: Arc<Mutex<CancelToken>>,
}

impl SharedLedger {
    /// Wrap a ledger for shared use.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
            mining: Arc::new(Mutex::new(CancelToken::new())),
        }
    }

    /// Identity credited with mining rewards.
    pub fn node_id(&self) -> String {
        self.inner.lock().node_id().to_string()
    }

    /// Number of blocks in the chain.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the chain has no blocks.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of the full chain.
    pub fn chain_snapshot(&self) -> Vec<Block> {
        self.inner.lock().chain().to_vec()
    }

    /// Copy of the pending transactions.
    pub fn pending_snapshot(&self) -> Vec<Transaction> {
        self.inner.lock().pending_transactions().to_vec()
    }

    /// Copy of the latest block.
    pub fn tip(&self) -> Result<Block> {
        self.inner.lock().tip().cloned()
    }

    /// Queue a transaction, returning the advisory next block index.
    pub fn add_transaction(&self, tx: Transaction) -> Result<u64> {
        self.inner.lock().add_transaction(tx)
    }

    /// Run the mining protocol against the current tip.
    ///
    /// Blocks the calling thread until a block is forged; run it on a
    /// blocking worker. If the tip changes while the proof is being searched
    /// for, the search starts over from the new tip.
    pub fn mine(&self) -> Result<Block> {
        loop {
            let (last_proof, tip_hash, cancel) = {
                let ledger = self.inner.lock();
                let tip = ledger.tip()?;
                (tip.proof, tip.hash(), self.mining.lock().clone())
            };

            let Some(proof) = ProofOfWork::solve_cancellable(last_proof, &cancel) else {
                debug!("proof search interrupted, restarting from new tip");
                continue;
            };

            let mut ledger = self.inner.lock();
            if ledger.tip()?.hash() != tip_hash {
                debug!("tip moved during proof search, restarting");
                continue;
            }

            let block = ledger.forge_block(proof)?;
            self.interrupt_mining();

            info!(
                index = block.index,
                proof,
                transactions = block.tx_count(),
                "forged new block"
            );
            return Ok(block);
        }
    }

    /// Replace the chain if `chain` is strictly longer than the current one.
    ///
    /// Returns whether the chain was replaced. The length is compared under
    /// the lock, so a block mined since the caller last looked is respected.
    pub fn replace_if_longer(&self, chain: Vec<Block>) -> bool {
        let mut ledger = self.inner.lock();
        if chain.len() <= ledger.len() {
            return false;
        }

        if ledger.replace_chain(chain).is_err() {
            return false;
        }

        self.interrupt_mining();
        true
    }

    /// Stop every proof search started against the previous tip.
    fn interrupt_mining(&self) {
        let mut token = self.mining.lock();
        token.cancel();
        *token = CancelToken::new();
    }
}
