//! Proof of Work puzzle.
//!
//! A proof is valid for the previous block's proof when the hash of the two
//! numbers written out in decimal and concatenated starts with `DIFFICULTY`
//! zero hex digits. Checking a proof costs one hash; finding one takes about
//! 16^DIFFICULTY attempts. Difficulty is fixed for every node on the network.

use powchain_core::{hash, Hash};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Number of leading zero hex digits a valid proof hash must have.
pub const DIFFICULTY: usize = 4;

/// How many candidates are tried between cancellation checks.
const CANCEL_POLL_INTERVAL: u64 = 1024;

/// Shared flag used to stop an in-flight proof search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every search holding a clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Proof of Work solver and verifier.
pub struct ProofOfWork;

impl ProofOfWork {
    /// Hash of `last_proof` and `proof` rendered in decimal and concatenated.
    pub fn proof_hash(last_proof: u64, proof: u64) -> Hash {
        let guess = format!("{last_proof}{proof}");
        hash(guess.as_bytes())
    }

    /// Check whether `proof` solves the puzzle posed by `last_proof`.
    pub fn is_valid(last_proof: u64, proof: u64) -> bool {
        Self::proof_hash(last_proof, proof).leading_zero_nibbles() >= DIFFICULTY
    }

    /// Find the smallest proof that solves the puzzle for `last_proof`.
    pub fn solve(last_proof: u64) -> u64 {
        let mut proof = 0;
        while !Self::is_valid(last_proof, proof) {
            proof += 1;
        }
        proof
    }

    /// Same search as [`ProofOfWork::solve`], giving up once `cancel` fires.
    ///
    /// Returns `None` if the search was cancelled before a proof was found.
    pub fn solve_cancellable(last_proof: u64, cancel: &CancelToken) -> Option<u64> {
        let mut proof = 0;
        loop {
            if proof % CANCEL_POLL_INTERVAL == 0 && cancel.is_cancelled() {
                return None;
            }
            if Self::is_valid(last_proof, proof) {
                return Some(proof);
            }
            proof += 1;
        }
    }
}
