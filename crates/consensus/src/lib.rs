//! Proof of Work consensus rules for powchain.
//!
//! This crate provides:
//! - The proof-of-work puzzle (solving, verification, cancellation)
//! - Chain validation (hash links and proofs between adjacent blocks)
//!
//! # Example
//!
//! ```rust
//! use powchain_consensus::{ChainValidator, ProofOfWork};
//! use powchain_core::Block;
//!
//! let genesis = Block::genesis();
//! let proof = ProofOfWork::solve(genesis.proof);
//! let next = Block::new(2, vec![], proof, genesis.hash());
//!
//! assert!(ChainValidator::is_valid(&[genesis, next]));
//! ```

pub mod pow;
pub mod validator;

// Re-export commonly used types
pub use pow::{CancelToken, ProofOfWork, DIFFICULTY};
pub use validator::{ChainValidator, ValidationError};
