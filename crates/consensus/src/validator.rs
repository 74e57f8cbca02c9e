//! Chain validation rules.
//!
//! A chain is valid when every block after the first links to the hash of
//! its predecessor and carries a proof solving its predecessor's puzzle.
//! The first block is trusted as-is, wherever the chain came from.

use crate::pow::ProofOfWork;
use powchain_core::Block;
use thiserror::Error;

/// Errors that can occur during validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("chain is empty")]
    EmptyChain,

    #[error("block {index} previous_hash does not match its parent")]
    InvalidPreviousHash { index: u64 },

    #[error("block {index} proof does not solve its parent's puzzle")]
    InvalidProof { index: u64 },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Chain validator.
pub struct ChainValidator;

impl ChainValidator {
    /// Validate that `block` correctly extends `parent`.
    pub fn validate_link(parent: &Block, block: &Block) -> Result<()> {
        if block.previous_hash != parent.hash() {
            return Err(ValidationError::InvalidPreviousHash { index: block.index });
        }

        if !ProofOfWork::is_valid(parent.proof, block.proof) {
            return Err(ValidationError::InvalidProof { index: block.index });
        }

        Ok(())
    }

    /// Validate a whole chain, reporting the first violation found.
    pub fn validate(chain: &[Block]) -> Result<()> {
        if chain.is_empty() {
            return Err(ValidationError::EmptyChain);
        }

        for pair in chain.windows(2) {
            Self::validate_link(&pair[0], &pair[1])?;
        }

        Ok(())
    }

    /// Check whether a chain is valid.
    pub fn is_valid(chain: &[Block]) -> bool {
        match Self::validate(chain) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, length = chain.len(), "rejected chain");
                false
            }
        }
    }
}
