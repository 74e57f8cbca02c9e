//! Peer communication errors.

use thiserror::Error;

/// Errors raised while registering or talking to a peer.
///
/// During resolution these are always recovered locally: the failing peer
/// is skipped and the rest are still consulted.
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("invalid peer address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("peer {peer} answered with status {status}")]
    Status { peer: String, status: u16 },

    #[error("peer {0} did not answer in time")]
    Timeout(String),

    #[error("peer {peer} reported length {reported} but sent {actual} blocks")]
    LengthMismatch {
        peer: String,
        reported: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, PeerError>;
