//! Peer networking for powchain.
//!
//! This crate reconciles a node's ledger with the rest of the network:
//! - **PeerRegistry**: known peers, normalized and deduplicated
//! - **ChainFetcher**: how a peer's chain is obtained (HTTP in production)
//! - **ConsensusResolver**: adopts the longest valid chain among peers
//!
//! # Example
//!
//! ```rust,no_run
//! use powchain_chain::{Ledger, LedgerConfig, SharedLedger};
//! use powchain_network::{ConsensusResolver, PeerRegistry, ResolverConfig};
//!
//! # async fn run() -> powchain_network::Result<()> {
//! let ledger = SharedLedger::new(Ledger::new(LedgerConfig::default()));
//!
//! let mut peers = PeerRegistry::with_local_address("127.0.0.1:5000")?;
//! peers.register("http://127.0.0.1:5001")?;
//!
//! let resolver = ConsensusResolver::http(ResolverConfig::default())?;
//! let resolution = resolver.resolve(&ledger, &peers).await;
//! println!("replaced: {}", resolution.replaced);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fetcher;
pub mod peers;
pub mod resolver;
pub mod wire;

// Re-export commonly used types
pub use error::{PeerError, Result};
pub use fetcher::{ChainFetcher, HttpChainFetcher};
pub use peers::{normalize_address, PeerRegistry};
pub use resolver::{ConsensusResolver, Resolution, ResolverConfig};
pub use wire::ChainResponse;
