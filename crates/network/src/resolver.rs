//! Longest-valid-chain resolution.
//!
//! Every known peer is asked for its chain at once, each request bounded by
//! its own timeout. A peer's chain wins only if it is strictly longer than
//! the best seen so far and passes [`ChainValidator`]; a tie never displaces
//! the local chain. Peers that fail in any way are skipped.
//!
//! There is no finality here: anyone able to out-mine the network can
//! rewrite history, and the first block of an adopted chain is trusted
//! without being checked against our own genesis.

use crate::error::{PeerError, Result};
use crate::fetcher::{ChainFetcher, HttpChainFetcher};
use crate::peers::PeerRegistry;
use crate::wire::ChainResponse;
use futures::future::join_all;
use powchain_chain::SharedLedger;
use powchain_consensus::ChainValidator;
use powchain_core::Block;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// How long a single peer may take to deliver its chain.
    pub request_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// Outcome of a resolution round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the local chain was replaced.
    pub replaced: bool,
    /// The chain that is current after resolution.
    pub chain: Vec<Block>,
}

/// Reconciles the local ledger with its peers.
pub struct ConsensusResolver {
    fetcher: Arc<dyn ChainFetcher>,
    config: ResolverConfig,
}

impl ConsensusResolver {
    /// Create a resolver using the given fetcher.
    pub fn new(fetcher: Arc<dyn ChainFetcher>, config: ResolverConfig) -> Self {
        Self { fetcher, config }
    }

    /// Create a resolver that fetches over HTTP.
    pub fn http(config: ResolverConfig) -> Result<Self> {
        let fetcher = HttpChainFetcher::new(config.request_timeout)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    /// Fetch one peer's chain, enforcing the timeout and length report.
    async fn fetch_from(&self, peer: &str) -> Result<ChainResponse> {
        let response = tokio::time::timeout(
            self.config.request_timeout,
            self.fetcher.fetch_chain(peer),
        )
        .await
        .map_err(|_| PeerError::Timeout(peer.to_string()))??;

        if !response.is_consistent() {
            return Err(PeerError::LengthMismatch {
                peer: peer.to_string(),
                reported: response.length,
                actual: response.chain.len(),
            });
        }

        Ok(response)
    }

    /// Find the longest valid peer chain strictly longer than `local_length`.
    ///
    /// Peers are queried concurrently and judged in registry order, so
    /// between equally long winners the first in that order is kept.
    pub async fn find_longest_chain(
        &self,
        local_length: usize,
        peers: &PeerRegistry,
    ) -> Option<Vec<Block>> {
        let peers: Vec<String> = peers.peers().into_iter().collect();
        let responses = join_all(peers.iter().map(|peer| self.fetch_from(peer))).await;

        let mut best_length = local_length;
        let mut best_chain = None;

        for (peer, response) in peers.iter().zip(responses) {
            let response = match response {
                Ok(response) => response,
                Err(err) => {
                    warn!(%peer, %err, "skipping unreachable peer");
                    continue;
                }
            };

            if response.length <= best_length {
                debug!(%peer, length = response.length, best_length, "peer chain not longer");
                continue;
            }

            if !ChainValidator::is_valid(&response.chain) {
                warn!(%peer, length = response.length, "peer sent an invalid chain");
                continue;
            }

            best_length = response.length;
            best_chain = Some(response.chain);
        }

        best_chain
    }

    /// Adopt the longest valid chain among the peers, if it beats ours.
    ///
    /// The ledger is only locked to read its length and to swap the chain;
    /// no lock is held while peers are being queried.
    pub async fn resolve(&self, ledger: &SharedLedger, peers: &PeerRegistry) -> Resolution {
        let local_length = ledger.len();

        let replaced = match self.find_longest_chain(local_length, peers).await {
            Some(chain) => {
                let length = chain.len();
                let replaced = ledger.replace_if_longer(chain);
                if replaced {
                    info!(old_length = local_length, new_length = length, "adopted peer chain");
                } else {
                    debug!(length, "local chain grew during resolution, keeping it");
                }
                replaced
            }
            None => false,
        };

        Resolution {
            replaced,
            chain: ledger.chain_snapshot(),
        }
    }
}
