//! Fetching chains from peers.

use crate::error::{PeerError, Result};
use crate::wire::ChainResponse;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Source of peer chains.
#[async_trait]
pub trait ChainFetcher: Send + Sync {
    /// Fetch the full chain held by `peer` (a `host:port` location).
    async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse>;
}

/// Fetches chains over HTTP with `GET http://{peer}/chain`.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    client: Client,
}

impl HttpChainFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse> {
        let url = format!("http://{peer}/chain");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PeerError::Status {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<ChainResponse>().await?)
    }
}
