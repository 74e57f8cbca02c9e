//! Known peer set.
//!
//! Peers are stored by network location (`host` or `host:port`), whatever
//! form they were registered in, so `http://10.0.0.2:5000/` and
//! `10.0.0.2:5000` are the same peer. The port is always explicit: when the
//! address leaves it out, the scheme's default is stored instead.

use crate::error::{PeerError, Result};
use std::collections::BTreeSet;
use url::Url;

/// Set of peers this node reconciles with.
#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    /// Normalized peer locations.
    peers: BTreeSet<String>,
    /// This node's own location, never admitted as a peer.
    local: Option<String>,
}

impl PeerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that refuses to list `address` as a peer.
    pub fn with_local_address(address: &str) -> Result<Self> {
        Ok(Self {
            peers: BTreeSet::new(),
            local: Some(normalize_address(address)?),
        })
    }

    /// This node's own normalized location, if configured.
    pub fn local_address(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// Register a peer by URL or `host:port`.
    ///
    /// Returns `true` if the peer was not known before. Registering a known
    /// peer, or this node itself, is a no-op.
    pub fn register(&mut self, address: &str) -> Result<bool> {
        let location = normalize_address(address)?;
        if self.local.as_deref() == Some(location.as_str()) {
            return Ok(false);
        }
        Ok(self.peers.insert(location))
    }

    /// Snapshot of the current peers.
    pub fn peers(&self) -> BTreeSet<String> {
        self.peers.clone()
    }

    /// Iterate over the current peers.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.peers.iter().map(String::as_str)
    }

    /// Check whether `address` is a known peer.
    pub fn contains(&self, address: &str) -> bool {
        normalize_address(address)
            .map(|location| self.peers.contains(&location))
            .unwrap_or(false)
    }

    /// Number of known peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Check if no peers are known.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Reduce a URL or `host:port` string to its network location.
pub fn normalize_address(address: &str) -> Result<String> {
    let invalid = |reason: &str| PeerError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(invalid("address is empty"));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|err| invalid(&err.to_string()))?;
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| invalid("address has no host"))?;

    let port = url
        .port_or_known_default()
        .ok_or_else(|| invalid("address has no port"))?;

    Ok(format!("{host}:{port}"))
}
