//! HTTP node for powchain.
//!
//! Wires a [`SharedLedger`], a [`PeerRegistry`] and a [`ConsensusResolver`]
//! behind an axum router. The binary in `main.rs` adds argument parsing and
//! logging on top.

pub mod api;
pub mod config;

pub use api::{router, ApiError, AppState};
pub use config::NodeArgs;

use anyhow::Context;
use powchain_chain::{Ledger, SharedLedger};
use powchain_network::{ConsensusResolver, PeerRegistry};
use tracing::info;

/// Build the node state described by `args`, registering its startup peers.
pub fn build_state(args: &NodeArgs) -> anyhow::Result<AppState> {
    let ledger = SharedLedger::new(Ledger::new(args.ledger_config()));

    let mut peers = PeerRegistry::with_local_address(&args.public_address())
        .context("invalid public address")?;
    for peer in &args.peers {
        peers
            .register(peer)
            .with_context(|| format!("invalid peer address: {peer}"))?;
    }

    let resolver = ConsensusResolver::http(args.resolver_config())
        .context("failed to build peer HTTP client")?;

    info!(
        node_id = %ledger.node_id(),
        public_address = %args.public_address(),
        peers = peers.len(),
        "node state ready"
    );

    Ok(AppState::new(ledger, peers, resolver))
}
