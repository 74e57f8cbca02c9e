//! Node configuration from the command line.

use clap::Parser;
use powchain_chain::LedgerConfig;
use powchain_network::ResolverConfig;
use std::time::Duration;

/// Command-line options for `powchain-node`.
#[derive(Parser, Debug, Clone)]
#[command(name = "powchain-node")]
#[command(about = "A proof-of-work ledger node", long_about = None)]
pub struct NodeArgs {
    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,

    /// Identity credited with mining rewards (random if omitted)
    #[arg(long)]
    pub node_id: Option<String>,

    /// Address other nodes use to reach this one (defaults to 127.0.0.1:<port>)
    #[arg(long)]
    pub public_address: Option<String>,

    /// Peer to register at startup (repeatable)
    #[arg(long = "peer", value_name = "ADDRESS")]
    pub peers: Vec<String>,

    /// Seconds to wait for a peer's chain during resolution
    #[arg(long, default_value_t = 5)]
    pub peer_timeout_secs: u64,

    /// Amount credited to this node for each mined block
    #[arg(long, default_value_t = 1)]
    pub mining_reward: i64,
}

impl NodeArgs {
    /// Socket address to bind.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address this node is known by, excluded from its own peer set.
    pub fn public_address(&self) -> String {
        self.public_address
            .clone()
            .unwrap_or_else(|| format!("127.0.0.1:{}", self.port))
    }

    /// Ledger settings derived from the options.
    pub fn ledger_config(&self) -> LedgerConfig {
        let mut config = match &self.node_id {
            Some(node_id) => LedgerConfig::with_node_id(node_id.clone()),
            None => LedgerConfig::default(),
        };
        config.mining_reward = self.mining_reward;
        config
    }

    /// Resolver settings derived from the options.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            request_timeout: Duration::from_secs(self.peer_timeout_secs),
        }
    }
}
