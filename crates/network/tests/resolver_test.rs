use async_trait::async_trait;
use powchain_chain::{Ledger, LedgerConfig, SharedLedger};
use powchain_core::{Block, Hash, Transaction};
use powchain_network::{
    ChainFetcher, ChainResponse, ConsensusResolver, PeerError, PeerRegistry, ResolverConfig,
    Result,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

enum Reply {
    Chain(ChainResponse),
    Refuse,
    Hang,
}

#[derive(Default)]
struct MockFetcher {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    fn reply(mut self, peer: &str, reply: Reply) -> Self {
        self.replies.insert(peer.to_string(), reply);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainFetcher for MockFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse> {
        self.calls.lock().unwrap().push(peer.to_string());
        match self.replies.get(peer) {
            Some(Reply::Chain(response)) => Ok(response.clone()),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Err(PeerError::Timeout(peer.to_string()))
            }
            Some(Reply::Refuse) | None => Err(PeerError::Status {
                peer: peer.to_string(),
                status: 503,
            }),
        }
    }
}

/// Mine a chain of `length` blocks owned by `node_id`.
fn mined_chain(node_id: &str, length: usize) -> Vec<Block> {
    let mut ledger = Ledger::new(LedgerConfig::with_node_id(node_id));
    while ledger.len() < length {
        ledger
            .add_transaction(Transaction::new(node_id, "someone", ledger.len() as i64))
            .unwrap();
        ledger.mine().unwrap();
    }
    ledger.chain().to_vec()
}

fn local_ledger(length: usize) -> SharedLedger {
    let ledger = SharedLedger::new(Ledger::new(LedgerConfig::with_node_id("local")));
    while ledger.len() < length {
        ledger.mine().unwrap();
    }
    ledger
}

fn registry(peers: &[&str]) -> PeerRegistry {
    let mut registry = PeerRegistry::with_local_address("127.0.0.1:5000").unwrap();
    for peer in peers {
        registry.register(peer).unwrap();
    }
    registry
}

fn resolver(fetcher: Arc<MockFetcher>) -> ConsensusResolver {
    ConsensusResolver::new(
        fetcher,
        ResolverConfig {
            request_timeout: Duration::from_millis(200),
        },
    )
}

#[tokio::test]
async fn test_no_peers_keeps_local_chain() {
    let ledger = local_ledger(2);
    let before = ledger.chain_snapshot();

    let resolution = resolver(Arc::new(MockFetcher::default()))
        .resolve(&ledger, &registry(&[]))
        .await;

    assert!(!resolution.replaced);
    assert_eq!(resolution.chain, before);
}

#[tokio::test]
async fn test_shorter_or_equal_peers_never_replace() {
    let ledger = local_ledger(3);
    let before = ledger.chain_snapshot();
    let remote = mined_chain("remote", 3);

    let fetcher = Arc::new(
        MockFetcher::default()
            .reply("a:1", Reply::Chain(ChainResponse::new(remote[..2].to_vec())))
            .reply("b:1", Reply::Chain(ChainResponse::new(remote.clone())))
            .reply("c:1", Reply::Chain(ChainResponse::new(remote[..1].to_vec()))),
    );

    let resolution = resolver(fetcher)
        .resolve(&ledger, &registry(&["a:1", "b:1", "c:1"]))
        .await;

    assert!(!resolution.replaced);
    assert_eq!(resolution.chain, before);
    assert_eq!(ledger.chain_snapshot(), before);
}

#[tokio::test]
async fn test_longer_valid_chain_replaces_local() {
    let ledger = local_ledger(3);
    let remote = mined_chain("remote", 5);

    let fetcher = Arc::new(
        MockFetcher::default().reply("peer:5001", Reply::Chain(ChainResponse::new(remote.clone()))),
    );

    let resolution = resolver(fetcher)
        .resolve(&ledger, &registry(&["http://peer:5001"]))
        .await;

    assert!(resolution.replaced);
    assert_eq!(resolution.chain, remote);
    assert_eq!(ledger.chain_snapshot(), remote);
}

#[tokio::test]
async fn test_invalid_longest_chain_loses() {
    let ledger = local_ledger(3);
    let remote = mined_chain("remote", 10);

    let mut corrupted = remote.clone();
    corrupted[3].previous_hash = Hash::from_bytes([0xEE; 32]);
    let valid = remote[..5].to_vec();

    let fetcher = Arc::new(
        MockFetcher::default()
            .reply("liar:1", Reply::Chain(ChainResponse::new(corrupted)))
            .reply("honest:1", Reply::Chain(ChainResponse::new(valid.clone()))),
    );

    let resolution = resolver(fetcher)
        .resolve(&ledger, &registry(&["liar:1", "honest:1"]))
        .await;

    assert!(resolution.replaced);
    assert_eq!(resolution.chain.len(), 5);
    assert_eq!(ledger.chain_snapshot(), valid);
}

#[tokio::test]
async fn test_only_invalid_peer_changes_nothing() {
    let ledger = local_ledger(3);
    let before = ledger.chain_snapshot();

    let mut corrupted = mined_chain("remote", 6);
    let bad_proof = corrupted[4].proof + 1;
    corrupted[4].proof = bad_proof;

    let fetcher = Arc::new(
        MockFetcher::default().reply("liar:1", Reply::Chain(ChainResponse::new(corrupted))),
    );

    let resolution = resolver(fetcher)
        .resolve(&ledger, &registry(&["liar:1"]))
        .await;

    assert!(!resolution.replaced);
    assert_eq!(ledger.chain_snapshot(), before);
}

#[tokio::test]
async fn test_misreported_length_is_ignored() {
    let ledger = local_ledger(2);
    let before = ledger.chain_snapshot();
    let remote = mined_chain("remote", 3);

    let fetcher = Arc::new(MockFetcher::default().reply(
        "braggart:1",
        Reply::Chain(ChainResponse {
            chain: remote,
            length: 50,
        }),
    ));

    let resolution = resolver(fetcher)
        .resolve(&ledger, &registry(&["braggart:1"]))
        .await;

    assert!(!resolution.replaced);
    assert_eq!(ledger.chain_snapshot(), before);
}

#[tokio::test]
async fn test_unreachable_peers_do_not_block_resolution() {
    let ledger = local_ledger(1);
    let remote = mined_chain("remote", 3);

    let fetcher = Arc::new(
        MockFetcher::default()
            .reply("down:1", Reply::Refuse)
            .reply("hung:1", Reply::Hang)
            .reply("up:1", Reply::Chain(ChainResponse::new(remote.clone()))),
    );

    let started = Instant::now();
    let resolution = resolver(fetcher.clone())
        .resolve(&ledger, &registry(&["down:1", "hung:1", "up:1", "ghost:1"]))
        .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(resolution.replaced);
    assert_eq!(resolution.chain, remote);

    let mut calls = fetcher.calls();
    calls.sort();
    assert_eq!(calls, vec!["down:1", "ghost:1", "hung:1", "up:1"]);
}

#[tokio::test]
async fn test_all_peers_down_leaves_ledger_usable() {
    let ledger = local_ledger(2);

    let fetcher = Arc::new(
        MockFetcher::default()
            .reply("down:1", Reply::Refuse)
            .reply("hung:1", Reply::Hang),
    );

    let resolution = resolver(fetcher)
        .resolve(&ledger, &registry(&["down:1", "hung:1"]))
        .await;
    assert!(!resolution.replaced);

    ledger.add_transaction(Transaction::new("A", "B", 5)).unwrap();
    let block = ledger.mine().unwrap();
    assert_eq!(block.index, 3);
}

#[tokio::test]
async fn test_longest_wins_regardless_of_peer_order() {
    let long = mined_chain("long", 6);
    let short = long[..4].to_vec();

    for (first, second) in [("a:1", "b:1"), ("b:1", "a:1")] {
        let ledger = local_ledger(2);
        let fetcher = Arc::new(
            MockFetcher::default()
                .reply(first, Reply::Chain(ChainResponse::new(long.clone())))
                .reply(second, Reply::Chain(ChainResponse::new(short.clone()))),
        );

        let resolution = resolver(fetcher)
            .resolve(&ledger, &registry(&[first, second]))
            .await;

        assert!(resolution.replaced);
        assert_eq!(resolution.chain, long);
    }
}

#[tokio::test]
async fn test_find_longest_chain_respects_local_length() {
    let remote = mined_chain("remote", 4);
    let fetcher = Arc::new(
        MockFetcher::default().reply("a:1", Reply::Chain(ChainResponse::new(remote.clone()))),
    );
    let resolver = resolver(fetcher);
    let peers = registry(&["a:1"]);

    assert_eq!(resolver.find_longest_chain(3, &peers).await, Some(remote));
    assert_eq!(resolver.find_longest_chain(4, &peers).await, None);
}

#[tokio::test]
async fn test_adopted_chain_can_be_extended() {
    let ledger = local_ledger(1);
    let remote = mined_chain("remote", 3);
    let fetcher = Arc::new(
        MockFetcher::default().reply("a:1", Reply::Chain(ChainResponse::new(remote.clone()))),
    );

    resolver(fetcher).resolve(&ledger, &registry(&["a:1"])).await;
    let block = ledger.mine().unwrap();

    assert_eq!(block.index, 4);
    assert_eq!(block.previous_hash, remote[2].hash());
}
