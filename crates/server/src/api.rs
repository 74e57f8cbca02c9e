//! HTTP endpoints of a node.
//!
//! | Method | Path                | Purpose                              |
//! |--------|---------------------|--------------------------------------|
//! | POST   | `/transactions/new` | queue a transaction                  |
//! | GET    | `/mine`             | forge the next block                 |
//! | GET    | `/chain`            | full chain (also the peer wire call) |
//! | POST   | `/nodes/register`   | add peers                            |
//! | GET    | `/nodes/resolve`    | adopt the longest valid peer chain   |

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use powchain_chain::{LedgerError, SharedLedger};
use powchain_core::{Block, Hash, Transaction};
use powchain_network::{normalize_address, ChainResponse, ConsensusResolver, PeerError, PeerRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Number};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Errors returned to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PeerError> for ApiError {
    fn from(err: PeerError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedLedger,
    pub peers: Arc<RwLock<PeerRegistry>>,
    pub resolver: Arc<ConsensusResolver>,
}

impl AppState {
    pub fn new(ledger: SharedLedger, peers: PeerRegistry, resolver: ConsensusResolver) -> Self {
        Self {
            ledger,
            peers: Arc::new(RwLock::new(peers)),
            resolver: Arc::new(resolver),
        }
    }
}

/// Build the node's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/transactions/new", post(new_transaction))
        .route("/mine", get(mine))
        .route("/chain", get(full_chain))
        .route("/nodes/register", post(register_nodes))
        .route("/nodes/resolve", get(resolve))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Number>,
}

impl TransactionRequest {
    /// Turn the request into a transaction, rejecting missing fields.
    pub fn into_transaction(self) -> Result<Transaction> {
        let mut missing = Vec::new();
        if self.sender.is_none() {
            missing.push("sender");
        }
        if self.recipient.is_none() {
            missing.push("recipient");
        }
        if self.amount.is_none() {
            missing.push("amount");
        }

        match (self.sender, self.recipient, self.amount) {
            (Some(sender), Some(recipient), Some(amount)) => {
                Ok(Transaction::new(sender, recipient, amount))
            }
            _ => Err(ApiError::Validation(format!(
                "missing values: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub message: String,
    pub index: u64,
}

async fn new_transaction(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>)> {
    let Json(request) = payload?;
    let tx = request.into_transaction()?;
    let index = state.ledger.add_transaction(tx)?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse {
            message: format!("Transaction will be added to Block {index}"),
            index,
        }),
    ))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: Hash,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged".to_string(),
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

async fn mine(State(state): State<AppState>) -> Result<Json<MineResponse>> {
    let ledger = state.ledger.clone();
    let block = tokio::task::spawn_blocking(move || ledger.mine())
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))??;

    Ok(Json(block.into()))
}

async fn full_chain(State(state): State<AppState>) -> Json<ChainResponse> {
    Json(ChainResponse::new(state.ledger.chain_snapshot()))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

async fn register_nodes(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload?;
    let nodes = request
        .nodes
        .filter(|nodes| !nodes.is_empty())
        .ok_or_else(|| ApiError::Validation("please supply a valid list of nodes".into()))?;

    // Reject the whole request before touching the registry.
    for node in &nodes {
        normalize_address(node)?;
    }

    let total_nodes = {
        let mut peers = state.peers.write();
        for node in &nodes {
            if peers.register(node)? {
                info!(peer = %node, "registered peer");
            }
        }
        peers.peers().into_iter().collect()
    };

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "New nodes have been added".to_string(),
            total_nodes,
        }),
    ))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}

async fn resolve(State(state): State<AppState>) -> Json<ResolveResponse> {
    let peers = state.peers.read().clone();
    let resolution = state.resolver.resolve(&state.ledger, &peers).await;

    let message = if resolution.replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };

    Json(ResolveResponse {
        message: message.to_string(),
        replaced: resolution.replaced,
        chain: resolution.chain,
    })
}
