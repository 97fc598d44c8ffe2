//! Simple REST API server example for the billing ledger.
//!
//! Run with: `cargo run --example server`
//!
//! ## Endpoints
//!
//! - `PUT /billingaccount/transactions` - Apply a transaction batch
//! - `GET /billingaccount/{customerId}` - Get a customer's account document
//!
//! Every request must carry an `x-conversation-id` header; requests
//! without one are rejected with 400 before reaching the ledger.
//!
//! ## Example Usage
//!
//! ```bash
//! # Apply a batch
//! curl -X PUT http://localhost:3000/billingaccount/transactions \
//!   -H "Content-Type: application/json" \
//!   -H "x-conversation-id: demo-1" \
//!   -d '{"transactions": [{"type": "Charge", "value": {"amount": "20.00", "currencyCode": "GBP"}, "customerId": "c-1", "date": "2024-03-05"}]}'
//!
//! # Get an account
//! curl http://localhost:3000/billingaccount/c-1 -H "x-conversation-id: demo-2"
//! ```

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use billing_ledger_rs::{
    CustomerAccount, CustomerId, LedgerConfig, LedgerEngine, LedgerError, ObjectStore,
    StoreProvider, StoreSettings, Transaction,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Header identifying the conversation a request belongs to.
const CONVERSATION_ID_HEADER: &str = "x-conversation-id";

// === Request/Response DTOs ===

/// Request body for applying a transaction batch.
#[derive(Debug, Deserialize)]
pub struct TransactionsRequest {
    pub transactions: Vec<Transaction>,
}

/// Response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Application State ===

/// Shared application state containing the ledger engine.
#[derive(Clone)]
pub struct AppState {
    pub engine: LedgerEngine,
}

// === Error Handling ===

/// Wrapper for converting `LedgerError` into HTTP responses.
///
/// Every ledger failure maps to a generic 500; nothing about the store
/// leaks to callers.
pub struct AppError(LedgerError);

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "internal server error".to_string(),
                code: "INTERNAL_ERROR".to_string(),
            }),
        )
            .into_response()
    }
}

// === Middleware ===

/// Rejects requests lacking the conversation id header.
async fn require_conversation_id(request: Request, next: Next) -> Response {
    if request.headers().get(CONVERSATION_ID_HEADER).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("missing required header {CONVERSATION_ID_HEADER}"),
                code: "MISSING_CONVERSATION_ID".to_string(),
            }),
        )
            .into_response();
    }
    next.run(request).await
}

// === Handlers ===

/// PUT /billingaccount/transactions - Apply and persist a batch.
async fn put_transactions(
    State(state): State<AppState>,
    Json(request): Json<TransactionsRequest>,
) -> Result<StatusCode, AppError> {
    let accounts = state.engine.apply_transactions(&request.transactions).await?;
    state.engine.save_accounts(&accounts).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /billingaccount/{customerId} - Get an account document.
///
/// An unknown customer yields an empty document, not a 404.
async fn get_account(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerAccount>, AppError> {
    let account = state
        .engine
        .customer_account(&CustomerId::from(customer_id))
        .await?;
    Ok(Json(account))
}

// === Router ===

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/billingaccount/transactions", put(put_transactions))
        .route("/billingaccount/{customer_id}", get(get_account))
        .layer(middleware::from_fn(require_conversation_id))
        .with_state(state)
}

// === Main ===

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = LedgerConfig::load().unwrap_or_else(|_| LedgerConfig {
        store: StoreSettings::default(),
        provider: StoreProvider::Memory,
    });

    let store = ObjectStore::from_config(&config.provider, &config.store)
        .expect("failed to build object store");
    let state = AppState {
        engine: LedgerEngine::new(store, config.store),
    };

    let app = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:3000").await.unwrap();
    println!("Billing ledger API running on http://127.0.0.1:3000");
    println!();
    println!("Endpoints:");
    println!("  PUT /billingaccount/transactions  - Apply a transaction batch");
    println!("  GET /billingaccount/{{customerId}}  - Get an account document");

    axum::serve(listener, app).await.unwrap();
}
