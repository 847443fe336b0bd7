use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::wordlist::Wordlist;

#[derive(Clone)]
pub struct AppState {
    pub wordlist: Arc<Wordlist>,
}

#[derive(Serialize)]
pub struct WordsResponse {
    total: u64,
    count: usize,
    words: Vec<String>,
}

#[derive(Serialize)]
pub struct DistributionResponse {
    total: u64,
    distribution: BTreeMap<String, f64>,
}

#[derive(Serialize)]
pub struct IngestResponse {
    total: u64,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/words", get(words))
        .route("/v1/distribution", get(distribution))
        .route("/v1/documents", post(ingest_document))
        .route("/v1/tokens", post(ingest_tokens))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn words(State(state): State<AppState>) -> Json<WordsResponse> {
    let mut words = state.wordlist.vocabulary();
    words.sort();
    Json(WordsResponse {
        total: state.wordlist.total(),
        count: words.len(),
        words,
    })
}

async fn distribution(State(state): State<AppState>) -> Json<DistributionResponse> {
    let distribution: BTreeMap<String, f64> =
        state.wordlist.distribution().into_iter().collect();
    Json(DistributionResponse {
        total: state.wordlist.total(),
        distribution,
    })
}

async fn ingest_document(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("document body is required"));
    }
    state.wordlist.ingest_html(&body);
    info!("ingested document of {} bytes", body.len());
    Ok(Json(IngestResponse {
        total: state.wordlist.total(),
    }))
}

async fn ingest_tokens(
    State(state): State<AppState>,
    Json(tokens): Json<Vec<String>>,
) -> Json<IngestResponse> {
    state.wordlist.ingest(&tokens);
    Json(IngestResponse {
        total: state.wordlist.total(),
    })
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}
