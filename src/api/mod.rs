//! HTTP API Module
//!
//! Exposes the recommendation engine over HTTP with axum.
//!
//! ## Endpoints
//! - `GET /`: static welcome message.
//! - `GET /recommend?query=<text>`: top verses for a free-text query.
//!
//! ## Submodules
//! - **`handlers`**: Request handlers.
//! - **`types`**: Request/response DTOs and the HTTP error mapping.

pub mod handlers;
pub mod types;


use crate::corpus::types::VerseRecord;
use crate::recommend::engine::RecommendationEngine;
use axum::routing::get;
use axum::{Extension, Router};
use handlers::{handle_home, handle_recommend};
use std::sync::Arc;

/// Process-wide, read-only state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Vec<VerseRecord>>,
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(corpus: Vec<VerseRecord>, engine: RecommendationEngine) -> Self {
        Self {
            corpus: Arc::new(corpus),
            engine: Arc::new(engine),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_home))
        .route("/recommend", get(handle_recommend))
        .layer(Extension(state))
}
