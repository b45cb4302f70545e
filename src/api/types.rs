use crate::corpus::types::VerseRecord;
use crate::recommend::types::RecommendError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

pub const WELCOME_MESSAGE: &str = "Welcome to the Bhagavad Gita Life Advisor API!";

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub query: String,
    pub recommendations: Vec<VerseRecord>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("query must be a non-empty string")]
    InvalidQuery,

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery => StatusCode::BAD_REQUEST,
            ApiError::Recommend(RecommendError::Oracle(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Recommend(RecommendError::MalformedCorpusEntry { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}
