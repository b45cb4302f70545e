use super::AppState;
use super::types::{
    ApiError, RecommendParams, RecommendResponse, WELCOME_MESSAGE, WelcomeResponse,
};
use axum::extract::Query;
use axum::{Extension, Json};

pub async fn handle_home() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

pub async fn handle_recommend(
    Query(params): Query<RecommendParams>,
    Extension(state): Extension<AppState>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let query = match params.query {
        Some(q) if !q.trim().is_empty() => q,
        _ => {
            tracing::debug!("Rejected recommendation request without a query");
            return Err(ApiError::InvalidQuery);
        }
    };

    match state.engine.recommend(&query, &state.corpus).await {
        Ok(recommendations) => {
            let references: Vec<String> = recommendations.iter().map(|v| v.reference()).collect();
            tracing::info!(
                "Query '{}' -> {} recommendations [{}]",
                query,
                recommendations.len(),
                references.join(", ")
            );
            Ok(Json(RecommendResponse {
                query,
                recommendations,
            }))
        }
        Err(e) => {
            tracing::error!("Recommendation failed for '{}': {}", query, e);
            Err(e.into())
        }
    }
}
