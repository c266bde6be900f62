//! Recommendation endpoint handler.

use crate::api::headers::recommendation_headers;
use crate::api::{ApiError, AppState, RecommendRequest, RecommendResponse};
use crate::logging::{generate_request_id, query_preview};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

/// POST /recommend - Recommend one dish for a free-text query.
///
/// Empty (or missing) queries are rejected with 400; every other query gets
/// a dish, degraded or not.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request_id = generate_request_id();
    let span = info_span!("recommend", request_id = %request_id);

    async move {
        let Json(request) = payload?;
        let query = request.query.unwrap_or_default();
        debug!(
            query = query_preview(&query, &state.config.logging).as_deref(),
            "Recommend request received"
        );

        let recommendation = state.recommender.recommend(&query).await?;
        let headers = recommendation_headers(&request_id, &recommendation);

        Ok::<_, ApiError>(
            (headers, Json(RecommendResponse::from(recommendation))).into_response(),
        )
    }
    .instrument(span)
    .await
}
