//! Request and response bodies for the HTTP API.

use crate::catalog::Dish;
use crate::intent::{MatchQuality, TargetMacros};
use crate::recommend::{FallbackReason, Recommendation, RecommendError, Source};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /recommend`. A missing or null query counts as empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Body returned by `POST /recommend`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendResponse {
    pub dish: Dish,
    pub llm_choice: String,
    pub reason: String,
    pub used_target_macros: TargetMacros,
    pub match_quality: MatchQuality,
    /// Names of related dishes, in display order.
    pub recommendations: Vec<String>,
    pub source: Source,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
}

impl From<Recommendation> for RecommendResponse {
    fn from(rec: Recommendation) -> Self {
        let recommendations = rec.related_names();
        Self {
            dish: rec.dish,
            llm_choice: rec.llm_choice,
            reason: rec.reason,
            used_target_macros: rec.used_target_macros,
            match_quality: rec.match_quality,
            recommendations,
            source: rec.source,
            degraded: rec.degraded,
            fallback_reason: rec.fallback_reason,
        }
    }
}

/// Body returned by `GET /dishes`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DishesResponse {
    pub dishes: Vec<Dish>,
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error with its HTTP status.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::EmptyQuery => Self::bad_request("empty query"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status().is_client_error() {
            rejection.status()
        } else {
            StatusCode::BAD_REQUEST
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
