//! Catalog listing endpoint handler.

use crate::api::{AppState, DishesResponse};
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /dishes - The whole menu in catalog order.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<DishesResponse> {
    Json(DishesResponse {
        dishes: state.recommender.catalog().all().to_vec(),
    })
}
