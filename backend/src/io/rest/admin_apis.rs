//! # REST API for Administration

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;

use crate::io::rest::auth::{error_response, require_admin};
use crate::io::rest::mappers::AccountMapper;
use crate::AppState;

/// Create a router for admin APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}

pub async fn get_stats(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/admin/stats");
    if let Err(response) = require_admin(&state, &headers).await {
        return response;
    }

    match state.admin_service.stats().await {
        Ok(stats) => (StatusCode::OK, Json(AccountMapper::to_admin_stats_response(stats))).into_response(),
        Err(e) => error_response("compute admin stats", e),
    }
}
