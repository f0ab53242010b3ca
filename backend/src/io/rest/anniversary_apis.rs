//! # REST API for Anniversaries

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use log::info;
use serde::Deserialize;

use crate::io::rest::auth::{error_response, require_session};
use crate::io::rest::mappers::AnniversaryMapper;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    /// YYYY-MM-DD, defaults to the server's local date
    pub today: Option<String>,
}

/// Create a router for anniversary related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/upcoming", get(get_upcoming_anniversaries))
}

/// Anniversaries in the next 30 days plus the alert banner
pub async fn get_upcoming_anniversaries(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("GET /api/anniversaries/upcoming - today: {:?}", query.today);
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let today = match query.today.as_deref() {
        Some(literal) => match NaiveDate::parse_from_str(literal.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                return (StatusCode::BAD_REQUEST, "today must be in YYYY-MM-DD format").into_response();
            }
        },
        None => Local::now().date_naive(),
    };

    match state.gratitude_service.upcoming(&session.user_id, today).await {
        Ok(upcoming) => {
            let alert = state.gratitude_service.anniversary_service().alert_summary(&upcoming);
            let response = AnniversaryMapper::to_upcoming_response(today, upcoming, alert);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("project anniversaries", e),
    }
}
