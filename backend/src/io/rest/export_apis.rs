//! # REST API for Export and Import
//!
//! The export is a pretty-printed JSON array of the caller's records; the
//! import takes the same array back.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Local;
use log::info;
use shared::{GratitudeRecord, ImportGratitudesResponse};

use crate::io::rest::auth::{error_response, require_session};
use crate::io::rest::mappers::GratitudeMapper;
use crate::AppState;

/// Create a router for export/import APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(export_gratitudes))
        .route("/import", post(import_gratitudes))
}

pub async fn export_gratitudes(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/export");
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.gratitude_service.export(&session.user_id).await {
        Ok(json) => {
            let disposition = format!(
                "attachment; filename=\"gratitudes_{}.json\"",
                Local::now().format("%Y-%m-%d")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                json,
            )
                .into_response()
        }
        Err(e) => error_response("export gratitudes", e),
    }
}

pub async fn import_gratitudes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(records): Json<Vec<GratitudeRecord>>,
) -> impl IntoResponse {
    info!("POST /api/import - {} records", records.len());
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let commands = records.into_iter().map(GratitudeMapper::to_import_command).collect();
    match state.gratitude_service.import(&session.user_id, commands).await {
        Ok(imported_count) => {
            let response = ImportGratitudesResponse {
                imported_count,
                success_message: format!("Imported {} gratitudes", imported_count),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("import gratitudes", e),
    }
}
