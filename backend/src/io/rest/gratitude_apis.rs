//! # REST API for Gratitude Records
//!
//! CRUD on the caller's records plus the grouped-by-benefactor view.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::info;
use shared::SaveGratitudeRequest;

use crate::io::rest::auth::{error_response, require_session};
use crate::io::rest::mappers::GratitudeMapper;
use crate::AppState;

/// Create a router for gratitude related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_gratitudes).post(create_gratitude))
        .route("/groups", get(list_groups))
        .route("/:id", put(update_gratitude).delete(delete_gratitude))
}

pub async fn list_gratitudes(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/gratitudes");
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.gratitude_service.list(&session.user_id).await {
        Ok(records) => (StatusCode::OK, Json(GratitudeMapper::to_gratitude_list_dto(records))).into_response(),
        Err(e) => error_response("list gratitudes", e),
    }
}

pub async fn create_gratitude(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SaveGratitudeRequest>,
) -> impl IntoResponse {
    info!("POST /api/gratitudes");
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let command = GratitudeMapper::to_save_command(request);
    match state.gratitude_service.create(&session.user_id, command).await {
        Ok(record) => {
            let response = GratitudeMapper::to_gratitude_response_dto(record, "Gratitude saved");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("create gratitude", e),
    }
}

pub async fn update_gratitude(
    State(state): State<AppState>,
    Path(gratitude_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<SaveGratitudeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/gratitudes/{}", gratitude_id);
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let command = GratitudeMapper::to_save_command(request);
    match state
        .gratitude_service
        .update(&session.user_id, &gratitude_id, command)
        .await
    {
        Ok(record) => {
            let response = GratitudeMapper::to_gratitude_response_dto(record, "Gratitude updated");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update gratitude", e),
    }
}

pub async fn delete_gratitude(
    State(state): State<AppState>,
    Path(gratitude_id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("DELETE /api/gratitudes/{}", gratitude_id);
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.gratitude_service.delete(&session.user_id, &gratitude_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete gratitude", e),
    }
}

/// Records grouped by benefactor, in first-seen order
pub async fn list_groups(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/gratitudes/groups");
    let session = match require_session(&state, &headers).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.gratitude_service.groups(&session.user_id).await {
        Ok(groups) => (StatusCode::OK, Json(GratitudeMapper::to_group_list_dto(groups))).into_response(),
        Err(e) => error_response("group gratitudes", e),
    }
}
