//! # REST API for Accounts
//!
//! Registration, login/logout and the current user.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{LoginRequest, RegisterRequest};

use crate::io::rest::auth::{bearer_token, error_response, require_session};
use crate::io::rest::mappers::AccountMapper;
use crate::AppState;

/// Create a router for account related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/register - id: {}", request.id);

    let command = AccountMapper::to_register_command(request);
    match state.account_service.register(command).await {
        Ok(account) => (StatusCode::CREATED, Json(AccountMapper::to_user_info(&account))).into_response(),
        Err(e) => error_response("register user", e),
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/login - id: {}", request.id);

    let command = AccountMapper::to_login_command(request);
    match state.account_service.login(command).await {
        Ok(session) => (StatusCode::OK, Json(AccountMapper::to_login_response(session))).into_response(),
        Err(e) => error_response("log in", e),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("POST /api/auth/logout");

    if let Some(token) = bearer_token(&headers) {
        state.account_service.logout(token).await;
    }
    StatusCode::NO_CONTENT
}

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/auth/me");

    match require_session(&state, &headers).await {
        Ok(session) => (StatusCode::OK, Json(AccountMapper::session_to_user_info(&session))).into_response(),
        Err(response) => response,
    }
}
