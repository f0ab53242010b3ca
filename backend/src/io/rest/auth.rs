//! Bearer-token session lookup and domain error translation shared by the
//! REST handlers.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use log::{error, warn};

use crate::domain::models::account::{AccountError, Session};
use crate::domain::models::gratitude::{GratitudeError, GratitudeValidationError};
use crate::AppState;

/// The token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller's session, or the 401 response to return
pub async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    let Some(token) = bearer_token(headers) else {
        return Err((StatusCode::UNAUTHORIZED, "Missing bearer token").into_response());
    };

    match state.account_service.current_user(token).await {
        Some(session) => Ok(session),
        None => {
            warn!("Request with unknown session token");
            Err((StatusCode::UNAUTHORIZED, "Invalid or expired session").into_response())
        }
    }
}

/// Like [`require_session`], but also answers 403 for non-admins
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<Session, Response> {
    let session = require_session(state, headers).await?;
    if !session.is_admin {
        warn!("User {} denied admin access", session.user_id);
        return Err((StatusCode::FORBIDDEN, "Admin access required").into_response());
    }
    Ok(session)
}

/// Map a service error to a status code. Typed domain errors carry their
/// own message; anything else is logged and reported as a 500.
pub fn error_response(action: &str, e: anyhow::Error) -> Response {
    if let Some(validation) = e.downcast_ref::<GratitudeValidationError>() {
        return (StatusCode::BAD_REQUEST, validation.to_string()).into_response();
    }
    if let Some(GratitudeError::NotFound(_)) = e.downcast_ref::<GratitudeError>() {
        return (StatusCode::NOT_FOUND, e.to_string()).into_response();
    }
    if let Some(account) = e.downcast_ref::<AccountError>() {
        let status = match account {
            AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        };
        return (status, account.to_string()).into_response();
    }

    error!("Failed to {}: {:#}", action, e);
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to {}", action)).into_response()
}
