//! # Gratitude Tracker Backend
//!
//! All non-UI logic for the gratitude tracker.
//!
//! ## Architecture
//!
//! ```text
//! Client (browser, any HTTP client)
//!     ↓
//! IO Layer (REST API, handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, anniversary projection, benefactor grouping)
//!     ↓
//! Storage Layer (users.yaml + per-user gratitudes.json)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::domain::{AccountService, AdminService, GratitudeService};
use crate::storage::{DataConnection, GratitudeRepository, GratitudeStorage, UserRepository, UserStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub gratitude_service: GratitudeService,
    pub account_service: AccountService,
    pub admin_service: AdminService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up data directory at {}", config.data_dir.display());
    let connection = DataConnection::new(&config.data_dir)?;

    let gratitude_storage: Arc<dyn GratitudeStorage> = Arc::new(GratitudeRepository::new(connection.clone()));
    let user_storage: Arc<dyn UserStorage> = Arc::new(UserRepository::new(connection));

    info!("Setting up domain services");
    let app_state = AppState {
        gratitude_service: GratitudeService::new(gratitude_storage.clone()),
        account_service: AccountService::new(user_storage.clone(), config.bcrypt_cost),
        admin_service: AdminService::new(user_storage, gratitude_storage),
    };

    match &config.admin {
        Some(admin) => {
            app_state
                .account_service
                .ensure_admin(&admin.id, &admin.email, &admin.password)
                .await?;
        }
        None => warn!("GRATITUDE_ADMIN_PASSWORD is not set, no admin account will be created"),
    }

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/auth", io::rest::auth_apis::router())
        .nest("/gratitudes", io::rest::gratitude_apis::router())
        .nest("/anniversaries", io::rest::anniversary_apis::router())
        .nest("/admin", io::rest::admin_apis::router())
        .merge(io::rest::export_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors)
        .with_state(app_state))
}
