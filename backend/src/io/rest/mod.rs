//! # REST API Interface Layer
//!
//! HTTP endpoints for the gratitude tracker. Handlers translate JSON DTOs
//! from `shared` into domain commands, call the services, and translate
//! domain errors into status codes.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: One module per resource, each exposing a `router()`
//! - **Authentication**: Bearer-token session lookup on every protected route
//! - **Error Handling**: Typed domain errors become 400/401/404, everything else 500
//! - **Logging**: Each request logs its method and path

pub mod admin_apis;
pub mod anniversary_apis;
pub mod auth;
pub mod auth_apis;
pub mod export_apis;
pub mod gratitude_apis;
pub mod mappers;
