//! Runtime configuration read from `GRATITUDE_*` environment variables.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::storage::DataConnection;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_ADMIN_ID: &str = "admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@gratitude.local";
/// Request body cap; exports carry inline photos so this is well above axum's 2 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Credentials for the admin account created at startup
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSeed {
    pub id: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    /// `None` when no admin password is configured
    pub admin: Option<AdminSeed>,
    pub bcrypt_cost: u32,
    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = match var("GRATITUDE_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => DataConnection::default_data_directory()?,
        };

        let bind_addr = var("GRATITUDE_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("Invalid GRATITUDE_BIND_ADDR '{}'", bind_addr))?;

        let cors_origin = var("GRATITUDE_CORS_ORIGIN")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let admin = var("GRATITUDE_ADMIN_PASSWORD").map(|password| AdminSeed {
            id: var("GRATITUDE_ADMIN_ID").unwrap_or_else(|| DEFAULT_ADMIN_ID.to_string()),
            email: var("GRATITUDE_ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            password,
        });

        let bcrypt_cost = match var("GRATITUDE_BCRYPT_COST") {
            Some(cost) => cost
                .trim()
                .parse()
                .with_context(|| format!("Invalid GRATITUDE_BCRYPT_COST '{}'", cost))?,
            None => bcrypt::DEFAULT_COST,
        };

        let max_body_bytes = match var("GRATITUDE_MAX_BODY_BYTES") {
            Some(limit) => limit
                .trim()
                .parse()
                .with_context(|| format!("Invalid GRATITUDE_MAX_BODY_BYTES '{}'", limit))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            data_dir,
            bind_addr,
            cors_origin,
            admin,
            bcrypt_cost,
            max_body_bytes,
        })
    }
}
