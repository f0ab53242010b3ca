//! # File User Repository
//!
//! All accounts live in a single `users.yaml` at the root of the data
//! directory:
//!
//! ```yaml
//! - id: admin
//!   email: admin@gratitude.local
//!   password_hash: $2b$12$...
//!   is_admin: true
//!   created_at: 2024-06-01T09:00:00Z
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::fs;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::connection::DataConnection;
use crate::domain::models::account::UserAccount;
use crate::storage::traits::UserStorage;

#[derive(Clone)]
pub struct UserRepository {
    connection: DataConnection,
    /// Serializes read-modify-write cycles on users.yaml
    write_lock: Arc<Mutex<()>>,
}

impl UserRepository {
    pub fn new(connection: DataConnection) -> Self {
        Self {
            connection,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn read_users(&self) -> Result<Vec<UserAccount>> {
        let path = self.connection.users_file_path();

        if !path.exists() {
            debug!("No users file yet at {:?}", path);
            return Ok(Vec::new());
        }

        let yaml = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let users: Vec<UserAccount> = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(users)
    }

    fn write_users(&self, users: &[UserAccount]) -> Result<()> {
        let path = self.connection.users_file_path();
        let yaml = serde_yaml::to_string(users)?;
        self.connection.write_atomic(&path, &yaml)
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &UserAccount) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.read_users()?;
        match users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.write_users(&users)?;

        info!("Stored user {}", user.id);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserAccount>> {
        let users = self.read_users()?;
        Ok(users.into_iter().find(|user| user.id == user_id))
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.read_users()
    }
}
