//! # Storage Traits
//!
//! Storage abstractions the domain services are written against. Services
//! receive them as `Arc<dyn ...>` so the file-backed repositories can be
//! swapped for any other backend.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::account::UserAccount;
use crate::domain::models::gratitude::GratitudeRecord;

/// Whole-collection persistence of a user's gratitude records
#[async_trait]
pub trait GratitudeStorage: Send + Sync {
    /// Load every record for a user, in stored order.
    /// A user with nothing stored yet has an empty collection.
    async fn load_gratitudes(&self, user_id: &str) -> Result<Vec<GratitudeRecord>>;

    /// Replace a user's stored collection
    async fn save_gratitudes(&self, user_id: &str, records: &[GratitudeRecord]) -> Result<()>;
}

/// Persistence of user accounts
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a new account or replace the one with the same ID
    async fn store_user(&self, user: &UserAccount) -> Result<()>;

    async fn get_user(&self, user_id: &str) -> Result<Option<UserAccount>>;

    /// All accounts in registration order
    async fn list_users(&self) -> Result<Vec<UserAccount>>;
}
