//! Aggregate usage statistics for the admin dashboard.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::models::account::UserAccount;
use crate::storage::traits::{GratitudeStorage, UserStorage};

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub account: UserAccount,
    pub gratitude_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_gratitudes: usize,
    /// Users with at least one record
    pub active_users: usize,
    pub users: Vec<UserStats>,
}

#[derive(Clone)]
pub struct AdminService {
    user_storage: Arc<dyn UserStorage>,
    gratitude_storage: Arc<dyn GratitudeStorage>,
}

impl AdminService {
    pub fn new(user_storage: Arc<dyn UserStorage>, gratitude_storage: Arc<dyn GratitudeStorage>) -> Self {
        Self {
            user_storage,
            gratitude_storage,
        }
    }

    /// Per-user record counts and totals, users in registration order
    pub async fn stats(&self) -> Result<AdminStats> {
        let accounts = self.user_storage.list_users().await?;

        let mut users = Vec::with_capacity(accounts.len());
        for account in accounts {
            // One unreadable file must not hide every other user's stats
            let gratitude_count = match self.gratitude_storage.load_gratitudes(&account.id).await {
                Ok(records) => records.len(),
                Err(e) => {
                    warn!("Counting 0 gratitudes for user {}: {:#}", account.id, e);
                    0
                }
            };
            users.push(UserStats {
                account,
                gratitude_count,
            });
        }

        let stats = AdminStats {
            total_users: users.len(),
            total_gratitudes: users.iter().map(|u| u.gratitude_count).sum(),
            active_users: users.iter().filter(|u| u.gratitude_count > 0).count(),
            users,
        };

        info!(
            "Computed admin stats: {} users, {} gratitudes",
            stats.total_users, stats.total_gratitudes
        );
        Ok(stats)
    }
}
