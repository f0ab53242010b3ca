//! # Account Service
//!
//! Registration, login and session lookup. Accounts are persisted through
//! [`UserStorage`]; sessions are in memory only and are lost on restart.
//! A session expires
//! [`SESSION_TTL_HOURS`](crate::domain::models::account::SESSION_TTL_HOURS)
//! after login; expired sessions are dropped when looked up and on every login.

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::commands::account::{LoginCommand, RegisterCommand};
use crate::domain::models::account::{AccountError, Session, UserAccount};
use crate::storage::traits::UserStorage;

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone)]
pub struct AccountService {
    storage: Arc<dyn UserStorage>,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    bcrypt_cost: u32,
    /// Serializes the uniqueness check and insert of a registration
    register_lock: Arc<Mutex<()>>,
}

impl AccountService {
    pub fn new(storage: Arc<dyn UserStorage>, bcrypt_cost: u32) -> Self {
        Self {
            storage,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            bcrypt_cost,
            register_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create a regular (non-admin) account
    pub async fn register(&self, command: RegisterCommand) -> Result<UserAccount> {
        let id = command.id.trim().to_string();
        let email = command.email.trim().to_string();

        if id.is_empty() {
            return Err(AccountError::EmptyId.into());
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(AccountError::InvalidId.into());
        }
        if command.password != command.password_confirm {
            return Err(AccountError::PasswordMismatch.into());
        }
        if command.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort(MIN_PASSWORD_LENGTH).into());
        }
        if !email.contains('@') {
            return Err(AccountError::InvalidEmail.into());
        }

        let _guard = self.register_lock.lock().await;
        let users = self.storage.list_users().await?;
        if users.iter().any(|user| user.id.eq_ignore_ascii_case(&id)) {
            return Err(AccountError::IdTaken.into());
        }
        if users.iter().any(|user| user.email.eq_ignore_ascii_case(&email)) {
            return Err(AccountError::EmailTaken.into());
        }

        let account = UserAccount {
            id,
            email,
            password_hash: self.hash_password(command.password).await?,
            is_admin: false,
            created_at: Utc::now(),
        };
        self.storage.store_user(&account).await?;

        info!("Registered user {}", account.id);
        Ok(account)
    }

    /// Check credentials and open a session. Unknown users and wrong
    /// passwords fail the same way.
    pub async fn login(&self, command: LoginCommand) -> Result<Session> {
        let account = match self.storage.get_user(command.id.trim()).await? {
            Some(account) => account,
            None => {
                warn!("Login attempt for unknown user {}", command.id);
                return Err(AccountError::InvalidCredentials.into());
            }
        };

        if !self.verify_password(command.password, account.password_hash.clone()).await? {
            warn!("Failed login attempt for {}", account.id);
            return Err(AccountError::InvalidCredentials.into());
        }

        let now = Utc::now();
        let session = Session {
            token: Session::generate_token(),
            user_id: account.id,
            email: account.email,
            is_admin: account.is_admin,
            login_time: now,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, existing| !existing.is_expired(now));
        if sessions.len() < before {
            info!("Pruned {} expired sessions", before - sessions.len());
        }
        sessions.insert(session.token.clone(), session.clone());
        drop(sessions);

        info!("User {} logged in", session.user_id);
        Ok(session)
    }

    /// Drop a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) {
        if let Some(session) = self.sessions.write().await.remove(token) {
            info!("User {} logged out", session.user_id);
        }
    }

    pub async fn current_user(&self, token: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(token).cloned()?;
        if !session.is_expired(Utc::now()) {
            return Some(session);
        }

        self.sessions.write().await.remove(token);
        info!("Session for user {} expired", session.user_id);
        None
    }

    /// Create the admin account unless an account with that ID exists
    pub async fn ensure_admin(&self, id: &str, email: &str, password: &str) -> Result<()> {
        if let Some(existing) = self.storage.get_user(id).await? {
            if !existing.is_admin {
                warn!("Account {} exists but is not an admin", id);
            }
            return Ok(());
        }

        let account = UserAccount {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: self.hash_password(password.to_string()).await?,
            is_admin: true,
            created_at: Utc::now(),
        };
        self.storage.store_user(&account).await?;

        info!("Created admin account {}", id);
        Ok(())
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("Password hashing task failed")?
            .context("Failed to hash password")?;
        Ok(hashed)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("Password verification task failed")?;
        // A malformed stored hash never matches
        Ok(verified.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::account::SESSION_TTL_HOURS;
    use crate::storage::file::test_utils::RepositoryTestHelper;
    use crate::storage::traits::UserStorage;
    use chrono::Duration;

    const TEST_COST: u32 = 4;

    async fn setup_test() -> (AccountService, RepositoryTestHelper) {
        let helper = RepositoryTestHelper::new().await.unwrap();
        let service = AccountService::new(Arc::new(helper.user_repo.clone()), TEST_COST);
        (service, helper)
    }

    fn register_command(id: &str, email: &str) -> RegisterCommand {
        RegisterCommand {
            id: id.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret1".to_string(),
        }
    }

    fn account_error(err: &anyhow::Error) -> Option<&AccountError> {
        err.downcast_ref::<AccountError>()
    }

    #[tokio::test]
    async fn test_register_then_login() -> Result<()> {
        let (service, helper) = setup_test().await;

        let account = service.register(register_command("kim", "kim@example.com")).await?;
        assert!(!account.is_admin);
        assert_ne!(account.password_hash, "secret1");
        assert!(helper.user_repo.get_user("kim").await?.is_some());

        let session = service
            .login(LoginCommand {
                id: "kim".to_string(),
                password: "secret1".to_string(),
            })
            .await?;
        assert_eq!(session.user_id, "kim");
        assert_eq!(service.current_user(&session.token).await, Some(session));
        Ok(())
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (service, _helper) = setup_test().await;

        let err = service.register(register_command("", "a@b")).await.unwrap_err();
        assert!(matches!(account_error(&err), Some(AccountError::EmptyId)));

        let err = service.register(register_command("../kim", "a@b")).await.unwrap_err();
        assert!(matches!(account_error(&err), Some(AccountError::InvalidId)));

        let mut mismatch = register_command("kim", "kim@example.com");
        mismatch.password_confirm = "other".to_string();
        let err = service.register(mismatch).await.unwrap_err();
        assert!(matches!(account_error(&err), Some(AccountError::PasswordMismatch)));

        let mut short = register_command("kim", "kim@example.com");
        short.password = "12345".to_string();
        short.password_confirm = "12345".to_string();
        let err = service.register(short).await.unwrap_err();
        assert!(matches!(account_error(&err), Some(AccountError::PasswordTooShort(6))));

        let err = service.register(register_command("kim", "kim.example.com")).await.unwrap_err();
        assert!(matches!(account_error(&err), Some(AccountError::InvalidEmail)));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() -> Result<()> {
        let (service, _helper) = setup_test().await;
        service.register(register_command("kim", "kim@example.com")).await?;

        let err = service.register(register_command("KIM", "other@example.com")).await.unwrap_err();
        assert!(matches!(account_error(&err), Some(AccountError::IdTaken)));

        let err = service.register(register_command("lee", "Kim@Example.com")).await.unwrap_err();
        assert!(matches!(account_error(&err), Some(AccountError::EmailTaken)));
        Ok(())
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() -> Result<()> {
        let (service, _helper) = setup_test().await;
        service.register(register_command("kim", "kim@example.com")).await?;

        let wrong_password = service
            .login(LoginCommand {
                id: "kim".to_string(),
                password: "nope!!".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_user = service
            .login(LoginCommand {
                id: "ghost".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(account_error(&wrong_password), Some(AccountError::InvalidCredentials)));
        assert!(matches!(account_error(&unknown_user), Some(AccountError::InvalidCredentials)));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn test_logout_ends_session() -> Result<()> {
        let (service, _helper) = setup_test().await;
        service.register(register_command("kim", "kim@example.com")).await?;
        let session = service
            .login(LoginCommand {
                id: "kim".to_string(),
                password: "secret1".to_string(),
            })
            .await?;

        service.logout(&session.token).await;

        assert!(service.current_user(&session.token).await.is_none());
        Ok(())
    }

    fn stale_session(user_id: &str) -> Session {
        Session {
            token: Session::generate_token(),
            user_id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            is_admin: false,
            login_time: Utc::now() - Duration::hours(SESSION_TTL_HOURS + 1),
        }
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_dropped() -> Result<()> {
        let (service, _helper) = setup_test().await;
        let stale = stale_session("kim");
        service
            .sessions
            .write()
            .await
            .insert(stale.token.clone(), stale.clone());

        assert!(service.current_user(&stale.token).await.is_none());
        assert!(!service.sessions.read().await.contains_key(&stale.token));
        Ok(())
    }

    #[tokio::test]
    async fn test_login_prunes_expired_sessions() -> Result<()> {
        let (service, _helper) = setup_test().await;
        service.register(register_command("kim", "kim@example.com")).await?;
        let stale = stale_session("lee");
        service
            .sessions
            .write()
            .await
            .insert(stale.token.clone(), stale.clone());

        let session = service
            .login(LoginCommand {
                id: "kim".to_string(),
                password: "secret1".to_string(),
            })
            .await?;

        let sessions = service.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key(&session.token));
        drop(sessions);
        assert!(service.current_user(&session.token).await.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() -> Result<()> {
        let (service, helper) = setup_test().await;

        service.ensure_admin("admin", "admin@gratitude.local", "adminpw").await?;
        let first = helper.user_repo.get_user("admin").await?.unwrap();
        assert!(first.is_admin);

        service.ensure_admin("admin", "admin@gratitude.local", "changed").await?;
        let second = helper.user_repo.get_user("admin").await?.unwrap();
        assert_eq!(first, second);

        let session = service
            .login(LoginCommand {
                id: "admin".to_string(),
                password: "adminpw".to_string(),
            })
            .await?;
        assert!(session.is_admin);
        Ok(())
    }
}
