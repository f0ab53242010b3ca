//! backend/src/io/rest/mappers/account_mapper.rs

use shared::{AdminStatsResponse, AdminUserSummary, LoginResponse, UserInfo};

use crate::domain::admin_service::{AdminStats, UserStats};
use crate::domain::commands::account::{LoginCommand, RegisterCommand};
use crate::domain::models::account::{Session, UserAccount};

/// Mapper between account DTOs and domain models. Password hashes never
/// leave the domain.
pub struct AccountMapper;

impl AccountMapper {
    pub fn to_register_command(request: shared::RegisterRequest) -> RegisterCommand {
        RegisterCommand {
            id: request.id,
            email: request.email,
            password: request.password,
            password_confirm: request.password_confirm,
        }
    }

    pub fn to_login_command(request: shared::LoginRequest) -> LoginCommand {
        LoginCommand {
            id: request.id,
            password: request.password,
        }
    }

    pub fn to_user_info(account: &UserAccount) -> UserInfo {
        UserInfo {
            id: account.id.clone(),
            email: account.email.clone(),
            is_admin: account.is_admin,
        }
    }

    pub fn session_to_user_info(session: &Session) -> UserInfo {
        UserInfo {
            id: session.user_id.clone(),
            email: session.email.clone(),
            is_admin: session.is_admin,
        }
    }

    pub fn to_login_response(session: Session) -> LoginResponse {
        LoginResponse {
            user: Self::session_to_user_info(&session),
            login_time: session.login_time.to_rfc3339(),
            token: session.token,
        }
    }

    pub fn to_user_summary(stats: UserStats) -> AdminUserSummary {
        AdminUserSummary {
            id: stats.account.id,
            email: stats.account.email,
            gratitude_count: stats.gratitude_count,
            created_at: stats.account.created_at.to_rfc3339(),
            is_admin: stats.account.is_admin,
        }
    }

    pub fn to_admin_stats_response(stats: AdminStats) -> AdminStatsResponse {
        AdminStatsResponse {
            total_users: stats.total_users,
            total_gratitudes: stats.total_gratitudes,
            active_users: stats.active_users,
            users: stats.users.into_iter().map(Self::to_user_summary).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_login_response_carries_session_fields() {
        let session = Session {
            token: "abc".to_string(),
            user_id: "kim".to_string(),
            email: "kim@example.com".to_string(),
            is_admin: false,
            login_time: Utc::now(),
        };

        let response = AccountMapper::to_login_response(session.clone());

        assert_eq!(response.token, "abc");
        assert_eq!(response.user.id, "kim");
        assert!(!response.user.is_admin);
        assert_eq!(response.login_time, session.login_time.to_rfc3339());
    }
}
