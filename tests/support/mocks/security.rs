// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use office_activity_tracker::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use office_activity_tracker::domain::user::{Role, UserId};

/// Tokens starting with this prefix only carry read capabilities.
pub const READ_ONLY_PREFIX: &str = "readonly";

/// Tokens starting with this prefix expire at the fixed clock's "now".
pub const EXPIRING_PREFIX: &str = "expiring";

const TOKEN_PREFIX: &str = "test";

#[derive(Clone, Debug, Default)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Issues `test:<id>:<role>:<name>` tokens and reads them back.
#[derive(Clone, Debug, Default)]
pub struct TestTokenManager;

#[async_trait]
impl TokenManager for TestTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: format!(
                "{TOKEN_PREFIX}:{}:{}:{}",
                subject.user_id.0, subject.role, subject.user_name
            ),
            issued_at,
            expires_at: issued_at + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let invalid = || ApplicationError::unauthorized("invalid token");
        let mut parts = token.splitn(4, ':');
        let prefix = parts.next().ok_or_else(invalid)?;
        let id: i64 = parts
            .next()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(invalid)?;
        let role: Role = parts
            .next()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(invalid)?;
        let user_name = parts.next().ok_or_else(invalid)?.to_string();

        let capabilities = match prefix {
            TOKEN_PREFIX | EXPIRING_PREFIX => role.default_capabilities(),
            READ_ONLY_PREFIX => role
                .default_capabilities()
                .into_iter()
                .filter(|cap| cap.action == "read")
                .collect(),
            _ => return Err(invalid()),
        };

        let now = super::time::fixed_now();
        let expires_at = if prefix == EXPIRING_PREFIX {
            now
        } else {
            now + Duration::hours(1)
        };
        Ok(AuthenticatedUser {
            id: UserId::new(id).map_err(|_| invalid())?,
            user_name,
            role,
            capabilities,
            issued_at: now,
            expires_at,
        })
    }
}

