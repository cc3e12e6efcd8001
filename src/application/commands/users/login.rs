use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, TokenSubject, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, User},
};

pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<LoginResult> {
        let user = self
            .find_and_authenticate_user(&command.email, &command.password)
            .await?;

        let token = self.token_manager.issue(TokenSubject::from(&user)).await?;
        tracing::info!(user_id = user.id.0, "user logged in");

        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    /// Every failure looks the same to the caller.
    async fn find_and_authenticate_user(
        &self,
        email: &str,
        password: &str,
    ) -> ApplicationResult<User> {
        let invalid = || ApplicationError::unauthorized("invalid credentials");

        let email = Email::new(email).map_err(|_| invalid())?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid)?;

        self.password_hasher
            .verify(password, user.password_hash.as_str())
            .await
            .map_err(|err| match err {
                ApplicationError::Infrastructure(_) => err,
                _ => invalid(),
            })?;

        Ok(user)
    }
}
