use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        events::{ChangeEvent, ChangeKind, Collection},
        user::{Email, NewUser, PasswordHash, Role, User, UserName},
    },
};

pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub user_name: String,
}

impl UserCommandService {
    /// Self-service sign-up. The very first account becomes the office admin.
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        validate_password(&command.password, &command.confirm_password)?;
        let email = Email::new(command.email)?;
        let user_name = UserName::new(command.user_name)?;

        self.ensure_email_available(&email).await?;

        let role = if self.user_repo.count().await? == 0 {
            Role::Admin
        } else {
            Role::Staff
        };

        let user = self
            .create_and_insert_user(email, user_name, &command.password, role)
            .await?;

        tracing::info!(user_id = user.id.0, role = %user.role, "registered user");
        self.change_feed.publish(ChangeEvent::new(
            Collection::Users,
            ChangeKind::Created,
            user.id,
        ));

        Ok(user.into())
    }

    async fn ensure_email_available(&self, email: &Email) -> ApplicationResult<()> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(ApplicationError::conflict("email is already registered"));
        }
        Ok(())
    }

    async fn create_and_insert_user(
        &self,
        email: Email,
        user_name: UserName,
        password: &str,
        role: Role,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser {
            email,
            user_name,
            password_hash,
            role,
            created_at: self.clock.now(),
        };
        let user = self.user_repo.insert(new_user).await?;

        Ok(user)
    }
}
