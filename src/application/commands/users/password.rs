use crate::application::error::{ApplicationError, ApplicationResult};

pub(super) const MIN_PASSWORD_LENGTH: usize = 8;

pub(super) fn validate_password(password: &str, confirm_password: &str) -> ApplicationResult<()> {
    if password != confirm_password {
        return Err(ApplicationError::validation("passwords do not match"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApplicationError::validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}
