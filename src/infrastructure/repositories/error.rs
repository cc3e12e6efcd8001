use crate::domain::errors::DomainError;

const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_USER_ROLE: &str = "users_role_chk";
const CNT_ACTIVITY_SUBJECT: &str = "activities_subject_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_EMAIL => DomainError::Conflict("email is already registered".into()),
                    CNT_USER_ROLE => DomainError::Validation("unknown role".into()),
                    CNT_ACTIVITY_SUBJECT => DomainError::Validation("subject is required".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Stored enum text that no longer parses.
pub(super) fn corrupt(column: &str, err: DomainError) -> DomainError {
    DomainError::Persistence(format!("invalid {column} in database: {err}"))
}
