/// Registration and login flows
///
/// Both applications authenticate the same way, so the flows live here and
/// the route handlers only deal with forms, cookies, and redirect targets.
///
/// Login failures are deliberately uniform: an unknown email, a wrong
/// password, and a deactivated account all produce `InvalidCredentials`, so
/// a response never reveals whether an address is registered.

use sqlx::PgPool;
use tracing::{info, warn};

use super::password::{self, PasswordError};
use crate::models::{
    role::{Role, DEFAULT_ROLE},
    user::{CreateUser, User},
};

/// Error type for the credential flows
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Email unknown, password wrong, or account deactivated
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration attempted with an email that is already taken
    #[error("Email address is already registered")]
    DuplicateEmail,

    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Underlying database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Registers a new account
///
/// Hashes the password, creates the user (with a freshly generated
/// uniquifier), and assigns the default member role. User creation and role
/// assignment run in one transaction: a failure in either leaves no partial
/// account behind.
///
/// # Errors
///
/// - `CredentialError::DuplicateEmail` when the email is already registered
/// - `CredentialError::Password` / `CredentialError::Database` on
///   infrastructure failures
pub async fn register(pool: &PgPool, email: &str, password: &str) -> Result<User, CredentialError> {
    let password_hash = password::hash_password(password)?;

    let mut tx = pool.begin().await?;

    let user = User::create(&mut *tx, CreateUser::new(email, password_hash))
        .await
        .map_err(|e| {
            if is_email_unique_violation(&e) {
                CredentialError::DuplicateEmail
            } else {
                CredentialError::Database(e)
            }
        })?;

    match Role::find_by_name(&mut *tx, DEFAULT_ROLE).await? {
        Some(role) => Role::assign_to_user(&mut *tx, user.id, role.id).await?,
        // The member role is seeded by migrations; only a hand-edited
        // database gets here.
        None => warn!(role = DEFAULT_ROLE, "Default role missing, skipping assignment"),
    }

    tx.commit().await?;

    info!(user_id = %user.id, "Registered new user");
    Ok(user)
}

/// Authenticates a login attempt
///
/// # Errors
///
/// `CredentialError::InvalidCredentials` on any mismatch, without revealing
/// which check failed.
pub async fn authenticate(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<User, CredentialError> {
    let user = User::find_by_email(pool, email)
        .await?
        .ok_or(CredentialError::InvalidCredentials)?;

    if !password::verify_password(password, &user.password_hash)? {
        return Err(CredentialError::InvalidCredentials);
    }

    if !user.active {
        return Err(CredentialError::InvalidCredentials);
    }

    info!(user_id = %user.id, "User logged in");
    Ok(user)
}

/// Checks whether a sqlx error is the unique constraint on users.email
fn is_email_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .constraint()
            .is_some_and(|constraint| constraint.contains("email")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_email_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn test_credential_error_messages_are_generic() {
        // The login failure message must not hint at which check failed
        assert_eq!(
            CredentialError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    // The full register/authenticate flows need a database and are covered
    // in tests/model_tests.rs
}
