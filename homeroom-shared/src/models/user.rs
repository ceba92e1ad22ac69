/// User model and database operations
///
/// This module provides the User model shared by the quiz and to-do
/// applications. Users can hold multiple roles via the `users_roles`
/// association table (see the `role` module).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email CITEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     active BOOLEAN NOT NULL DEFAULT TRUE,
///     confirmed_at TIMESTAMPTZ,
///     uniquifier VARCHAR(255) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # The uniquifier
///
/// Each user carries a stable opaque `uniquifier` string, generated exactly
/// once at creation and never regenerated afterwards. Session tokens name
/// the user by this string rather than by row id, so rotating it (manually,
/// in the database) invalidates all of that user's sessions at once.
///
/// # Example
///
/// ```no_run
/// use homeroom_shared::models::user::{User, CreateUser};
/// use homeroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser::new("user@example.com", "$argon2id$...")).await?;
/// println!("Created user: {}", user.id);
///
/// let found = User::find_by_email(&pool, "user@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address (case-insensitive via CITEXT)
    ///
    /// Must be unique across all users
    pub email: String,

    /// Argon2id password hash (PHC string format)
    pub password_hash: String,

    /// Whether the account may log in
    pub active: bool,

    /// When the account confirmed its email (None if never)
    pub confirmed_at: Option<DateTime<Utc>>,

    /// Stable opaque session anchor, assigned once at creation
    pub uniquifier: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (stored case-preserving, compared case-insensitively)
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Uniquifier to use; a fresh one is generated when None
    pub uniquifier: Option<String>,
}

impl CreateUser {
    /// Creates input with a generated uniquifier
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            uniquifier: None,
        }
    }
}

/// Generates a fresh uniquifier string
///
/// UUIDv4 in its hyphenated text form; opaque to everything except the
/// users table's unique constraint.
pub fn generate_uniquifier() -> String {
    Uuid::new_v4().to_string()
}

impl User {
    /// Creates a new user in the database
    ///
    /// A uniquifier is generated when `data.uniquifier` is None. Once the row
    /// is written the uniquifier is never changed by any code path in this
    /// crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the email or uniquifier already exists (unique
    /// constraint violation) or if the database connection fails. Callers map
    /// the email constraint to their DuplicateEmail error.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        data: CreateUser,
    ) -> Result<Self, sqlx::Error> {
        let uniquifier = data.uniquifier.unwrap_or_else(generate_uniquifier);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, uniquifier)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, active, confirmed_at, uniquifier, created_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(uniquifier)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, active, confirmed_at, uniquifier, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Email lookup is case-insensitive (via CITEXT column type).
    pub async fn find_by_email(
        executor: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, active, confirmed_at, uniquifier, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by their session uniquifier
    ///
    /// This is the lookup the session middleware performs on every
    /// authenticated request.
    pub async fn find_by_uniquifier(
        executor: impl PgExecutor<'_>,
        uniquifier: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, active, confirmed_at, uniquifier, created_at
            FROM users
            WHERE uniquifier = $1
            "#,
        )
        .bind(uniquifier)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Marks a user's email as confirmed
    ///
    /// No-op if the user is already confirmed.
    pub async fn confirm(executor: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET confirmed_at = NOW()
            WHERE id = $1 AND confirmed_at IS NULL
            "#,
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_defaults_uniquifier_to_none() {
        let create_user = CreateUser::new("test@example.com", "hash");

        assert_eq!(create_user.email, "test@example.com");
        assert_eq!(create_user.password_hash, "hash");
        assert!(create_user.uniquifier.is_none());
    }

    #[test]
    fn test_generate_uniquifier_non_empty() {
        let uniquifier = generate_uniquifier();
        assert!(!uniquifier.is_empty());
    }

    #[test]
    fn test_generate_uniquifier_unique_per_call() {
        let a = generate_uniquifier();
        let b = generate_uniquifier();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_uniquifier_is_valid_uuid() {
        let uniquifier = generate_uniquifier();
        assert!(Uuid::parse_str(&uniquifier).is_ok());
    }

    // Integration tests for database operations are in tests/model_tests.rs
}
