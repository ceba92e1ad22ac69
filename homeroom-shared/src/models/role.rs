/// Role model and the user/role association
///
/// Roles form a many-to-many relationship with users through the
/// `users_roles` table. There is no role hierarchy; a role either is or is
/// not assigned to a user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE roles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(32) NOT NULL UNIQUE,
///     description VARCHAR(128)
/// );
///
/// CREATE TABLE users_roles (
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role_id UUID NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
///     PRIMARY KEY (user_id, role_id)
/// );
/// ```
///
/// Role names are case-sensitive: "Member" and "member" are distinct roles.
///
/// # Example
///
/// ```no_run
/// use homeroom_shared::models::role::Role;
/// use homeroom_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let role = Role::find_by_name(&pool, "member").await?.expect("seeded role");
/// Role::assign_to_user(&pool, user_id, role.id).await?;
/// assert!(Role::user_has_role(&pool, user_id, "member").await?);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// A named role that can be assigned to any number of users
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    /// Unique role ID (UUID v4)
    pub id: Uuid,

    /// Unique role name (case-sensitive)
    pub name: String,

    /// Optional human-readable description
    pub description: Option<String>,
}

/// Name of the role assigned to every account at registration
pub const DEFAULT_ROLE: &str = "member";

impl Role {
    /// Creates a new role
    ///
    /// # Errors
    ///
    /// Returns an error if the name already exists (unique constraint
    /// violation) or if the database connection fails.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await?;

        Ok(role)
    }

    /// Finds a role by its exact name
    ///
    /// The lookup is case-sensitive; the `name` column is plain VARCHAR.
    pub async fn find_by_name(
        executor: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, description
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(role)
    }

    /// Assigns a role to a user
    ///
    /// Assigning a role the user already holds is a no-op rather than an
    /// error.
    pub async fn assign_to_user(
        executor: impl PgExecutor<'_>,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, role_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Removes a role from a user
    ///
    /// # Returns
    ///
    /// True if the association existed and was removed, false otherwise
    pub async fn remove_from_user(
        executor: impl PgExecutor<'_>,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM users_roles
            WHERE user_id = $1 AND role_id = $2
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all roles held by a user, ordered by name
    pub async fn list_for_user(
        executor: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT r.id, r.name, r.description
            FROM roles r
            JOIN users_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(roles)
    }

    /// Checks whether a user holds a role with the given name
    ///
    /// The name comparison is case-sensitive, matching `find_by_name`.
    pub async fn user_has_role(
        executor: impl PgExecutor<'_>,
        user_id: Uuid,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM users_roles ur
                JOIN roles r ON r.id = ur.role_id
                WHERE ur.user_id = $1 AND r.name = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role_name() {
        assert_eq!(DEFAULT_ROLE, "member");
    }

    #[test]
    fn test_role_struct() {
        let role = Role {
            id: Uuid::new_v4(),
            name: "admin".to_string(),
            description: Some("Site administrators".to_string()),
        };

        assert_eq!(role.name, "admin");
        assert_eq!(role.description.as_deref(), Some("Site administrators"));
    }

    // Integration tests for database operations are in tests/model_tests.rs
}
