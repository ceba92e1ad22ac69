/// To-do item model
///
/// Every operation on this table is scoped by owner: a task belonging to a
/// different user is indistinguishable from a task that does not exist. The
/// completion flag has exactly two states and `toggle` is the only
/// transition between them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// A single to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoItem {
    /// Unique item ID (UUID v4)
    pub id: Uuid,

    /// The user this item belongs to
    pub owner_id: Uuid,

    /// Item text, non-empty after trimming
    pub title: String,

    /// Whether the item has been checked off
    pub completed: bool,

    /// When the item was created
    pub created_at: DateTime<Utc>,
}

/// Completion filter for task listings
///
/// The three filters partition an owner's collection: `Completed` and
/// `NotCompleted` are complements and `All` is their union.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    /// No completion constraint
    #[default]
    All,

    /// Only items with completed = true
    Completed,

    /// Only items with completed = false
    NotCompleted,
}

impl TaskFilter {
    /// Parses a query-string value, falling back to `All`
    ///
    /// Missing and unrecognized values both mean "no filter".
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("completed") => TaskFilter::Completed,
            Some("not_completed") => TaskFilter::NotCompleted,
            _ => TaskFilter::All,
        }
    }

    /// The completion constraint this filter imposes, if any
    fn completed_constraint(self) -> Option<bool> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Completed => Some(true),
            TaskFilter::NotCompleted => Some(false),
        }
    }

    /// Query-string form of this filter
    pub fn as_str(self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Completed => "completed",
            TaskFilter::NotCompleted => "not_completed",
        }
    }
}

/// Trims a submitted title, rejecting titles that trim to nothing
///
/// Returns the trimmed title; None means the submission was empty or
/// whitespace-only and no task must be created.
pub fn normalize_title(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

impl TodoItem {
    /// Creates a new to-do item for the given owner
    ///
    /// Callers must pass an already-normalized title (see `normalize_title`);
    /// the store does not re-validate.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        owner_id: Uuid,
        title: &str,
    ) -> Result<Self, sqlx::Error> {
        let item = sqlx::query_as::<_, TodoItem>(
            r#"
            INSERT INTO todos (owner_id, title)
            VALUES ($1, $2)
            RETURNING id, owner_id, title, completed, created_at
            "#,
        )
        .bind(owner_id)
        .bind(title)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    /// Lists an owner's items matching the filter, oldest first
    pub async fn list_for_owner(
        executor: impl PgExecutor<'_>,
        owner_id: Uuid,
        filter: TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let items = sqlx::query_as::<_, TodoItem>(
            r#"
            SELECT id, owner_id, title, completed, created_at
            FROM todos
            WHERE owner_id = $1
              AND ($2::boolean IS NULL OR completed = $2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .bind(filter.completed_constraint())
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    /// Flips the completion flag of an owned item
    ///
    /// # Returns
    ///
    /// The updated item, or None when no item with that id is owned by
    /// `owner_id`, whether because it does not exist or belongs to someone
    /// else.
    pub async fn toggle(
        executor: impl PgExecutor<'_>,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, TodoItem>(
            r#"
            UPDATE todos
            SET completed = NOT completed
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, completed, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?;

        Ok(item)
    }

    /// Permanently removes an owned item
    ///
    /// # Returns
    ///
    /// True if a row was deleted; false under the same conditions `toggle`
    /// returns None.
    pub async fn delete(
        executor: impl PgExecutor<'_>,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_param() {
        assert_eq!(TaskFilter::from_param(None), TaskFilter::All);
        assert_eq!(TaskFilter::from_param(Some("all")), TaskFilter::All);
        assert_eq!(
            TaskFilter::from_param(Some("completed")),
            TaskFilter::Completed
        );
        assert_eq!(
            TaskFilter::from_param(Some("not_completed")),
            TaskFilter::NotCompleted
        );
    }

    #[test]
    fn test_filter_from_param_unrecognized_falls_back_to_all() {
        assert_eq!(TaskFilter::from_param(Some("done")), TaskFilter::All);
        assert_eq!(TaskFilter::from_param(Some("")), TaskFilter::All);
        assert_eq!(TaskFilter::from_param(Some("COMPLETED")), TaskFilter::All);
    }

    #[test]
    fn test_filter_round_trips_through_as_str() {
        for filter in [TaskFilter::All, TaskFilter::Completed, TaskFilter::NotCompleted] {
            assert_eq!(TaskFilter::from_param(Some(filter.as_str())), filter);
        }
    }

    #[test]
    fn test_normalize_title_trims() {
        assert_eq!(normalize_title(" Buy milk "), Some("Buy milk"));
        assert_eq!(normalize_title("Buy milk"), Some("Buy milk"));
    }

    #[test]
    fn test_normalize_title_rejects_empty() {
        assert_eq!(normalize_title(""), None);
        assert_eq!(normalize_title("   "), None);
        assert_eq!(normalize_title("\t\n"), None);
    }

    // Ownership scoping, toggling, and the filter partition are covered in
    // tests/model_tests.rs
}
