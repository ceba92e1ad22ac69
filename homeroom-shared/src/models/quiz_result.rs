/// Quiz result model and leaderboard query
///
/// Quiz results are an append-only history: a row is written once per
/// submission and never updated or deleted. Per-user history and the global
/// leaderboard are both plain queries over this table.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE quiz_results (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     score INTEGER NOT NULL CHECK (score >= 0),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Ordering
///
/// The leaderboard orders by score descending with ascending timestamp as
/// the tie-break: at equal score, the earlier attempt ranks higher. Together
/// with the unique id this yields a stable, deterministic order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// A single persisted quiz submission
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizResult {
    /// Unique result ID (UUID v4)
    pub id: Uuid,

    /// The user who submitted this attempt
    pub user_id: Uuid,

    /// Number of correctly answered questions
    pub score: i32,

    /// Server-assigned submission timestamp
    pub created_at: DateTime<Utc>,
}

/// One leaderboard row: a result joined with its owner's email
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaderboardEntry {
    /// Email of the user who submitted the attempt
    pub email: String,

    /// Number of correctly answered questions
    pub score: i32,

    /// When the attempt was submitted
    pub created_at: DateTime<Utc>,
}

impl QuizResult {
    /// Persists a new quiz result
    ///
    /// The timestamp is assigned by the database, not the caller. This is the
    /// only write path for the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist (foreign key violation) or
    /// the database connection fails.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        user_id: Uuid,
        score: i32,
    ) -> Result<Self, sqlx::Error> {
        let result = sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO quiz_results (user_id, score)
            VALUES ($1, $2)
            RETURNING id, user_id, score, created_at
            "#,
        )
        .bind(user_id)
        .bind(score)
        .fetch_one(executor)
        .await?;

        Ok(result)
    }

    /// Lists a user's full result history, oldest first
    pub async fn list_for_user(
        executor: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let results = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, user_id, score, created_at
            FROM quiz_results
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(results)
    }

    /// Returns the top `n` results joined with their owners' emails
    ///
    /// Ordered by score descending; ties broken by earlier timestamp first,
    /// so at equal score the first attempt to reach it keeps its rank.
    pub async fn top(
        executor: impl PgExecutor<'_>,
        n: i64,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT u.email, qr.score, qr.created_at
            FROM quiz_results qr
            JOIN users u ON u.id = qr.user_id
            ORDER BY qr.score DESC, qr.created_at ASC
            LIMIT $1
            "#,
        )
        .bind(n)
        .fetch_all(executor)
        .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_result_struct() {
        let result = QuizResult {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            score: 3,
            created_at: Utc::now(),
        };

        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_leaderboard_entry_serializes() {
        let entry = LeaderboardEntry {
            email: "user@example.com".to_string(),
            score: 5,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&entry).expect("serialize");
        assert!(json.contains("user@example.com"));
    }

    // Ordering and append-only behavior are covered in tests/model_tests.rs
}
