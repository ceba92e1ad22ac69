/// Database models for Homeroom
///
/// This module contains all database models and their operations.
///
/// # Models
///
/// - `user`: User accounts and identity lookups
/// - `role`: Roles and the user/role association table
/// - `quiz_result`: Append-only quiz score history and the leaderboard query
/// - `todo`: Per-user to-do items with a completion filter
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
/// # Ok(())
/// # }
/// ```

pub mod quiz_result;
pub mod role;
pub mod todo;
pub mod user;
