//! # Homeroom Shared Library
//!
//! This crate contains the types, persistence layer, and authentication logic
//! shared by the Homeroom quiz and to-do web applications.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, roles, quiz results, to-do items)
//! - `auth`: Password hashing, session tokens, and the session middleware
//! - `db`: Connection pool and migration runner
//! - `flash`: One-shot flash messages carried in a cookie

pub mod auth;
pub mod db;
pub mod flash;
pub mod models;

/// Current version of the Homeroom shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
