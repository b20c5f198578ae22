//! # Userbase Shared Library
//!
//! Persistence types and storage plumbing used by the Userbase API server.
//!
//! ## Module Organization
//!
//! - `db`: PostgreSQL connection pool management
//! - `models`: The `User` row type and its SQL statements
//! - `store`: The `UserStore` trait with PostgreSQL and in-memory backends

pub mod db;
pub mod models;
pub mod store;

/// Current version of the Userbase shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
