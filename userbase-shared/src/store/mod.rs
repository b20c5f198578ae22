/// User storage abstraction
///
/// The HTTP layer talks to storage only through [`UserStore`], constructed
/// once at startup and shared by every request handler. Each method maps to
/// exactly one statement against the backing store.
///
/// # Backends
///
/// - [`PgUserStore`]: PostgreSQL via a sqlx connection pool
/// - [`MemoryUserStore`]: process-local map with the same id and uniqueness
///   rules, for tests and local experiments
///
/// # Example
///
/// ```no_run
/// use userbase_shared::models::user::UserInput;
/// use userbase_shared::store::{MemoryUserStore, UserStore};
///
/// # async fn example() -> Result<(), userbase_shared::store::StoreError> {
/// let store = MemoryUserStore::new();
/// let user = store.create(&UserInput::new("Ada", "ada@example.com")).await?;
/// assert_eq!(store.find(user.id).await?, Some(user));
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use crate::db::pool::PoolStats;
use crate::models::user::{User, UserInput};
use async_trait::async_trait;
use thiserror::Error;

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a storage backend
///
/// `Display` is the backend's own message, which the API relays verbatim.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error from the PostgreSQL driver
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Write refused because another user already holds the email
    #[error("duplicate key value violates unique constraint \"{constraint}\"")]
    UniqueViolation { constraint: String },

    /// Backend cannot be reached
    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether the error is a uniqueness violation
    ///
    /// Logged when a write is rejected; callers map every write failure the
    /// same way.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            StoreError::UniqueViolation { .. } => true,
            _ => false,
        }
    }
}

/// One-statement-per-call access to the `users` collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users ordered by ascending id
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Inserts a user; the backend assigns the id
    async fn create(&self, input: &UserInput) -> StoreResult<User>;

    /// The user with `id`, if any
    async fn find(&self, id: i32) -> StoreResult<Option<User>>;

    /// Overwrites name and email; returns the number of rows affected
    async fn update(&self, id: i32, input: &UserInput) -> StoreResult<u64>;

    /// Removes the user; returns the number of rows affected
    async fn delete(&self, id: i32) -> StoreResult<u64>;

    /// Checks the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Connection pool occupancy, for backends that pool connections
    fn pool_stats(&self) -> Option<PoolStats> {
        None
    }
}
