/// Database models for Userbase
///
/// # Models
///
/// - `user`: The single managed entity and its five SQL statements
///
/// # Example
///
/// ```no_run
/// use userbase_shared::models::user::{User, UserInput};
/// use userbase_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let input = UserInput::new("Ada", "ada@example.com");
/// let user = User::create(&pool, &input).await?;
/// # Ok(())
/// # }
/// ```

pub mod user;
