/// Database layer for Userbase
///
/// Only connection pooling lives here. The `users` table is provisioned
/// outside this service; row mapping and statements are in `models::user`.
///
/// # Example
///
/// ```no_run
/// use userbase_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
