/// PostgreSQL-backed user store
///
/// A thin adapter from [`UserStore`] onto the statements in
/// [`crate::models::user`]. The pool is cheap to clone and safe to share
/// across concurrent requests.

use super::{StoreResult, UserStore};
use crate::db::pool::{self, PoolStats};
use crate::models::user::{User, UserInput};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn create(&self, input: &UserInput) -> StoreResult<User> {
        Ok(User::create(&self.pool, input).await?)
    }

    async fn find(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: i32, input: &UserInput) -> StoreResult<u64> {
        Ok(User::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: i32) -> StoreResult<u64> {
        Ok(User::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }

    fn pool_stats(&self) -> Option<PoolStats> {
        Some(pool::get_pool_stats(&self.pool))
    }
}
