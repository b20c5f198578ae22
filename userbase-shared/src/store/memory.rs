/// In-memory user store
///
/// Mirrors the PostgreSQL behaviour the API depends on: ids come from a
/// monotonically increasing sequence starting at 1 and are never reused,
/// email is unique, listing is ordered by id, and update/delete report rows
/// affected instead of failing on a missing id.
///
/// The store can be switched offline, after which every call fails with
/// [`StoreError::Unavailable`]. Tests use this to exercise the error paths
/// and to prove a request never reached storage.

use super::{StoreError, StoreResult, UserStore};
use crate::models::user::{User, UserInput};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, User>,
    last_id: i32,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<Table>,
    offline: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (or succeed again)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "connection refused: store is offline".to_string(),
            ));
        }
        Ok(())
    }

    fn duplicate_email() -> StoreError {
        StoreError::UniqueViolation {
            constraint: EMAIL_CONSTRAINT.to_string(),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        self.ensure_online()?;
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn create(&self, input: &UserInput) -> StoreResult<User> {
        self.ensure_online()?;
        let mut table = self.table.write().await;

        if table.email_taken(&input.email, None) {
            return Err(Self::duplicate_email());
        }

        table.last_id += 1;
        let user = input.clone().into_user(table.last_id);
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find(&self, id: i32) -> StoreResult<Option<User>> {
        self.ensure_online()?;
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, input: &UserInput) -> StoreResult<u64> {
        self.ensure_online()?;
        let mut table = self.table.write().await;

        // UPDATE ... WHERE id = $3 touches no row, so no constraint fires
        if !table.rows.contains_key(&id) {
            return Ok(0);
        }
        if table.email_taken(&input.email, Some(id)) {
            return Err(Self::duplicate_email());
        }

        table.rows.insert(id, input.clone().into_user(id));
        Ok(1)
    }

    async fn delete(&self, id: i32) -> StoreResult<u64> {
        self.ensure_online()?;
        let removed = self.table.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.ensure_online()
    }
}
