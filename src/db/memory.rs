use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::*;
use super::repo::*;

/// Process-local storage, lost on exit.
#[derive(Default)]
pub struct MemoryRepository {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueRepo for MemoryRepository {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let mut records = self.records.write().await;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        let mut records = self.records.write().await;
        records.remove(key);
        Ok(())
    }
}

/// Wraps another repository and rejects writes while `fail_writes` is on.
/// Reads always pass through.
#[cfg(test)]
pub struct FailingRepository {
    inner: std::sync::Arc<dyn KeyValueRepo>,
    failing: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl FailingRepository {
    pub fn new(inner: std::sync::Arc<dyn KeyValueRepo>) -> Self {
        Self {
            inner,
            failing: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, std::sync::atomic::Ordering::SeqCst);
    }

    fn check(&self) -> DbResult<()> {
        if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueRepo for FailingRepository {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.check()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        self.check()?;
        self.inner.remove(key).await
    }
}
