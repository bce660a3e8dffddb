use async_trait::async_trait;

use super::model::*;

/// Durable string-to-string storage. Every write replaces the whole
/// record stored under the key.
#[async_trait]
pub trait KeyValueRepo: Send + Sync {
    async fn get(&self, key: &str) -> DbResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;
    async fn remove(&self, key: &str) -> DbResult<()>;
}
