use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::catalog::Movie;
use crate::db::{DbError, KeyValueRepo};
use crate::session::User;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: String,
    pub movie_id: u64,
    pub user_id: String,
    pub added_date: DateTime<Utc>,
    pub watched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchedFilter {
    #[default]
    All,
    Watched,
    ToWatch,
}

impl WatchedFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(WatchedFilter::All),
            "watched" => Some(WatchedFilter::Watched),
            "to-watch" => Some(WatchedFilter::ToWatch),
            _ => None,
        }
    }

    pub fn matches(&self, item: &WatchlistItem) -> bool {
        match self {
            WatchedFilter::All => true,
            WatchedFilter::Watched => item.watched,
            WatchedFilter::ToWatch => !item.watched,
        }
    }
}

pub fn storage_key(user_id: &str) -> String {
    format!("watchlist-{}", user_id)
}

#[derive(Default)]
struct WatchlistState {
    owner: Option<String>,
    items: Vec<WatchlistItem>,
    last_id_millis: i64,
}

/// The signed-in user's watchlist, in insertion order. At most one item
/// per movie id. Every mutation rewrites the whole stored collection.
pub struct WatchlistStore {
    storage: Arc<dyn KeyValueRepo>,
    state: RwLock<WatchlistState>,
}

impl WatchlistStore {
    pub fn new(storage: Arc<dyn KeyValueRepo>) -> Self {
        Self {
            storage,
            state: RwLock::new(WatchlistState::default()),
        }
    }

    /// Opens the store already scoped to `user`.
    pub async fn open(storage: Arc<dyn KeyValueRepo>, user: Option<&User>) -> Result<Self, WatchlistError> {
        let store = Self::new(storage);
        store.switch_user(user).await?;
        Ok(store)
    }

    /// Swaps in the collection belonging to `user`. With no user the
    /// collection is emptied and nothing is written.
    pub async fn switch_user(&self, user: Option<&User>) -> Result<(), WatchlistError> {
        let mut state = self.state.write().await;

        let Some(user) = user else {
            state.owner = None;
            state.items.clear();
            return Ok(());
        };

        let items = match self.storage.get(&storage_key(&user.id)).await? {
            Some(raw) => serde_json::from_str::<Vec<WatchlistItem>>(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable watchlist for {}: {}", user.id, e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        info!("Loaded watchlist for {} ({} items)", user.id, items.len());
        state.owner = Some(user.id.clone());
        state.items = items;
        Ok(())
    }

    pub async fn items(&self) -> Vec<WatchlistItem> {
        self.state.read().await.items.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.items.is_empty()
    }

    pub async fn is_in_watchlist(&self, movie_id: u64) -> bool {
        let state = self.state.read().await;
        state.items.iter().any(|item| item.movie_id == movie_id)
    }

    /// Appends `movie`. Returns false without changes when nobody is
    /// signed in or the movie is already listed.
    pub async fn add_to_watchlist(&self, movie: &Movie) -> Result<bool, WatchlistError> {
        let mut state = self.state.write().await;

        let Some(owner) = state.owner.clone() else {
            return Ok(false);
        };
        if state.items.iter().any(|item| item.movie_id == movie.id) {
            return Ok(false);
        }

        let now = Utc::now();
        let millis = now.timestamp_millis().max(state.last_id_millis + 1);

        let mut items = state.items.clone();
        items.push(WatchlistItem {
            id: format!("watchlist-{}", millis),
            movie_id: movie.id,
            user_id: owner.clone(),
            added_date: now,
            watched: false,
        });
        self.persist(&owner, &items).await?;
        state.items = items;
        state.last_id_millis = millis;

        info!("Added movie {} to watchlist", movie.id);
        Ok(true)
    }

    /// Returns whether an item was removed.
    pub async fn remove_from_watchlist(&self, movie_id: u64) -> Result<bool, WatchlistError> {
        let mut state = self.state.write().await;

        let items: Vec<WatchlistItem> = state
            .items
            .iter()
            .filter(|item| item.movie_id != movie_id)
            .cloned()
            .collect();
        let removed = items.len() != state.items.len();
        if let Some(ref owner) = state.owner {
            self.persist(owner, &items).await?;
        }
        state.items = items;

        if removed {
            info!("Removed movie {} from watchlist", movie_id);
        }
        Ok(removed)
    }

    /// Flips the watched flag and returns the new value, or `None` when
    /// the movie is not listed.
    pub async fn toggle_watched(&self, movie_id: u64) -> Result<Option<bool>, WatchlistError> {
        let mut state = self.state.write().await;

        let mut items = state.items.clone();
        let mut toggled = None;
        for item in items.iter_mut().filter(|item| item.movie_id == movie_id) {
            item.watched = !item.watched;
            toggled = Some(item.watched);
        }
        if let Some(ref owner) = state.owner {
            self.persist(owner, &items).await?;
        }
        state.items = items;

        Ok(toggled)
    }

    /// Writes `items` as the whole stored collection of `owner`. Callers
    /// update memory only after this succeeds.
    async fn persist(&self, owner: &str, items: &[WatchlistItem]) -> Result<(), WatchlistError> {
        let raw = serde_json::to_string(items)?;
        self.storage.set(&storage_key(owner), &raw).await?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WatchlistError {
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
    #[error("Failed to encode watchlist: {0}")]
    Encode(#[from] serde_json::Error),
}
