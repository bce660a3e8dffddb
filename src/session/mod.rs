//! The signed-in user.
//!
//! Authentication is simulated: one fixed credential pair is accepted and
//! registration always succeeds. There is no password storage and no
//! verification beyond string comparison, so this must be replaced by a
//! real identity provider before it guards anything of value.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::db::{DbError, KeyValueRepo};

/// Storage key holding the current user record.
pub const USER_KEY: &str = "user";

pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub profile_image: String,
    pub favorite_genres: Vec<u64>,
}

impl User {
    /// The record every mock sign-in starts from.
    pub fn template() -> Self {
        Self {
            id: "user-1".to_string(),
            username: "moviefan".to_string(),
            email: DEMO_EMAIL.to_string(),
            profile_image: "https://i.pravatar.cc/150?img=68".to_string(),
            favorite_genres: vec![28, 12, 14],
        }
    }

    fn apply(&mut self, update: ProfileUpdate) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(profile_image) = update.profile_image {
            self.profile_image = profile_image;
        }
        if let Some(favorite_genres) = update.favorite_genres {
            self.favorite_genres = favorite_genres;
        }
    }
}

/// Fields to merge into the current user; `None` leaves a field as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub favorite_genres: Option<Vec<u64>>,
}

pub struct SessionStore {
    storage: Arc<dyn KeyValueRepo>,
    current: RwLock<Option<User>>,
    delay: Duration,
}

impl SessionStore {
    /// Restores the persisted user, if any. A record that no longer
    /// parses is ignored.
    pub async fn open(storage: Arc<dyn KeyValueRepo>, delay: Duration) -> Result<Self, SessionError> {
        let current = match storage.get(USER_KEY).await? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!("Restored session for {}", user.username);
                    Some(user)
                }
                Err(e) => {
                    warn!("Ignoring unreadable stored user record: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            storage,
            current: RwLock::new(current),
            delay,
        })
    }

    pub async fn current(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        self.simulate_latency().await;

        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            info!("Rejected sign-in for {}", email);
            return Err(SessionError::InvalidCredentials);
        }

        let user = User::template();
        self.replace(user.clone()).await?;
        info!("Signed in as {}", user.username);
        Ok(user)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        _password: &str,
    ) -> Result<User, SessionError> {
        self.simulate_latency().await;

        let user = User {
            username: username.to_string(),
            email: email.to_string(),
            ..User::template()
        };
        self.replace(user.clone()).await?;
        info!("Registered {}", user.username);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        let mut current = self.current.write().await;
        self.storage.remove(USER_KEY).await?;
        *current = None;
        info!("Signed out");
        Ok(())
    }

    /// Merges `update` into the current user and persists it. Returns
    /// `None` without touching anything when nobody is signed in.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Option<User>, SessionError> {
        self.simulate_latency().await;

        let mut current = self.current.write().await;
        let Some(user) = current.as_mut() else {
            return Ok(None);
        };

        let mut updated = user.clone();
        updated.apply(update);
        self.persist(&updated).await?;
        *user = updated.clone();

        info!("Updated profile for {}", updated.username);
        Ok(Some(updated))
    }

    async fn replace(&self, user: User) -> Result<(), SessionError> {
        let mut current = self.current.write().await;
        self.persist(&user).await?;
        *current = Some(user);
        Ok(())
    }

    async fn persist(&self, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &raw).await?;
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
    #[error("Failed to encode user record: {0}")]
    Encode(#[from] serde_json::Error),
}
