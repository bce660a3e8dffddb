use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub dbdir: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(alias = "apikey")]
    #[serde(default)]
    pub api_key: String,
    #[serde(alias = "baseurl")]
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(alias = "imagebaseurl")]
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

impl SessionConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AssetsConfig {
    /// Directory served for static files such as the placeholder images.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_simulated_delay_ms() -> u64 {
    1000
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::ParseError(_, err) => ConfigError::ParseError(path.to_string(), err),
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError("<inline>".to_string(), e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("tmdb.api_key must be set".to_string()));
        }
        if self.get_database_path().is_none() {
            return Err(ConfigError::Invalid(
                "either dbdir or database.sqlite.filename must be set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_database_path(&self) -> Option<String> {
        if let Some(ref sqlite) = self.database.sqlite {
            return Some(sqlite.filename.clone());
        }

        if let Some(ref dbdir) = self.dbdir {
            let path = PathBuf::from(dbdir).join("reelwatch.db");
            return Some(path.to_string_lossy().to_string());
        }

        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_yaml("dbdir: /var/lib/reelwatch\ntmdb:\n  api_key: abc123\n").unwrap();
        assert_eq!(config.listen.port, "8080");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.image_base_url, "https://image.tmdb.org/t/p");
        assert_eq!(config.session.simulated_delay_ms, 1000);
        assert_eq!(
            config.get_database_path().as_deref(),
            Some("/var/lib/reelwatch/reelwatch.db")
        );
    }

    #[test]
    fn test_sqlite_filename_wins_over_dbdir() {
        let yaml = "dbdir: /tmp\ndatabase:\n  sqlite:\n    filename: /data/rw.db\ntmdb:\n  apikey: k\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.get_database_path().as_deref(), Some("/data/rw.db"));
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let err = Config::from_yaml("dbdir: /tmp\ntmdb:\n  api_key: ''\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_database_rejected() {
        let err = Config::from_yaml("tmdb:\n  api_key: k\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
