/// Server configuration
use crate::error::{Result, ServerError};
use headliner_core::{EngineConfig, SeasonDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cost bounds accepted by `bcrypt` (private in the bcrypt crate, mirrored here)
const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_season")]
    pub season: SeasonSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeasonSettings {
    /// Budget every new roster starts with
    #[serde(default = "default_starting_budget")]
    pub starting_budget: u64,

    /// Calendar position on a fresh database; ignored once a snapshot exists
    #[serde(default = "default_start_month")]
    pub start_month: u8,

    #[serde(default = "default_start_year")]
    pub start_year: i32,

    #[serde(default = "default_catalog_timeout_ms")]
    pub catalog_timeout_ms: u64,

    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file, falling back to `config.toml`
    ///
    /// Environment variables prefixed `HEADLINER_` override file values,
    /// with `__` between section and key (`HEADLINER_SERVER__PORT=8080`).
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("HEADLINER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.start_date()?;

        if self.season.starting_budget == 0 {
            return Err(ServerError::Config(
                "season.starting_budget must be positive".to_string(),
            ));
        }
        if self.season.catalog_timeout_ms == 0 {
            return Err(ServerError::Config(
                "season.catalog_timeout_ms must be positive".to_string(),
            ));
        }
        if self.season.search_limit == 0 {
            return Err(ServerError::Config(
                "season.search_limit must be positive".to_string(),
            ));
        }
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "auth.bcrypt_cost must be between {} and {}",
                BCRYPT_MIN_COST,
                BCRYPT_MAX_COST
            )));
        }

        Ok(())
    }

    /// Season start as a calendar date
    pub fn start_date(&self) -> Result<SeasonDate> {
        SeasonDate::new(self.season.start_month, self.season.start_year)
            .map_err(|e| ServerError::Config(format!("season start: {e}")))
    }

    /// Engine tuning derived from the `[season]` section
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            starting_budget: self.season.starting_budget,
            catalog_timeout: Duration::from_millis(self.season.catalog_timeout_ms),
            search_limit: self.season.search_limit,
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/headliner.db".to_string()
}

fn default_season() -> SeasonSettings {
    SeasonSettings {
        starting_budget: default_starting_budget(),
        start_month: default_start_month(),
        start_year: default_start_year(),
        catalog_timeout_ms: default_catalog_timeout_ms(),
        search_limit: default_search_limit(),
    }
}

fn default_starting_budget() -> u64 {
    1000
}

fn default_start_month() -> u8 {
    1
}

fn default_start_year() -> i32 {
    2024
}

fn default_catalog_timeout_ms() -> u64 {
    2000
}

fn default_search_limit() -> usize {
    25
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            season: default_season(),
            auth: default_auth(),
        }
    }
}
