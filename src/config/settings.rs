use crate::rating::{RatingValue, DEFAULT_K_FACTOR};

const DATABASE_PATH_VAR: &str = "DATABASE_PATH";
const DEFAULT_DATABASE_PATH: &str = "doubles_ladder.db";

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub starting_rating: RatingValue,
    pub k_factor: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            starting_rating: 1500,
            k_factor: DEFAULT_K_FACTOR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub database_path: String,
    /// How long a writer waits for the SQLite write lock before giving up.
    pub busy_timeout_ms: u64,
    pub pool_size: u32,
    /// Retries of a whole operation after a lock timeout, before reporting a conflict.
    pub max_conflict_retries: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            busy_timeout_ms: 5_000,
            pool_size: 8,
            max_conflict_retries: 3,
        }
    }
}

impl StoreSettings {
    pub fn from_env() -> Self {
        let database_path = std::env::var(DATABASE_PATH_VAR)
            .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());

        Self {
            database_path,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub store: StoreSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            store: StoreSettings::from_env(),
            server: ServerSettings::default(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }
}
