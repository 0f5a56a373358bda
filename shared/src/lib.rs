use std::sync::Arc;
use universeex_atoms::photos::PhotoSource;

pub mod cache;
pub mod config;
pub mod nasa;

pub use config::Config;
pub use nasa::NasaClient;

/// Everything a request handler needs, built once per cold start.
pub struct AppState {
    pub config: Config,
    pub photos: Arc<dyn PhotoSource>,
}

impl AppState {
    pub fn from_env() -> reqwest::Result<Self> {
        let config = Config::from_env();
        let client = NasaClient::new(&config)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    pub fn with_source(config: Config, photos: Arc<dyn PhotoSource>) -> Self {
        Self { config, photos }
    }
}
