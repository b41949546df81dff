use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend origin including the `/api` base path.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DownloadConfig {
    /// Directory where certificates and CSV exports are written.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub download: DownloadConfig,
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default(
                "api.base_url",
                "https://technovaganza-backend.onrender.com/api",
            )?
            .set_default("download.dir", ".")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., TECHNOVAGANZA__API__BASE_URL)
            .add_source(Environment::with_prefix("TECHNOVAGANZA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
