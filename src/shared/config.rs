//! Application configuration. UI pacing, seed loading, export location.

use serde::Deserialize;

/// Simulated network latency before an application is marked as sent.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;

pub const DEFAULT_EXPORT_DIR: &str = "./exports";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Delay in ms shown as a spinner when an application is submitted. Read from TN_CASTING_SUBMIT_DELAY_MS.
    #[serde(default)]
    pub submit_delay_ms: Option<u64>,

    /// Load the seed castings at startup (default true). Read from TN_CASTING_LOAD_SEED.
    #[serde(default)]
    pub load_seed: Option<bool>,

    /// Directory for CSV/JSON exports. Read from TN_CASTING_EXPORT_DIR.
    #[serde(default)]
    pub export_dir: Option<String>,

    /// Print the startup banner (default true). Read from TN_CASTING_SHOW_BANNER.
    #[serde(default)]
    pub show_banner: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TN_CASTING").try_parsing(true));
        if let Ok(path) = std::env::var("TN_CASTING_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn submit_delay_ms_or_default(&self) -> u64 {
        self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS)
    }

    pub fn load_seed_or_default(&self) -> bool {
        self.load_seed.unwrap_or(true)
    }

    pub fn export_dir_or_default(&self) -> String {
        self.export_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_EXPORT_DIR.to_string())
    }

    pub fn show_banner_or_default(&self) -> bool {
        self.show_banner.unwrap_or(true)
    }
}
