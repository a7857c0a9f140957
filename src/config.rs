use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main browser configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Recipe service settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Number of search results shown per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// Directory holding persisted likes; platform data dir when unset
    pub storage_dir: Option<PathBuf>,
}

/// Configuration for the recipe service
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL the `search` and `get` endpoints hang off
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            results_per_page: default_results_per_page(),
            storage_dir: None,
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_results_per_page() -> usize {
    10
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FORKIFY__ prefix
    /// 2. forkify.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FORKIFY__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Directory where the likes file lives
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("forkify")
        })
    }
}

/// Load configuration from file and environment variables
///
/// See [`BrowserConfig::load`] for the source priority.
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("forkify").required(false))
        // Use double underscore for nested: FORKIFY__API__TIMEOUT
        .add_source(
            Environment::with_prefix("FORKIFY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
