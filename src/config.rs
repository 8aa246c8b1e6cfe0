use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Extraction settings
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Proxy route templates tried in order; `{url}` is replaced with the
    /// percent-encoded target URL
    #[serde(default = "default_proxies")]
    pub proxies: Vec<String>,
    /// Fetch attempts per extraction (proxy chain exhausted on each attempt)
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Initial delay between attempts in milliseconds (doubles per attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            proxies: default_proxies(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_proxies() -> Vec<String> {
    vec![
        "https://api.allorigins.win/raw?url={url}".to_string(),
        "https://corsproxy.io/?{url}".to_string(),
        "https://api.codetabs.com/v1/proxy?quest={url}".to_string(),
    ]
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_timeout() -> u64 {
    30
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EXTRACT__ prefix
    /// 2. recipe-extract.toml file in current directory
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("recipe-extract").required(false))
            // Use double underscore for nested: RECIPE_EXTRACT__RETRY_ATTEMPTS
            .add_source(
                Environment::with_prefix("RECIPE_EXTRACT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
