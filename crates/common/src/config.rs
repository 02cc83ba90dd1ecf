//! Application configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Entity store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Entity store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// JSON seed file used to hydrate the store at startup.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
    /// Upper bound for `first`/`last` in connection arguments.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON formatted log lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            max_page_size: default_max_page_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

const fn default_max_page_size() -> usize {
    100
}

fn default_log_filter() -> String {
    "votely=info".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `VOTELY_ENV`)
    /// 4. Environment variables with `VOTELY_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        let env = std::env::var("VOTELY_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("VOTELY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.store.seed_path.is_none());
        assert_eq!(config.store.max_page_size, 100);
        assert_eq!(config.logging.filter, "votely=info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"store": {"seed_path": "data/seed.json"}}"#).unwrap();
        assert_eq!(
            config.store.seed_path.as_deref(),
            Some(std::path::Path::new("data/seed.json"))
        );
        assert_eq!(config.store.max_page_size, 100);
        assert_eq!(config.logging.filter, "votely=info");
    }
}
