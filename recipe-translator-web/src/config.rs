//! Server configuration
//!
//! Loaded from a TOML file (`config.toml`, or the path in
//! `RECIPE_TRANSLATOR_CONFIG`). `RECIPE_TRANSLATOR_API_KEY` overrides the
//! provider key so it can stay out of the file.
//!
//! ```toml
//! [server]
//! port = 8080
//!
//! [provider]
//! kind = "anthropic"
//! model = "claude-3-5-haiku-latest"
//!
//! [cache]
//! session_fields = ["name", "ingredients", "instructions"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use recipe_translator_core::types::{CachePolicy, ProviderCredentials, ProviderOptions, ProviderType};
use serde::Deserialize;

pub const CONFIG_PATH_ENV: &str = "RECIPE_TRANSLATOR_CONFIG";
pub const API_KEY_ENV: &str = "RECIPE_TRANSLATOR_API_KEY";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
    pub cache: CachePolicy,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 默认为 CPU 核心数
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

impl ServerConfig {
    pub fn workers(&self) -> usize {
        self.workers.filter(|n| *n > 0).unwrap_or_else(num_cpus::get)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, created on first start
    pub path: PathBuf,
    /// Keep everything in memory (nothing survives a restart)
    pub in_memory: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/recipes.db"),
            in_memory: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderType,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_retries: u32,
    /// Call the provider once at startup to check the key
    pub verify_on_startup: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderType::Openai,
            api_key: None,
            model: None,
            base_url: None,
            max_retries: 2,
            verify_on_startup: false,
        }
    }
}

impl ProviderConfig {
    /// Credentials for `create_provider`.
    pub fn credentials(&self) -> anyhow::Result<ProviderCredentials> {
        let Some(api_key) = self.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            bail!("No provider API key: set provider.api_key or {API_KEY_ENV}");
        };
        let options = ProviderOptions {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            max_retries: self.max_retries,
        };
        Ok(match self.kind {
            ProviderType::Openai => ProviderCredentials::Openai { api_key, options },
            ProviderType::Anthropic => ProviderCredentials::Anthropic { api_key, options },
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Also write daily-rotated files here
    pub directory: Option<PathBuf>,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            json: false,
        }
    }
}

impl Config {
    /// Load from `RECIPE_TRANSLATOR_CONFIG`, else `config.toml` if present,
    /// else defaults. Environment overrides are applied last.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => Self::default(),
        };
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.provider.api_key = Some(key);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_translator_core::types::ContentType;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.provider.kind, ProviderType::Openai);
        assert_eq!(config.cache, CachePolicy::default());
        assert!(!config.database.in_memory);
        assert!(config.server.workers() > 0);
    }

    #[test]
    fn sections_are_parsed() {
        let config = Config::from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            workers = 2

            [database]
            in_memory = true

            [provider]
            kind = "anthropic"
            api_key = "sk-ant"
            model = "claude-3-5-sonnet-latest"

            [cache]
            session_fields = ["name", "ingredients", "instructions"]
            check_freshness = false

            [log]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.workers(), 2);
        assert!(config.database.in_memory);
        assert_eq!(config.cache.session_fields, ContentType::ALL.to_vec());
        assert_eq!(
            config.cache.endpoint_fields,
            vec![ContentType::Ingredients, ContentType::Instructions]
        );
        assert!(!config.cache.check_freshness);
        assert!(config.log.json);

        let ProviderCredentials::Anthropic { api_key, options } =
            config.provider.credentials().unwrap()
        else {
            panic!("expected anthropic credentials");
        };
        assert_eq!(api_key, "sk-ant");
        assert_eq!(options.model.as_deref(), Some("claude-3-5-sonnet-latest"));
        assert_eq!(options.max_retries, 2);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let config = Config::from_toml_str("[provider]\napi_key = \"  \"\n").unwrap();
        assert!(config.provider.credentials().is_err());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Config::from_toml_str("[provider]\nkind = \"deepl\"\n").is_err());
    }
}
