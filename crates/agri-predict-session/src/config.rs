/*
[INPUT]:  Built-in defaults, optional YAML file, AGRI_PREDICT_* environment
[OUTPUT]: Parsed application configuration and the client config derived from it
[POS]:    Configuration layer - backend location and logging
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use agri_predict_adapter::{ClientConfig, DEFAULT_BASE_URL};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the prediction client
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    /// Tracing filter directive, e.g. "info" or "agri_predict_adapter=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the prediction backend lives
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection establishment limit; requests themselves never time out
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a YAML file alone
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Defaults, then the optional YAML file, then `AGRI_PREDICT_*` variables
    /// (`AGRI_PREDICT_BACKEND__BASE_URL`, `AGRI_PREDICT_LOG_LEVEL`, ...).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, None)
    }

    /// `load` reading variables from `env` instead of the process
    /// environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("AGRI_PREDICT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            connect_timeout: Duration::from_secs(self.backend.connect_timeout_secs),
            ..ClientConfig::with_base_url(self.backend.base_url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.connect_timeout_secs, 10);
        assert_eq!(config.log_level, "info");

        let client = config.client_config();
        assert_eq!(client.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_from_file_partial() {
        let path = write_temp(
            "partial.yaml",
            "backend:\n  base_url: \"http://10.0.0.5:9000\"\n",
        );
        let config = AppConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.backend.connect_timeout_secs, 10);
        assert_eq!(config.log_level, "info");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_layers_file_over_defaults() {
        let path = write_temp(
            "layered.yaml",
            "backend:\n  connect_timeout_secs: 3\nlog_level: debug\n",
        );
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.backend.connect_timeout_secs, 3);
        assert_eq!(config.log_level, "debug");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_without_sources_matches_defaults() {
        let config = AppConfig::load_with_env(None, Some(Map::new())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let path = write_temp(
            "env.yaml",
            "backend:\n  base_url: \"http://file-host:8000\"\n  connect_timeout_secs: 3\n",
        );
        let mut env = Map::new();
        env.insert(
            "AGRI_PREDICT_BACKEND__BASE_URL".to_string(),
            "http://env-host:9000".to_string(),
        );
        env.insert("AGRI_PREDICT_LOG_LEVEL".to_string(), "warn".to_string());
        env.insert("OTHER_APP_LOG_LEVEL".to_string(), "trace".to_string());

        let config = AppConfig::load_with_env(Some(&path), Some(env)).unwrap();
        assert_eq!(config.backend.base_url, "http://env-host:9000");
        assert_eq!(config.backend.connect_timeout_secs, 3);
        assert_eq!(config.log_level, "warn");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let path = std::env::temp_dir().join("agri-predict-does-not-exist.yaml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
