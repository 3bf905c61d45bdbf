//! Application configuration.
//!
//! Configuration is layered with `figment`, later layers winning:
//!
//! 1. built-in defaults
//! 2. the YAML file passed with `--config` (if any)
//! 3. plain `PORT`, then environment variables prefixed with `APP__`, nested
//!    with `__` (e.g. `APP__SERVER__PORT=8080`)
//! 4. CLI overrides ([`AppConfig::apply_cli_overrides`])
//!
//! Module sections live under `modules.<name>.config` and are read through
//! [`ConfigProvider`] with [`module_config_or_default`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Prefix of environment variables merged into the configuration.
pub const ENV_PREFIX: &str = "APP__";

/// Conventional listen-port variable, mapped to `server.port` below `APP__*`.
pub const PORT_ENV: &str = "PORT";

/// Root application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Raw per-module sections: `modules.<name> = { config: {...} }`.
    pub modules: BTreeMap<String, serde_json::Value>,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve `/openapi.json` and `/docs`.
    pub enable_docs: bool,
    /// Requests running longer than this are answered with 504.
    #[serde(with = "humantime_duration")]
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            enable_docs: true,
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
            cors_enabled: false,
        }
    }
}

/// Output format of the console/file log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `calculator=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// Optional log file, written in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

/// Command-line values that override the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub print_config: bool,
    /// `-v` count: 1 = info, 2 = debug, 3+ = trace.
    pub verbose: u8,
}

impl AppConfig {
    /// Loads the layered configuration: defaults, then the YAML file at `path`
    /// (if given), then `PORT` and `APP__*` environment variables.
    ///
    /// # Errors
    /// Returns an error if `path` does not point to an existing file or if any
    /// layer fails to parse or contains unknown keys.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment
            .merge(Env::raw().only(&[PORT_ENV]).map(|_| "server.port".into()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().with_context(|| match path {
            Some(path) => format!(
                "failed to load configuration from yaml file {} and {ENV_PREFIX}* environment",
                path.display()
            ),
            None => format!("failed to load configuration from {ENV_PREFIX}* environment"),
        })
    }

    /// Applies CLI overrides on top of the loaded configuration.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        let level = match args.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            level.clone_into(&mut self.logging.level);
        }
    }

    /// Renders the effective configuration as YAML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize configuration to yaml")
    }
}

/// Configuration error for typed module config access.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config for module '{module}': {source}")]
    InvalidConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider of raw per-module configuration sections.
pub trait ConfigProvider: Send + Sync {
    /// Returns the raw JSON section of `module_name`, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

impl ConfigProvider for AppConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.modules.get(module_name)
    }
}

/// Lenient loader for a module's `config` section.
///
/// - module missing, not an object, or without `config` → `T::default()`
/// - `config` present but invalid → [`ConfigError::InvalidConfig`]
///
/// # Errors
/// Returns `ConfigError::InvalidConfig` if the section exists but cannot be deserialized.
pub fn module_config_or_default<T: DeserializeOwned + Default>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let Some(section) = provider
        .get_module_config(module_name)
        .and_then(serde_json::Value::as_object)
        .and_then(|obj| obj.get("config"))
    else {
        return Ok(T::default());
    };

    serde_json::from_value(section.clone()).map_err(|source| ConfigError::InvalidConfig {
        module: module_name.to_owned(),
        source,
    })
}

/// Serde adapter for `Duration` written as humantime strings (`30s`, `1m 30s`).
mod humantime_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize, Default)]
    #[serde(deny_unknown_fields, default)]
    struct TestConfig {
        limit: u32,
    }

    fn with_modules(modules: serde_json::Value) -> AppConfig {
        AppConfig {
            modules: serde_json::from_value(modules).unwrap(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.server.enable_docs);
        assert!(!cfg.server.cors_enabled);
        assert_eq!(cfg.server.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.server.body_limit_bytes, 1_048_576);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert!(cfg.modules.is_empty());
    }

    #[test]
    fn test_cli_overrides() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(&CliArgs {
            port: Some(8081),
            verbose: 2,
            ..CliArgs::default()
        });
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.logging.level, "debug");

        cfg.apply_cli_overrides(&CliArgs {
            verbose: 5,
            ..CliArgs::default()
        });
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.logging.level, "trace");
    }

    #[test]
    fn test_cli_without_verbose_keeps_level() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "warn".to_owned();
        cfg.apply_cli_overrides(&CliArgs::default());
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn test_module_config_present() {
        let cfg = with_modules(json!({ "calc": { "config": { "limit": 7 } } }));
        let parsed: TestConfig = module_config_or_default(&cfg, "calc").unwrap();
        assert_eq!(parsed.limit, 7);
    }

    #[test]
    fn test_module_config_falls_back_to_default() {
        let cfg = with_modules(json!({
            "no_config": { "other": 1 },
            "not_object": "string",
        }));

        for name in ["missing", "no_config", "not_object"] {
            let parsed: TestConfig = module_config_or_default(&cfg, name).unwrap();
            assert_eq!(parsed, TestConfig::default(), "module {name}");
        }
    }

    #[test]
    fn test_module_config_invalid() {
        let cfg = with_modules(json!({ "calc": { "config": { "limit": "many" } } }));
        let err = module_config_or_default::<TestConfig>(&cfg, "calc").unwrap_err();

        let ConfigError::InvalidConfig { module, .. } = &err;
        assert_eq!(module, "calc");
        assert!(err.to_string().starts_with("invalid config for module 'calc'"));
    }

    #[test]
    fn test_to_yaml_contains_sections() {
        let yaml = AppConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("server:"));
        assert!(yaml.contains("port: 3000"));
        assert!(yaml.contains("request_timeout: 30s"));
        assert!(yaml.contains("format: text"));
    }
}
