use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::paths::resolve_home_dir;

/// Sub-directory of the platform home used when `server.home_dir` is empty.
pub const DEFAULT_HOME_SUBDIR: &str = ".users_server";

/// Application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Listener and home directory.
    #[serde(default)]
    pub server: ServerConfig,
    /// The single SQLite database file.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging sections keyed by target prefix.
    #[serde(default = "default_logging_config")]
    pub logging: LoggingConfig,
    /// HTTP surface toggles.
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub home_dir: String, // normalized to an absolute path on load
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatabaseConfig {
    /// File DSN, e.g. "sqlite://database.db". Relative paths live under `server.home_dir`.
    pub url: String,
    /// Lock wait per connection in milliseconds. A `busy_timeout` DSN parameter wins.
    pub busy_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ApiConfig {
    /// Allow any origin, method and header.
    pub cors_enabled: bool,
    /// Serve the generated document at `/openapi.json`.
    pub enable_docs: bool,
    pub body_limit_bytes: usize,
}

/// Logging configuration - maps target prefixes to their logging settings.
/// Key "default" is the catch-all for targets without an explicit section.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    pub file: String,          // "logs/users_server.log", empty disables the file
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>, // rotated files to keep
    #[serde(default)]
    pub max_size_mb: Option<u64>, // rotate once the file grows past this
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Empty => <platform base>/.users_server
            home_dir: String::new(),
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://database.db".to_string(),
            busy_timeout_ms: Some(5000),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_enabled: true,
            enable_docs: false,
            body_limit_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/users_server.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: default_logging_config(),
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Self::extract(Some(path))
    }

    /// Load from a file when given, otherwise from defaults plus environment.
    /// Also normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => Self::extract(None),
        }
    }

    fn extract(config_path: Option<&Path>) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }
        // APP__SERVER__PORT=8080 maps to server.port
        let figment = figment.merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| "Failed to extract config from figment".to_string())?;

        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        Ok(config)
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        // Verbose flags raise the console level of the "default" section.
        let default_section = self
            .logging
            .entry("default".to_string())
            .or_insert_with(|| Section {
                console_level: "info".to_string(),
                file: String::new(),
                file_level: String::new(),
                max_backups: None,
                max_size_mb: None,
            });
        match args.verbose {
            0 => {}
            1 => default_section.console_level = "debug".to_string(),
            _ => default_section.console_level = "trace".to_string(),
        }
    }

    /// Absolute home directory (valid after loading).
    pub fn home_dir(&self) -> PathBuf {
        PathBuf::from(&self.server.home_dir)
    }

    /// `host:port` listener address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

/// Normalize `server.home_dir` using `resolve_home_dir` and store the absolute path back.
fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    let opt = if server.home_dir.trim().is_empty() {
        None
    } else {
        Some(server.home_dir.clone())
    };

    let resolved: PathBuf = resolve_home_dir(opt, DEFAULT_HOME_SUBDIR, /*create*/ true)
        .context("home_dir normalization failed")?;

    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}
