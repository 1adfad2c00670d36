use std::env;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use validator::{Validate, ValidationError};

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const CONFIG_DIR: &str = "config";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_REFRESH_SECS: u64 = 30;
const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;
const DEFAULT_ADD_DELAY_MS: u64 = 1000;
const DEFAULT_LIST_DELAY_MS: u64 = 500;

pub const MEMORY_BACKEND: &str = "in-memory";
pub const FILE_BACKEND: &str = "file";

/// Simulated latency on the operations the portal's UI shows spinners for.
/// Carries no correctness meaning; exists so callers exercise their
/// loading-state paths.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LatencyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_login_delay_ms")]
    pub login_ms: u64,
    #[serde(default = "default_add_delay_ms")]
    pub add_ms: u64,
    #[serde(default = "default_list_delay_ms")]
    pub list_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            login_ms: DEFAULT_LOGIN_DELAY_MS,
            add_ms: DEFAULT_ADD_DELAY_MS,
            list_ms: DEFAULT_LIST_DELAY_MS,
        }
    }
}

impl LatencyConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn login_delay(&self) -> Duration {
        self.delay(self.login_ms)
    }

    pub fn add_delay(&self) -> Duration {
        self.delay(self.add_ms)
    }

    pub fn list_delay(&self) -> Duration {
        self.delay(self.list_ms)
    }

    fn delay(&self, ms: u64) -> Duration {
        if self.enabled {
            Duration::from_millis(ms)
        } else {
            Duration::ZERO
        }
    }
}

/// Record store backend selection.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// "in-memory" or "file".
    #[serde(default = "default_backend")]
    #[validate(custom = "validate_backend")]
    pub backend: String,

    /// Data directory for the file backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: None,
        }
    }
}

impl StorageConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

/// Application configuration with validation.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Application environment.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level.
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging).
    #[serde(default)]
    pub log_json: bool,

    #[serde(default)]
    #[validate]
    pub storage: StorageConfig,

    #[serde(default)]
    #[validate]
    pub latency: LatencyConfig,

    /// Interval between dashboard refresh polls.
    #[serde(default = "default_refresh_secs")]
    #[validate(range(min = 1))]
    pub dashboard_refresh_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            storage: StorageConfig::default(),
            latency: LatencyConfig::default(),
            dashboard_refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn dashboard_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.dashboard_refresh_secs)
    }
}

/// Loads configuration from `config/default`, an environment-specific file,
/// and `APP__`-prefixed environment variables, in increasing precedence.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let environment = env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    let cfg: AppConfig = Config::builder()
        .set_default("environment", environment.clone())?
        .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()?;

    cfg.validate()
        .map_err(|err| ConfigError::Message(err.to_string()))?;
    Ok(cfg)
}

/// Installs the global tracing subscriber: fmt output filtered by `RUST_LOG`
/// when set, the configured level otherwise.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("agriverse_core={level}");
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .try_init();
    }
}

fn default_true() -> bool {
    true
}

fn default_login_delay_ms() -> u64 {
    DEFAULT_LOGIN_DELAY_MS
}

fn default_add_delay_ms() -> u64 {
    DEFAULT_ADD_DELAY_MS
}

fn default_list_delay_ms() -> u64 {
    DEFAULT_LIST_DELAY_MS
}

fn default_backend() -> String {
    MEMORY_BACKEND.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

fn validate_backend(backend: &str) -> Result<(), ValidationError> {
    match backend {
        MEMORY_BACKEND | FILE_BACKEND => Ok(()),
        _ => {
            let mut err = ValidationError::new("backend");
            err.message = Some("storage backend must be \"in-memory\" or \"file\"".into());
            Err(err)
        }
    }
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("log_level")),
    }
}
