use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub persistence: PersistenceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let persistence = PersistenceConfig::from_env()?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            persistence,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Remote persistence credentials. The board only syncs when both the URL
/// and the key are present; with neither set it runs on local sample data.
#[derive(Debug, Clone, Default)]
pub struct PersistenceConfig {
    pub remote_url: Option<String>,
    pub api_key: Option<String>,
}

impl PersistenceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let remote_url = env::var("BOARD_REMOTE_URL").ok().filter(|v| !v.trim().is_empty());
        let api_key = env::var("BOARD_REMOTE_KEY").ok().filter(|v| !v.trim().is_empty());

        match (&remote_url, &api_key) {
            (Some(_), None) | (None, Some(_)) => Err(ConfigError::PartialRemoteCredentials),
            _ => Ok(Self { remote_url, api_key }),
        }
    }

    /// Whether sync/rollback logic runs at all.
    pub fn is_configured(&self) -> bool {
        self.remote_url.is_some() && self.api_key.is_some()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    PartialRemoteCredentials,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PartialRemoteCredentials => write!(
                f,
                "BOARD_REMOTE_URL and BOARD_REMOTE_KEY must be set together or not at all"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
