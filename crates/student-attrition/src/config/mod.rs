use crate::workflows::catalog::VocabularyRevision;
use crate::workflows::metrics::CoercionPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_PREDICTION_URL: &str = "http://127.0.0.1:6000/api/performance_analysis";
const DEFAULT_PREDICTION_TIMEOUT_MS: u64 = 10_000;

/// Distinguishes runtime behavior for different stages of the service.
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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub prediction: PredictionConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "4001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let endpoint =
            env::var("APP_PREDICTION_URL").unwrap_or_else(|_| DEFAULT_PREDICTION_URL.to_string());
        let timeout = match env::var("APP_PREDICTION_TIMEOUT_MS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => Duration::from_millis(millis),
                _ => return Err(ConfigError::InvalidTimeout),
            },
            Err(_) => Duration::from_millis(DEFAULT_PREDICTION_TIMEOUT_MS),
        };
        let numeric_policy = match env::var("APP_NUMERIC_POLICY") {
            Ok(raw) => raw
                .parse::<CoercionPolicy>()
                .map_err(|_| ConfigError::UnknownNumericPolicy { value: raw })?,
            Err(_) => CoercionPolicy::default(),
        };

        let revision = match env::var("APP_CATALOG_REVISION") {
            Ok(raw) => raw
                .parse::<VocabularyRevision>()
                .map_err(|_| ConfigError::UnknownCatalogRevision { value: raw })?,
            Err(_) => VocabularyRevision::CURRENT,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            prediction: PredictionConfig {
                endpoint,
                timeout,
                numeric_policy,
            },
            catalog: CatalogConfig { revision },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Where and how profiles are sent for scoring.
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub numeric_policy: CoercionPolicy,
}

/// Vocabulary used when the option catalog has to be provisioned.
#[derive(Debug, Clone, Copy)]
pub struct CatalogConfig {
    pub revision: VocabularyRevision,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    UnknownNumericPolicy { value: String },
    UnknownCatalogRevision { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => write!(
                f,
                "APP_PREDICTION_TIMEOUT_MS must be a positive number of milliseconds"
            ),
            ConfigError::UnknownNumericPolicy { value } => write!(
                f,
                "APP_NUMERIC_POLICY '{value}' is not one of 'strict' or 'permissive'"
            ),
            ConfigError::UnknownCatalogRevision { value } => write!(
                f,
                "APP_CATALOG_REVISION '{value}' is not a known vocabulary revision"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::UnknownNumericPolicy { .. }
            | ConfigError::UnknownCatalogRevision { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_PREDICTION_URL");
        env::remove_var("APP_PREDICTION_TIMEOUT_MS");
        env::remove_var("APP_NUMERIC_POLICY");
        env::remove_var("APP_CATALOG_REVISION");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4001);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.ansi);
        assert_eq!(config.prediction.endpoint, DEFAULT_PREDICTION_URL);
        assert_eq!(config.prediction.timeout, Duration::from_secs(10));
        assert_eq!(config.prediction.numeric_policy, CoercionPolicy::Strict);
        assert_eq!(config.catalog.revision, VocabularyRevision::CURRENT);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 4001));
        reset_env();
    }

    #[test]
    fn reads_prediction_and_catalog_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_PREDICTION_TIMEOUT_MS", "2500");
        env::set_var("APP_NUMERIC_POLICY", "permissive");
        env::set_var("APP_CATALOG_REVISION", "legacy");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.telemetry.ansi);
        assert_eq!(config.prediction.timeout, Duration::from_millis(2500));
        assert_eq!(config.prediction.numeric_policy, CoercionPolicy::Permissive);
        assert_eq!(config.catalog.revision, VocabularyRevision::Legacy);
        reset_env();
    }

    #[test]
    fn rejects_zero_timeout_and_unknown_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PREDICTION_TIMEOUT_MS", "0");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidTimeout)));

        reset_env();
        env::set_var("APP_NUMERIC_POLICY", "lenient");
        match AppConfig::load() {
            Err(ConfigError::UnknownNumericPolicy { value }) => assert_eq!(value, "lenient"),
            other => panic!("expected unknown policy error, got {other:?}"),
        }
        reset_env();
    }
}
