//! Configuration loading — TOML file with environment variable overrides.
//!
//! Reads `cheapswitch.toml` from the working directory, or the file named by
//! `CHEAPSWITCH_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::net::IpAddr;
use std::time::Duration;

use chrono_tz::Tz;
use serde::Deserialize;

use cheapswitch_app::retry::RetryPolicy;

const DEFAULT_PATH: &str = "cheapswitch.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Switch device settings.
    pub device: DeviceConfig,
    /// Price provider settings.
    pub prices: PricesConfig,
    /// Schedule defaults.
    pub schedule: ScheduleConfig,
    /// Background retry of renewals.
    pub retry: RetryConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port. Also the port the device calls back on.
    pub port: u16,
    /// Address the device calls back on. Discovered from the outbound route
    /// when unset.
    pub advertise_host: Option<IpAddr>,
}

/// Switch device configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device address used when a request does not name one.
    pub host: Option<String>,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

/// Price provider configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PricesConfig {
    /// Endpoint answering cheapest-hours queries.
    pub url: String,
    /// Bearer token sent to the provider.
    pub token: Option<String>,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

/// Schedule defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// IANA timezone the device runs in. The host's zone when unset.
    pub timezone: Option<String>,
    /// Hours to switch on per day.
    pub hours: u32,
    /// Most of those hours allowed at night.
    pub dark_hours: u32,
}

/// Retry configuration for renewals hit by a price provider outage.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub interval_secs: u64,
    pub max_attempts: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CHEAPSWITCH_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("CHEAPSWITCH_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("CHEAPSWITCH_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("CHEAPSWITCH_DEVICE") {
            self.device.host = Some(val);
        }
        if let Some(val) = var("CHEAPSWITCH_PRICES_URL") {
            self.prices.url = val;
        }
        if let Some(val) = var("CHEAPSWITCH_PRICES_TOKEN") {
            self.prices.token = Some(val);
        }
        if let Some(val) = var("CHEAPSWITCH_TZ").or_else(|| var("TZ")) {
            self.schedule.timezone = Some(val);
        }
        if let Some(val) = var("CHEAPSWITCH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.timezone()?;
        if !(1..=24).contains(&self.schedule.hours) {
            return Err(ConfigError::Validation(
                "schedule hours must be between 1 and 24".to_string(),
            ));
        }
        if self.schedule.dark_hours > 24 {
            return Err(ConfigError::Validation(
                "schedule dark hours must be at most 24".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "retry attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The configured timezone, else the host's, else UTC.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configured name is not a known IANA
    /// timezone.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone_or(|| iana_time_zone::get_timezone().ok())
    }

    fn timezone_or(&self, host: impl FnOnce() -> Option<String>) -> Result<Tz, ConfigError> {
        match &self.schedule.timezone {
            Some(name) => name
                .parse()
                .map_err(|_| ConfigError::Validation(format!("unknown timezone {name:?}"))),
            None => Ok(host()
                .and_then(|name| name.parse().ok())
                .unwrap_or(Tz::UTC)),
        }
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_secs(self.retry.interval_secs),
            max_attempts: self.retry.max_attempts,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            advertise_host: None,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: None,
            timeout_secs: 10,
        }
    }
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8090/cheapest".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            hours: 12,
            dark_hours: 3,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            interval_secs: policy.interval.as_secs(),
            max_attempts: policy.max_attempts,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "cheapswitchd=info,cheapswitch=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.device.host, None);
        assert_eq!(config.schedule.hours, 12);
        assert_eq!(config.schedule.dark_hours, 3);
        assert_eq!(config.retry.interval_secs, 600);
        assert_eq!(config.retry.max_attempts, 138);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090
            advertise_host = '192.168.1.5'

            [device]
            host = '192.168.1.20'
            timeout_secs = 5

            [prices]
            url = 'https://prices.example/cheapest'
            token = 'secret'

            [schedule]
            timezone = 'Europe/Oslo'
            hours = 8
            dark_hours = 2

            [retry]
            interval_secs = 60
            max_attempts = 5

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(
            config.server.advertise_host,
            Some("192.168.1.5".parse().unwrap())
        );
        assert_eq!(config.device.host.as_deref(), Some("192.168.1.20"));
        assert_eq!(config.device.timeout_secs, 5);
        assert_eq!(config.prices.url, "https://prices.example/cheapest");
        assert_eq!(config.prices.token.as_deref(), Some("secret"));
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Oslo);
        assert_eq!(config.schedule.hours, 8);
        assert_eq!(
            config.retry_policy(),
            RetryPolicy {
                interval: Duration::from_secs(60),
                max_attempts: 5,
            }
        );
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[
            ("CHEAPSWITCH_PORT", "9000"),
            ("CHEAPSWITCH_DEVICE", "10.0.0.4"),
            ("CHEAPSWITCH_PRICES_TOKEN", "t0k3n"),
            ("TZ", "UTC"),
            ("CHEAPSWITCH_LOG", "warn"),
        ]));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.device.host.as_deref(), Some("10.0.0.4"));
        assert_eq!(config.prices.token.as_deref(), Some("t0k3n"));
        assert_eq!(config.timezone().unwrap(), chrono_tz::UTC);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_dedicated_timezone_variable() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[("CHEAPSWITCH_TZ", "Europe/Berlin"), ("TZ", "UTC")]));
        assert_eq!(config.schedule.timezone.as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    fn should_prefer_configured_timezone_over_host() {
        let mut config = Config::default();
        config.schedule.timezone = Some("Europe/Oslo".to_string());
        let tz = config.timezone_or(|| Some("America/New_York".to_string()));
        assert_eq!(tz.unwrap(), chrono_tz::Europe::Oslo);
    }

    #[test]
    fn should_use_host_timezone_when_none_configured() {
        let config = Config::default();
        let tz = config.timezone_or(|| Some("America/New_York".to_string()));
        assert_eq!(tz.unwrap(), chrono_tz::America::New_York);
    }

    #[test]
    fn should_fall_back_to_utc_without_usable_host_timezone() {
        let config = Config::default();
        assert_eq!(config.timezone_or(|| None).unwrap(), chrono_tz::UTC);
        let tz = config.timezone_or(|| Some("Local/Unknown".to_string()));
        assert_eq!(tz.unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn should_let_rust_log_win_over_own_filter() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[("CHEAPSWITCH_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparseable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[("CHEAPSWITCH_PORT", "http")]));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_unknown_timezone() {
        let mut config = Config::default();
        config.schedule.timezone = Some("Mars/Olympus".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_out_of_range_hours() {
        let mut config = Config::default();
        config.schedule.hours = 0;
        assert!(config.validate().is_err());
        config.schedule.hours = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_too_many_dark_hours() {
        let mut config = Config::default();
        config.schedule.dark_hours = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_retry_attempts() {
        let mut config = Config::default();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_format_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
