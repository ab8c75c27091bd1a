//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Missing or unparsable values fall back
//! to defaults, except `LISTEN_ADDR`, which must parse if set.

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::seed::ADMIN_EMAIL;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`ServiceConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Simulated payment processing time.
    pub payment_delay: Duration,

    /// Upper bound on handling time for a single request.
    pub request_timeout: Duration,

    /// Generate random slot availability at startup. When off, every
    /// slot is open.
    pub mock_availability: bool,

    /// Days of availability generated from today.
    pub availability_horizon_days: u64,

    /// Dates offered by the calendar endpoint by default.
    pub calendar_days: u64,

    /// Login e-mail that receives the admin role.
    pub admin_email: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            event_bus_capacity: 1024,
            payment_delay: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(30),
            mock_availability: true,
            availability_horizon_days: 30,
            calendar_days: 14,
            admin_email: ADMIN_EMAIL.to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", defaults.event_bus_capacity),
            payment_delay: Duration::from_millis(parse_env("PAYMENT_DELAY_MS", 2000)),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30)),
            mock_availability: parse_env_bool("MOCK_AVAILABILITY", defaults.mock_availability),
            availability_horizon_days: parse_env(
                "AVAILABILITY_HORIZON_DAYS",
                defaults.availability_horizon_days,
            ),
            calendar_days: parse_env("CALENDAR_DAYS", defaults.calendar_days),
            admin_email: std::env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key)
        .ok()
        .map(|v| v.to_ascii_lowercase())
        .as_deref()
    {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.payment_delay, Duration::from_millis(2000));
        assert_eq!(config.availability_horizon_days, 30);
        assert_eq!(config.calendar_days, 14);
        assert!(config.mock_availability);
        assert_eq!(config.admin_email, "admin@jagofutsal.com");
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: u64 = parse_env("FUTSAL_GATEWAY_TEST_SURELY_UNSET", 7);
        assert_eq!(value, 7);
        assert!(parse_env_bool("FUTSAL_GATEWAY_TEST_SURELY_UNSET", true));
    }
}
