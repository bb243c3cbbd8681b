use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

// Top-level configuration, one section per concern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub session: SessionConfig,
    pub booking: BookingConfig,
}

// HTTP surface served by this process
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Remote REST API that owns all persistence
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

// Where the signed-in user is cached between runs
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub file: PathBuf,
}

// Demo booking parameters
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub base_fare: f64,
    pub seat_rows: u32,
    pub taken_ratio: f64,
    pub session_ttl_seconds: u64,
    pub redirect_to: String,
    pub redirect_after_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            timeout_seconds: 60,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            base_fare: 199.0,
            seat_rows: 30,
            taken_ratio: 0.3,
            session_ttl_seconds: 900,
            redirect_to: "/my-tickets".to_string(),
            redirect_after_ms: 2000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_defaults = ApiConfig::default();
        let breaker_defaults = CircuitBreakerConfig::default();
        let booking_defaults = BookingConfig::default();

        let config = Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", 8000)?,
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "airline_ops=debug,tower_http=debug".to_string()),
            },
            api: ApiConfig {
                base_url: env::var("API_BASE_URL").unwrap_or(api_defaults.base_url),
                timeout_seconds: parse_var("API_TIMEOUT_SECONDS", api_defaults.timeout_seconds)?,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: parse_var(
                    "CIRCUIT_BREAKER_FAILURE_THRESHOLD",
                    breaker_defaults.failure_threshold,
                )?,
                timeout_seconds: parse_var(
                    "CIRCUIT_BREAKER_TIMEOUT_SECONDS",
                    breaker_defaults.timeout_seconds,
                )?,
            },
            session: SessionConfig {
                file: env::var("SESSION_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".airline-ops/session.json")),
            },
            booking: BookingConfig {
                base_fare: parse_var("BOOKING_BASE_FARE", booking_defaults.base_fare)?,
                seat_rows: parse_var("BOOKING_SEAT_ROWS", booking_defaults.seat_rows)?,
                taken_ratio: parse_var("BOOKING_TAKEN_RATIO", booking_defaults.taken_ratio)?,
                session_ttl_seconds: parse_var(
                    "BOOKING_SESSION_TTL_SECONDS",
                    booking_defaults.session_ttl_seconds,
                )?,
                redirect_to: env::var("BOOKING_REDIRECT_TO").unwrap_or(booking_defaults.redirect_to),
                redirect_after_ms: parse_var(
                    "BOOKING_REDIRECT_AFTER_MS",
                    booking_defaults.redirect_after_ms,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.booking.taken_ratio) {
            return Err(ConfigError::InvalidValue(format!(
                "BOOKING_TAKEN_RATIO must be between 0 and 1, got {}",
                self.booking.taken_ratio
            )));
        }
        if self.booking.seat_rows == 0 {
            return Err(ConfigError::InvalidValue(
                "BOOKING_SEAT_ROWS must be at least 1".to_string(),
            ));
        }
        if self.circuit_breaker.failure_threshold == 0 {
            return Err(ConfigError::InvalidValue(
                "CIRCUIT_BREAKER_FAILURE_THRESHOLD must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{name} must be a valid value, got {raw:?}")))
}
