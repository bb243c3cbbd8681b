#![allow(dead_code)]

use std::path::PathBuf;

use airline_ops::api::ApiClient;
use airline_ops::config::{
    ApiConfig, AppConfig, BookingConfig, CircuitBreakerConfig, Config, SessionConfig,
};
use uuid::Uuid;
use wiremock::MockServer;

pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_seconds: 5,
    }
}

pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::from_config(&api_config(server), &CircuitBreakerConfig::default()).unwrap()
}

pub fn session_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("airline-ops-test-{}", Uuid::new_v4()))
        .join("session.json")
}

pub fn config(server: &MockServer) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "airline_ops=debug".to_string(),
        },
        api: api_config(server),
        circuit_breaker: CircuitBreakerConfig::default(),
        session: SessionConfig { file: session_file() },
        booking: BookingConfig {
            taken_ratio: 0.0,
            ..BookingConfig::default()
        },
    }
}
