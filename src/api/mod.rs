//! Client for the remote REST API.
//!
//! All persistence and business rules live behind this boundary. Every call
//! goes through [`ApiClient`], which owns the HTTP client and the circuit
//! breaker; the submodules are thin, namespaced wrappers, one function per
//! endpoint.

pub mod bookings;
pub mod circuit_breaker;
pub mod resources;
pub mod user;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::{ApiConfig, CircuitBreakerConfig};
use crate::error::ApiError;

pub use circuit_breaker::{CircuitBreaker, CircuitState};
pub use resources::Resource;

/// The API wraps payloads as `{ "data": ... }` but a few endpoints answer
/// with the bare value.
#[derive(Deserialize)]
#[serde(untagged)]
enum Body<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Body<T> {
    fn into_inner(self) -> T {
        match self {
            Body::Wrapped { data } => data,
            Body::Bare(value) => value,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl ApiClient {
    pub fn from_config(api: &ApiConfig, breaker: &CircuitBreakerConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            http_client,
            circuit_breaker: Arc::new(CircuitBreaker::new(
                breaker.failure_threshold,
                Duration::from_secs(breaker.timeout_seconds),
            )),
        })
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http_client.request(method, url)
    }

    /// Sends a request through the circuit breaker and returns the raw body
    /// of a 2xx answer.
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        if !self.circuit_breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking API request");
            return Err(ApiError::CircuitOpen);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("API request failed: {:?}", e);
                self.circuit_breaker.record_failure();
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                self.circuit_breaker.record_failure();
                return Err(ApiError::Transport(e));
            }
        };

        if status.is_server_error() {
            self.circuit_breaker.record_failure();
        } else {
            self.circuit_breaker.record_success();
        }

        if !status.is_success() {
            let message = server_message(&body);
            debug!("API answered {}: {:?}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// `GET` a list endpoint.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    /// `GET` a single record.
    pub async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// `POST` and hand back the whole JSON body, envelope included, for
    /// callers that read fields sitting next to `data`.
    pub async fn post_raw<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = self.execute(self.request(Method::POST, path).json(body)).await?;
        decode_raw(&body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

/// An empty body reads as `null`.
fn decode_raw(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_value::<Body<T>>(decode_raw(body)?)
        .map(Body::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// The server's `message` or `error` text from a failed call's body.
fn server_message(body: &[u8]) -> Option<String> {
    let json = serde_json::from_slice::<Value>(body).ok()?;
    let candidates = [
        json.get("message"),
        json.get("error").and_then(|e| e.get("message")),
        json.get("error"),
        json.get("msg"),
    ];
    let found = candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().filter(|s| !s.trim().is_empty()))
        .map(str::to_string);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_wrapped_and_bare_lists() {
        let wrapped: Vec<Value> = decode(br#"{"data":[{"id":1},{"id":2}]}"#).unwrap();
        let bare: Vec<Value> = decode(br#"[{"id":1}]"#).unwrap();
        assert_eq!(wrapped.len(), 2);
        assert_eq!(bare, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_decode_empty_body_as_null() {
        let value: Value = decode(b"  ").unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_decode_raw_keeps_envelope_fields() {
        let raw = decode_raw(br#"{"data":{"id":"t-1"},"message":"Booking successful"}"#).unwrap();
        assert_eq!(raw["message"], "Booking successful");
        assert_eq!(raw["data"]["id"], "t-1");
        assert_eq!(decode_raw(b"").unwrap(), Value::Null);
        assert!(matches!(decode_raw(b"<html>"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_server_message_lookup_order() {
        let msg = server_message(br#"{"message":"Seat 4A is taken"}"#);
        assert_eq!(msg.as_deref(), Some("Seat 4A is taken"));

        let nested = server_message(br#"{"error":{"message":"dup"}}"#);
        assert_eq!(nested.as_deref(), Some("dup"));

        let plain = server_message(br#"{"error":"Invalid credentials"}"#);
        assert_eq!(plain.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_no_server_message_falls_back_to_status() {
        assert_eq!(server_message(b"<html>nope</html>"), None);
        assert_eq!(server_message(br#"{"message":"  "}"#), None);

        let err = ApiError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(err.to_string(), "Request failed with status 404 Not Found");
    }
}
