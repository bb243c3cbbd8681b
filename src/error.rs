//! Error types for every layer of the console.
//!
//! Library code returns the narrow enums (`ApiError`, `PanelError`,
//! `BookingError`, `SessionError`); HTTP handlers return `AppError`, which
//! knows how to turn any of them into a JSON response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Fallback shown when a booking fails without a usable server message.
pub const BOOKING_FALLBACK_MESSAGE: &str = "Booking failed. Please try again.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Failures talking to the remote REST API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer. `message` is the server's own text, if it sent any.
    #[error("{}", status_text(.status, .message))]
    Status { status: u16, message: Option<String> },

    #[error("Remote API temporarily unavailable")]
    CircuitOpen,

    #[error("Unexpected response from API: {0}")]
    Decode(String),
}

fn status_text(status: &u16, message: &Option<String>) -> String {
    if let Some(message) = message {
        return message.clone();
    }
    match StatusCode::from_u16(*status).ok().and_then(|s| s.canonical_reason()) {
        Some(reason) => format!("Request failed with status {} {}", status, reason),
        None => format!("Request failed with status {}", status),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport-level problems: nothing reached or came back from the server.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::CircuitOpen)
    }
}

#[derive(Error, Debug)]
pub enum PanelError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Validation(String),

    #[error("Unknown API method: {0}")]
    UnknownMethod(String),

    #[error("Record {0} not found")]
    RecordNotFound(String),

    #[error("No form is open")]
    FormClosed,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Please sign in to book a flight")]
    NotSignedIn,

    #[error("Please complete your passenger profile before booking")]
    ProfileMissing,

    #[error("Please select a seat")]
    NoSeatSelected,

    #[error("Seat {0} does not exist")]
    UnknownSeat(String),

    #[error("Flight {0} not found")]
    FlightNotFound(String),

    #[error("Booking session {0} not found")]
    SessionNotFound(Uuid),

    #[error("This booking has already been submitted")]
    AlreadySubmitted,

    /// The API refused the booking; carries its message or the fallback.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Network(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Validation(String),
}

/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{0}")]
    Unauthorized(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
}

fn api_status(err: &ApiError) -> (StatusCode, &'static str) {
    match err {
        ApiError::Status { status, .. } => {
            let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            if code.is_client_error() {
                (code, "API_REJECTED")
            } else {
                (StatusCode::BAD_GATEWAY, "API_ERROR")
            }
        }
        ApiError::Transport(_) => (StatusCode::BAD_GATEWAY, "NETWORK_ERROR"),
        ApiError::CircuitOpen => (StatusCode::SERVICE_UNAVAILABLE, "API_UNAVAILABLE"),
        ApiError::Decode(_) => (StatusCode::BAD_GATEWAY, "API_DECODE_ERROR"),
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Api(e) => api_status(e),
            AppError::Panel(e) => match e {
                PanelError::Api(inner) => api_status(inner),
                PanelError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                PanelError::UnknownMethod(_) => (StatusCode::NOT_IMPLEMENTED, "UNKNOWN_METHOD"),
                PanelError::RecordNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                PanelError::FormClosed => (StatusCode::CONFLICT, "FORM_CLOSED"),
            },
            AppError::Booking(e) => match e {
                BookingError::NotSignedIn => (StatusCode::UNAUTHORIZED, "NOT_SIGNED_IN"),
                BookingError::ProfileMissing => (StatusCode::FORBIDDEN, "PROFILE_MISSING"),
                BookingError::NoSeatSelected => (StatusCode::BAD_REQUEST, "NO_SEAT_SELECTED"),
                BookingError::UnknownSeat(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_SEAT"),
                BookingError::FlightNotFound(_) => (StatusCode::NOT_FOUND, "FLIGHT_NOT_FOUND"),
                BookingError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
                BookingError::AlreadySubmitted => (StatusCode::CONFLICT, "ALREADY_SUBMITTED"),
                BookingError::Rejected(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BOOKING_REJECTED"),
                BookingError::Network(_) => (StatusCode::BAD_GATEWAY, "NETWORK_ERROR"),
                BookingError::Api(inner) => api_status(inner),
            },
            AppError::Session(e) => match e {
                SessionError::Api(inner) => api_status(inner),
                SessionError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                SessionError::Io(_) | SessionError::Corrupt(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "SESSION_STORAGE_ERROR")
                }
            },
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!("{} ({}): {}", code, status, self);
        } else {
            warn!("{} ({}): {}", code, status, self);
        }

        let body = Json(ErrorResponse {
            success: false,
            message: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
