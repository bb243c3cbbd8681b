//! Booking submission endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{RecordId, SeatClass};

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub passenger_id: RecordId,
    pub flight_id: RecordId,
    pub seat_number: String,
    pub class: SeatClass,
    pub price: f64,
}

/// The API answers with the created ticket on most deployments, sometimes
/// with a `message` beside the `data` envelope. Callers get the raw body and
/// pick out what they recognise.
pub async fn create(client: &ApiClient, request: &BookingRequest) -> Result<Value, ApiError> {
    client.post_raw("bookings", request).await
}
