//! Booking sessions: one per open booking page.
//!
//! A session owns the flight being booked, its demo seat map, the selected
//! seat and class, and the fare schedule of the page that opened it. The
//! desk keeps them in memory keyed by UUID; idle ones are purged by the
//! background loop in `main`.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::fare::{FarePage, FareSchedule};
use super::search::base_fare;
use super::seat_map::{SeatLayout, SeatMap, SeatPicker, SelectionChange};
use crate::api::{bookings, resources, ApiClient};
use crate::api::bookings::BookingRequest;
use crate::config::BookingConfig;
use crate::error::{ApiError, BookingError, BOOKING_FALLBACK_MESSAGE};
use crate::models::{Flight, RecordId, Seat, SeatClass, Ticket, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    Submitting,
    Confirmed { seat: String },
}

#[derive(Debug)]
pub struct BookingSession {
    pub id: Uuid,
    pub flight: Flight,
    pub fare_page: FarePage,
    pub base_fare: f64,
    pub class: SeatClass,
    pub seats: SeatPicker,
    pub status: SessionStatus,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    last_active: Instant,
}

impl BookingSession {
    fn new(flight: Flight, fare_page: FarePage, default_fare: f64, seats: SeatPicker) -> Self {
        Self {
            id: Uuid::new_v4(),
            base_fare: base_fare(&flight, default_fare),
            flight,
            fare_page,
            class: SeatClass::Economy,
            seats,
            status: SessionStatus::Open,
            last_error: None,
            created_at: Utc::now(),
            last_active: Instant::now(),
        }
    }

    pub fn price(&self) -> f64 {
        FareSchedule::for_page(self.fare_page).price(self.base_fare, self.class)
    }

    fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    fn view(&self) -> BookingSessionView {
        BookingSessionView {
            id: self.id,
            route: self.flight.route(),
            flight: self.flight.clone(),
            fare_page: self.fare_page,
            base_fare: self.base_fare,
            class: self.class,
            price: self.price(),
            selected_seat: self.seats.selected().cloned(),
            available_seats: self.seats.map.available(),
            seat_map: self.seats.map.clone(),
            status: self.status.clone(),
            last_error: self.last_error.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingSessionView {
    pub id: Uuid,
    pub route: String,
    pub flight: Flight,
    pub fare_page: FarePage,
    pub base_fare: f64,
    pub class: SeatClass,
    pub price: f64,
    pub selected_seat: Option<Seat>,
    pub available_seats: usize,
    pub seat_map: SeatMap,
    pub status: SessionStatus,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub message: String,
    /// Present when the API answered with a recognisable ticket.
    pub ticket: Option<Ticket>,
    pub seat: String,
    pub class: SeatClass,
    pub price: f64,
    pub redirect_to: String,
    pub redirect_after_ms: u64,
}

fn mentions_profile(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("profile") || lower.contains("passenger")
}

/// Maps a failed `POST /bookings` onto what the user is told.
pub fn classify_failure(err: ApiError) -> BookingError {
    match err {
        ApiError::Status {
            status: 404,
            message: Some(message),
        } if mentions_profile(&message) => BookingError::ProfileMissing,
        ApiError::Status {
            message: Some(message), ..
        } => BookingError::Rejected(message),
        ApiError::Status { message: None, .. } | ApiError::Decode(_) => {
            BookingError::Rejected(BOOKING_FALLBACK_MESSAGE.to_string())
        }
        ApiError::Transport(_) | ApiError::CircuitOpen => {
            BookingError::Network(BOOKING_FALLBACK_MESSAGE.to_string())
        }
    }
}

pub struct BookingDesk {
    client: ApiClient,
    config: BookingConfig,
    sessions: Mutex<HashMap<Uuid, BookingSession>>,
}

impl BookingDesk {
    pub fn new(client: ApiClient, config: BookingConfig) -> Self {
        Self {
            client,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn draw_seats(&self) -> SeatPicker {
        let layout = SeatLayout::standard(self.config.seat_rows);
        let map = SeatMap::generate(&layout, self.config.taken_ratio, &mut rand::thread_rng());
        SeatPicker::new(map)
    }

    /// Fetches the flight and opens a session with a freshly drawn seat map.
    pub async fn open(&self, flight_id: &RecordId, fare_page: FarePage) -> Result<BookingSessionView, BookingError> {
        let flight = match resources::flight(&self.client, flight_id).await {
            Ok(flight) => flight,
            Err(ApiError::Status { status: 404, .. }) => {
                return Err(BookingError::FlightNotFound(flight_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(self.start(flight, fare_page).await)
    }

    /// Opens a session for an already loaded flight.
    pub async fn start(&self, flight: Flight, fare_page: FarePage) -> BookingSessionView {
        let session = BookingSession::new(flight, fare_page, self.config.base_fare, self.draw_seats());
        let view = session.view();
        info!("Opened booking session {} for flight {}", session.id, session.flight.id);
        self.sessions.lock().await.insert(session.id, session);
        view
    }

    async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BookingSession) -> Result<R, BookingError>,
    ) -> Result<R, BookingError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound(id))?;
        session.touch();
        f(session)
    }

    pub async fn get(&self, id: Uuid) -> Result<BookingSessionView, BookingError> {
        self.with_session(id, |s| Ok(s.view())).await
    }

    pub async fn click_seat(&self, id: Uuid, seat: &str) -> Result<(SelectionChange, BookingSessionView), BookingError> {
        self.with_session(id, |s| {
            if s.status != SessionStatus::Open {
                return Err(BookingError::AlreadySubmitted);
            }
            let change = s.seats.click(seat)?;
            debug!("Session {}: {:?}", id, change);
            Ok((change, s.view()))
        })
        .await
    }

    /// Switching class only reprices; the selected seat stays.
    pub async fn select_class(&self, id: Uuid, class: SeatClass) -> Result<BookingSessionView, BookingError> {
        self.with_session(id, |s| {
            if s.status != SessionStatus::Open {
                return Err(BookingError::AlreadySubmitted);
            }
            s.class = class;
            Ok(s.view())
        })
        .await
    }

    /// Posts the booking. Nothing is retried; a failed attempt leaves the
    /// session open with the error recorded.
    pub async fn submit(&self, id: Uuid, user: Option<&User>) -> Result<BookingConfirmation, BookingError> {
        let request = self
            .with_session(id, |s| {
                if s.status != SessionStatus::Open {
                    return Err(BookingError::AlreadySubmitted);
                }
                let user = user.ok_or(BookingError::NotSignedIn)?;
                let passenger_id = user.passenger_id.clone().ok_or(BookingError::ProfileMissing)?;
                let seat = s.seats.selected().ok_or(BookingError::NoSeatSelected)?;

                let request = BookingRequest {
                    passenger_id,
                    flight_id: s.flight.id.clone(),
                    seat_number: seat.id.clone(),
                    class: s.class,
                    price: s.price(),
                };
                s.status = SessionStatus::Submitting;
                s.last_error = None;
                Ok(request)
            })
            .await?;

        info!(
            "Submitting booking {} seat {} ({}) on flight {}",
            id, request.seat_number, request.class, request.flight_id
        );
        let result = bookings::create(&self.client, &request).await;

        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id);

        match result {
            Ok(body) => {
                if let Some(session) = session {
                    session.status = SessionStatus::Confirmed {
                        seat: request.seat_number.clone(),
                    };
                }
                info!("Booking {} confirmed", id);
                Ok(self.confirmation(request, body))
            }
            Err(e) => {
                let failure = classify_failure(e);
                match &failure {
                    BookingError::Network(_) => error!("Booking {} failed: network error", id),
                    other => warn!("Booking {} rejected: {}", id, other),
                }
                if let Some(session) = session {
                    session.status = SessionStatus::Open;
                    session.last_error = Some(failure.to_string());
                }
                Err(failure)
            }
        }
    }

    /// `body` is the raw answer; the ticket may sit inside `data` while the
    /// success text sits beside it.
    fn confirmation(&self, request: BookingRequest, body: Value) -> BookingConfirmation {
        let payload = match body.get("data") {
            Some(data) if !data.is_null() => data.clone(),
            _ => body.clone(),
        };
        let message = body
            .get("message")
            .or_else(|| payload.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Booking confirmed! Seat {} ({}).", request.seat_number, request.class));
        let ticket = payload
            .get("ticket")
            .cloned()
            .or(Some(payload))
            .and_then(|v| serde_json::from_value::<Ticket>(v).ok());

        BookingConfirmation {
            message,
            ticket,
            seat: request.seat_number,
            class: request.class,
            price: request.price,
            redirect_to: self.config.redirect_to.clone(),
            redirect_after_ms: self.config.redirect_after_ms,
        }
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), BookingError> {
        self.sessions
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(BookingError::SessionNotFound(id))
    }

    /// Drops sessions idle for at least `ttl`. Returns how many went.
    pub async fn purge_stale(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_active.elapsed() < ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            info!("Purged {} idle booking sessions", purged);
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.session_ttl_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, CircuitBreakerConfig};
    use serde_json::json;

    fn desk(taken_ratio: f64) -> BookingDesk {
        let api = ApiConfig {
            // nothing listens here; these tests never reach the network
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 1,
        };
        let client = ApiClient::from_config(&api, &CircuitBreakerConfig::default()).unwrap();
        BookingDesk::new(
            client,
            BookingConfig {
                seat_rows: 10,
                taken_ratio,
                ..BookingConfig::default()
            },
        )
    }

    fn flight(price: Option<f64>) -> Flight {
        serde_json::from_value(json!({
            "id": "f-1",
            "airline_id": "kc",
            "origin": "ALA",
            "destination": "TSE",
            "departure_time": "2025-05-02T09:00",
            "arrival_time": "2025-05-02T10:40",
            "price": price,
        }))
        .unwrap()
    }

    fn user(passenger_id: Option<&str>) -> User {
        User {
            id: "u-1".into(),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            passenger_id: passenger_id.map(RecordId::from),
        }
    }

    #[tokio::test]
    async fn test_session_prices_follow_page_and_class() {
        let desk = desk(0.0);
        let view = desk.start(flight(Some(100.0)), FarePage::Details).await;
        assert_eq!(view.price, 100.0);
        assert_eq!(view.available_seats, 60);

        let view = desk.select_class(view.id, SeatClass::First).await.unwrap();
        assert_eq!(view.price, 200.0);

        let view = desk.start(flight(None), FarePage::Search).await;
        let view = desk.select_class(view.id, SeatClass::Business).await.unwrap();
        assert_eq!(view.price, 398.0);
    }

    #[tokio::test]
    async fn test_seat_clicks_keep_single_selection() {
        let desk = desk(0.0);
        let id = desk.start(flight(None), FarePage::Search).await.id;

        desk.click_seat(id, "3A").await.unwrap();
        let (change, view) = desk.click_seat(id, "4B").await.unwrap();
        assert_eq!(
            change,
            SelectionChange::Replaced {
                previous: "3A".into(),
                seat: "4B".into()
            }
        );
        assert_eq!(view.selected_seat.unwrap().id, "4B");

        let err = desk.click_seat(id, "99Z").await.unwrap_err();
        assert!(matches!(err, BookingError::UnknownSeat(_)));
    }

    #[tokio::test]
    async fn test_submit_checks_before_calling_the_api() {
        let desk = desk(0.0);
        let id = desk.start(flight(None), FarePage::Search).await.id;

        let err = desk.submit(id, None).await.unwrap_err();
        assert!(matches!(err, BookingError::NotSignedIn));

        let err = desk.submit(id, Some(&user(None))).await.unwrap_err();
        assert!(matches!(err, BookingError::ProfileMissing));

        let err = desk.submit(id, Some(&user(Some("p-1")))).await.unwrap_err();
        assert!(matches!(err, BookingError::NoSeatSelected));

        // the session is still usable after each refusal
        assert_eq!(desk.get(id).await.unwrap().status, SessionStatus::Open);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let desk = desk(0.0);
        let missing = Uuid::new_v4();
        assert!(matches!(desk.get(missing).await, Err(BookingError::SessionNotFound(_))));
        assert!(matches!(desk.remove(missing).await, Err(BookingError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_purge_stale() {
        let desk = desk(0.3);
        desk.start(flight(None), FarePage::Search).await;
        desk.start(flight(None), FarePage::Details).await;

        assert_eq!(desk.purge_stale(Duration::from_secs(3600)).await, 0);
        assert_eq!(desk.purge_stale(Duration::ZERO).await, 2);
        assert_eq!(desk.len().await, 0);
    }

    fn request() -> BookingRequest {
        BookingRequest {
            passenger_id: "p-1".into(),
            flight_id: "f-1".into(),
            seat_number: "2B".to_string(),
            class: SeatClass::First,
            price: 398.0,
        }
    }

    #[test]
    fn test_confirmation_reads_message_beside_envelope() {
        let body = json!({
            "data": {
                "id": "t-3",
                "passenger_id": "p-1",
                "flight_id": "f-1",
                "seat_number": "2B",
                "class": "First",
                "price": 398.0,
                "status": "Confirmed"
            },
            "message": "Booking successful"
        });
        let confirmation = desk(0.0).confirmation(request(), body);
        assert_eq!(confirmation.message, "Booking successful");
        assert_eq!(confirmation.ticket.unwrap().id.as_str(), "t-3");
    }

    #[test]
    fn test_confirmation_without_message_or_ticket() {
        let confirmation = desk(0.0).confirmation(request(), json!({ "data": { "ok": true } }));
        assert_eq!(confirmation.message, "Booking confirmed! Seat 2B (First).");
        assert!(confirmation.ticket.is_none());
    }

    #[test]
    fn test_classify_failure() {
        let profile = classify_failure(ApiError::Status {
            status: 404,
            message: Some("Passenger profile not found".to_string()),
        });
        assert!(matches!(profile, BookingError::ProfileMissing));

        let not_found = classify_failure(ApiError::Status {
            status: 404,
            message: Some("Flight not found".to_string()),
        });
        assert_eq!(not_found.to_string(), "Flight not found");

        let blank = classify_failure(ApiError::Status {
            status: 502,
            message: None,
        });
        assert_eq!(blank.to_string(), BOOKING_FALLBACK_MESSAGE);

        let network = classify_failure(ApiError::CircuitOpen);
        assert!(matches!(network, BookingError::Network(_)));
    }
}
