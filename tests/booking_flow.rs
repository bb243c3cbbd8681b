mod common;

use airline_ops::booking::{BookingDesk, FarePage, SelectionChange, SessionStatus};
use airline_ops::config::BookingConfig;
use airline_ops::error::{BookingError, BOOKING_FALLBACK_MESSAGE};
use airline_ops::models::{RecordId, SeatClass, User};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn desk(server: &MockServer) -> BookingDesk {
    BookingDesk::new(
        common::client(server),
        BookingConfig {
            taken_ratio: 0.0,
            ..BookingConfig::default()
        },
    )
}

fn passenger() -> User {
    User {
        id: RecordId::from("u-1"),
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        passenger_id: Some(RecordId::from("p-1")),
    }
}

async fn mount_flight(server: &MockServer, price: Option<f64>) {
    Mock::given(method("GET"))
        .and(path("/api/flights/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "f1",
                "airline_id": "kc",
                "origin": "ALA",
                "destination": "TSE",
                "departure_time": "2025-05-02T09:00:00Z",
                "arrival_time": "2025-05-02T10:40:00Z",
                "status": "On Time",
                "price": price
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_booking() {
    let server = MockServer::start().await;
    mount_flight(&server, Some(250.0)).await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_partial_json(json!({
            "passenger_id": "p-1",
            "flight_id": "f1",
            "seat_number": "12C",
            "class": "Business",
            "price": 500.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": "t-9",
                "passenger_id": "p-1",
                "flight_id": "f1",
                "seat_number": "12C",
                "class": "Business",
                "price": 500.0,
                "status": "Confirmed"
            },
            "message": "Booking successful"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let desk = desk(&server);
    let session = desk.open(&RecordId::from("f1"), FarePage::Search).await.unwrap();
    assert_eq!(session.route, "ALA → TSE");
    assert_eq!(session.price, 250.0);

    let (change, _) = desk.click_seat(session.id, "12C").await.unwrap();
    assert_eq!(change, SelectionChange::Selected { seat: "12C".into() });
    let view = desk.select_class(session.id, SeatClass::Business).await.unwrap();
    assert_eq!(view.price, 500.0);

    let confirmation = desk.submit(session.id, Some(&passenger())).await.unwrap();
    assert_eq!(confirmation.message, "Booking successful");
    assert_eq!(confirmation.seat, "12C");
    assert_eq!(confirmation.ticket.unwrap().id.as_str(), "t-9");
    assert_eq!(confirmation.redirect_to, "/my-tickets");
    assert_eq!(confirmation.redirect_after_ms, 2000);

    let view = desk.get(session.id).await.unwrap();
    assert_eq!(view.status, SessionStatus::Confirmed { seat: "12C".into() });

    let again = desk.submit(session.id, Some(&passenger())).await.unwrap_err();
    assert!(matches!(again, BookingError::AlreadySubmitted));
}

#[tokio::test]
async fn test_rejection_keeps_session_open() {
    let server = MockServer::start().await;
    mount_flight(&server, None).await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "Seat 3A is no longer available" })))
        .mount(&server)
        .await;

    let desk = desk(&server);
    let session = desk.open(&RecordId::from("f1"), FarePage::Details).await.unwrap();
    desk.click_seat(session.id, "3A").await.unwrap();

    let err = desk.submit(session.id, Some(&passenger())).await.unwrap_err();
    assert_eq!(err.to_string(), "Seat 3A is no longer available");

    let view = desk.get(session.id).await.unwrap();
    assert_eq!(view.status, SessionStatus::Open);
    assert_eq!(view.last_error.as_deref(), Some("Seat 3A is no longer available"));
    assert_eq!(view.selected_seat.unwrap().id, "3A");
}

#[tokio::test]
async fn test_missing_profile_and_blank_errors() {
    let server = MockServer::start().await;
    mount_flight(&server, None).await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Passenger not found for user" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(500).set_body_string(""))
        .mount(&server)
        .await;

    let desk = desk(&server);
    let session = desk.open(&RecordId::from("f1"), FarePage::Search).await.unwrap();
    desk.click_seat(session.id, "20F").await.unwrap();

    let err = desk.submit(session.id, Some(&passenger())).await.unwrap_err();
    assert!(matches!(err, BookingError::ProfileMissing));

    let err = desk.submit(session.id, Some(&passenger())).await.unwrap_err();
    assert!(matches!(err, BookingError::Rejected(_)));
    assert_eq!(err.to_string(), BOOKING_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_unknown_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/flights/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let desk = desk(&server);
    let err = desk.open(&RecordId::from("nope"), FarePage::Search).await.unwrap_err();
    assert!(matches!(err, BookingError::FlightNotFound(id) if id == "nope"));
    assert_eq!(desk.len().await, 0);
}
