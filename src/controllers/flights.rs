use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::resources;
use crate::booking::{FareSchedule, FlightFilter, FlightOffer};
use crate::error::AppResult;
use crate::middleware::SignedIn;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/flights", get(search_flights))
}

#[derive(Debug, Serialize)]
struct FlightsResponse {
    success: bool,
    flights: Vec<FlightOffer>,
    count: usize,
}

// GET /api/flights?origin=&destination=&date=&airline_id=&min_price=&max_price=&class=&sort=
async fn search_flights(
    State(state): State<Arc<AppState>>,
    SignedIn(user): SignedIn,
    Query(filter): Query<FlightFilter>,
) -> AppResult<Json<FlightsResponse>> {
    let (flights, airlines) = tokio::try_join!(resources::flights(&state.api), resources::airlines(&state.api))?;
    tracing::debug!("{} searching {} flights", user.email, flights.len());

    let flights = filter.apply(flights, &airlines, FareSchedule::SEARCH, state.config.booking.base_fare);
    Ok(Json(FlightsResponse {
        success: true,
        count: flights.len(),
        flights,
    }))
}
