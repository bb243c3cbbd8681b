//! Client-side flight browsing: filter and sort the full flight list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fare::FareSchedule;
use crate::models::{Airline, Flight, RecordId, SeatClass};
use crate::panel::catalog::UNKNOWN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightSort {
    #[default]
    Departure,
    Duration,
    Price,
}

/// Every field is optional; an empty filter keeps every flight.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FlightFilter {
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// Departure date, `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
    pub airline_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Class the listed price is quoted in.
    #[serde(default)]
    pub class: SeatClass,
    #[serde(default)]
    pub sort: FlightSort,
}

/// One row of the flight list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightOffer {
    pub flight: Flight,
    pub route: String,
    pub airline_name: String,
    pub duration_minutes: Option<i64>,
    pub base_fare: f64,
    pub class: SeatClass,
    pub price: f64,
}

impl FlightOffer {
    pub fn new(flight: Flight, airlines: &[Airline], class: SeatClass, fares: FareSchedule, default_fare: f64) -> Self {
        let airline_name = airlines
            .iter()
            .find(|a| a.id == flight.airline_id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let base_fare = base_fare(&flight, default_fare);
        Self {
            route: flight.route(),
            duration_minutes: flight.duration_minutes(),
            price: fares.price(base_fare, class),
            airline_name,
            base_fare,
            class,
            flight,
        }
    }
}

/// The flight's own fare when the API publishes one.
pub fn base_fare(flight: &Flight, default_fare: f64) -> f64 {
    flight.price.filter(|p| p.is_finite() && *p >= 0.0).unwrap_or(default_fare)
}

fn contains_ci(haystack: &str, needle: &Option<String>) -> bool {
    match needle.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

impl FlightFilter {
    pub fn matches(&self, offer: &FlightOffer) -> bool {
        let flight = &offer.flight;

        if !contains_ci(&flight.origin, &self.origin) || !contains_ci(&flight.destination, &self.destination) {
            return false;
        }
        if let Some(date) = self.date {
            if flight.departure().map(|d| d.date()) != Some(date) {
                return false;
            }
        }
        if let Some(airline) = self.airline_id.as_deref().filter(|a| !a.is_empty()) {
            if flight.airline_id != RecordId::from(airline) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| offer.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| offer.price > max) {
            return false;
        }
        true
    }

    /// Builds offers for every flight, keeps the matching ones and sorts them.
    /// Flights with unreadable timestamps sort last.
    pub fn apply(
        &self,
        flights: Vec<Flight>,
        airlines: &[Airline],
        fares: FareSchedule,
        default_fare: f64,
    ) -> Vec<FlightOffer> {
        let mut offers: Vec<FlightOffer> = flights
            .into_iter()
            .map(|f| FlightOffer::new(f, airlines, self.class, fares, default_fare))
            .filter(|o| self.matches(o))
            .collect();

        match self.sort {
            FlightSort::Departure => offers.sort_by_key(|o| (o.flight.departure().is_none(), o.flight.departure())),
            FlightSort::Duration => offers.sort_by_key(|o| (o.duration_minutes.is_none(), o.duration_minutes)),
            FlightSort::Price => offers.sort_by(|a, b| a.price.total_cmp(&b.price)),
        }
        offers
    }
}
