//! Column and form descriptors for each airline resource, plus the
//! cross-entity lookups they render with.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use super::{FieldKind, FormField, PanelConfig, SelectOption};
use crate::api::{resources, ApiClient, Resource};
use crate::error::ApiError;
use crate::models::{
    parse_timestamp, Aircraft, AircraftStatus, Airline, Flight, FlightStatus, Gate, GateStatus,
    Passenger, RecordId, SeatClass, Terminal, TicketStatus,
};
use crate::table::{Column, Record};

pub const UNKNOWN: &str = "Unknown";

/// Related records a panel needs to turn ids into names.
#[derive(Debug, Default, Clone)]
pub struct Lookups {
    airlines: Vec<Airline>,
    aircraft: Vec<Aircraft>,
    terminals: Vec<Terminal>,
    gates: Vec<Gate>,
    flights: Vec<Flight>,
    passengers: Vec<Passenger>,
    labels: HashMap<(Resource, RecordId), String>,
}

/// Which other resources a panel resolves ids against.
pub fn dependencies(resource: Resource) -> &'static [Resource] {
    match resource {
        Resource::Aircraft => &[Resource::Airlines],
        Resource::Gates => &[Resource::Terminals],
        Resource::Flights => &[Resource::Airlines, Resource::Aircraft, Resource::Gates],
        Resource::Tickets => &[Resource::Passengers, Resource::Flights],
        Resource::Airlines | Resource::Terminals | Resource::Passengers => &[],
    }
}

async fn fetch_if<T, F>(deps: &[Resource], resource: Resource, fetch: F) -> Vec<T>
where
    F: Future<Output = Result<Vec<T>, ApiError>>,
{
    if !deps.contains(&resource) {
        return Vec::new();
    }
    match fetch.await {
        Ok(items) => items,
        Err(e) => {
            warn!("Failed to load {} for lookups: {}", resource, e);
            Vec::new()
        }
    }
}

impl Lookups {
    /// Fetches every dependency concurrently. A failed fetch leaves that
    /// lookup empty, so its ids render as "Unknown".
    pub async fn fetch(client: &ApiClient, deps: &[Resource]) -> Self {
        let (airlines, aircraft, terminals, gates, flights, passengers) = tokio::join!(
            fetch_if(deps, Resource::Airlines, resources::airlines(client)),
            fetch_if(deps, Resource::Aircraft, resources::aircraft(client)),
            fetch_if(deps, Resource::Terminals, resources::terminals(client)),
            fetch_if(deps, Resource::Gates, resources::gates(client)),
            fetch_if(deps, Resource::Flights, resources::flights(client)),
            fetch_if(deps, Resource::Passengers, resources::passengers(client)),
        );
        Self::from_parts(airlines, aircraft, terminals, gates, flights, passengers)
    }

    pub fn from_parts(
        airlines: Vec<Airline>,
        aircraft: Vec<Aircraft>,
        terminals: Vec<Terminal>,
        gates: Vec<Gate>,
        flights: Vec<Flight>,
        passengers: Vec<Passenger>,
    ) -> Self {
        let mut labels = HashMap::new();
        for a in &airlines {
            labels.insert((Resource::Airlines, a.id.clone()), a.name.clone());
        }
        for a in &aircraft {
            let label = if a.model.is_empty() {
                a.registration.clone()
            } else {
                format!("{} ({})", a.registration, a.model)
            };
            labels.insert((Resource::Aircraft, a.id.clone()), label);
        }
        for t in &terminals {
            labels.insert((Resource::Terminals, t.id.clone()), t.name.clone());
        }
        for g in &gates {
            labels.insert((Resource::Gates, g.id.clone()), format!("Gate {}", g.number));
        }
        for f in &flights {
            labels.insert((Resource::Flights, f.id.clone()), flight_label(f));
        }
        for p in &passengers {
            labels.insert((Resource::Passengers, p.id.clone()), p.name.clone());
        }

        Self {
            airlines,
            aircraft,
            terminals,
            gates,
            flights,
            passengers,
            labels,
        }
    }

    /// Display name for an id of `resource`, "Unknown" when unresolved.
    pub fn label(&self, resource: Resource, id: Option<&RecordId>) -> String {
        id.and_then(|id| self.labels.get(&(resource, id.clone())))
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Select options for a foreign-key field.
    pub fn options(&self, resource: Resource) -> Vec<SelectOption> {
        let ids: Vec<&RecordId> = match resource {
            Resource::Airlines => self.airlines.iter().map(|a| &a.id).collect(),
            Resource::Aircraft => self.aircraft.iter().map(|a| &a.id).collect(),
            Resource::Terminals => self.terminals.iter().map(|t| &t.id).collect(),
            Resource::Gates => self.gates.iter().map(|g| &g.id).collect(),
            Resource::Flights => self.flights.iter().map(|f| &f.id).collect(),
            Resource::Passengers => self.passengers.iter().map(|p| &p.id).collect(),
            Resource::Tickets => Vec::new(),
        };
        ids.into_iter()
            .map(|id| SelectOption::new(id.as_str(), self.label(resource, Some(id))))
            .collect()
    }
}

pub fn flight_label(flight: &Flight) -> String {
    match flight.departure() {
        Some(dep) => format!("{} ({})", flight.route(), dep.format("%Y-%m-%d %H:%M")),
        None => flight.route(),
    }
}

fn enum_options<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<SelectOption> {
    values.into_iter().map(|v| SelectOption::new(v, v)).collect()
}

/// Column rendering a foreign key through the lookups.
fn reference(field: &str, header: &str, target: Resource, lookups: &Arc<Lookups>) -> Column {
    let lookups = Arc::clone(lookups);
    let key = field.to_string();
    Column::new(field, header).with_render(move |record: &Record| {
        let id = record.get(&key).and_then(RecordId::from_value);
        lookups.label(target, id.as_ref())
    })
}

/// Column showing an API timestamp as `YYYY-MM-DD HH:MM`.
fn timestamp(field: &str, header: &str) -> Column {
    let key = field.to_string();
    Column::new(field, header).with_render(move |record: &Record| {
        let raw = record.get(&key).and_then(Value::as_str).unwrap_or_default();
        parse_timestamp(raw)
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string())
    })
}

fn money(field: &str, header: &str) -> Column {
    let key = field.to_string();
    Column::new(field, header).with_render(move |record: &Record| {
        match record.get(&key).and_then(Value::as_f64) {
            Some(amount) => format!("${:.2}", amount),
            None => String::new(),
        }
    })
}

/// Descriptors for `resource`, resolved against `lookups`.
pub fn panel_config(resource: Resource, lookups: &Arc<Lookups>) -> PanelConfig {
    match resource {
        Resource::Airlines => PanelConfig::new(
            resource.title(),
            vec![
                Column::new("name", "Name"),
                Column::new("code", "Code"),
                Column::new("country", "Country"),
                Column::new("logo", "Logo"),
            ],
            vec![
                FormField::text("name", "Airline Name").required(),
                FormField::text("code", "IATA Code").required(),
                FormField::text("country", "Country").required(),
                FormField::text("logo", "Logo URL"),
            ],
        ),

        Resource::Aircraft => PanelConfig::new(
            resource.title(),
            vec![
                Column::new("registration", "Registration"),
                Column::new("model", "Model"),
                reference("airline_id", "Airline", Resource::Airlines, lookups),
                Column::new("capacity", "Capacity"),
                Column::new("status", "Status"),
            ],
            vec![
                FormField::text("registration", "Registration").required(),
                FormField::text("model", "Model").required(),
                FormField::select("airline_id", "Airline", lookups.options(Resource::Airlines)).required(),
                FormField::number("capacity", "Capacity").required(),
                FormField::select(
                    "status",
                    "Status",
                    enum_options(AircraftStatus::ALL.iter().map(|s| s.as_str())),
                )
                .required(),
            ],
        )
        .with_initial("status", AircraftStatus::Active.as_str()),

        Resource::Terminals => PanelConfig::new(
            resource.title(),
            vec![
                Column::new("name", "Name"),
                Column::new("passenger_capacity", "Passenger Capacity"),
                Column::new("gate_count", "Gates"),
                Column::new("facilities", "Facilities"),
            ],
            vec![
                FormField::text("name", "Terminal Name").required(),
                FormField::number("passenger_capacity", "Passenger Capacity").required(),
                FormField::number("gate_count", "Number of Gates").required(),
                FormField::new("facilities", "Facilities", FieldKind::TextArea),
            ],
        ),

        Resource::Gates => PanelConfig::new(
            resource.title(),
            vec![
                Column::new("number", "Gate"),
                reference("terminal_id", "Terminal", Resource::Terminals, lookups),
                Column::new("location", "Location"),
                Column::new("area_capacity", "Area Capacity"),
                Column::new("status", "Status"),
            ],
            vec![
                FormField::text("number", "Gate Number").required(),
                FormField::select("terminal_id", "Terminal", lookups.options(Resource::Terminals)).required(),
                FormField::text("location", "Location"),
                FormField::number("area_capacity", "Area Capacity"),
                FormField::select(
                    "status",
                    "Status",
                    enum_options(GateStatus::ALL.iter().map(|s| s.as_str())),
                )
                .required(),
            ],
        )
        .with_initial("status", GateStatus::Open.as_str()),

        Resource::Flights => PanelConfig::new(
            resource.title(),
            vec![
                reference("airline_id", "Airline", Resource::Airlines, lookups),
                Column::new("origin", "From"),
                Column::new("destination", "To"),
                timestamp("departure_time", "Departure"),
                timestamp("arrival_time", "Arrival"),
                Column::new("status", "Status"),
                reference("gate_id", "Gate", Resource::Gates, lookups),
                reference("aircraft_id", "Aircraft", Resource::Aircraft, lookups),
            ],
            vec![
                FormField::select("airline_id", "Airline", lookups.options(Resource::Airlines)).required(),
                FormField::select("aircraft_id", "Aircraft", lookups.options(Resource::Aircraft)).required(),
                FormField::text("origin", "Origin").required(),
                FormField::text("destination", "Destination").required(),
                FormField::new("departure_time", "Departure Time", FieldKind::DateTime).required(),
                FormField::new("arrival_time", "Arrival Time", FieldKind::DateTime).required(),
                FormField::select(
                    "status",
                    "Status",
                    enum_options(FlightStatus::ALL.iter().map(|s| s.as_str())),
                )
                .required(),
                FormField::select("gate_id", "Gate", lookups.options(Resource::Gates)),
            ],
        )
        .with_initial("status", FlightStatus::OnTime.as_str()),

        Resource::Passengers => PanelConfig::new(
            resource.title(),
            vec![
                Column::new("name", "Name"),
                Column::new("national_id", "National ID"),
                Column::new("passport_no", "Passport"),
                Column::new("phone", "Phone"),
                Column::new("email", "Email"),
                Column::new("nationality", "Nationality"),
            ],
            vec![
                FormField::text("name", "Full Name").required(),
                FormField::text("national_id", "National ID").required(),
                FormField::text("passport_no", "Passport Number"),
                FormField::new("phone", "Phone", FieldKind::Tel),
                FormField::new("email", "Email", FieldKind::Email),
                FormField::new("address", "Address", FieldKind::TextArea),
                FormField::text("nationality", "Nationality"),
            ],
        ),

        Resource::Tickets => PanelConfig::new(
            resource.title(),
            vec![
                reference("passenger_id", "Passenger", Resource::Passengers, lookups),
                reference("flight_id", "Flight", Resource::Flights, lookups),
                Column::new("seat_number", "Seat"),
                Column::new("class", "Class"),
                money("price", "Price"),
                Column::new("status", "Status"),
            ],
            vec![
                FormField::select("passenger_id", "Passenger", lookups.options(Resource::Passengers)).required(),
                FormField::select("flight_id", "Flight", lookups.options(Resource::Flights)).required(),
                FormField::text("seat_number", "Seat Number").required(),
                FormField::select(
                    "class",
                    "Class",
                    enum_options(SeatClass::ALL.iter().map(|c| c.as_str())),
                )
                .required(),
                FormField::number("price", "Price").required(),
                FormField::select(
                    "status",
                    "Status",
                    enum_options(TicketStatus::ALL.iter().map(|s| s.as_str())),
                )
                .required(),
            ],
        )
        .with_initial("class", SeatClass::Economy.as_str())
        .with_initial("status", TicketStatus::Confirmed.as_str()),
    }
}
