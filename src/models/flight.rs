use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{parse_timestamp, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 3] = [FlightStatus::OnTime, FlightStatus::Delayed, FlightStatus::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: RecordId,
    pub airline_id: RecordId,
    #[serde(default)]
    pub aircraft_id: Option<RecordId>,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    #[serde(default = "default_status")]
    pub status: FlightStatus,
    #[serde(default)]
    pub gate_id: Option<RecordId>,
    /// Base fare, when the API publishes one for the flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

fn default_status() -> FlightStatus {
    FlightStatus::OnTime
}

impl Flight {
    pub fn departure(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.departure_time)
    }

    pub fn arrival(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.arrival_time)
    }

    /// Scheduled block time. `None` when either timestamp is unreadable.
    pub fn duration_minutes(&self) -> Option<i64> {
        let minutes = (self.arrival()? - self.departure()?).num_minutes();
        Some(minutes)
    }

    /// "JFK → LHR"
    pub fn route(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Flight {
        serde_json::from_value(json!({
            "id": 1,
            "airline_id": { "$oid": "a1" },
            "origin": "ALA",
            "destination": "NQZ",
            "departure_time": "2025-03-01T08:30",
            "arrival_time": "2025-03-01T10:15",
            "status": "On Time"
        }))
        .unwrap()
    }

    #[test]
    fn test_duration_from_form_timestamps() {
        assert_eq!(sample().duration_minutes(), Some(105));
    }

    #[test]
    fn test_status_uses_display_strings() {
        let flight = sample();
        assert_eq!(flight.status, FlightStatus::OnTime);
        assert_eq!(serde_json::to_value(FlightStatus::OnTime).unwrap(), json!("On Time"));
    }

    #[test]
    fn test_unreadable_timestamp_has_no_duration() {
        let mut flight = sample();
        flight.arrival_time = "soon".to_string();
        assert_eq!(flight.duration_minutes(), None);
    }
}
