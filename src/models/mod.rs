pub mod aircraft;
pub mod airline;
pub mod flight;
pub mod gate;
pub mod passenger;
pub mod record_id;
pub mod seat;
pub mod terminal;
pub mod ticket;
pub mod user;

use chrono::{DateTime, NaiveDateTime};

pub use aircraft::{Aircraft, AircraftStatus};
pub use airline::Airline;
pub use flight::{Flight, FlightStatus};
pub use gate::{Gate, GateStatus};
pub use passenger::Passenger;
pub use record_id::{extract_id, RecordId};
pub use seat::{Seat, SeatClass, SeatStatus};
pub use terminal::Terminal;
pub use ticket::{Ticket, TicketStatus};
pub use user::User;

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses the timestamps the API hands back: RFC 3339, or the naive
/// `datetime-local` shape forms submit. Offsets keep their wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
