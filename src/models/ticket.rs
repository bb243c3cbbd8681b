use serde::{Deserialize, Serialize};
use std::fmt;

use super::{RecordId, SeatClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Confirmed,
    Cancelled,
    #[serde(rename = "Checked-in")]
    CheckedIn,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [TicketStatus::Confirmed, TicketStatus::Cancelled, TicketStatus::CheckedIn];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Confirmed => "Confirmed",
            TicketStatus::Cancelled => "Cancelled",
            TicketStatus::CheckedIn => "Checked-in",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: RecordId,
    pub passenger_id: RecordId,
    pub flight_id: RecordId,
    pub seat_number: String,
    pub class: SeatClass,
    pub price: f64,
    #[serde(default = "default_status")]
    pub status: TicketStatus,
}

fn default_status() -> TicketStatus {
    TicketStatus::Confirmed
}
