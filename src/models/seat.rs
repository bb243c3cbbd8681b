use serde::{Deserialize, Serialize};
use std::fmt;

/// Cabin class of a ticket or seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeatClass {
    #[default]
    Economy,
    Business,
    First,
}

impl SeatClass {
    pub const ALL: [SeatClass; 3] = [SeatClass::Economy, SeatClass::Business, SeatClass::First];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::Economy => "Economy",
            SeatClass::Business => "Business",
            SeatClass::First => "First",
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Taken,
}

/// One cell of the demo seat map. Never sent to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    /// Row number followed by the letter, e.g. "12C".
    pub id: String,
    pub row: u32,
    pub letter: char,
    pub status: SeatStatus,
    pub class: SeatClass,
}

impl Seat {
    pub fn is_taken(&self) -> bool {
        self.status == SeatStatus::Taken
    }
}
