use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AircraftStatus {
    Active,
    Maintenance,
    #[serde(rename = "Not Operating")]
    NotOperating,
}

impl AircraftStatus {
    pub const ALL: [AircraftStatus; 3] = [
        AircraftStatus::Active,
        AircraftStatus::Maintenance,
        AircraftStatus::NotOperating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AircraftStatus::Active => "Active",
            AircraftStatus::Maintenance => "Maintenance",
            AircraftStatus::NotOperating => "Not Operating",
        }
    }
}

impl fmt::Display for AircraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: RecordId,
    pub registration: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub airline_id: Option<RecordId>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub status: Option<AircraftStatus>,
}
