use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateStatus {
    Open,
    Closed,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
}

impl GateStatus {
    pub const ALL: [GateStatus; 3] = [GateStatus::Open, GateStatus::Closed, GateStatus::UnderMaintenance];

    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Open => "Open",
            GateStatus::Closed => "Closed",
            GateStatus::UnderMaintenance => "Under Maintenance",
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: RecordId,
    pub number: String,
    #[serde(default)]
    pub terminal_id: Option<RecordId>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub area_capacity: Option<u32>,
    #[serde(default)]
    pub status: Option<GateStatus>,
}
