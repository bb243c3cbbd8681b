use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub passenger_capacity: Option<u32>,
    #[serde(default)]
    pub gate_count: Option<u32>,
    #[serde(default)]
    pub facilities: Option<String>,
}
