use serde::{Deserialize, Serialize};

use super::RecordId;

/// The signed-in account as cached locally after login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    pub email: String,
    /// Absent until the user has filled in a passenger profile.
    #[serde(default)]
    pub passenger_id: Option<RecordId>,
}
