use serde::{Deserialize, Serialize};

use crate::models::SeatClass;

/// Class multipliers applied to a base fare.
///
/// The flight list and the flight details page have always used different
/// multipliers. Both are kept as-is; each page names the one it uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareSchedule {
    pub economy: f64,
    pub business: f64,
    pub first: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FarePage {
    /// Flight search / booking list: 1× / 2× / 4×.
    #[default]
    Search,
    /// Flight details page: 1× / 1.5× / 2×.
    Details,
}

impl FareSchedule {
    pub const SEARCH: FareSchedule = FareSchedule {
        economy: 1.0,
        business: 2.0,
        first: 4.0,
    };

    pub const DETAILS: FareSchedule = FareSchedule {
        economy: 1.0,
        business: 1.5,
        first: 2.0,
    };

    pub fn for_page(page: FarePage) -> Self {
        match page {
            FarePage::Search => Self::SEARCH,
            FarePage::Details => Self::DETAILS,
        }
    }

    pub fn multiplier(&self, class: SeatClass) -> f64 {
        match class {
            SeatClass::Economy => self.economy,
            SeatClass::Business => self.business,
            SeatClass::First => self.first,
        }
    }

    /// Price in the currency's minor-unit precision.
    pub fn price(&self, base_fare: f64, class: SeatClass) -> f64 {
        (base_fare * self.multiplier(class) * 100.0).round() / 100.0
    }
}
