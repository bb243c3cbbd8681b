//! Demo seat map.
//!
//! Availability is made up on the spot: every seat is independently marked
//! taken with a fixed probability. Nothing here is checked against the
//! server, and a new map is drawn for every booking session.

use rand::Rng;
use serde::Serialize;

use crate::error::BookingError;
use crate::models::{Seat, SeatClass, SeatStatus};

pub const SEAT_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const DEFAULT_TAKEN_RATIO: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatLayout {
    pub rows: u32,
    pub letters: Vec<char>,
    /// Rows `1..=first_rows` are First class.
    pub first_rows: u32,
    /// The following `business_rows` rows are Business.
    pub business_rows: u32,
}

impl SeatLayout {
    pub fn standard(rows: u32) -> Self {
        Self {
            rows,
            letters: SEAT_LETTERS.to_vec(),
            first_rows: 2,
            business_rows: 5,
        }
    }

    pub fn class_for(&self, row: u32) -> SeatClass {
        if row <= self.first_rows {
            SeatClass::First
        } else if row <= self.first_rows + self.business_rows {
            SeatClass::Business
        } else {
            SeatClass::Economy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatRow {
    pub row: u32,
    pub class: SeatClass,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatMap {
    pub rows: Vec<SeatRow>,
}

impl SeatMap {
    pub fn generate<R: Rng + ?Sized>(layout: &SeatLayout, taken_ratio: f64, rng: &mut R) -> Self {
        let taken_ratio = taken_ratio.clamp(0.0, 1.0);
        let rows = (1..=layout.rows)
            .map(|row| {
                let class = layout.class_for(row);
                let seats = layout
                    .letters
                    .iter()
                    .map(|&letter| Seat {
                        id: format!("{row}{letter}"),
                        row,
                        letter,
                        status: if rng.gen_bool(taken_ratio) {
                            SeatStatus::Taken
                        } else {
                            SeatStatus::Available
                        },
                        class,
                    })
                    .collect();
                SeatRow { row, class, seats }
            })
            .collect();
        Self { rows }
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.rows.iter().flat_map(|r| r.seats.iter())
    }

    pub fn seat(&self, id: &str) -> Option<&Seat> {
        self.seats().find(|s| s.id.eq_ignore_ascii_case(id))
    }

    pub fn available(&self) -> usize {
        self.seats().filter(|s| !s.is_taken()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum SelectionChange {
    /// Seat is taken; nothing happened.
    Ignored,
    Selected { seat: String },
    Deselected { seat: String },
    Replaced { previous: String, seat: String },
}

/// A seat map with at most one selected seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatPicker {
    pub map: SeatMap,
    selected: Option<String>,
}

impl SeatPicker {
    pub fn new(map: SeatMap) -> Self {
        Self { map, selected: None }
    }

    pub fn selected(&self) -> Option<&Seat> {
        self.selected.as_deref().and_then(|id| self.map.seat(id))
    }

    /// Taken seat: no-op. Selected seat: deselect. Any other seat replaces
    /// the current selection.
    pub fn click(&mut self, seat_id: &str) -> Result<SelectionChange, BookingError> {
        let seat = self
            .map
            .seat(seat_id)
            .ok_or_else(|| BookingError::UnknownSeat(seat_id.to_string()))?;

        if seat.is_taken() {
            return Ok(SelectionChange::Ignored);
        }

        let seat = seat.id.clone();
        Ok(match self.selected.take() {
            Some(current) if current == seat => SelectionChange::Deselected { seat },
            Some(previous) => {
                self.selected = Some(seat.clone());
                SelectionChange::Replaced { previous, seat }
            }
            None => {
                self.selected = Some(seat.clone());
                SelectionChange::Selected { seat }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn picker(seed: u64) -> SeatPicker {
        let mut rng = StdRng::seed_from_u64(seed);
        SeatPicker::new(SeatMap::generate(&SeatLayout::standard(30), DEFAULT_TAKEN_RATIO, &mut rng))
    }

    #[test]
    fn test_layout_and_classes() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = SeatMap::generate(&SeatLayout::standard(30), 0.0, &mut rng);
        assert_eq!(map.seats().count(), 180);
        assert_eq!(map.available(), 180);
        assert_eq!(map.seat("1A").unwrap().class, SeatClass::First);
        assert_eq!(map.seat("7f").unwrap().class, SeatClass::Business);
        assert_eq!(map.seat("8C").unwrap().class, SeatClass::Economy);
        assert!(map.seat("31A").is_none());
    }

    #[test]
    fn test_roughly_thirty_percent_taken() {
        let mut rng = StdRng::seed_from_u64(2024);
        let map = SeatMap::generate(&SeatLayout::standard(100), DEFAULT_TAKEN_RATIO, &mut rng);
        let taken = map.seats().filter(|s| s.is_taken()).count() as f64 / 600.0;
        assert!((0.2..0.4).contains(&taken), "taken ratio {taken}");
    }

    #[test]
    fn test_everything_taken() {
        let mut rng = StdRng::seed_from_u64(1);
        let map = SeatMap::generate(&SeatLayout::standard(3), 1.0, &mut rng);
        assert_eq!(map.available(), 0);
    }

    #[test]
    fn test_click_semantics() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut map = SeatMap::generate(&SeatLayout::standard(2), 0.0, &mut rng);
        map.rows[0].seats[1].status = SeatStatus::Taken; // 1B
        let mut picker = SeatPicker::new(map);

        assert_eq!(picker.click("1B").unwrap(), SelectionChange::Ignored);
        assert!(picker.selected().is_none());

        assert_eq!(picker.click("1A").unwrap(), SelectionChange::Selected { seat: "1A".into() });
        assert_eq!(picker.click("1B").unwrap(), SelectionChange::Ignored);
        assert_eq!(picker.selected().unwrap().id, "1A");

        assert_eq!(
            picker.click("2C").unwrap(),
            SelectionChange::Replaced {
                previous: "1A".into(),
                seat: "2C".into()
            }
        );
        assert_eq!(picker.click("2c").unwrap(), SelectionChange::Deselected { seat: "2C".into() });
        assert!(picker.selected().is_none());

        assert!(matches!(picker.click("9Z"), Err(BookingError::UnknownSeat(_))));
    }

    proptest! {
        #[test]
        fn prop_selection_never_holds_a_taken_seat(
            seed in any::<u64>(),
            clicks in proptest::collection::vec((1u32..=30, 0usize..6), 0..50),
        ) {
            let mut picker = picker(seed);
            for (row, col) in clicks {
                let id = format!("{}{}", row, SEAT_LETTERS[col]);
                let before = picker.selected().map(|s| s.id.clone());
                let taken = picker.map.seat(&id).unwrap().is_taken();

                picker.click(&id).unwrap();
                let after = picker.selected().map(|s| s.id.clone());

                if taken {
                    prop_assert_eq!(&after, &before);
                } else if before.as_deref() == Some(id.as_str()) {
                    prop_assert_eq!(after, None);
                } else {
                    prop_assert_eq!(after, Some(id));
                }
                if let Some(seat) = picker.selected() {
                    prop_assert!(!seat.is_taken());
                }
            }
        }
    }
}
