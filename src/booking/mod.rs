//! Customer booking flow: browse flights, open a booking page, pick a seat
//! and class, submit.

pub mod desk;
pub mod fare;
pub mod search;
pub mod seat_map;

pub use desk::{BookingConfirmation, BookingDesk, BookingSessionView, SessionStatus};
pub use fare::{FarePage, FareSchedule};
pub use search::{FlightFilter, FlightOffer, FlightSort};
pub use seat_map::{SeatLayout, SeatMap, SeatPicker, SelectionChange};
