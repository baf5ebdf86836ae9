//! Reservation aggregate
//!
//! Contains the Reservation entity, the date range overlap predicate, and the
//! repository interface.

pub mod model;
pub mod range;
pub mod repository;

pub use model::{Reservation, INITIAL_VERSION};
pub use range::{parse_date, DateRange, DATE_FORMAT};
pub use repository::ReservationRepository;
