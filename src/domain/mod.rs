//! Domain layer: entities, the overlap predicate, errors and repository traits.

pub mod campsite;
pub mod error;
pub mod repositories;
pub mod reservation;

pub use campsite::{Campsite, CampsiteRepository};
pub use error::BookingError;
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{DateRange, Reservation, ReservationRepository};
