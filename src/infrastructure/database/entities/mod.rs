//! Database entities module

pub mod campsite;
pub mod reservation;

pub use campsite::Entity as Campsite;
pub use reservation::Entity as Reservation;
