//! Application layer: booking rules and use-case services.

pub mod services;
pub mod validators;

pub use services::{
    BookingService, CampsiteService, CreateCampsite, CreateReservation, UpdateReservation,
};
pub use validators::{default_validators, BookingRules, ReservationValidator};
