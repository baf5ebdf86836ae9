//! Application services

mod booking;
mod campsite;

pub use booking::{BookingService, CreateReservation, UpdateReservation};
pub use campsite::{CampsiteService, CreateCampsite};
