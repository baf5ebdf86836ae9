//! Reservation module: create / read / update / cancel

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
