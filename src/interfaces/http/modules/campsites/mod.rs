//! Campsite module: catalog + vacant dates

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
