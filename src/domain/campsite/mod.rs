//! Campsite aggregate
//!
//! The reservable resource catalog. Campsites take no part in conflict
//! detection; reservations reference them by `campsite_id` only.

pub mod model;
pub mod repository;

pub use model::Campsite;
pub use repository::CampsiteRepository;
