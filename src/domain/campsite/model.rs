//! Campsite domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A reservable campsite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Campsite {
    /// Persistence ID (`None` until stored)
    #[serde(skip)]
    pub id: Option<i32>,
    /// Business ID exposed to clients
    pub campsite_id: String,
    /// Human-facing site code, e.g. "A-12"
    pub campsite_code: String,
    pub capacity: i32,
    pub restrooms: bool,
    pub drinking_water: bool,
    pub picnic_table: bool,
    pub fire_pit: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campsite {
    pub fn new(campsite_id: impl Into<String>, campsite_code: impl Into<String>, capacity: i32) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            campsite_id: campsite_id.into(),
            campsite_code: campsite_code.into(),
            capacity,
            restrooms: false,
            drinking_water: false,
            picnic_table: false,
            fire_pit: false,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
