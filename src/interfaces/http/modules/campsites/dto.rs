//! Campsite DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::CreateCampsite;
use crate::domain::reservation::DATE_FORMAT;
use crate::domain::Campsite;

#[derive(Debug, Serialize, ToSchema)]
pub struct CampsiteDto {
    pub campsite_id: String,
    pub campsite_code: String,
    pub capacity: i32,
    pub restrooms: bool,
    pub drinking_water: bool,
    pub picnic_table: bool,
    pub fire_pit: bool,
    pub active: bool,
}

impl From<Campsite> for CampsiteDto {
    fn from(c: Campsite) -> Self {
        Self {
            campsite_id: c.campsite_id,
            campsite_code: c.campsite_code,
            capacity: c.capacity,
            restrooms: c.restrooms,
            drinking_water: c.drinking_water,
            picnic_table: c.picnic_table,
            fire_pit: c.fire_pit,
            active: c.active,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCampsiteRequest {
    /// Site code shown to guests, e.g. "A-12"
    #[validate(length(min = 1, max = 32, message = "campsite_code must be 1-32 characters"))]
    pub campsite_code: String,
    #[validate(range(min = 1, max = 100, message = "capacity must be between 1 and 100"))]
    pub capacity: i32,
    #[serde(default)]
    pub restrooms: bool,
    #[serde(default)]
    pub drinking_water: bool,
    #[serde(default)]
    pub picnic_table: bool,
    #[serde(default)]
    pub fire_pit: bool,
}

impl From<CreateCampsiteRequest> for CreateCampsite {
    fn from(r: CreateCampsiteRequest) -> Self {
        Self {
            campsite_code: r.campsite_code,
            capacity: r.capacity,
            restrooms: r.restrooms,
            drinking_water: r.drinking_water,
            picnic_table: r.picnic_table,
            fire_pit: r.fire_pit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateCampsiteResponse {
    pub campsite_id: String,
}

/// Date window to search, `[start_date, end_date)`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VacantDatesQuery {
    /// First date to check (YYYY-MM-DD)
    pub start_date: String,
    /// Day after the last date to check (YYYY-MM-DD)
    pub end_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VacantDatesResponse {
    pub campsite_id: String,
    /// Free dates in ascending order (YYYY-MM-DD)
    pub vacant_dates: Vec<String>,
}

impl VacantDatesResponse {
    pub fn new(campsite_id: String, dates: Vec<chrono::NaiveDate>) -> Self {
        Self {
            campsite_id,
            vacant_dates: dates
                .into_iter()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .collect(),
        }
    }
}
