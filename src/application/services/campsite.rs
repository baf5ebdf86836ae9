//! Campsite catalog use cases

use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::domain::{BookingError, Campsite, DomainResult, RepositoryProvider};

/// Request to add a campsite to the catalog.
#[derive(Debug, Clone)]
pub struct CreateCampsite {
    pub campsite_code: String,
    pub capacity: i32,
    pub restrooms: bool,
    pub drinking_water: bool,
    pub picnic_table: bool,
    pub fire_pit: bool,
}

pub struct CampsiteService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CampsiteService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_campsites(&self) -> DomainResult<Vec<Campsite>> {
        self.repos.campsites().find_all().await
    }

    /// Add a campsite; returns its generated ID.
    pub async fn create_campsite(&self, cmd: CreateCampsite) -> DomainResult<String> {
        let mut errors = Vec::new();
        if cmd.campsite_code.trim().is_empty() {
            errors.push("campsite code must not be empty".to_string());
        }
        if cmd.capacity < 1 {
            errors.push("capacity must be at least 1".to_string());
        }
        if !errors.is_empty() {
            return Err(BookingError::Validation(errors));
        }

        let campsite_id = Uuid::new_v4().to_string();
        let mut campsite = Campsite::new(campsite_id.clone(), cmd.campsite_code.trim(), cmd.capacity);
        campsite.restrooms = cmd.restrooms;
        campsite.drinking_water = cmd.drinking_water;
        campsite.picnic_table = cmd.picnic_table;
        campsite.fire_pit = cmd.fire_pit;

        self.repos.campsites().insert(&campsite).await?;
        info!("Campsite {} registered as {}", campsite.campsite_code, campsite_id);
        Ok(campsite_id)
    }
}
