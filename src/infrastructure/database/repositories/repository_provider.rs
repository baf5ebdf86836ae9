//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::campsite::CampsiteRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::shared::retry::RetryPolicy;

use super::campsite_repository::SeaOrmCampsiteRepository;
use super::reservation_repository::SeaOrmReservationRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone(), RetryPolicy::default());
/// let site = repos.campsites().find_by_id("CS-1").await?;
/// let booking = repos.reservations().find("R-1").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    campsites: SeaOrmCampsiteRepository,
    reservations: SeaOrmReservationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection, retry: RetryPolicy) -> Self {
        Self {
            campsites: SeaOrmCampsiteRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::with_retry_policy(db, retry),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn campsites(&self) -> &dyn CampsiteRepository {
        &self.campsites
    }
}
