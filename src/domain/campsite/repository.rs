//! Campsite repository interface

use async_trait::async_trait;

use super::model::Campsite;
use crate::domain::DomainResult;

#[async_trait]
pub trait CampsiteRepository: Send + Sync {
    /// All campsites, active or not, ordered by campsite code
    async fn find_all(&self) -> DomainResult<Vec<Campsite>>;

    /// Find campsite by business ID
    async fn find_by_id(&self, campsite_id: &str) -> DomainResult<Option<Campsite>>;

    /// Save a new campsite
    async fn insert(&self, campsite: &Campsite) -> DomainResult<()>;
}
