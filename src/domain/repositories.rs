//! Repository provider for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` : unified access to all per-aggregate repositories
//! - `DomainResult` : standard result type for domain operations

use super::campsite::CampsiteRepository;
use super::error::BookingError;
use super::reservation::ReservationRepository;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, BookingError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let booking = repos.reservations().find("2f0c...").await?;
///     let sites = repos.campsites().find_all().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn reservations(&self) -> &dyn ReservationRepository;
    fn campsites(&self) -> &dyn CampsiteRepository;
}
