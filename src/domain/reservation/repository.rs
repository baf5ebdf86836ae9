//! Reservation repository interface

use async_trait::async_trait;

use super::model::Reservation;
use super::range::DateRange;
use crate::domain::DomainResult;

/// Storage of reservations with the non-overlap guarantee.
///
/// Implementations must keep, for every campsite, the active reservations'
/// date ranges pairwise non-overlapping at every committed state.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Find a reservation by business ID (`NotFound` if absent).
    async fn find(&self, reservation_id: &str) -> DomainResult<Reservation>;

    /// Active reservations of `campsite_id` whose range intersects `range`.
    /// Order is unspecified.
    async fn find_overlapping(
        &self,
        campsite_id: &str,
        range: DateRange,
    ) -> DomainResult<Vec<Reservation>>;

    /// Persist a new reservation at version 1, or fail with
    /// `DatesUnavailable` if it would overlap an active reservation.
    async fn insert(&self, reservation: &Reservation) -> DomainResult<()>;

    /// Replace campsite, contact fields and dates of an existing reservation.
    ///
    /// `reservation.version` is the version the caller read; a mismatch
    /// yields `ConcurrentUpdate`. Returns the reservation as stored, with
    /// the new version and `updated_at`.
    async fn update(&self, reservation: &Reservation) -> DomainResult<Reservation>;

    /// Deactivate a reservation read at `reservation.version`.
    /// Returns the new version.
    async fn cancel(&self, reservation: &Reservation) -> DomainResult<i32>;
}
