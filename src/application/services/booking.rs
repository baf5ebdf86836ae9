//! Reservation use cases
//!
//! Commands carry dates as `YYYY-MM-DD` strings. They are parsed and run
//! through the validator list before any transaction is opened; conflict
//! detection itself belongs to the reservation store.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use log::info;
use uuid::Uuid;

use crate::application::validators::{apply, ReservationValidator};
use crate::domain::reservation::parse_date;
use crate::domain::{BookingError, DateRange, DomainResult, RepositoryProvider, Reservation};

/// Request to book a campsite.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub campsite_id: String,
    pub email: String,
    pub full_name: String,
    pub start_date: String,
    pub end_date: String,
}

/// Partial change to an existing reservation. `None` or empty fields keep
/// the stored value. `version`, when given, is the version the caller last
/// saw; otherwise the freshly read one is used.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservation {
    pub reservation_id: String,
    pub campsite_id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub version: Option<i32>,
}

/// Widest vacant-dates window accepted unless configured otherwise.
pub const DEFAULT_SEARCH_WINDOW_DAYS: u32 = 62;

/// Service for reservation operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    validators: Vec<Box<dyn ReservationValidator>>,
    search_window_days: u32,
}

fn parse_field(field: &'static str, value: &str) -> DomainResult<NaiveDate> {
    parse_date(value).ok_or_else(|| BookingError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// `Some` only for a provided, non-blank value.
fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        validators: Vec<Box<dyn ReservationValidator>>,
    ) -> Self {
        Self {
            repos,
            validators,
            search_window_days: DEFAULT_SEARCH_WINDOW_DAYS,
        }
    }

    /// Limit how many days a single vacant-dates query may cover.
    pub fn with_search_window(mut self, days: u32) -> Self {
        self.search_window_days = days.max(1);
        self
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Book a campsite; returns the new reservation ID.
    pub async fn create_reservation(&self, cmd: CreateReservation) -> DomainResult<String> {
        let start = parse_field("start_date", &cmd.start_date)?;
        let end = parse_field("end_date", &cmd.end_date)?;
        apply(&self.validators, &DateRange::new(start, end), Self::today())?;

        let reservation_id = Uuid::new_v4().to_string();
        let reservation = Reservation::new(
            reservation_id.clone(),
            cmd.campsite_id,
            cmd.email,
            cmd.full_name,
            start,
            end,
        );
        self.repos.reservations().insert(&reservation).await?;

        info!(
            "Reservation {} created: campsite={}, dates={}",
            reservation_id,
            reservation.campsite_id,
            reservation.range()
        );
        Ok(reservation_id)
    }

    /// Apply a partial update and return the stored result.
    pub async fn update_reservation(&self, cmd: UpdateReservation) -> DomainResult<Reservation> {
        let mut reservation = self.active(&cmd.reservation_id).await?;

        if let Some(campsite_id) = provided(&cmd.campsite_id) {
            reservation.campsite_id = campsite_id.to_string();
        }
        if let Some(email) = provided(&cmd.email) {
            reservation.email = email.to_string();
        }
        if let Some(full_name) = provided(&cmd.full_name) {
            reservation.full_name = full_name.to_string();
        }
        if let Some(start) = provided(&cmd.start_date) {
            reservation.start_date = parse_field("start_date", start)?;
        }
        if let Some(end) = provided(&cmd.end_date) {
            reservation.end_date = parse_field("end_date", end)?;
        }
        if let Some(version) = cmd.version {
            reservation.version = version;
        }

        apply(&self.validators, &reservation.range(), Self::today())?;

        let reservation = self.repos.reservations().update(&reservation).await?;

        info!(
            "Reservation {} updated to version {}: campsite={}, dates={}",
            reservation.reservation_id,
            reservation.version,
            reservation.campsite_id,
            reservation.range()
        );
        Ok(reservation)
    }

    /// Cancel an active reservation, freeing its dates.
    pub async fn cancel_reservation(&self, reservation_id: &str) -> DomainResult<()> {
        let reservation = self.active(reservation_id).await?;
        self.repos.reservations().cancel(&reservation).await?;
        info!("Reservation {} cancelled", reservation_id);
        Ok(())
    }

    pub async fn find_reservation(&self, reservation_id: &str) -> DomainResult<Reservation> {
        self.repos.reservations().find(reservation_id).await
    }

    /// Dates in `[start_date, end_date)` on which `campsite_id` is free,
    /// ascending.
    pub async fn find_vacant_dates(
        &self,
        campsite_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> DomainResult<Vec<NaiveDate>> {
        let start = parse_field("start_date", start_date)?;
        let end = parse_field("end_date", end_date)?;
        let range = DateRange::new(start, end);
        if range.is_empty() {
            return Err(BookingError::Validation(vec![
                "start date must be before end date".to_string(),
            ]));
        }
        if range.nights() > u64::from(self.search_window_days) {
            return Err(BookingError::Validation(vec![format!(
                "date window must span at most {} day(s)",
                self.search_window_days
            )]));
        }

        let booked = self
            .repos
            .reservations()
            .find_overlapping(campsite_id, range)
            .await?;

        Ok(range
            .dates()
            .filter(|date| {
                let night = DateRange::new(*date, *date + Days::new(1));
                !booked.iter().any(|r| r.conflicts_with(campsite_id, &night))
            })
            .collect())
    }

    async fn active(&self, reservation_id: &str) -> DomainResult<Reservation> {
        let reservation = self.repos.reservations().find(reservation_id).await?;
        if !reservation.is_active() {
            return Err(BookingError::AlreadyCancelled {
                reservation_id: reservation_id.to_string(),
            });
        }
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::application::validators::{default_validators, BookingRules};
    use crate::domain::reservation::DATE_FORMAT;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_support::{migrated_db, FileDb};
    use crate::shared::RetryPolicy;

    /// `today + n` days as `YYYY-MM-DD`.
    fn day(n: u64) -> String {
        (Utc::now().date_naive() + Days::new(n))
            .format(DATE_FORMAT)
            .to_string()
    }

    fn service_on(db: sea_orm::DatabaseConnection, retry: RetryPolicy) -> BookingService {
        let repos = SeaOrmRepositoryProvider::new(db, retry);
        BookingService::new(
            Arc::new(repos),
            default_validators(&BookingRules::default()),
        )
    }

    async fn service() -> BookingService {
        service_on(migrated_db().await, RetryPolicy::default())
    }

    fn create(campsite: &str, start: u64, end: u64) -> CreateReservation {
        CreateReservation {
            campsite_id: campsite.to_string(),
            email: "john@example.com".to_string(),
            full_name: "John Smith".to_string(),
            start_date: day(start),
            end_date: day(end),
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let svc = service().await;
        let id = svc.create_reservation(create("CS-1", 2, 4)).await.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let found = svc.find_reservation(&id).await.unwrap();
        assert_eq!(found.campsite_id, "CS-1");
        assert_eq!(found.start_date.format(DATE_FORMAT).to_string(), day(2));
        assert!(found.active);
        assert_eq!(found.version, 1);
    }

    #[tokio::test]
    async fn malformed_date_is_invalid_date() {
        let svc = service().await;
        let mut cmd = create("CS-1", 2, 4);
        cmd.start_date = "02/01/2006".to_string();

        match svc.create_reservation(cmd).await {
            Err(BookingError::InvalidDate { field, value }) => {
                assert_eq!(field, "start_date");
                assert_eq!(value, "02/01/2006");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rules_are_checked_before_storage() {
        let svc = service().await;
        let err = svc.create_reservation(create("CS-1", 2, 9)).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));

        let err = svc.create_reservation(create("CS-1", 0, 2)).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn overlapping_create_is_rejected() {
        let svc = service().await;
        svc.create_reservation(create("CS-1", 2, 5)).await.unwrap();

        let err = svc.create_reservation(create("CS-1", 4, 6)).await.unwrap_err();
        assert!(matches!(err, BookingError::DatesUnavailable { .. }));

        // touching is fine
        svc.create_reservation(create("CS-1", 5, 7)).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_creates_admit_one() {
        let file = FileDb::new(4).await;
        let svc = Arc::new(service_on(
            file.db.clone(),
            RetryPolicy::new(5, std::time::Duration::from_millis(10)),
        ));
        let a = tokio::spawn({
            let svc = svc.clone();
            async move { svc.create_reservation(create("CS-1", 3, 5)).await }
        });
        let b = tokio::spawn({
            let svc = svc.clone();
            async move { svc.create_reservation(create("CS-1", 4, 6)).await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(BookingError::DatesUnavailable { .. }))));
    }

    #[tokio::test]
    async fn partial_update_keeps_unspecified_fields() {
        let svc = service().await;
        let id = svc.create_reservation(create("CS-1", 2, 4)).await.unwrap();

        let updated = svc
            .update_reservation(UpdateReservation {
                reservation_id: id.clone(),
                full_name: Some("Jane Smith".to_string()),
                email: Some("  ".to_string()),
                end_date: Some(day(5)),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.version, 2);
        assert_eq!(updated.full_name, "Jane Smith");
        assert_eq!(updated.email, "john@example.com");
        assert_eq!(updated.end_date.format(DATE_FORMAT).to_string(), day(5));

        let stored = svc.find_reservation(&id).await.unwrap();
        assert_eq!(stored.full_name, "Jane Smith");
        assert_eq!(stored.version, 2);
        assert_eq!(updated.updated_at, stored.updated_at);
        assert_eq!(updated, stored);
    }

    #[tokio::test]
    async fn update_with_stale_version_is_rejected() {
        let svc = service().await;
        let id = svc.create_reservation(create("CS-1", 2, 4)).await.unwrap();
        svc.update_reservation(UpdateReservation {
            reservation_id: id.clone(),
            full_name: Some("Jane Smith".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

        let err = svc
            .update_reservation(UpdateReservation {
                reservation_id: id.clone(),
                full_name: Some("Jim Smith".to_string()),
                version: Some(1),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::ConcurrentUpdate { .. }));
        assert_eq!(svc.find_reservation(&id).await.unwrap().full_name, "Jane Smith");
    }

    #[tokio::test]
    async fn update_into_taken_dates_is_rejected() {
        let svc = service().await;
        svc.create_reservation(create("CS-1", 2, 4)).await.unwrap();
        let id = svc.create_reservation(create("CS-1", 4, 6)).await.unwrap();

        let err = svc
            .update_reservation(UpdateReservation {
                reservation_id: id,
                start_date: Some(day(3)),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::DatesUnavailable { .. }));
    }

    #[tokio::test]
    async fn update_missing_reservation_is_not_found() {
        let svc = service().await;
        let err = svc
            .update_reservation(UpdateReservation {
                reservation_id: "missing".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound { .. }));
    }

    #[tokio::test]
    async fn cancel_frees_dates_and_cannot_repeat() {
        let svc = service().await;
        let id = svc.create_reservation(create("CS-1", 2, 4)).await.unwrap();

        svc.cancel_reservation(&id).await.unwrap();
        let err = svc.cancel_reservation(&id).await.unwrap_err();
        assert!(matches!(err, BookingError::AlreadyCancelled { .. }));

        let err = svc
            .update_reservation(UpdateReservation {
                reservation_id: id,
                full_name: Some("Jane Smith".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AlreadyCancelled { .. }));

        svc.create_reservation(create("CS-1", 2, 4)).await.unwrap();
    }

    #[tokio::test]
    async fn vacant_dates_exclude_booked_nights() {
        let svc = service().await;
        svc.create_reservation(create("CS-1", 2, 4)).await.unwrap();
        svc.create_reservation(create("CS-2", 5, 6)).await.unwrap();

        let vacant: Vec<String> = svc
            .find_vacant_dates("CS-1", &day(1), &day(6))
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect();
        assert_eq!(vacant, vec![day(1), day(4), day(5)]);
    }

    #[tokio::test]
    async fn vacant_dates_window_is_capped() {
        let svc = service().await.with_search_window(7);

        let vacant = svc
            .find_vacant_dates("CS-1", &day(1), &day(8))
            .await
            .unwrap();
        assert_eq!(vacant.len(), 7);

        let err = svc
            .find_vacant_dates("CS-1", &day(1), &day(9))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));

        let err = svc
            .find_vacant_dates("CS-1", "0001-01-01", "9999-12-31")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn vacant_dates_reject_empty_range() {
        let svc = service().await;
        let err = svc
            .find_vacant_dates("CS-1", &day(3), &day(3))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));

        let err = svc
            .find_vacant_dates("CS-1", "tomorrow", &day(3))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidDate { .. }));
    }
}
