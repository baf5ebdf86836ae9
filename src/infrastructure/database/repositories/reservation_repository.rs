//! SeaORM implementation of ReservationRepository
//!
//! Write protocol:
//! - insert: SERIALIZABLE transaction, locking overlap query, insert at
//!   version 1. Serialization failures are retried by [`RetryPolicy`].
//! - update: READ COMMITTED transaction, locking overlap query excluding the
//!   row itself, then an update guarded by `version = ?`.
//! - cancel: update guarded by `version = ?` and `active`, no overlap query.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IsolationLevel, QueryFilter, QuerySelect, Select, Set,
};

use crate::domain::reservation::{DateRange, Reservation, ReservationRepository, INITIAL_VERSION};
use crate::domain::{BookingError, DomainResult};
use crate::infrastructure::database::entities::reservation;
use crate::infrastructure::database::transaction::{begin, classify, finish};
use crate::shared::retry::RetryPolicy;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
    retry: RetryPolicy,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_retry_policy(db, RetryPolicy::default())
    }

    pub fn with_retry_policy(db: DatabaseConnection, retry: RetryPolicy) -> Self {
        Self { db, retry }
    }

    /// One insert attempt in its own serializable transaction.
    async fn insert_once(&self, r: &Reservation) -> DomainResult<()> {
        let txn = begin(
            &self.db,
            Some(IsolationLevel::Serializable),
            AccessMode::ReadWrite,
        )
        .await?;
        let result = insert_in(&txn, r).await;
        finish(txn, result).await
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: Some(m.id),
        reservation_id: m.reservation_id,
        campsite_id: m.campsite_id,
        email: m.email,
        full_name: m.full_name,
        start_date: m.start_date,
        end_date: m.end_date,
        active: m.active,
        version: m.version,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Current time at the precision every backend stores (microseconds), so
/// values handed back to callers match what a later read returns.
fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn dates_unavailable(r: &Reservation) -> BookingError {
    BookingError::DatesUnavailable {
        start: r.start_date,
        end: r.end_date,
    }
}

// ── Query construction ─────────────────────────────────────────

/// Active reservations of `campsite_id` intersecting `[start, end)`:
/// `start_date < end AND end_date > start`.
fn overlapping(campsite_id: &str, range: DateRange) -> Select<reservation::Entity> {
    reservation::Entity::find()
        .filter(reservation::Column::Active.eq(true))
        .filter(reservation::Column::CampsiteId.eq(campsite_id))
        .filter(reservation::Column::StartDate.lt(range.end()))
        .filter(reservation::Column::EndDate.gt(range.start()))
}

/// Overlap query taking exclusive row locks (`FOR UPDATE`).
async fn lock_overlapping<C: ConnectionTrait>(
    conn: &C,
    campsite_id: &str,
    range: DateRange,
) -> DomainResult<Vec<reservation::Model>> {
    overlapping(campsite_id, range)
        .lock_exclusive()
        .all(conn)
        .await
        .map_err(classify)
}

async fn insert_in<C: ConnectionTrait>(conn: &C, r: &Reservation) -> DomainResult<()> {
    let conflicts = lock_overlapping(conn, &r.campsite_id, r.range()).await?;
    if !conflicts.is_empty() {
        debug!(
            "Reservation {} conflicts with {} active reservation(s) on {}",
            r.reservation_id,
            conflicts.len(),
            r.campsite_id
        );
        return Err(dates_unavailable(r));
    }

    let now = stored_now();
    let model = reservation::ActiveModel {
        reservation_id: Set(r.reservation_id.clone()),
        campsite_id: Set(r.campsite_id.clone()),
        email: Set(r.email.clone()),
        full_name: Set(r.full_name.clone()),
        start_date: Set(r.start_date),
        end_date: Set(r.end_date),
        active: Set(true),
        version: Set(INITIAL_VERSION),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(conn).await.map_err(classify)?;
    Ok(())
}

async fn update_in<C: ConnectionTrait>(conn: &C, r: &Reservation) -> DomainResult<Reservation> {
    let conflicts = lock_overlapping(conn, &r.campsite_id, r.range()).await?;
    if conflicts
        .iter()
        .any(|other| other.reservation_id != r.reservation_id)
    {
        return Err(dates_unavailable(r));
    }

    let now = stored_now();
    let result = reservation::Entity::update_many()
        .col_expr(reservation::Column::CampsiteId, Expr::value(r.campsite_id.clone()))
        .col_expr(reservation::Column::Email, Expr::value(r.email.clone()))
        .col_expr(reservation::Column::FullName, Expr::value(r.full_name.clone()))
        .col_expr(reservation::Column::StartDate, Expr::value(r.start_date))
        .col_expr(reservation::Column::EndDate, Expr::value(r.end_date))
        .col_expr(
            reservation::Column::Version,
            Expr::col(reservation::Column::Version).add(1),
        )
        .col_expr(reservation::Column::UpdatedAt, Expr::value(now))
        .filter(reservation::Column::ReservationId.eq(r.reservation_id.as_str()))
        .filter(reservation::Column::Version.eq(r.version))
        .exec(conn)
        .await
        .map_err(classify)?;

    if result.rows_affected == 0 {
        return Err(BookingError::ConcurrentUpdate {
            reservation_id: r.reservation_id.clone(),
        });
    }
    Ok(Reservation {
        version: r.version + 1,
        updated_at: now,
        ..r.clone()
    })
}

async fn cancel_in<C: ConnectionTrait>(conn: &C, r: &Reservation) -> DomainResult<i32> {
    let result = reservation::Entity::update_many()
        .col_expr(reservation::Column::Active, Expr::value(false))
        .col_expr(
            reservation::Column::Version,
            Expr::col(reservation::Column::Version).add(1),
        )
        .col_expr(reservation::Column::UpdatedAt, Expr::value(stored_now()))
        .filter(reservation::Column::ReservationId.eq(r.reservation_id.as_str()))
        .filter(reservation::Column::Version.eq(r.version))
        .filter(reservation::Column::Active.eq(true))
        .exec(conn)
        .await
        .map_err(classify)?;

    if result.rows_affected > 0 {
        return Ok(r.version + 1);
    }

    // Lost the race: tell "someone else cancelled it" from "someone else
    // changed it".
    let current = reservation::Entity::find()
        .filter(reservation::Column::ReservationId.eq(r.reservation_id.as_str()))
        .one(conn)
        .await
        .map_err(classify)?;

    match current {
        None => Err(BookingError::reservation_not_found(&r.reservation_id)),
        Some(m) if !m.active => Err(BookingError::AlreadyCancelled {
            reservation_id: r.reservation_id.clone(),
        }),
        Some(_) => Err(BookingError::ConcurrentUpdate {
            reservation_id: r.reservation_id.clone(),
        }),
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn find(&self, reservation_id: &str) -> DomainResult<Reservation> {
        let txn = begin(&self.db, None, AccessMode::ReadOnly).await?;
        let result = reservation::Entity::find()
            .filter(reservation::Column::ReservationId.eq(reservation_id))
            .one(&txn)
            .await
            .map_err(classify)
            .and_then(|m| {
                m.map(model_to_domain)
                    .ok_or_else(|| BookingError::reservation_not_found(reservation_id))
            });
        finish(txn, result).await
    }

    async fn find_overlapping(
        &self,
        campsite_id: &str,
        range: DateRange,
    ) -> DomainResult<Vec<Reservation>> {
        let txn = begin(&self.db, None, AccessMode::ReadOnly).await?;
        let result = overlapping(campsite_id, range)
            .all(&txn)
            .await
            .map(|models| models.into_iter().map(model_to_domain).collect())
            .map_err(classify);
        finish(txn, result).await
    }

    async fn insert(&self, r: &Reservation) -> DomainResult<()> {
        debug!(
            "Inserting reservation {} on {} for {}",
            r.reservation_id,
            r.campsite_id,
            r.range()
        );
        self.retry
            .run("insert reservation", || self.insert_once(r))
            .await
    }

    async fn update(&self, r: &Reservation) -> DomainResult<Reservation> {
        debug!(
            "Updating reservation {} at version {}",
            r.reservation_id, r.version
        );
        let txn = begin(
            &self.db,
            Some(IsolationLevel::ReadCommitted),
            AccessMode::ReadWrite,
        )
        .await?;
        let result = update_in(&txn, r).await;
        finish(txn, result).await
    }

    async fn cancel(&self, r: &Reservation) -> DomainResult<i32> {
        debug!(
            "Cancelling reservation {} at version {}",
            r.reservation_id, r.version
        );
        let txn = begin(
            &self.db,
            Some(IsolationLevel::ReadCommitted),
            AccessMode::ReadWrite,
        )
        .await?;
        let result = cancel_in(&txn, r).await;
        finish(txn, result).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
