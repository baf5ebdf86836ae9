//! Reservation entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub reservation_id: String,

    pub campsite_id: String,
    pub email: String,
    pub full_name: String,

    /// First night (inclusive)
    pub start_date: Date,
    /// Departure day (exclusive)
    pub end_date: Date,

    pub active: bool,

    /// Optimistic concurrency counter, starts at 1
    pub version: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
