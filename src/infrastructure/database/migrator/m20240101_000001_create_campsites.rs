//! Create campsites table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campsites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campsites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Campsites::CampsiteId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Campsites::CampsiteCode).string().not_null())
                    .col(ColumnDef::new(Campsites::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Campsites::Restrooms)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Campsites::DrinkingWater)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Campsites::PicnicTable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Campsites::FirePit)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Campsites::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Campsites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campsites::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Campsites::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Campsites {
    Table,
    Id,
    CampsiteId,
    CampsiteCode,
    Capacity,
    Restrooms,
    DrinkingWater,
    PicnicTable,
    FirePit,
    Active,
    CreatedAt,
    UpdatedAt,
}
