//! Create `restaurant` table.
//! One row per aggregate; menu and reviews are embedded JSONB arrays.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurant::Table)
                    .if_not_exists()
                    .col(uuid(Restaurant::Id).primary_key())
                    .col(text(Restaurant::Name).not_null())
                    .col(text(Restaurant::Cuisine).not_null())
                    .col(text(Restaurant::Address).not_null())
                    .col(text(Restaurant::City).not_null())
                    .col(double(Restaurant::Rating).not_null().default(0.0))
                    .col(json_binary(Restaurant::Menu).not_null())
                    .col(json_binary(Restaurant::Reviews).not_null())
                    .col(big_integer(Restaurant::Version).not_null().default(0))
                    .col(timestamp_with_time_zone(Restaurant::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Restaurant::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Restaurant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Restaurant {
    Table,
    Id,
    Name,
    Cuisine,
    Address,
    City,
    Rating,
    Menu,
    Reviews,
    Version,
    CreatedAt,
    UpdatedAt,
}
