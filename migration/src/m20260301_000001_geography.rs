//! 地理层级表迁移
//!
//! regions → countries → cities，外加独立的 airlines 表

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Regions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Regions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Regions::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Regions::Description).text().null())
                    .col(ColumnDef::new(Regions::Image).string_len(255).null())
                    .col(
                        ColumnDef::new(Regions::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Regions::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Countries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Countries::RegionId).big_integer().not_null())
                    .col(ColumnDef::new(Countries::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Countries::Code).string_len(3).null())
                    .col(ColumnDef::new(Countries::FlagImage).string_len(255).null())
                    .col(
                        ColumnDef::new(Countries::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_countries_region")
                            .from(Countries::Table, Countries::RegionId)
                            .to(Regions::Table, Regions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (region_id, name) 唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_countries_region_name")
                    .table(Countries::Table)
                    .col(Countries::RegionId)
                    .col(Countries::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cities::CountryId).big_integer().not_null())
                    .col(ColumnDef::new(Cities::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Cities::AirportCode).string_len(10).null())
                    .col(
                        ColumnDef::new(Cities::IsCapital)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cities::Image).string_len(255).null())
                    .col(
                        ColumnDef::new(Cities::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cities_country")
                            .from(Cities::Table, Cities::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_cities_country_name")
                    .table(Cities::Table)
                    .col(Cities::CountryId)
                    .col(Cities::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Airlines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Airlines::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Airlines::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Airlines::Code).string_len(3).null())
                    .col(ColumnDef::new(Airlines::Logo).string_len(255).null())
                    .col(ColumnDef::new(Airlines::OriginCountry).string_len(100).null())
                    .col(
                        ColumnDef::new(Airlines::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Airlines::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cities_country_name").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_countries_region_name").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Regions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Regions {
    Table,
    Id,
    Name,
    Description,
    Image,
    Active,
    DisplayOrder,
}

#[derive(DeriveIden)]
pub(crate) enum Countries {
    Table,
    Id,
    RegionId,
    Name,
    Code,
    FlagImage,
    Active,
}

#[derive(DeriveIden)]
pub(crate) enum Cities {
    Table,
    Id,
    CountryId,
    Name,
    AirportCode,
    IsCapital,
    Image,
    Active,
}

#[derive(DeriveIden)]
pub(crate) enum Airlines {
    Table,
    Id,
    Name,
    Code,
    Logo,
    OriginCountry,
    Active,
}
