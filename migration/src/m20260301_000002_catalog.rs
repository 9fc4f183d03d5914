//! 目录表迁移
//!
//! destinations / hotels / flights / rental_cars / travel_packages
//! 列表字段（services、features、highlighted_places）以 JSON 数组文本存储

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

use crate::m20260301_000001_geography::{Airlines, Cities, Countries, Regions};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn flag<T: IntoIden>(col: T, default: bool) -> ColumnDef {
    ColumnDef::new(col)
        .boolean()
        .not_null()
        .default(default)
        .to_owned()
}

/// 金额列：SQLite 没有定点类型，存 REAL；其余后端用 DECIMAL(10, 2)
fn money<T: IntoIden>(col: T, backend: DbBackend) -> ColumnDef {
    let mut def = ColumnDef::new(col);
    match backend {
        DbBackend::Sqlite => def.double(),
        _ => def.decimal_len(10, 2),
    };
    def.not_null().to_owned()
}

fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(Destinations::Table)
                    .if_not_exists()
                    .col(id_column(Destinations::Id))
                    .col(ColumnDef::new(Destinations::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Destinations::Country).string_len(100).not_null())
                    .col(ColumnDef::new(Destinations::Description).text().not_null())
                    .col(ColumnDef::new(Destinations::Image).string_len(255).not_null())
                    .col(money(Destinations::PriceFrom, backend))
                    .col(flag(Destinations::Featured, false))
                    .col(flag(Destinations::Active, true))
                    .col(ColumnDef::new(Destinations::PdfUrl).string_len(500).null())
                    .col(ColumnDef::new(Destinations::ReservationMessage).text().null())
                    .col(timestamp(Destinations::CreatedAt))
                    .col(timestamp(Destinations::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Hotels::Table)
                    .if_not_exists()
                    .col(id_column(Hotels::Id))
                    .col(ColumnDef::new(Hotels::DestinationId).big_integer().not_null())
                    .col(ColumnDef::new(Hotels::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Hotels::Description).text().not_null())
                    .col(ColumnDef::new(Hotels::Image).string_len(255).not_null())
                    .col(ColumnDef::new(Hotels::Address).string_len(300).not_null())
                    .col(ColumnDef::new(Hotels::Stars).small_integer().not_null().default(3))
                    .col(money(Hotels::PricePerNight, backend))
                    .col(ColumnDef::new(Hotels::Services).text().not_null())
                    .col(flag(Hotels::Available, true))
                    .col(ColumnDef::new(Hotels::PdfUrl).string_len(500).null())
                    .col(ColumnDef::new(Hotels::ReservationMessage).text().null())
                    .col(timestamp(Hotels::CreatedAt))
                    .col(timestamp(Hotels::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hotels_destination")
                            .from(Hotels::Table, Hotels::DestinationId)
                            .to(Destinations::Table, Destinations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_hotels_destination")
                    .table(Hotels::Table)
                    .col(Hotels::DestinationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Flights::Table)
                    .if_not_exists()
                    .col(id_column(Flights::Id))
                    .col(ColumnDef::new(Flights::AirlineId).big_integer().not_null())
                    .col(ColumnDef::new(Flights::OriginCityId).big_integer().not_null())
                    .col(ColumnDef::new(Flights::DestinationCityId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Flights::FlightType)
                            .string_len(20)
                            .not_null()
                            .default("directo"),
                    )
                    .col(ColumnDef::new(Flights::FlightNumber).string_len(20).null())
                    .col(ColumnDef::new(Flights::Duration).string_len(50).not_null())
                    .col(money(Flights::Price, backend))
                    .col(
                        ColumnDef::new(Flights::Currency)
                            .string_len(3)
                            .not_null()
                            .default("USD"),
                    )
                    .col(flag(Flights::Available, true))
                    .col(ColumnDef::new(Flights::PdfUrl).string_len(500).null())
                    .col(ColumnDef::new(Flights::ReservationMessage).text().null())
                    .col(timestamp(Flights::CreatedAt))
                    .col(timestamp(Flights::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flights_airline")
                            .from(Flights::Table, Flights::AirlineId)
                            .to(Airlines::Table, Airlines::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flights_origin_city")
                            .from(Flights::Table, Flights::OriginCityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flights_destination_city")
                            .from(Flights::Table, Flights::DestinationCityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_flights_route")
                    .table(Flights::Table)
                    .col(Flights::OriginCityId)
                    .col(Flights::DestinationCityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RentalCars::Table)
                    .if_not_exists()
                    .col(id_column(RentalCars::Id))
                    .col(ColumnDef::new(RentalCars::Brand).string_len(100).not_null())
                    .col(ColumnDef::new(RentalCars::Model).string_len(100).not_null())
                    .col(ColumnDef::new(RentalCars::Category).string_len(20).not_null())
                    .col(ColumnDef::new(RentalCars::Year).integer().not_null())
                    .col(ColumnDef::new(RentalCars::Passengers).small_integer().not_null())
                    .col(ColumnDef::new(RentalCars::Transmission).string_len(20).not_null())
                    .col(money(RentalCars::PricePerDay, backend))
                    .col(ColumnDef::new(RentalCars::Image).string_len(255).not_null())
                    .col(ColumnDef::new(RentalCars::CityId).big_integer().not_null())
                    .col(ColumnDef::new(RentalCars::PickupAddress).string_len(300).null())
                    .col(ColumnDef::new(RentalCars::Features).text().not_null())
                    .col(flag(RentalCars::Available, true))
                    .col(ColumnDef::new(RentalCars::PdfUrl).string_len(500).null())
                    .col(ColumnDef::new(RentalCars::ReservationMessage).text().null())
                    .col(timestamp(RentalCars::CreatedAt))
                    .col(timestamp(RentalCars::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_cars_city")
                            .from(RentalCars::Table, RentalCars::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TravelPackages::Table)
                    .if_not_exists()
                    .col(id_column(TravelPackages::Id))
                    .col(ColumnDef::new(TravelPackages::Title).string_len(200).not_null())
                    .col(ColumnDef::new(TravelPackages::Subtitle).string_len(200).null())
                    .col(ColumnDef::new(TravelPackages::Image).string_len(255).not_null())
                    .col(ColumnDef::new(TravelPackages::ShortDescription).text().not_null())
                    .col(ColumnDef::new(TravelPackages::RegionId).big_integer().not_null())
                    .col(ColumnDef::new(TravelPackages::CountryId).big_integer().not_null())
                    .col(ColumnDef::new(TravelPackages::CityId).big_integer().null())
                    .col(money(TravelPackages::Price, backend))
                    .col(
                        ColumnDef::new(TravelPackages::Currency)
                            .string_len(3)
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(TravelPackages::PackageType).string_len(20).not_null())
                    .col(ColumnDef::new(TravelPackages::Nights).integer().not_null())
                    .col(ColumnDef::new(TravelPackages::Days).integer().not_null())
                    .col(ColumnDef::new(TravelPackages::DepartureCities).string_len(300).null())
                    .col(ColumnDef::new(TravelPackages::DepartureDates).string_len(300).null())
                    .col(ColumnDef::new(TravelPackages::AirlineId).big_integer().null())
                    .col(ColumnDef::new(TravelPackages::DetailTitle).string_len(300).null())
                    .col(ColumnDef::new(TravelPackages::LongDescription).text().null())
                    .col(
                        ColumnDef::new(TravelPackages::Season)
                            .string_len(10)
                            .not_null()
                            .default("media"),
                    )
                    .col(
                        ColumnDef::new(TravelPackages::TripType)
                            .string_len(20)
                            .not_null()
                            .default("pareja"),
                    )
                    .col(ColumnDef::new(TravelPackages::ValidFrom).date().null())
                    .col(ColumnDef::new(TravelPackages::ValidUntil).date().null())
                    .col(ColumnDef::new(TravelPackages::MapImage).string_len(255).null())
                    .col(ColumnDef::new(TravelPackages::Language).string_len(100).null())
                    .col(ColumnDef::new(TravelPackages::LocalCurrency).string_len(100).null())
                    .col(
                        ColumnDef::new(TravelPackages::HighlightedPlaces)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TravelPackages::RequiredDocuments).text().null())
                    .col(ColumnDef::new(TravelPackages::Temperature).string_len(100).null())
                    .col(ColumnDef::new(TravelPackages::Included).text().null())
                    .col(ColumnDef::new(TravelPackages::NotIncluded).text().null())
                    .col(ColumnDef::new(TravelPackages::HowToBook).text().null())
                    .col(ColumnDef::new(TravelPackages::ImportantNotes).text().null())
                    .col(ColumnDef::new(TravelPackages::FlightSchedule).text().null())
                    .col(ColumnDef::new(TravelPackages::BaggagePolicy).text().null())
                    .col(ColumnDef::new(TravelPackages::TravelRequirements).text().null())
                    .col(ColumnDef::new(TravelPackages::PaymentMethods).text().null())
                    .col(ColumnDef::new(TravelPackages::CancellationPolicy).text().null())
                    .col(flag(TravelPackages::IncludesFlight, false))
                    .col(flag(TravelPackages::IncludesHotel, false))
                    .col(flag(TravelPackages::IncludesMeals, false))
                    .col(flag(TravelPackages::IncludesTransfers, false))
                    .col(flag(TravelPackages::IncludesTours, false))
                    .col(flag(TravelPackages::IncludesInsurance, false))
                    .col(ColumnDef::new(TravelPackages::PdfUrl).string_len(500).null())
                    .col(ColumnDef::new(TravelPackages::ReservationMessage).text().null())
                    .col(flag(TravelPackages::Featured, false))
                    .col(flag(TravelPackages::Active, true))
                    .col(timestamp(TravelPackages::CreatedAt))
                    .col(timestamp(TravelPackages::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_travel_packages_region")
                            .from(TravelPackages::Table, TravelPackages::RegionId)
                            .to(Regions::Table, Regions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_travel_packages_country")
                            .from(TravelPackages::Table, TravelPackages::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_travel_packages_city")
                            .from(TravelPackages::Table, TravelPackages::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_travel_packages_airline")
                            .from(TravelPackages::Table, TravelPackages::AirlineId)
                            .to(Airlines::Table, Airlines::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 公开列表的常用过滤组合
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_travel_packages_region_active")
                    .table(TravelPackages::Table)
                    .col(TravelPackages::RegionId)
                    .col(TravelPackages::Active)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_travel_packages_country")
                    .table(TravelPackages::Table)
                    .col(TravelPackages::CountryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_travel_packages_country").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_travel_packages_region_active")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(TravelPackages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RentalCars::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_flights_route").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Flights::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_hotels_destination").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hotels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Destinations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Destinations {
    Table,
    Id,
    Name,
    Country,
    Description,
    Image,
    PriceFrom,
    Featured,
    Active,
    PdfUrl,
    ReservationMessage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Hotels {
    Table,
    Id,
    DestinationId,
    Name,
    Description,
    Image,
    Address,
    Stars,
    PricePerNight,
    Services,
    Available,
    PdfUrl,
    ReservationMessage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Flights {
    Table,
    Id,
    AirlineId,
    OriginCityId,
    DestinationCityId,
    FlightType,
    FlightNumber,
    Duration,
    Price,
    Currency,
    Available,
    PdfUrl,
    ReservationMessage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RentalCars {
    Table,
    Id,
    Brand,
    Model,
    Category,
    Year,
    Passengers,
    Transmission,
    PricePerDay,
    Image,
    CityId,
    PickupAddress,
    Features,
    Available,
    PdfUrl,
    ReservationMessage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TravelPackages {
    Table,
    Id,
    Title,
    Subtitle,
    Image,
    ShortDescription,
    RegionId,
    CountryId,
    CityId,
    Price,
    Currency,
    PackageType,
    Nights,
    Days,
    DepartureCities,
    DepartureDates,
    AirlineId,
    DetailTitle,
    LongDescription,
    Season,
    TripType,
    ValidFrom,
    ValidUntil,
    MapImage,
    Language,
    LocalCurrency,
    HighlightedPlaces,
    RequiredDocuments,
    Temperature,
    Included,
    NotIncluded,
    HowToBook,
    ImportantNotes,
    FlightSchedule,
    BaggagePolicy,
    TravelRequirements,
    PaymentMethods,
    CancellationPolicy,
    IncludesFlight,
    IncludesHotel,
    IncludesMeals,
    IncludesTransfers,
    IncludesTours,
    IncludesInsurance,
    PdfUrl,
    ReservationMessage,
    Featured,
    Active,
    CreatedAt,
    UpdatedAt,
}
