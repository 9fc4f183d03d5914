//! Curated multi-day travel package

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "travel_packages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    // card
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    #[sea_orm(column_type = "Text")]
    pub short_description: String,

    // location
    pub region_id: i64,
    pub country_id: i64,
    pub city_id: Option<i64>,

    pub price: Decimal,
    pub currency: String,
    pub package_type: String,
    pub nights: i32,
    pub days: i32,
    pub departure_cities: Option<String>,
    pub departure_dates: Option<String>,
    pub airline_id: Option<i64>,

    // detail
    pub detail_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub long_description: Option<String>,
    pub season: String,
    pub trip_type: String,
    pub valid_from: Option<Date>,
    pub valid_until: Option<Date>,

    // sidebar
    pub map_image: Option<String>,
    pub language: Option<String>,
    pub local_currency: Option<String>,
    /// JSON array of place names
    #[sea_orm(column_type = "Text")]
    pub highlighted_places: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub required_documents: Option<String>,
    pub temperature: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub included: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub not_included: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub how_to_book: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub important_notes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub flight_schedule: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub baggage_policy: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub travel_requirements: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub payment_methods: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cancellation_policy: Option<String>,

    pub includes_flight: bool,
    pub includes_hotel: bool,
    pub includes_meals: bool,
    pub includes_transfers: bool,
    pub includes_tours: bool,
    pub includes_insurance: bool,

    pub pdf_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reservation_message: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::RegionId",
        to = "super::region::Column::Id",
        on_delete = "Cascade"
    )]
    Region,
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id",
        on_delete = "Cascade"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id",
        on_delete = "SetNull"
    )]
    City,
    #[sea_orm(
        belongs_to = "super::airline::Entity",
        from = "Column::AirlineId",
        to = "super::airline::Column::Id",
        on_delete = "SetNull"
    )]
    Airline,
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::airline::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airline.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
