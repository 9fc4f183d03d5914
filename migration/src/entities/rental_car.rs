use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rental_cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub brand: String,
    pub model: String,
    /// `economico` | `sedan` | `suv` | `lujo` | `van`
    pub category: String,
    pub year: i32,
    pub passengers: i16,
    /// `manual` | `automatica`
    pub transmission: String,
    pub price_per_day: Decimal,
    pub image: String,
    pub city_id: i64,
    pub pickup_address: Option<String>,
    /// JSON array of feature names
    #[sea_orm(column_type = "Text")]
    pub features: String,
    pub available: bool,
    pub pdf_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reservation_message: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id",
        on_delete = "Cascade"
    )]
    City,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
