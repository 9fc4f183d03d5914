use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "flights")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub airline_id: i64,
    pub origin_city_id: i64,
    pub destination_city_id: i64,
    /// `directo` | `escala`
    pub flight_type: String,
    pub flight_number: Option<String>,
    pub duration: String,
    pub price: Decimal,
    pub currency: String,
    pub available: bool,
    pub pdf_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reservation_message: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

// 同一张 cities 表被引用两次，只为航空公司实现 Related
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airline::Entity",
        from = "Column::AirlineId",
        to = "super::airline::Column::Id",
        on_delete = "Cascade"
    )]
    Airline,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::OriginCityId",
        to = "super::city::Column::Id",
        on_delete = "Cascade"
    )]
    OriginCity,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::DestinationCityId",
        to = "super::city::Column::Id",
        on_delete = "Cascade"
    )]
    DestinationCity,
}

impl Related<super::airline::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airline.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
