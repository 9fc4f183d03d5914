use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "destinations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Free-text country name (not linked to the geography tree)
    pub country: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: String,
    pub price_from: Decimal,
    pub featured: bool,
    pub active: bool,
    pub pdf_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reservation_message: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hotel::Entity")]
    Hotel,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
