use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    /// 去重用的自然键
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub registered_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contact_request::Entity")]
    ContactRequest,
}

impl Related<super::contact_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContactRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
