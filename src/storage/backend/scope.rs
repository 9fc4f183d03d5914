//! 可见性子查询
//!
//! 停用的区域会隐藏其下所有国家，停用的国家会隐藏其下所有城市；
//! 目录行只有在其关联的地理节点都可见时才会出现在公开结果中。

use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr, SelectStatement};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, QueryTrait};

use crate::storage::filters::RegionRef;
use migration::entities::{airline, city, country, destination, region};

/// 不区分大小写的子串匹配模式（转义 LIKE 通配符）
pub(super) fn contains_pattern(text: &str) -> LikeExpr {
    let escaped = text
        .trim()
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

/// lower(column) LIKE '%text%'
pub(super) fn icontains<C>(column: C, text: &str) -> Expr
where
    C: ColumnTrait + 'static,
{
    Expr::expr(Func::lower(Expr::col(column))).like(contains_pattern(text))
}

pub(super) fn active_region_ids() -> SelectStatement {
    region::Entity::find()
        .select_only()
        .column(region::Column::Id)
        .filter(region::Column::Active.eq(true))
        .into_query()
}

pub(super) fn active_country_ids() -> SelectStatement {
    country::Entity::find()
        .select_only()
        .column(country::Column::Id)
        .filter(country::Column::Active.eq(true))
        .filter(country::Column::RegionId.in_subquery(active_region_ids()))
        .into_query()
}

pub(super) fn active_city_ids() -> SelectStatement {
    city::Entity::find()
        .select_only()
        .column(city::Column::Id)
        .filter(city::Column::Active.eq(true))
        .filter(city::Column::CountryId.in_subquery(active_country_ids()))
        .into_query()
}

pub(super) fn active_airline_ids() -> SelectStatement {
    airline::Entity::find()
        .select_only()
        .column(airline::Column::Id)
        .filter(airline::Column::Active.eq(true))
        .into_query()
}

pub(super) fn active_destination_ids() -> SelectStatement {
    destination::Entity::find()
        .select_only()
        .column(destination::Column::Id)
        .filter(destination::Column::Active.eq(true))
        .into_query()
}

/// 城市名或机场代码包含 text 的城市
pub(super) fn city_ids_matching(text: &str) -> SelectStatement {
    city::Entity::find()
        .select_only()
        .column(city::Column::Id)
        .filter(
            Condition::any()
                .add(icontains(city::Column::Name, text))
                .add(icontains(city::Column::AirportCode, text)),
        )
        .into_query()
}

pub(super) fn city_ids_in_country(country_id: i64) -> SelectStatement {
    city::Entity::find()
        .select_only()
        .column(city::Column::Id)
        .filter(city::Column::CountryId.eq(country_id))
        .into_query()
}

pub(super) fn country_ids_in_region(region: RegionRef) -> SelectStatement {
    country::Entity::find()
        .select_only()
        .column(country::Column::Id)
        .filter(country::Column::RegionId.in_subquery(region_ids(region)))
        .into_query()
}

pub(super) fn city_ids_in_region(region: RegionRef) -> SelectStatement {
    city::Entity::find()
        .select_only()
        .column(city::Column::Id)
        .filter(city::Column::CountryId.in_subquery(country_ids_in_region(region)))
        .into_query()
}

/// RegionRef → 区域 id 子查询
pub(super) fn region_ids(region: RegionRef) -> SelectStatement {
    let query = region::Entity::find()
        .select_only()
        .column(region::Column::Id);
    match region {
        RegionRef::Id(id) => query.filter(region::Column::Id.eq(id)),
        RegionRef::Name(name) => query.filter(region::Column::Name.eq(name.as_ref())),
    }
    .into_query()
}
