//! Geography registry queries (regions, countries, cities) and airlines

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::converters::{model_to_airline, model_to_city, model_to_country, model_to_region};
use super::{SeaOrmStorage, scope};
use crate::errors::Result;
use crate::storage::models::{Airline, City, Country, GeoKeys, GeoLookup, Region};

use migration::entities::{airline, city, country, region};

impl SeaOrmStorage {
    /// 启用的区域，按 display_order、名称排序
    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        let select = region::Entity::find()
            .filter(region::Column::Active.eq(true))
            .order_by_asc(region::Column::DisplayOrder)
            .order_by_asc(region::Column::Name);
        let models = self.fetch_all("list_regions", select).await?;
        Ok(models.into_iter().map(model_to_region).collect())
    }

    pub async fn get_region(&self, id: i64) -> Result<Option<Region>> {
        let select = region::Entity::find_by_id(id).filter(region::Column::Active.eq(true));
        let model = self.fetch_one("get_region", select).await?;
        Ok(model.map(model_to_region))
    }

    /// 启用区域下的启用国家；region_id 为 None 时返回全部
    pub async fn list_countries(&self, region_id: Option<i64>) -> Result<Vec<Country>> {
        let mut select = country::Entity::find()
            .filter(country::Column::Id.in_subquery(scope::active_country_ids()));
        if let Some(region_id) = region_id {
            select = select.filter(country::Column::RegionId.eq(region_id));
        }
        let models = self
            .fetch_all("list_countries", select.order_by_asc(country::Column::Name))
            .await?;
        Ok(models.into_iter().map(model_to_country).collect())
    }

    pub async fn get_country(&self, id: i64) -> Result<Option<Country>> {
        let select = country::Entity::find_by_id(id)
            .filter(country::Column::Id.in_subquery(scope::active_country_ids()));
        let model = self.fetch_one("get_country", select).await?;
        Ok(model.map(model_to_country))
    }

    /// 启用国家下的启用城市；country_id 为 None 时返回全部
    pub async fn list_cities(&self, country_id: Option<i64>) -> Result<Vec<City>> {
        let mut select =
            city::Entity::find().filter(city::Column::Id.in_subquery(scope::active_city_ids()));
        if let Some(country_id) = country_id {
            select = select.filter(city::Column::CountryId.eq(country_id));
        }
        let models = self
            .fetch_all("list_cities", select.order_by_asc(city::Column::Name))
            .await?;
        Ok(models.into_iter().map(model_to_city).collect())
    }

    pub async fn get_city(&self, id: i64) -> Result<Option<City>> {
        let select = city::Entity::find_by_id(id)
            .filter(city::Column::Id.in_subquery(scope::active_city_ids()));
        let model = self.fetch_one("get_city", select).await?;
        Ok(model.map(model_to_city))
    }

    pub async fn list_airlines(&self) -> Result<Vec<Airline>> {
        let select = airline::Entity::find()
            .filter(airline::Column::Active.eq(true))
            .order_by_asc(airline::Column::Name);
        let models = self.fetch_all("list_airlines", select).await?;
        Ok(models.into_iter().map(model_to_airline).collect())
    }

    pub async fn get_airline(&self, id: i64) -> Result<Option<Airline>> {
        let select = airline::Entity::find_by_id(id).filter(airline::Column::Active.eq(true));
        let model = self.fetch_one("get_airline", select).await?;
        Ok(model.map(model_to_airline))
    }

    /// 载入 keys 引用的节点（含停用的）；城市带出国家，国家带出区域
    pub async fn load_geo_lookup(&self, keys: &GeoKeys) -> Result<GeoLookup> {
        let cities = if keys.cities.is_empty() {
            Vec::new()
        } else {
            let select = city::Entity::find().filter(city::Column::Id.is_in(keys.cities.clone()));
            self.fetch_all("lookup_cities", select).await?
        };

        let mut country_ids = keys.countries.clone();
        country_ids.extend(cities.iter().map(|c| c.country_id));
        let countries = if country_ids.is_empty() {
            Vec::new()
        } else {
            let select = country::Entity::find().filter(country::Column::Id.is_in(country_ids));
            self.fetch_all("lookup_countries", select).await?
        };

        let mut region_ids = keys.regions.clone();
        region_ids.extend(countries.iter().map(|c| c.region_id));
        let regions = if region_ids.is_empty() {
            Vec::new()
        } else {
            let select = region::Entity::find().filter(region::Column::Id.is_in(region_ids));
            self.fetch_all("lookup_regions", select).await?
        };

        let airlines = if keys.airlines.is_empty() {
            Vec::new()
        } else {
            let select =
                airline::Entity::find().filter(airline::Column::Id.is_in(keys.airlines.clone()));
            self.fetch_all("lookup_airlines", select).await?
        };

        Ok(GeoLookup {
            regions: regions
                .into_iter()
                .map(|m| (m.id, model_to_region(m)))
                .collect(),
            countries: countries
                .into_iter()
                .map(|m| (m.id, model_to_country(m)))
                .collect(),
            cities: cities.into_iter().map(|m| (m.id, model_to_city(m))).collect(),
            airlines: airlines
                .into_iter()
                .map(|m| (m.id, model_to_airline(m)))
                .collect(),
        })
    }
}
