//! Geography registry service
//!
//! 区域 → 国家 → 城市 的只读查询，以及管理后台级联下拉框数据。

use std::sync::Arc;

use tracing::info;

use super::views::{AirlineView, CityView, CountryView, DropdownOption, RegionView};
use crate::errors::{Result, TravelError};
use crate::storage::models::GeoKeys;
use crate::storage::{SeaOrmStorage, SeedReport};

pub struct GeographyService {
    storage: Arc<SeaOrmStorage>,
}

impl GeographyService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_regions(&self) -> Result<Vec<RegionView>> {
        let regions = self.storage.list_regions().await?;
        Ok(regions.iter().map(RegionView::from).collect())
    }

    pub async fn get_region(&self, id: i64) -> Result<RegionView> {
        self.storage
            .get_region(id)
            .await?
            .map(|r| RegionView::from(&r))
            .ok_or_else(|| region_not_found(id))
    }

    pub async fn list_countries(&self, region_id: Option<i64>) -> Result<Vec<CountryView>> {
        let countries = self.storage.list_countries(region_id).await?;
        let keys = countries
            .iter()
            .fold(GeoKeys::default(), |keys, c| keys.region(c.region_id));
        let geo = self.storage.load_geo_lookup(&keys).await?;
        Ok(countries
            .iter()
            .map(|c| CountryView::build(c, &geo))
            .collect())
    }

    /// 区域不存在或已停用时返回 NotFound
    pub async fn countries_of_region(&self, region_id: i64) -> Result<Vec<CountryView>> {
        self.get_region(region_id).await?;
        self.list_countries(Some(region_id)).await
    }

    pub async fn get_country(&self, id: i64) -> Result<CountryView> {
        let country = self
            .storage
            .get_country(id)
            .await?
            .ok_or_else(|| country_not_found(id))?;
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().region(country.region_id))
            .await?;
        Ok(CountryView::build(&country, &geo))
    }

    pub async fn list_cities(&self, country_id: Option<i64>) -> Result<Vec<CityView>> {
        let cities = self.storage.list_cities(country_id).await?;
        let keys = cities.iter().fold(GeoKeys::default(), |keys, c| keys.city(c.id));
        let geo = self.storage.load_geo_lookup(&keys).await?;
        Ok(cities.iter().map(|c| CityView::build(c, &geo)).collect())
    }

    pub async fn cities_of_country(&self, country_id: i64) -> Result<Vec<CityView>> {
        self.get_country(country_id).await?;
        self.list_cities(Some(country_id)).await
    }

    pub async fn get_city(&self, id: i64) -> Result<CityView> {
        let city = self
            .storage
            .get_city(id)
            .await?
            .ok_or_else(|| TravelError::not_found(format!("Ciudad {} no encontrada", id)))?;
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().city(city.id))
            .await?;
        Ok(CityView::build(&city, &geo))
    }

    pub async fn list_airlines(&self) -> Result<Vec<AirlineView>> {
        let airlines = self.storage.list_airlines().await?;
        Ok(airlines.iter().map(AirlineView::from).collect())
    }

    pub async fn get_airline(&self, id: i64) -> Result<AirlineView> {
        self.storage
            .get_airline(id)
            .await?
            .map(|a| AirlineView::from(&a))
            .ok_or_else(|| airline_not_found(id))
    }

    /// 未知区域返回空列表
    pub async fn countries_for_dropdown(&self, region_id: i64) -> Result<Vec<DropdownOption>> {
        let countries = self.storage.list_countries(Some(region_id)).await?;
        Ok(countries
            .into_iter()
            .map(|c| DropdownOption {
                id: c.id,
                nombre: c.name,
            })
            .collect())
    }

    pub async fn cities_for_dropdown(&self, country_id: i64) -> Result<Vec<DropdownOption>> {
        let cities = self.storage.list_cities(Some(country_id)).await?;
        Ok(cities
            .into_iter()
            .map(|c| DropdownOption {
                id: c.id,
                nombre: c.name,
            })
            .collect())
    }

    pub async fn seed_geography(&self) -> Result<SeedReport> {
        let report = self.storage.seed_geography().await?;
        info!(
            "GeographyService: seed finished ({} regions, {} countries new)",
            report.regions_created, report.countries_created
        );
        Ok(report)
    }
}

pub(crate) fn region_not_found(id: i64) -> TravelError {
    TravelError::not_found(format!("Región {} no encontrada", id))
}

pub(crate) fn country_not_found(id: i64) -> TravelError {
    TravelError::not_found(format!("País {} no encontrado", id))
}

pub(crate) fn airline_not_found(id: i64) -> TravelError {
    TravelError::not_found(format!("Aerolínea {} no encontrada", id))
}
