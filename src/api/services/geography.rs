//! 地理层级与航空公司的只读接口

use actix_web::{HttpResponse, web};
use tracing::trace;

use crate::services::{CatalogService, GeographyService};

use super::helpers::{api_result, error_response};
use super::types::{CityQuery, CountryQuery};

pub struct GeographyApi;

impl GeographyApi {
    pub async fn list_regions(geo: web::Data<GeographyService>) -> HttpResponse {
        trace!("API: list regions");
        api_result(geo.list_regions().await)
    }

    pub async fn get_region(
        path: web::Path<i64>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        api_result(geo.get_region(path.into_inner()).await)
    }

    pub async fn region_countries(
        path: web::Path<i64>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        api_result(geo.countries_of_region(path.into_inner()).await)
    }

    pub async fn region_packages(
        path: web::Path<i64>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        api_result(catalog.packages_of_region(path.into_inner()).await)
    }

    pub async fn list_countries(
        query: web::Query<CountryQuery>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        match query.region_id() {
            Ok(region) => api_result(geo.list_countries(region).await),
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_country(
        path: web::Path<i64>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        api_result(geo.get_country(path.into_inner()).await)
    }

    pub async fn country_cities(
        path: web::Path<i64>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        api_result(geo.cities_of_country(path.into_inner()).await)
    }

    pub async fn country_packages(
        path: web::Path<i64>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        api_result(catalog.packages_of_country(path.into_inner()).await)
    }

    pub async fn list_cities(
        query: web::Query<CityQuery>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        match query.country_id() {
            Ok(country) => api_result(geo.list_cities(country).await),
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_city(path: web::Path<i64>, geo: web::Data<GeographyService>) -> HttpResponse {
        api_result(geo.get_city(path.into_inner()).await)
    }

    pub async fn list_airlines(geo: web::Data<GeographyService>) -> HttpResponse {
        api_result(geo.list_airlines().await)
    }

    pub async fn get_airline(
        path: web::Path<i64>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        api_result(geo.get_airline(path.into_inner()).await)
    }

    pub async fn airline_flights(
        path: web::Path<i64>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        api_result(catalog.flights_of_airline(path.into_inner()).await)
    }

    /// 管理后台级联下拉：区域 → 国家
    pub async fn countries_dropdown(
        path: web::Path<i64>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        api_result(geo.countries_for_dropdown(path.into_inner()).await)
    }

    /// 管理后台级联下拉：国家 → 城市
    pub async fn cities_dropdown(
        path: web::Path<i64>,
        geo: web::Data<GeographyService>,
    ) -> HttpResponse {
        api_result(geo.cities_for_dropdown(path.into_inner()).await)
    }
}
