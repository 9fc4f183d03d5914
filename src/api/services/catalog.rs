//! 目录只读接口：目的地、酒店、航班、租车、套餐

use actix_web::{HttpResponse, web};
use tracing::trace;

use crate::services::CatalogService;

use super::helpers::{api_result, error_response};
use super::types::{DestinationQuery, FlightQuery, HotelQuery, PackageQuery, RentalCarQuery};

pub struct CatalogApi;

impl CatalogApi {
    pub async fn list_destinations(
        query: web::Query<DestinationQuery>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        match query.into_inner().into_filter() {
            Ok(filter) => api_result(catalog.list_destinations(&filter).await),
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_destination(
        path: web::Path<i64>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        api_result(catalog.get_destination(path.into_inner()).await)
    }

    pub async fn list_hotels(
        query: web::Query<HotelQuery>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        match query.into_inner().into_filter() {
            Ok(filter) => api_result(catalog.list_hotels(&filter).await),
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_hotel(
        path: web::Path<i64>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        api_result(catalog.get_hotel(path.into_inner()).await)
    }

    pub async fn list_flights(
        query: web::Query<FlightQuery>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        match query.into_inner().into_filter() {
            Ok(filter) => {
                trace!("API: list flights with {:?}", filter);
                api_result(catalog.list_flights(&filter).await)
            }
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_flight(
        path: web::Path<i64>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        api_result(catalog.get_flight(path.into_inner()).await)
    }

    pub async fn list_rental_cars(
        query: web::Query<RentalCarQuery>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        match query.into_inner().into_filter() {
            Ok(filter) => api_result(catalog.list_rental_cars(&filter).await),
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_rental_car(
        path: web::Path<i64>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        api_result(catalog.get_rental_car(path.into_inner()).await)
    }

    pub async fn list_packages(
        query: web::Query<PackageQuery>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        match query.into_inner().into_filter() {
            Ok(filter) => {
                trace!("API: list packages with {:?}", filter);
                api_result(catalog.list_packages(&filter).await)
            }
            Err(e) => error_response(&e),
        }
    }

    pub async fn get_package(
        path: web::Path<i64>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        api_result(catalog.get_package(path.into_inner()).await)
    }

    pub async fn featured_packages(catalog: web::Data<CatalogService>) -> HttpResponse {
        api_result(catalog.featured_packages().await)
    }

    pub async fn packages_by_region(catalog: web::Data<CatalogService>) -> HttpResponse {
        api_result(catalog.packages_by_region().await)
    }
}
