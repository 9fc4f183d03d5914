//! 管理接口：目录写入、客户与请求管理
//!
//! 整个作用域由 [`crate::api::middleware::AdminAuth`] 保护。

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::services::{
    CatalogService, ContactService, NewAirline, NewCity, NewDestination, NewFlight, NewHotel,
    NewPackage, NewRentalCar,
};

use super::helpers::{api_result, created_result};
use super::types::HandledUpdate;

pub struct AdminApi;

impl AdminApi {
    pub async fn create_airline(
        body: web::Json<NewAirline>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        created_result(catalog.create_airline(body.into_inner()).await)
    }

    pub async fn create_city(
        body: web::Json<NewCity>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        created_result(catalog.create_city(body.into_inner()).await)
    }

    pub async fn create_destination(
        body: web::Json<NewDestination>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        created_result(catalog.create_destination(body.into_inner()).await)
    }

    pub async fn create_hotel(
        body: web::Json<NewHotel>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        created_result(catalog.create_hotel(body.into_inner()).await)
    }

    pub async fn create_flight(
        body: web::Json<NewFlight>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        created_result(catalog.create_flight(body.into_inner()).await)
    }

    pub async fn create_rental_car(
        body: web::Json<NewRentalCar>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        created_result(catalog.create_rental_car(body.into_inner()).await)
    }

    pub async fn create_package(
        body: web::Json<NewPackage>,
        catalog: web::Data<CatalogService>,
    ) -> HttpResponse {
        created_result(catalog.create_package(body.into_inner()).await)
    }

    pub async fn list_customers(contact: web::Data<ContactService>) -> HttpResponse {
        api_result(contact.list_customers().await)
    }

    /// `PATCH /solicitudes/{id}/` `{atendido}`
    pub async fn update_request(
        path: web::Path<i64>,
        body: web::Json<HandledUpdate>,
        contact: web::Data<ContactService>,
    ) -> HttpResponse {
        let id = path.into_inner();
        let result = contact.set_request_handled(id, body.atendido).await;
        if result.is_ok() {
            info!("Admin: request {} marked atendido={}", id, body.atendido);
        }
        api_result(result)
    }
}
