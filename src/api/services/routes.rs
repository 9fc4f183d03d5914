//! 路由配置
//!
//! 所有路径都不带结尾斜杠注册；App 外层的 `NormalizePath::trim()` 负责
//! 把 `/api/paquetes/` 规整成 `/api/paquetes`。

use actix_web::dev::HttpServiceFactory;
use actix_web::web;

use crate::api::middleware::AdminAuth;
use crate::config::RoutesConfig;

use super::admin::AdminApi;
use super::catalog::CatalogApi;
use super::contact::ContactApi;
use super::geography::GeographyApi;
use super::health::health_routes;
use super::helpers::{json_config, path_config};

/// 区域 `/regiones`
fn region_routes() -> actix_web::Scope {
    web::scope("/regiones")
        .route("", web::get().to(GeographyApi::list_regions))
        .route("/{id}", web::get().to(GeographyApi::get_region))
        .route("/{id}/paises", web::get().to(GeographyApi::region_countries))
        .route("/{id}/paquetes", web::get().to(GeographyApi::region_packages))
}

/// 国家 `/paises-region`
fn country_routes() -> actix_web::Scope {
    web::scope("/paises-region")
        .route("", web::get().to(GeographyApi::list_countries))
        .route("/{id}", web::get().to(GeographyApi::get_country))
        .route("/{id}/ciudades", web::get().to(GeographyApi::country_cities))
        .route("/{id}/paquetes", web::get().to(GeographyApi::country_packages))
}

fn city_routes() -> actix_web::Scope {
    web::scope("/ciudades")
        .route("", web::get().to(GeographyApi::list_cities))
        .route("/{id}", web::get().to(GeographyApi::get_city))
}

fn airline_routes() -> actix_web::Scope {
    web::scope("/aerolineas")
        .route("", web::get().to(GeographyApi::list_airlines))
        .route("/{id}", web::get().to(GeographyApi::get_airline))
        .route("/{id}/vuelos", web::get().to(GeographyApi::airline_flights))
}

/// 套餐 `/paquetes`
///
/// 固定路径（destacados、por_region）必须在 `/{id}` 之前注册。
fn package_routes() -> actix_web::Scope {
    web::scope("/paquetes")
        .route("", web::get().to(CatalogApi::list_packages))
        .route("/destacados", web::get().to(CatalogApi::featured_packages))
        .route("/por_region", web::get().to(CatalogApi::packages_by_region))
        .route("/{id}", web::get().to(CatalogApi::get_package))
}

/// 目的地、酒店、航班、租车
fn inventory_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/destinos")
            .route("", web::get().to(CatalogApi::list_destinations))
            .route("/{id}", web::get().to(CatalogApi::get_destination)),
    )
    .service(
        web::scope("/hoteles")
            .route("", web::get().to(CatalogApi::list_hotels))
            .route("/{id}", web::get().to(CatalogApi::get_hotel)),
    )
    .service(
        web::scope("/vuelos")
            .route("", web::get().to(CatalogApi::list_flights))
            .route("/{id}", web::get().to(CatalogApi::get_flight)),
    )
    .service(
        web::scope("/autos")
            .route("", web::get().to(CatalogApi::list_rental_cars))
            .route("/{id}", web::get().to(CatalogApi::get_rental_car)),
    );
}

/// 管理后台级联下拉 `/admin-ajax`
fn admin_ajax_routes() -> actix_web::Scope {
    web::scope("/admin-ajax")
        .route(
            "/paises-por-region/{id}",
            web::get().to(GeographyApi::countries_dropdown),
        )
        .route(
            "/ciudades-por-pais/{id}",
            web::get().to(GeographyApi::cities_dropdown),
        )
}

/// 管理接口
///
/// 包含：
/// - POST /aerolineas, /ciudades, /destinos, /hoteles, /vuelos, /autos, /paquetes
/// - GET /clientes - 客户及其请求
/// - PATCH /solicitudes/{id} - 标记请求已处理
///
/// `wrap` 之后 Scope 的类型参数变了，所以只能以 `impl HttpServiceFactory` 返回。
pub fn admin_routes(admin_prefix: &str, admin_token: &str) -> impl HttpServiceFactory + use<> {
    web::scope(admin_prefix)
        .wrap(AdminAuth::new(admin_token))
        .route("/aerolineas", web::post().to(AdminApi::create_airline))
        .route("/ciudades", web::post().to(AdminApi::create_city))
        .route("/destinos", web::post().to(AdminApi::create_destination))
        .route("/hoteles", web::post().to(AdminApi::create_hotel))
        .route("/vuelos", web::post().to(AdminApi::create_flight))
        .route("/autos", web::post().to(AdminApi::create_rental_car))
        .route("/paquetes", web::post().to(AdminApi::create_package))
        .route("/clientes", web::get().to(AdminApi::list_customers))
        .route("/solicitudes/{id}", web::patch().to(AdminApi::update_request))
}

/// `api_prefix` 下的全部路由
pub fn api_routes(routes: &RoutesConfig, admin_token: &str) -> actix_web::Scope {
    web::scope(&routes.api_prefix)
        .service(admin_ajax_routes())
        .service(admin_routes(&routes.admin_prefix, admin_token))
        .service(region_routes())
        .service(country_routes())
        .service(city_routes())
        .service(airline_routes())
        .service(package_routes())
        .configure(inventory_routes)
        .route("/contacto", web::post().to(ContactApi::submit_contact))
        .route("/mensajes", web::post().to(ContactApi::submit_message))
}

/// 注册提取器配置、API 与健康检查路由
///
/// 服务数据（`web::Data<…Service>`、storage、启动时间）由调用方注入。
pub fn configure(cfg: &mut web::ServiceConfig, routes: &RoutesConfig, admin_token: &str) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(web::scope(&routes.health_prefix).service(health_routes()))
        .service(api_routes(routes, admin_token));
}
