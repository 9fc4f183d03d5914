//! HTTP API integration tests
//!
//! Full router (trailing-slash normalization, extractor error bodies,
//! admin guard) against a seeded temporary SQLite store.

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{Value, json};

use common::{
    FixedChannel, country_id, dispatcher, package_input, region_id, seeded_storage, test_storage,
};
use travel_catalog::services::{CatalogService, NotificationDispatcher};
use travel_catalog::storage::models::RegionName;

const ADMIN_TOKEN: &str = "secreto-admin";

fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", ADMIN_TOKEN))
}

// =============================================================================
// Public catalog
// =============================================================================

#[actix_web::test]
async fn test_regions_with_trailing_slash() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::get().uri("/api/regiones/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let regions = body.as_array().unwrap();
    assert_eq!(regions.len(), 9);
    assert_eq!(regions[0]["nombre"], "caribe");
    assert_eq!(regions[0]["nombre_display"], "Caribe");
}

#[actix_web::test]
async fn test_invalid_query_parameter_is_named() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::get()
        .uri("/api/paquetes/?precio_max=abc&temporada=invierno")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 2000);
    assert!(body["errors"]["precio_max"].is_array());
    assert!(body["errors"]["temporada"].is_array());
}

#[actix_web::test]
async fn test_package_filters_over_http() {
    let db = seeded_storage().await;
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let cuba = country_id(&db.storage, "Cuba").await;
    let catalog = CatalogService::new(db.storage.clone());
    catalog
        .create_package(package_input(caribe, cuba, "Varadero", json!({"temporada": "alta", "precio": 800.0})))
        .await
        .unwrap();
    catalog
        .create_package(package_input(caribe, cuba, "La Habana", json!({"temporada": "baja"})))
        .await
        .unwrap();

    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::get()
        .uri("/api/paquetes?region=caribe&temporada=alta&precio_max=1000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let packages = body.as_array().unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0]["titulo"], "Varadero");
    assert_eq!(packages[0]["pais_nombre"], "Cuba");

    let req = TestRequest::get().uri("/api/paquetes/por_region/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["paquetes"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    for uri in ["/api/paquetes/9999", "/api/paquetes/abc", "/api/regiones/9999/paises"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1004, "uri {}", uri);
    }
}

#[actix_web::test]
async fn test_admin_ajax_dropdown() {
    let db = seeded_storage().await;
    let europa = region_id(&db.storage, RegionName::Europa).await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::get()
        .uri(&format!("/api/admin-ajax/paises-por-region/{}/", europa))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["nombre"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"España"));
    assert!(names.contains(&"Francia"));
    assert!(!names.contains(&"Cuba"));
}

// =============================================================================
// Contact capture
// =============================================================================

#[actix_web::test]
async fn test_contact_twice_reuses_customer() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let payload = json!({
        "nombre_completo": "Ana Ruiz",
        "email": "ana@x.com",
        "telefono": "0991234567",
        "mensaje": "Quiero info sobre Cancún"
    });

    let req = TestRequest::post()
        .uri("/api/contacto/")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Value = test::read_body_json(resp).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["cliente"]["es_nuevo"], true);

    let mut renamed = payload.clone();
    renamed["nombre_completo"] = json!("Ana María Ruiz");
    let req = TestRequest::post()
        .uri("/api/contacto/")
        .set_json(&renamed)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let second: Value = test::read_body_json(resp).await;
    assert_eq!(second["cliente"]["es_nuevo"], false);
    assert_eq!(second["cliente"]["id"], first["cliente"]["id"]);
    assert_eq!(second["cliente"]["nombre_completo"], "Ana María Ruiz");
    assert_ne!(second["solicitud_id"], first["solicitud_id"]);

    let req = TestRequest::get()
        .uri("/api/admin/clientes/")
        .insert_header(bearer())
        .to_request();
    let customers: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let customers = customers.as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["nombre_completo"], "Ana María Ruiz");
    assert_eq!(customers[0]["solicitudes"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_contact_validation_errors() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::post()
        .uri("/api/contacto")
        .set_json(json!({"nombre_completo": "", "email": "no-es-correo"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["errors"]["nombre_completo"].is_array());
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["mensaje"].is_array());

    // JSON roto
    let req = TestRequest::post()
        .uri("/api/contacto")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

// =============================================================================
// Admin
// =============================================================================

#[actix_web::test]
async fn test_admin_disabled_without_token() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), "");

    let req = TestRequest::get()
        .uri("/api/admin/clientes")
        .insert_header(("Authorization", "Bearer cualquiera"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_admin_rejects_wrong_token() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::get()
        .uri("/api/admin/clientes")
        .insert_header(("Authorization", "Bearer otro"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);

    let req = TestRequest::get().uri("/api/admin/clientes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_create_package_normalizes_pdf() {
    let db = seeded_storage().await;
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let cuba = country_id(&db.storage, "Cuba").await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::post()
        .uri("/api/admin/paquetes/")
        .insert_header(bearer())
        .set_json(json!({
            "titulo": "Cuba mágica",
            "imagen": "paquetes/cuba.jpg",
            "descripcion_corta": "Habana y Varadero",
            "region": caribe,
            "pais": cuba,
            "precio": 1299.0,
            "noches": 6,
            "dias": 7,
            "lugares_destacados": "La Habana, Varadero",
            "pdf_url": "https://drive.google.com/file/d/1AbC_d-2XyZ/view?usp=sharing"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["pdf_url"],
        "https://drive.google.com/file/d/1AbC_d-2XyZ/preview"
    );
    assert_eq!(body["lugares_destacados"], json!(["La Habana", "Varadero"]));
    assert_eq!(body["region_nombre"], "Caribe");

    // país fuera de la región
    let espana = country_id(&db.storage, "España").await;
    let req = TestRequest::post()
        .uri("/api/admin/paquetes")
        .insert_header(bearer())
        .set_json(json!({
            "titulo": "Mal",
            "imagen": "x.jpg",
            "descripcion_corta": "x",
            "region": caribe,
            "pais": espana,
            "precio": 10.0,
            "noches": 1,
            "dias": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["pais"].is_array());
}

#[actix_web::test]
async fn test_admin_duplicate_city_is_conflict() {
    let db = seeded_storage().await;
    let ecuador = country_id(&db.storage, "Ecuador").await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let city = json!({"pais": ecuador, "nombre": "Quito", "codigo_aeropuerto": "UIO"});
    let req = TestRequest::post()
        .uri("/api/admin/ciudades")
        .insert_header(bearer())
        .set_json(&city)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    // índice único (pais, nombre)
    let req = TestRequest::post()
        .uri("/api/admin/ciudades")
        .insert_header(bearer())
        .set_json(&city)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 3000);
}

#[actix_web::test]
async fn test_admin_marks_request_handled() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::post()
        .uri("/api/contacto")
        .set_json(json!({
            "nombre_completo": "Luis",
            "email": "luis@x.com",
            "telefono": "0990000000",
            "mensaje": "Luna de miel"
        }))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let request_id = created["solicitud_id"].as_i64().unwrap();

    let req = TestRequest::patch()
        .uri(&format!("/api/admin/solicitudes/{}", request_id))
        .insert_header(bearer())
        .set_json(json!({"atendido": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["atendido"], true);

    let req = TestRequest::get()
        .uri("/api/admin/clientes")
        .insert_header(bearer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body[0]["email"], "luis@x.com");
    assert_eq!(body[0]["solicitudes"][0]["atendido"], true);

    let req = TestRequest::patch()
        .uri("/api/admin/solicitudes/9999")
        .insert_header(bearer())
        .set_json(json!({"atendido": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Health
// =============================================================================

#[actix_web::test]
async fn test_health_endpoints() {
    let db = seeded_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["backend"], "sqlite");
}

#[actix_web::test]
async fn test_health_lists_enabled_channels() {
    let db = test_storage().await;
    let app = test_app!(
        db.storage,
        dispatcher(vec![FixedChannel::ok("email"), FixedChannel::failing("whatsapp")]),
        ADMIN_TOKEN
    );

    let req = TestRequest::get().uri("/health").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["checks"]["notifications"], json!(["email", "whatsapp"]));

    let db = test_storage().await;
    let app = test_app!(db.storage, NotificationDispatcher::disabled(), ADMIN_TOKEN);
    let req = TestRequest::get().uri("/health").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["checks"]["notifications"], json!([]));
}
