//! Shared test setup: temporary SQLite stores, fixtures and mock channels

#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tempfile::TempDir;

use travel_catalog::config::{DatabaseConfig, init_config};
use travel_catalog::services::{
    CatalogService, ContactEvent, ContactService, DeliveryReport, GeographyService, NewPackage,
    NotificationChannel, NotificationDispatcher,
};
use travel_catalog::storage::models::{City, Country, RegionName};
use travel_catalog::storage::SeaOrmStorage;

static INIT: Once = Once::new();

pub fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// 每个测试独立的 SQLite 文件；`_dir` 在测试结束时删除
pub struct TestDb {
    _dir: TempDir,
    pub storage: Arc<SeaOrmStorage>,
}

pub async fn test_storage() -> TestDb {
    init_static_config();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("travel_test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    };
    let storage = SeaOrmStorage::new(&config)
        .await
        .expect("Failed to create storage");
    TestDb {
        _dir: dir,
        storage: Arc::new(storage),
    }
}

/// 已写入 9 个区域和默认国家
pub async fn seeded_storage() -> TestDb {
    let db = test_storage().await;
    db.storage
        .seed_geography()
        .await
        .expect("Failed to seed geography");
    db
}

pub async fn region_id(storage: &SeaOrmStorage, name: RegionName) -> i64 {
    storage
        .list_regions()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.name == name)
        .map(|r| r.id)
        .expect("region not seeded")
}

pub async fn country_id(storage: &SeaOrmStorage, name: &str) -> i64 {
    storage
        .list_countries(None)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("country {} not seeded", name))
}

pub async fn insert_country(storage: &SeaOrmStorage, region_id: i64, name: &str, active: bool) -> i64 {
    storage
        .insert_country(&Country {
            id: 0,
            region_id,
            name: name.to_string(),
            code: None,
            flag_image: None,
            active,
        })
        .await
        .unwrap()
        .id
}

pub async fn insert_city(
    storage: &SeaOrmStorage,
    country_id: i64,
    name: &str,
    airport: &str,
    active: bool,
) -> i64 {
    storage
        .insert_city(&City {
            id: 0,
            country_id,
            name: name.to_string(),
            airport_code: Some(airport.to_string()),
            is_capital: false,
            image: None,
            active,
        })
        .await
        .unwrap()
        .id
}

/// 最小合法套餐；`extra` 覆盖或补充字段
pub fn package_input(region: i64, country: i64, title: &str, extra: Value) -> NewPackage {
    let mut base = json!({
        "titulo": title,
        "imagen": "paquetes/portada.jpg",
        "descripcion_corta": "Salidas todo el año",
        "region": region,
        "pais": country,
        "precio": 999.0,
        "noches": 4,
        "dias": 5
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(base).expect("invalid package fixture")
}

pub fn services(
    storage: &Arc<SeaOrmStorage>,
    dispatcher: NotificationDispatcher,
) -> (Arc<GeographyService>, Arc<CatalogService>, Arc<ContactService>) {
    (
        Arc::new(GeographyService::new(storage.clone())),
        Arc::new(CatalogService::new(storage.clone())),
        Arc::new(ContactService::new(storage.clone(), dispatcher)),
    )
}

// =============================================================================
// Mock notification channels
// =============================================================================

/// 固定结果的渠道，可选延迟
pub struct FixedChannel {
    pub name: &'static str,
    pub success: bool,
    pub delay: Option<Duration>,
}

impl FixedChannel {
    pub fn ok(name: &'static str) -> Arc<dyn NotificationChannel> {
        Arc::new(Self {
            name,
            success: true,
            delay: None,
        })
    }

    pub fn failing(name: &'static str) -> Arc<dyn NotificationChannel> {
        Arc::new(Self {
            name,
            success: false,
            delay: None,
        })
    }
}

#[async_trait]
impl NotificationChannel for FixedChannel {
    async fn deliver(&self, event: &ContactEvent) -> DeliveryReport {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.success {
            DeliveryReport::ok(self.name, format!("enviado a {}", event.email))
        } else {
            DeliveryReport::failed(self.name, "Servidor SMTP no configurado")
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

pub fn dispatcher(channels: Vec<Arc<dyn NotificationChannel>>) -> NotificationDispatcher {
    NotificationDispatcher::new(channels, Duration::from_secs(2))
}

/// 与服务器相同的路由与中间件，加上给定的 service 与管理 token
#[macro_export]
macro_rules! test_app {
    ($storage:expr, $dispatcher:expr, $admin_token:expr) => {{
        let (geography, catalog, contact) = common::services(&$storage, $dispatcher);
        let routes = travel_catalog::config::RoutesConfig::default();
        let token: String = $admin_token.to_string();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .wrap(travel_catalog::api::middleware::RequestIdMiddleware)
                .app_data(actix_web::web::Data::new($storage.clone()))
                .app_data(actix_web::web::Data::from(geography))
                .app_data(actix_web::web::Data::from(catalog))
                .app_data(actix_web::web::Data::from(contact))
                .app_data(actix_web::web::Data::new(
                    travel_catalog::api::services::AppStartTime::default(),
                ))
                .configure(|cfg| travel_catalog::api::services::configure(cfg, &routes, &token)),
        )
        .await
    }};
}
