use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod filters;
pub mod models;

pub use backend::{ContactSubmission, SeaOrmStorage, SeedReport};
pub use filters::{
    CityMatch, DestinationFilter, FlightFilter, HotelFilter, PackageFilter, RegionRef,
    RentalCarFilter,
};
pub use models::*;

pub struct StorageFactory;

impl StorageFactory {
    /// 按 URL 推断后端类型，连接并迁移
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let storage = SeaOrmStorage::new(config).await?;
        Ok(Arc::new(storage))
    }
}
