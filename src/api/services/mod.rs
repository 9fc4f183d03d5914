pub mod admin;
pub mod catalog;
pub mod contact;
pub mod error_code;
pub mod geography;
pub mod health;
pub mod helpers;
pub mod routes;
pub mod types;

pub use admin::AdminApi;
pub use catalog::CatalogApi;
pub use contact::ContactApi;
pub use error_code::ErrorCode;
pub use geography::GeographyApi;
pub use health::{AppStartTime, HealthService, health_routes};
pub use routes::{admin_routes, api_routes, configure};
pub use types::ErrorBody;
