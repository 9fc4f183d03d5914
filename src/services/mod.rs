//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI commands.

mod catalog_input;
mod catalog_service;
mod contact_service;
mod geography_service;
pub mod notification;
pub mod views;

pub use catalog_input::*;
pub use catalog_service::*;
pub use contact_service::*;
pub use geography_service::GeographyService;
pub use notification::{
    ContactEvent, DeliveryReport, NotificationChannel, NotificationDispatcher,
};
