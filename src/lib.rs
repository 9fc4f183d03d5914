//! travel-catalog - Travel agency catalog and lead-capture backend
//!
//! Serves the public catalog (regions, countries, cities, airlines,
//! destinations, hotels, flights, rental cars and tour packages), captures
//! contact requests and fans them out to email and WhatsApp.
//!
//! # Architecture
//! - `storage`: SeaORM entities access, filters and contact upsert
//! - `services`: Business logic shared by HTTP handlers and the CLI
//! - `api`: HTTP handlers, routes and middleware
//! - `interfaces`: Command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
