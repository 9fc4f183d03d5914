//! CLI command implementations

mod catalog_import;
mod config_gen;
mod seed;

pub use catalog_import::{import_catalog, read_catalog_file};
pub use config_gen::config_generate;
pub use seed::seed_geography;
