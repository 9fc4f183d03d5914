//! Seed geography command

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::services::GeographyService;
use crate::storage::SeaOrmStorage;

/// 写入 9 个区域及默认国家；重复执行只补缺失的行
pub async fn seed_geography(storage: Arc<SeaOrmStorage>) -> Result<(), CliError> {
    let report = GeographyService::new(storage).seed_geography().await?;

    if report.regions_created == 0 && report.countries_created == 0 {
        println!("{} Geography already seeded, nothing to do", "ℹ".bold().blue());
        return Ok(());
    }

    println!(
        "{} Seeded {} regions and {} countries",
        "✓".bold().green(),
        report.regions_created.to_string().green(),
        report.countries_created.to_string().green()
    );
    Ok(())
}
