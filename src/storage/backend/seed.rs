//! 初始地理数据
//!
//! 9 个区域及其默认国家。可重复执行：先读出已有的行，只插入缺少的部分，
//! 已存在的行保持不变。

use std::collections::HashSet;

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{EntityTrait, InsertMany, TransactionTrait};
use strum::IntoEnumIterator;
use tracing::info;

use super::{SeaOrmStorage, db_err};
use crate::errors::Result;
use crate::storage::models::RegionName;

use migration::entities::{country, region};

/// 每个区域的默认国家
pub fn default_countries(region: RegionName) -> &'static [&'static str] {
    match region {
        RegionName::Caribe => &[
            "Aruba",
            "Bahamas",
            "Cuba",
            "Curazao",
            "Jamaica",
            "Puerto Rico",
            "República Dominicana",
            "San Martín",
            "Trinidad y Tobago",
            "Islas Vírgenes",
        ],
        RegionName::Sudamerica => &[
            "Argentina",
            "Bolivia",
            "Brasil",
            "Chile",
            "Colombia",
            "Paraguay",
            "Perú",
            "Uruguay",
            "Venezuela",
        ],
        RegionName::Centroamerica => &[
            "Belice",
            "Costa Rica",
            "El Salvador",
            "Guatemala",
            "Honduras",
            "Nicaragua",
            "Panamá",
        ],
        RegionName::Norteamerica => &["Canadá", "Estados Unidos", "México"],
        RegionName::Europa => &[
            "Alemania",
            "Austria",
            "Bélgica",
            "Croacia",
            "España",
            "Francia",
            "Grecia",
            "Hungría",
            "Italia",
            "Países Bajos",
            "Polonia",
            "Portugal",
            "Reino Unido",
            "República Checa",
            "Rusia",
            "Suiza",
            "Turquía",
        ],
        RegionName::MedioOriente => &[
            "Arabia Saudita",
            "Egipto",
            "Emiratos Árabes Unidos",
            "Israel",
            "Jordania",
            "Qatar",
            "Uzbekistán",
        ],
        RegionName::Africa => &["Egipto", "Kenia", "Marruecos", "Sudáfrica", "Tanzania"],
        RegionName::Asia => &[
            "China",
            "Corea del Sur",
            "Filipinas",
            "India",
            "Indonesia",
            "Japón",
            "Malasia",
            "Maldivas",
            "Singapur",
            "Tailandia",
            "Vietnam",
        ],
        RegionName::Ecuador => &["Ecuador"],
    }
}

/// 本次新增的行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub regions_created: u64,
    pub countries_created: u64,
}

fn region_insert(names: &[RegionName]) -> InsertMany<region::ActiveModel> {
    region::Entity::insert_many(names.iter().map(|name| region::ActiveModel {
        id: NotSet,
        name: Set(name.as_ref().to_string()),
        description: Set(None),
        image: Set(None),
        active: Set(true),
        display_order: Set(name.default_order()),
    }))
}

fn country_insert(region_id: i64, names: &[&str]) -> InsertMany<country::ActiveModel> {
    country::Entity::insert_many(names.iter().map(|name| country::ActiveModel {
        id: NotSet,
        region_id: Set(region_id),
        name: Set(name.to_string()),
        code: Set(None),
        flag_image: Set(None),
        active: Set(true),
    }))
}

impl SeaOrmStorage {
    /// 幂等地写入区域与默认国家
    pub async fn seed_geography(&self) -> Result<SeedReport> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_err("seed: begin", e))?;
        let mut report = SeedReport::default();

        let existing: HashSet<String> = region::Entity::find()
            .all(&txn)
            .await
            .map_err(|e| db_err("seed: load regions", e))?
            .into_iter()
            .map(|r| r.name)
            .collect();

        let missing: Vec<RegionName> = RegionName::iter()
            .filter(|name| !existing.contains(name.as_ref()))
            .collect();
        if !missing.is_empty() {
            report.regions_created = missing.len() as u64;
            region_insert(&missing)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| db_err("seed: regions", e))?;
        }

        let regions = region::Entity::find()
            .all(&txn)
            .await
            .map_err(|e| db_err("seed: load regions", e))?;
        let existing: HashSet<(i64, String)> = country::Entity::find()
            .all(&txn)
            .await
            .map_err(|e| db_err("seed: load countries", e))?
            .into_iter()
            .map(|c| (c.region_id, c.name))
            .collect();

        for region_row in regions {
            let Ok(name) = region_row.name.parse::<RegionName>() else {
                continue;
            };
            let missing: Vec<&str> = default_countries(name)
                .iter()
                .copied()
                .filter(|country| !existing.contains(&(region_row.id, country.to_string())))
                .collect();
            if missing.is_empty() {
                continue;
            }

            report.countries_created += missing.len() as u64;
            country_insert(region_row.id, &missing)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| db_err("seed: countries", e))?;
        }

        txn.commit().await.map_err(|e| db_err("seed: commit", e))?;

        info!(
            "Geography seeded: {} regions, {} countries created",
            report.regions_created, report.countries_created
        );
        Ok(report)
    }
}
