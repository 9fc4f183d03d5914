//! 目录查询过滤条件
//!
//! 所有字段都是可选的，提供的条件之间按 AND 组合；基础条件
//! （active / available 以及地理层级一致性）由存储层总是附加。

use std::str::FromStr;

use rust_decimal::Decimal;

use super::models::{CarCategory, PackageType, RegionName, Season};

/// 按城市匹配：数字按 id 精确匹配，其他按城市名或机场代码做不区分大小写的子串匹配
#[derive(Debug, Clone, PartialEq)]
pub enum CityMatch {
    Id(i64),
    Text(String),
}

impl CityMatch {
    /// 空白输入视为未提供
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<i64>() {
            Ok(id) => CityMatch::Id(id),
            Err(_) => CityMatch::Text(raw.to_string()),
        })
    }
}

/// 区域引用：id 或枚举键（`caribe`、`medio_oriente` ...）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionRef {
    Id(i64),
    Name(RegionName),
}

impl FromStr for RegionRef {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Ok(id) = raw.parse::<i64>() {
            return Ok(RegionRef::Id(id));
        }
        RegionName::from_str(&raw.to_lowercase())
            .map(RegionRef::Name)
            .map_err(|_| format!("Región desconocida: '{}'", raw))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationFilter {
    pub featured_only: bool,
    /// 国家文本子串
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelFilter {
    pub destination_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightFilter {
    pub origin: Option<CityMatch>,
    pub destination: Option<CityMatch>,
    pub airline_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalCarFilter {
    pub category: Option<CarCategory>,
    /// 取车地址或城市名子串
    pub location: Option<String>,
    pub city_id: Option<i64>,
    pub country_id: Option<i64>,
    pub region: Option<RegionRef>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageFilter {
    pub region: Option<RegionRef>,
    pub country_id: Option<i64>,
    pub package_type: Option<PackageType>,
    pub season: Option<Season>,
    pub max_price: Option<Decimal>,
    pub featured_only: bool,
    pub airline_id: Option<i64>,
    pub limit: Option<u64>,
}

impl PackageFilter {
    pub fn for_region(region_id: i64) -> Self {
        Self {
            region: Some(RegionRef::Id(region_id)),
            ..Default::default()
        }
    }

    pub fn for_country(country_id: i64) -> Self {
        Self {
            country_id: Some(country_id),
            ..Default::default()
        }
    }

    pub fn featured() -> Self {
        Self {
            featured_only: true,
            ..Default::default()
        }
    }
}
