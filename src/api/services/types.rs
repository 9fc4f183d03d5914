//! API 类型定义：错误体、查询参数、写接口响应

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::error_code::ErrorCode;
use crate::errors::{FieldErrors, Result, TravelError};
use crate::services::views::TS_EXPORT_PATH;
use crate::storage::models::{CarCategory, PackageType, Season};
use crate::storage::{
    CityMatch, DestinationFilter, FlightFilter, HotelFilter, PackageFilter, RegionRef,
    RentalCarFilter,
};
use crate::utils::validation::{INVALID_NUMBER, invalid_choice_message};

/// 统一错误响应体
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ErrorBody {
    pub success: bool,
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional, type = "Record<string, Array<string>>")]
    pub errors: Option<FieldErrors>,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            errors: None,
        }
    }

    pub fn from_error(err: &TravelError) -> Self {
        Self {
            success: false,
            code: ErrorCode::from(err),
            message: err.message().to_string(),
            errors: err.field_errors().filter(|f| !f.is_empty()).cloned(),
        }
    }
}

// ============ Contact ============

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ContactCustomer {
    pub id: i64,
    pub nombre_completo: String,
    pub email: String,
    pub es_nuevo: bool,
}

/// `POST /contacto/` 成功响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ContactCreated {
    pub success: bool,
    pub message: String,
    pub cliente: ContactCustomer,
    pub solicitud_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HandledUpdate {
    pub atendido: bool,
}

// ============ Health ============

/// 存储健康检查状态
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthChecks {
    pub storage: HealthStorageCheck,
    /// 已启用的通知通道
    pub notifications: Vec<String>,
}

/// 健康检查响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u32,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}

// ============ Query parameters ============

fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_id(field: &str, value: &Option<String>) -> Result<Option<i64>> {
    blank_to_none(value)
        .map(|v| {
            v.parse::<i64>()
                .map_err(|_| TravelError::invalid_field(field, INVALID_NUMBER))
        })
        .transpose()
}

fn parse_number(field: &str, value: &Option<String>) -> Result<Option<Decimal>> {
    blank_to_none(value)
        .map(|v| {
            v.parse::<Decimal>()
                .map_err(|_| TravelError::invalid_field(field, INVALID_NUMBER))
        })
        .transpose()
}

fn parse_choice<E: std::str::FromStr>(field: &str, value: &Option<String>) -> Result<Option<E>> {
    blank_to_none(value)
        .map(|v| {
            v.to_lowercase()
                .parse::<E>()
                .map_err(|_| TravelError::invalid_field(field, invalid_choice_message(v)))
        })
        .transpose()
}

/// 缺省、"false"、"0" 为 false；"true"、"1"、"si" 为 true
fn parse_flag(field: &str, value: &Option<String>) -> Result<bool> {
    match blank_to_none(value).map(str::to_lowercase).as_deref() {
        None | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("si") | Some("sí") | Some("yes") => Ok(true),
        Some(_) => Err(TravelError::invalid_field(
            field,
            "Se requiere un valor booleano válido.",
        )),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryQuery {
    pub region: Option<String>,
}

impl CountryQuery {
    pub fn region_id(&self) -> Result<Option<i64>> {
        parse_id("region", &self.region)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityQuery {
    pub pais: Option<String>,
}

impl CityQuery {
    pub fn country_id(&self) -> Result<Option<i64>> {
        parse_id("pais", &self.pais)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestinationQuery {
    pub destacados: Option<String>,
    pub pais: Option<String>,
}

impl DestinationQuery {
    pub fn into_filter(self) -> Result<DestinationFilter> {
        Ok(DestinationFilter {
            featured_only: parse_flag("destacados", &self.destacados)?,
            country: blank_to_none(&self.pais).map(String::from),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelQuery {
    pub destino: Option<String>,
}

impl HotelQuery {
    pub fn into_filter(self) -> Result<HotelFilter> {
        Ok(HotelFilter {
            destination_id: parse_id("destino", &self.destino)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightQuery {
    pub origen: Option<String>,
    pub destino: Option<String>,
    pub aerolinea: Option<String>,
}

impl FlightQuery {
    pub fn into_filter(self) -> Result<FlightFilter> {
        Ok(FlightFilter {
            origin: blank_to_none(&self.origen).and_then(CityMatch::parse),
            destination: blank_to_none(&self.destino).and_then(CityMatch::parse),
            airline_id: parse_id("aerolinea", &self.aerolinea)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalCarQuery {
    pub tipo: Option<String>,
    pub ubicacion: Option<String>,
    pub ciudad: Option<String>,
    pub pais: Option<String>,
    pub region: Option<String>,
}

impl RentalCarQuery {
    pub fn into_filter(self) -> Result<RentalCarFilter> {
        Ok(RentalCarFilter {
            category: parse_choice::<CarCategory>("tipo", &self.tipo)?,
            location: blank_to_none(&self.ubicacion).map(String::from),
            city_id: parse_id("ciudad", &self.ciudad)?,
            country_id: parse_id("pais", &self.pais)?,
            region: parse_region(&self.region)?,
        })
    }
}

fn parse_region(value: &Option<String>) -> Result<Option<RegionRef>> {
    blank_to_none(value)
        .map(|v| {
            v.parse::<RegionRef>()
                .map_err(|e| TravelError::invalid_field("region", e))
        })
        .transpose()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageQuery {
    pub region: Option<String>,
    pub pais: Option<String>,
    pub tipo: Option<String>,
    pub temporada: Option<String>,
    pub precio_max: Option<String>,
    pub destacados: Option<String>,
    pub aerolinea: Option<String>,
}

impl PackageQuery {
    /// 所有参数的错误一并返回
    pub fn into_filter(self) -> Result<PackageFilter> {
        let mut errors = FieldErrors::new();
        let mut collect = |r: Result<()>| {
            if let Err(TravelError::Validation { fields, .. }) = r {
                errors.merge(fields);
            }
        };

        let mut filter = PackageFilter::default();
        collect(parse_region(&self.region).map(|v| filter.region = v));
        collect(parse_id("pais", &self.pais).map(|v| filter.country_id = v));
        collect(parse_choice::<PackageType>("tipo", &self.tipo).map(|v| filter.package_type = v));
        collect(parse_choice::<Season>("temporada", &self.temporada).map(|v| filter.season = v));
        collect(parse_number("precio_max", &self.precio_max).map(|v| filter.max_price = v));
        collect(parse_flag("destacados", &self.destacados).map(|v| filter.featured_only = v));
        collect(parse_id("aerolinea", &self.aerolinea).map(|v| filter.airline_id = v));

        errors.into_result()?;
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::RegionName;

    fn some(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_package_query_valid() {
        let filter = PackageQuery {
            region: some("europa"),
            temporada: some("alta"),
            precio_max: some("500"),
            destacados: some("true"),
            ..Default::default()
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.region, Some(RegionRef::Name(RegionName::Europa)));
        assert_eq!(filter.season, Some(Season::Alta));
        assert_eq!(filter.max_price, Some(Decimal::from(500)));
        assert!(filter.featured_only);
        assert!(filter.package_type.is_none());
    }

    #[test]
    fn test_package_query_reports_every_bad_param() {
        let err = PackageQuery {
            tipo: some("crucero"),
            precio_max: some("abc"),
            pais: some("x1"),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();

        let fields = err.field_errors().unwrap();
        assert_eq!(
            fields.fields().collect::<Vec<_>>(),
            vec!["pais", "precio_max", "tipo"]
        );
    }

    #[test]
    fn test_blank_params_are_ignored() {
        let filter = PackageQuery {
            region: some(""),
            precio_max: some("  "),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter, PackageFilter::default());
    }

    #[test]
    fn test_flight_query_id_vs_text() {
        let filter = FlightQuery {
            origen: some("12"),
            destino: some("cancún"),
            aerolinea: None,
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.origin, Some(CityMatch::Id(12)));
        assert_eq!(filter.destination, Some(CityMatch::Text("cancún".into())));
    }

    #[test]
    fn test_rental_query_bad_category() {
        let err = RentalCarQuery {
            tipo: some("camion"),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();
        assert!(err.field_errors().unwrap().contains("tipo"));
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::from_error(&TravelError::invalid_field("email", "bad"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 2000);
        assert_eq!(json["errors"]["email"][0], "bad");

        let json = serde_json::to_value(ErrorBody::from_error(&TravelError::not_found("x"))).unwrap();
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn export_typescript_types() {
        // cargo test export_typescript_types -- --nocapture
        let cfg = ts_rs::Config::from_env();
        ErrorCode::export_all(&cfg).expect("Failed to export ErrorCode");
        ErrorBody::export_all(&cfg).expect("Failed to export ErrorBody");
        ContactCustomer::export_all(&cfg).expect("Failed to export ContactCustomer");
        ContactCreated::export_all(&cfg).expect("Failed to export ContactCreated");
        HandledUpdate::export_all(&cfg).expect("Failed to export HandledUpdate");
        HealthStorageCheck::export_all(&cfg).expect("Failed to export HealthStorageCheck");
        HealthChecks::export_all(&cfg).expect("Failed to export HealthChecks");
        HealthResponse::export_all(&cfg).expect("Failed to export HealthResponse");

        println!("TypeScript types exported to {}", TS_EXPORT_PATH);
    }
}
