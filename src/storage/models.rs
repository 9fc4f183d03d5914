use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumMessage, EnumString};

/// 带展示名的枚举（下拉框、拼接文案用）
pub trait ChoiceLabel: EnumMessage {
    fn label(&self) -> &'static str {
        self.get_message().unwrap_or_default()
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            #[default]
            $first:ident => $first_label:literal,
            $($variant:ident => $label:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Default,
            Serialize,
            Deserialize,
            EnumString,
            AsRefStr,
            Display,
            EnumIter,
            EnumMessage,
        )]
        #[serde(rename_all = "snake_case")]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            #[default]
            #[strum(message = $first_label)]
            $first,
            $(
                #[strum(message = $label)]
                $variant,
            )*
        }

        impl ChoiceLabel for $name {}
    };
}

choice_enum! {
    /// 固定的 9 个地理区域
    pub enum RegionName {
        #[default]
        Caribe => "Caribe",
        Sudamerica => "Sudamérica",
        Centroamerica => "Centroamérica",
        Norteamerica => "Norteamérica",
        Europa => "Europa",
        MedioOriente => "Medio Oriente",
        Africa => "África",
        Asia => "Asia",
        Ecuador => "Ecuador",
    }
}

choice_enum! {
    pub enum PackageType {
        #[default]
        Vacaciones => "Vacaciones",
        Promocion => "Promoción",
        Oferta => "Oferta",
        TodoIncluido => "Todo Incluido",
        Aventura => "Aventura",
        LunaDeMiel => "Luna de Miel",
        Familiar => "Familiar",
        Negocios => "Negocios",
    }
}

choice_enum! {
    pub enum Season {
        #[default]
        Baja => "Temporada Baja",
        Media => "Temporada Media",
        Alta => "Temporada Alta",
    }
}

choice_enum! {
    pub enum TripType {
        #[default]
        Individual => "Individual",
        Pareja => "Pareja",
        Familia => "Familia",
        Amigos => "Amigos",
        Grupo => "Grupo",
        Corporativo => "Corporativo",
    }
}

choice_enum! {
    pub enum FlightType {
        #[default]
        Directo => "Directo",
        Escala => "Con escala",
    }
}

choice_enum! {
    pub enum CarCategory {
        #[default]
        Economico => "Económico",
        Sedan => "Sedán",
        Suv => "SUV",
        Lujo => "Lujo",
        Van => "Van",
    }
}

choice_enum! {
    pub enum Transmission {
        #[default]
        Manual => "Manual",
        Automatica => "Automática",
    }
}

impl RegionName {
    /// Seed display order (1-based)
    pub fn default_order(&self) -> i32 {
        match self {
            RegionName::Caribe => 1,
            RegionName::Sudamerica => 2,
            RegionName::Centroamerica => 3,
            RegionName::Norteamerica => 4,
            RegionName::Europa => 5,
            RegionName::MedioOriente => 6,
            RegionName::Africa => 7,
            RegionName::Asia => 8,
            RegionName::Ecuador => 9,
        }
    }
}

// ============================================================
// Geography
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    pub name: RegionName,
    pub description: Option<String>,
    pub image: Option<String>,
    pub active: bool,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub region_id: i64,
    pub name: String,
    pub code: Option<String>,
    pub flag_image: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub country_id: i64,
    pub name: String,
    pub airport_code: Option<String>,
    pub is_capital: bool,
    pub image: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub logo: Option<String>,
    pub origin_country: Option<String>,
    pub active: bool,
}

// ============================================================
// Catalog
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub description: String,
    pub image: String,
    pub price_from: Decimal,
    pub featured: bool,
    pub active: bool,
    pub pdf_url: Option<String>,
    pub reservation_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub destination_id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub address: String,
    pub stars: i16,
    pub price_per_night: Decimal,
    pub services: Vec<String>,
    pub available: bool,
    pub pdf_url: Option<String>,
    pub reservation_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: i64,
    pub airline_id: i64,
    pub origin_city_id: i64,
    pub destination_city_id: i64,
    pub flight_type: FlightType,
    pub flight_number: Option<String>,
    pub duration: String,
    pub price: Decimal,
    pub currency: String,
    pub available: bool,
    pub pdf_url: Option<String>,
    pub reservation_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalCar {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub category: CarCategory,
    pub year: i32,
    pub passengers: i16,
    pub transmission: Transmission,
    pub price_per_day: Decimal,
    pub image: String,
    pub city_id: i64,
    pub pickup_address: Option<String>,
    pub features: Vec<String>,
    pub available: bool,
    pub pdf_url: Option<String>,
    pub reservation_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 套餐详情页的九个信息栏
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSections {
    pub included: Option<String>,
    pub not_included: Option<String>,
    pub how_to_book: Option<String>,
    pub important_notes: Option<String>,
    pub flight_schedule: Option<String>,
    pub baggage_policy: Option<String>,
    pub travel_requirements: Option<String>,
    pub payment_methods: Option<String>,
    pub cancellation_policy: Option<String>,
}

/// 套餐包含项标记
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIncludes {
    pub flight: bool,
    pub hotel: bool,
    pub meals: bool,
    pub transfers: bool,
    pub tours: bool,
    pub insurance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPackage {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub short_description: String,
    pub region_id: i64,
    pub country_id: i64,
    pub city_id: Option<i64>,
    pub price: Decimal,
    pub currency: String,
    pub package_type: PackageType,
    pub nights: i32,
    pub days: i32,
    pub departure_cities: Option<String>,
    pub departure_dates: Option<String>,
    pub airline_id: Option<i64>,
    pub detail_title: Option<String>,
    pub long_description: Option<String>,
    pub season: Season,
    pub trip_type: TripType,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub map_image: Option<String>,
    pub language: Option<String>,
    pub local_currency: Option<String>,
    pub highlighted_places: Vec<String>,
    pub required_documents: Option<String>,
    pub temperature: Option<String>,
    pub sections: PackageSections,
    pub includes: PackageIncludes,
    pub pdf_url: Option<String>,
    pub reservation_message: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================
// Contact
// ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub id: i64,
    pub customer_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub handled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
    pub read: bool,
    pub replied: bool,
}

/// 客户及其请求（新到旧）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerWithRequests {
    pub customer: Customer,
    pub requests: Vec<ContactRequest>,
}

/// upsert 结果
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedContact {
    pub customer: Customer,
    pub request: ContactRequest,
    pub created: bool,
}

// ============================================================
// Lookup
// ============================================================

/// 一批记录引用到的地理节点与航空公司 id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoKeys {
    pub regions: BTreeSet<i64>,
    pub countries: BTreeSet<i64>,
    pub cities: BTreeSet<i64>,
    pub airlines: BTreeSet<i64>,
}

impl GeoKeys {
    pub fn region(mut self, id: i64) -> Self {
        self.regions.insert(id);
        self
    }

    pub fn country(mut self, id: i64) -> Self {
        self.countries.insert(id);
        self
    }

    pub fn city(mut self, id: i64) -> Self {
        self.cities.insert(id);
        self
    }

    pub fn airline(mut self, id: i64) -> Self {
        self.airlines.insert(id);
        self
    }

    pub fn flights<'a>(self, flights: impl IntoIterator<Item = &'a Flight>) -> Self {
        flights.into_iter().fold(self, |keys, f| {
            keys.airline(f.airline_id)
                .city(f.origin_city_id)
                .city(f.destination_city_id)
        })
    }

    pub fn rental_cars<'a>(self, cars: impl IntoIterator<Item = &'a RentalCar>) -> Self {
        cars.into_iter().fold(self, |keys, c| keys.city(c.city_id))
    }

    pub fn packages<'a>(self, packages: impl IntoIterator<Item = &'a TravelPackage>) -> Self {
        packages.into_iter().fold(self, |mut keys, p| {
            keys = keys.region(p.region_id).country(p.country_id);
            if let Some(city_id) = p.city_id {
                keys = keys.city(city_id);
            }
            if let Some(airline_id) = p.airline_id {
                keys = keys.airline(airline_id);
            }
            keys
        })
    }
}

/// 地理与航空公司快照，用于拼接展示字段
///
/// 只包含 [`GeoKeys`] 引用到的节点，城市会带出所属国家与区域。
#[derive(Debug, Clone, Default)]
pub struct GeoLookup {
    pub regions: HashMap<i64, Region>,
    pub countries: HashMap<i64, Country>,
    pub cities: HashMap<i64, City>,
    pub airlines: HashMap<i64, Airline>,
}

impl GeoLookup {
    pub fn region(&self, id: i64) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn country(&self, id: i64) -> Option<&Country> {
        self.countries.get(&id)
    }

    pub fn city(&self, id: i64) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn airline(&self, id: i64) -> Option<&Airline> {
        self.airlines.get(&id)
    }

    pub fn region_label(&self, id: i64) -> &'static str {
        self.region(id).map(|r| r.name.label()).unwrap_or_default()
    }

    pub fn country_name(&self, id: i64) -> &str {
        self.country(id).map(|c| c.name.as_str()).unwrap_or_default()
    }

    pub fn city_name(&self, id: i64) -> &str {
        self.city(id).map(|c| c.name.as_str()).unwrap_or_default()
    }

    pub fn airline_name(&self, id: i64) -> &str {
        self.airline(id).map(|a| a.name.as_str()).unwrap_or_default()
    }

    /// "ciudad, país, región"
    pub fn city_location(&self, city_id: i64) -> String {
        let Some(city) = self.city(city_id) else {
            return String::new();
        };
        let Some(country) = self.country(city.country_id) else {
            return city.name.clone();
        };
        format!(
            "{}, {}, {}",
            city.name,
            country.name,
            self.region_label(country.region_id)
        )
    }
}
