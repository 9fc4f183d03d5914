//! 对外响应结构
//!
//! 字段名即线上 JSON 键（西班牙语），由领域模型加 [`GeoLookup`] 拼出展示字段。

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use ts_rs::TS;

use crate::storage::models::*;

pub const TS_EXPORT_PATH: &str = "../frontend/src/types/api.generated.ts";

// ============ Geography ============

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RegionView {
    pub id: i64,
    pub nombre: String,
    pub nombre_display: String,
    pub descripcion: Option<String>,
    pub imagen: Option<String>,
    pub activo: bool,
    pub orden: i32,
}

impl From<&Region> for RegionView {
    fn from(r: &Region) -> Self {
        Self {
            id: r.id,
            nombre: r.name.as_ref().to_string(),
            nombre_display: r.name.label().to_string(),
            descripcion: r.description.clone(),
            imagen: r.image.clone(),
            activo: r.active,
            orden: r.display_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CountryView {
    pub id: i64,
    pub region: i64,
    pub region_nombre: String,
    pub nombre: String,
    pub codigo: Option<String>,
    pub bandera: Option<String>,
    pub activo: bool,
}

impl CountryView {
    pub fn build(country: &Country, geo: &GeoLookup) -> Self {
        Self {
            id: country.id,
            region: country.region_id,
            region_nombre: geo.region_label(country.region_id).to_string(),
            nombre: country.name.clone(),
            codigo: country.code.clone(),
            bandera: country.flag_image.clone(),
            activo: country.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CityView {
    pub id: i64,
    pub pais: i64,
    pub pais_nombre: String,
    pub region_nombre: String,
    pub nombre: String,
    pub codigo_aeropuerto: Option<String>,
    pub es_capital: bool,
    pub imagen: Option<String>,
    pub activo: bool,
    pub ubicacion_completa: String,
}

impl CityView {
    pub fn build(city: &City, geo: &GeoLookup) -> Self {
        let region_nombre = geo
            .country(city.country_id)
            .map(|c| geo.region_label(c.region_id))
            .unwrap_or_default();
        Self {
            id: city.id,
            pais: city.country_id,
            pais_nombre: geo.country_name(city.country_id).to_string(),
            region_nombre: region_nombre.to_string(),
            nombre: city.name.clone(),
            codigo_aeropuerto: city.airport_code.clone(),
            es_capital: city.is_capital,
            imagen: city.image.clone(),
            activo: city.active,
            ubicacion_completa: geo.city_location(city.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct AirlineView {
    pub id: i64,
    pub nombre: String,
    pub codigo: Option<String>,
    pub logo: Option<String>,
    pub pais_origen: Option<String>,
    pub activo: bool,
}

impl From<&Airline> for AirlineView {
    fn from(a: &Airline) -> Self {
        Self {
            id: a.id,
            nombre: a.name.clone(),
            codigo: a.code.clone(),
            logo: a.logo.clone(),
            pais_origen: a.origin_country.clone(),
            activo: a.active,
        }
    }
}

/// 管理后台级联下拉框的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DropdownOption {
    pub id: i64,
    pub nombre: String,
}

// ============ Catalog ============

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DestinationView {
    pub id: i64,
    pub nombre: String,
    pub pais: String,
    pub descripcion: String,
    pub imagen: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub precio_desde: Decimal,
    pub destacado: bool,
    pub activo: bool,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl From<&Destination> for DestinationView {
    fn from(d: &Destination) -> Self {
        Self {
            id: d.id,
            nombre: d.name.clone(),
            pais: d.country.clone(),
            descripcion: d.description.clone(),
            imagen: d.image.clone(),
            precio_desde: d.price_from,
            destacado: d.featured,
            activo: d.active,
            pdf_url: d.pdf_url.clone(),
            mensaje_reserva: d.reservation_message.clone(),
            fecha_creacion: d.created_at,
            fecha_actualizacion: d.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HotelView {
    pub id: i64,
    pub destino: i64,
    pub destino_nombre: String,
    pub nombre: String,
    pub descripcion: String,
    pub imagen: String,
    pub direccion: String,
    pub estrellas: i16,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub precio_noche: Decimal,
    pub servicios: Vec<String>,
    pub servicios_lista: Vec<String>,
    pub disponible: bool,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl HotelView {
    pub fn build(hotel: &Hotel, destination_name: &str) -> Self {
        Self {
            id: hotel.id,
            destino: hotel.destination_id,
            destino_nombre: destination_name.to_string(),
            nombre: hotel.name.clone(),
            descripcion: hotel.description.clone(),
            imagen: hotel.image.clone(),
            direccion: hotel.address.clone(),
            estrellas: hotel.stars,
            precio_noche: hotel.price_per_night,
            servicios: hotel.services.clone(),
            servicios_lista: hotel.services.clone(),
            disponible: hotel.available,
            pdf_url: hotel.pdf_url.clone(),
            mensaje_reserva: hotel.reservation_message.clone(),
            fecha_creacion: hotel.created_at,
            fecha_actualizacion: hotel.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct FlightView {
    pub id: i64,
    pub aerolinea: i64,
    pub aerolinea_nombre: String,
    pub origen: i64,
    pub origen_nombre: String,
    pub destino: i64,
    pub destino_nombre: String,
    pub tipo_vuelo: String,
    pub tipo_vuelo_display: String,
    pub numero_vuelo: Option<String>,
    pub duracion: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub precio: Decimal,
    pub moneda: String,
    pub disponible: bool,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl FlightView {
    pub fn build(flight: &Flight, geo: &GeoLookup) -> Self {
        Self {
            id: flight.id,
            aerolinea: flight.airline_id,
            aerolinea_nombre: geo.airline_name(flight.airline_id).to_string(),
            origen: flight.origin_city_id,
            origen_nombre: geo.city_name(flight.origin_city_id).to_string(),
            destino: flight.destination_city_id,
            destino_nombre: geo.city_name(flight.destination_city_id).to_string(),
            tipo_vuelo: flight.flight_type.as_ref().to_string(),
            tipo_vuelo_display: flight.flight_type.label().to_string(),
            numero_vuelo: flight.flight_number.clone(),
            duracion: flight.duration.clone(),
            precio: flight.price,
            moneda: flight.currency.clone(),
            disponible: flight.available,
            pdf_url: flight.pdf_url.clone(),
            mensaje_reserva: flight.reservation_message.clone(),
            fecha_creacion: flight.created_at,
            fecha_actualizacion: flight.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RentalCarView {
    pub id: i64,
    pub marca: String,
    pub modelo: String,
    pub categoria: String,
    pub categoria_display: String,
    pub anio: i32,
    pub pasajeros: i16,
    pub transmision: String,
    pub transmision_display: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub precio_dia: Decimal,
    pub imagen: String,
    pub ciudad: i64,
    pub ciudad_nombre: String,
    pub ubicacion_completa: String,
    pub direccion_recogida: Option<String>,
    pub caracteristicas: Vec<String>,
    pub caracteristicas_lista: Vec<String>,
    pub disponible: bool,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl RentalCarView {
    pub fn build(car: &RentalCar, geo: &GeoLookup) -> Self {
        Self {
            id: car.id,
            marca: car.brand.clone(),
            modelo: car.model.clone(),
            categoria: car.category.as_ref().to_string(),
            categoria_display: car.category.label().to_string(),
            anio: car.year,
            pasajeros: car.passengers,
            transmision: car.transmission.as_ref().to_string(),
            transmision_display: car.transmission.label().to_string(),
            precio_dia: car.price_per_day,
            imagen: car.image.clone(),
            ciudad: car.city_id,
            ciudad_nombre: geo.city_name(car.city_id).to_string(),
            ubicacion_completa: geo.city_location(car.city_id),
            direccion_recogida: car.pickup_address.clone(),
            caracteristicas: car.features.clone(),
            caracteristicas_lista: car.features.clone(),
            disponible: car.available,
            pdf_url: car.pdf_url.clone(),
            mensaje_reserva: car.reservation_message.clone(),
            fecha_creacion: car.created_at,
            fecha_actualizacion: car.updated_at,
        }
    }
}

// ============ Packages ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct IncludesView {
    pub vuelo: bool,
    pub hotel: bool,
    pub comidas: bool,
    pub traslados: bool,
    pub tours: bool,
    pub seguro: bool,
}

impl From<PackageIncludes> for IncludesView {
    fn from(i: PackageIncludes) -> Self {
        Self {
            vuelo: i.flight,
            hotel: i.hotel,
            comidas: i.meals,
            traslados: i.transfers,
            tours: i.tours,
            seguro: i.insurance,
        }
    }
}

/// "Paquete a {país}, tour de {noches} noches mínimo"
pub fn package_text(country_name: &str, nights: i32) -> String {
    format!(
        "Paquete a {}, tour de {} noches mínimo",
        country_name, nights
    )
}

/// "ciudad, país, región"; sin ciudad queda "país, región"
pub fn package_destination(package: &TravelPackage, geo: &GeoLookup) -> String {
    let country = geo.country_name(package.country_id);
    let region = geo.region_label(package.region_id);
    match package.city_id.and_then(|id| geo.city(id)) {
        Some(city) => format!("{}, {}, {}", city.name, country, region),
        None => format!("{}, {}", country, region),
    }
}

/// 列表卡片
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PackageSummary {
    pub id: i64,
    pub titulo: String,
    pub subtitulo: Option<String>,
    pub imagen: String,
    pub descripcion_corta: String,
    pub region: i64,
    pub region_nombre: String,
    pub pais: i64,
    pub pais_nombre: String,
    pub ciudad: Option<i64>,
    pub ciudad_nombre: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub precio: Decimal,
    pub moneda: String,
    pub tipo_paquete: String,
    pub tipo_paquete_display: String,
    pub noches: i32,
    pub dias: i32,
    pub ciudades_salida: Option<String>,
    pub fechas_salida: Option<String>,
    pub aerolinea: Option<i64>,
    pub aerolinea_nombre: Option<String>,
    pub temporada: String,
    pub temporada_display: String,
    pub tipo_viaje: String,
    pub tipo_viaje_display: String,
    pub destacado: bool,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
    pub texto_paquete: String,
    pub destino_completo: String,
    pub incluye: IncludesView,
    pub lugares_destacados_lista: Vec<String>,
}

impl PackageSummary {
    pub fn build(p: &TravelPackage, geo: &GeoLookup) -> Self {
        let pais_nombre = geo.country_name(p.country_id).to_string();
        Self {
            id: p.id,
            titulo: p.title.clone(),
            subtitulo: p.subtitle.clone(),
            imagen: p.image.clone(),
            descripcion_corta: p.short_description.clone(),
            region: p.region_id,
            region_nombre: geo.region_label(p.region_id).to_string(),
            pais: p.country_id,
            ciudad: p.city_id,
            ciudad_nombre: p
                .city_id
                .and_then(|id| geo.city(id))
                .map(|c| c.name.clone()),
            precio: p.price,
            moneda: p.currency.clone(),
            tipo_paquete: p.package_type.as_ref().to_string(),
            tipo_paquete_display: p.package_type.label().to_string(),
            noches: p.nights,
            dias: p.days,
            ciudades_salida: p.departure_cities.clone(),
            fechas_salida: p.departure_dates.clone(),
            aerolinea: p.airline_id,
            aerolinea_nombre: p
                .airline_id
                .and_then(|id| geo.airline(id))
                .map(|a| a.name.clone()),
            temporada: p.season.as_ref().to_string(),
            temporada_display: p.season.label().to_string(),
            tipo_viaje: p.trip_type.as_ref().to_string(),
            tipo_viaje_display: p.trip_type.label().to_string(),
            destacado: p.featured,
            pdf_url: p.pdf_url.clone(),
            mensaje_reserva: p.reservation_message.clone(),
            texto_paquete: package_text(&pais_nombre, p.nights),
            destino_completo: package_destination(p, geo),
            incluye: p.includes.into(),
            lugares_destacados_lista: p.highlighted_places.clone(),
            pais_nombre,
        }
    }
}

/// 详情页：列表卡片的全部字段再加详情字段
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PackageDetail {
    #[serde(flatten)]
    pub resumen: PackageSummary,
    pub titulo_detalle: Option<String>,
    pub descripcion_larga: Option<String>,
    pub vigencia_desde: Option<NaiveDate>,
    pub vigencia_hasta: Option<NaiveDate>,
    pub mapa_imagen: Option<String>,
    pub idioma: Option<String>,
    pub moneda_local: Option<String>,
    pub lugares_destacados: Vec<String>,
    pub documentos_requeridos: Option<String>,
    pub temperatura: Option<String>,
    pub que_incluye: Option<String>,
    pub que_no_incluye: Option<String>,
    pub como_reservar: Option<String>,
    pub notas_importantes: Option<String>,
    pub horarios_vuelo: Option<String>,
    pub politica_equipaje: Option<String>,
    pub requisitos_viaje: Option<String>,
    pub formas_pago: Option<String>,
    pub politica_cancelacion: Option<String>,
    pub incluye_vuelo: bool,
    pub incluye_hotel: bool,
    pub incluye_comidas: bool,
    pub incluye_traslados: bool,
    pub incluye_tours: bool,
    pub incluye_seguro: bool,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl PackageDetail {
    pub fn build(p: &TravelPackage, geo: &GeoLookup) -> Self {
        let s = &p.sections;
        Self {
            resumen: PackageSummary::build(p, geo),
            titulo_detalle: p.detail_title.clone(),
            descripcion_larga: p.long_description.clone(),
            vigencia_desde: p.valid_from,
            vigencia_hasta: p.valid_until,
            mapa_imagen: p.map_image.clone(),
            idioma: p.language.clone(),
            moneda_local: p.local_currency.clone(),
            lugares_destacados: p.highlighted_places.clone(),
            documentos_requeridos: p.required_documents.clone(),
            temperatura: p.temperature.clone(),
            que_incluye: s.included.clone(),
            que_no_incluye: s.not_included.clone(),
            como_reservar: s.how_to_book.clone(),
            notas_importantes: s.important_notes.clone(),
            horarios_vuelo: s.flight_schedule.clone(),
            politica_equipaje: s.baggage_policy.clone(),
            requisitos_viaje: s.travel_requirements.clone(),
            formas_pago: s.payment_methods.clone(),
            politica_cancelacion: s.cancellation_policy.clone(),
            incluye_vuelo: p.includes.flight,
            incluye_hotel: p.includes.hotel,
            incluye_comidas: p.includes.meals,
            incluye_traslados: p.includes.transfers,
            incluye_tours: p.includes.tours,
            incluye_seguro: p.includes.insurance,
            activo: p.active,
            fecha_creacion: p.created_at,
            fecha_actualizacion: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RegionPackages {
    pub region: RegionView,
    pub paquetes: Vec<PackageSummary>,
}

// ============ Contact ============

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RequestView {
    pub id: i64,
    pub cliente: i64,
    pub mensaje: String,
    pub fecha_creacion: DateTime<Utc>,
    pub atendido: bool,
}

impl From<&ContactRequest> for RequestView {
    fn from(r: &ContactRequest) -> Self {
        Self {
            id: r.id,
            cliente: r.customer_id,
            mensaje: r.message.clone(),
            fecha_creacion: r.created_at,
            atendido: r.handled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CustomerView {
    pub id: i64,
    pub nombre_completo: String,
    pub email: String,
    pub telefono: String,
    pub fecha_registro: DateTime<Utc>,
    pub solicitudes: Vec<RequestView>,
}

impl From<&CustomerWithRequests> for CustomerView {
    fn from(c: &CustomerWithRequests) -> Self {
        Self {
            id: c.customer.id,
            nombre_completo: c.customer.full_name.clone(),
            email: c.customer.email.clone(),
            telefono: c.customer.phone.clone(),
            fecha_registro: c.customer.registered_at,
            solicitudes: c.requests.iter().map(RequestView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ContactMessageView {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
    pub asunto: String,
    pub mensaje: String,
    pub fecha_envio: DateTime<Utc>,
    pub leido: bool,
    pub respondido: bool,
}

impl From<&ContactMessage> for ContactMessageView {
    fn from(m: &ContactMessage) -> Self {
        Self {
            id: m.id,
            nombre: m.name.clone(),
            email: m.email.clone(),
            telefono: m.phone.clone(),
            asunto: m.subject.clone(),
            mensaje: m.message.clone(),
            fecha_envio: m.sent_at,
            leido: m.read,
            respondido: m.replied,
        }
    }
}
