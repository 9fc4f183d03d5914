//! 管理端写入载荷
//!
//! JSON 键与响应结构一致。每个载荷先做字段级校验（长度、区间、枚举值、
//! PDF 链接），引用关系由 [`super::CatalogService`] 再查库确认。
//! 列表字段同时接受 JSON 数组和旧的逗号拼接字符串。

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::FieldErrors;
use crate::storage::models::*;
use crate::utils::validation::{
    REQUIRED, check_range, invalid_choice_message, optional_text, required_text,
};
use crate::utils::{ListInput, clean_pdf_link};

const NAME_MAX: usize = 100;
const TITLE_MAX: usize = 200;
const IMAGE_MAX: usize = 255;
const ADDRESS_MAX: usize = 300;
const TEXT_MAX: usize = 10_000;

fn required_id(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> i64 {
    match value {
        Some(id) => id,
        None => {
            errors.add(field, REQUIRED);
            0
        }
    }
}

fn required_number<T>(errors: &mut FieldErrors, field: &str, value: Option<T>, min: T, max: Option<T>) -> T
where
    T: PartialOrd + Display + Copy + Default,
{
    match value {
        Some(v) => {
            check_range(errors, field, v, min, max);
            v
        }
        None => {
            errors.add(field, REQUIRED);
            T::default()
        }
    }
}

/// 枚举字段；缺失时使用 `fallback`，没有 fallback 则为必填
fn choice<E>(errors: &mut FieldErrors, field: &str, value: Option<&str>, fallback: Option<E>) -> E
where
    E: FromStr + Default,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            errors.add(field, invalid_choice_message(raw));
            E::default()
        }),
        None => fallback.unwrap_or_else(|| {
            errors.add(field, REQUIRED);
            E::default()
        }),
    }
}

fn pdf_url(errors: &mut FieldErrors, value: Option<&str>) -> Option<String> {
    clean_pdf_link(value).unwrap_or_else(|e| {
        errors.add("pdf_url", e.to_string());
        None
    })
}

fn text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max: usize) -> String {
    required_text(errors, field, value, max).unwrap_or_default()
}

fn list(value: Option<ListInput>) -> Vec<String> {
    value.map(ListInput::into_items).unwrap_or_default()
}

fn default_currency(errors: &mut FieldErrors, value: Option<&str>) -> String {
    optional_text(errors, "moneda", value, 3)
        .map(|c| c.to_uppercase())
        .unwrap_or_else(|| "USD".to_string())
}

// ============ Geography / airlines ============

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAirline {
    pub nombre: Option<String>,
    pub codigo: Option<String>,
    pub logo: Option<String>,
    pub pais_origen: Option<String>,
    pub activo: Option<bool>,
}

impl NewAirline {
    pub fn into_record(self, errors: &mut FieldErrors) -> Airline {
        Airline {
            id: 0,
            name: text(errors, "nombre", self.nombre.as_deref(), NAME_MAX),
            code: optional_text(errors, "codigo", self.codigo.as_deref(), 3).map(|c| c.to_uppercase()),
            logo: optional_text(errors, "logo", self.logo.as_deref(), IMAGE_MAX),
            origin_country: optional_text(errors, "pais_origen", self.pais_origen.as_deref(), NAME_MAX),
            active: self.activo.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCity {
    pub pais: Option<i64>,
    pub nombre: Option<String>,
    pub codigo_aeropuerto: Option<String>,
    pub es_capital: Option<bool>,
    pub imagen: Option<String>,
    pub activo: Option<bool>,
}

impl NewCity {
    pub fn into_record(self, errors: &mut FieldErrors) -> City {
        City {
            id: 0,
            country_id: required_id(errors, "pais", self.pais),
            name: text(errors, "nombre", self.nombre.as_deref(), NAME_MAX),
            airport_code: optional_text(errors, "codigo_aeropuerto", self.codigo_aeropuerto.as_deref(), 10)
                .map(|c| c.to_uppercase()),
            is_capital: self.es_capital.unwrap_or(false),
            image: optional_text(errors, "imagen", self.imagen.as_deref(), IMAGE_MAX),
            active: self.activo.unwrap_or(true),
        }
    }
}

// ============ Catalog ============

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDestination {
    pub nombre: Option<String>,
    pub pais: Option<String>,
    pub descripcion: Option<String>,
    pub imagen: Option<String>,
    pub precio_desde: Option<Decimal>,
    pub destacado: Option<bool>,
    pub activo: Option<bool>,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
}

impl NewDestination {
    pub fn into_record(self, errors: &mut FieldErrors, now: DateTime<Utc>) -> Destination {
        Destination {
            id: 0,
            name: text(errors, "nombre", self.nombre.as_deref(), TITLE_MAX),
            country: text(errors, "pais", self.pais.as_deref(), NAME_MAX),
            description: text(errors, "descripcion", self.descripcion.as_deref(), TEXT_MAX),
            image: text(errors, "imagen", self.imagen.as_deref(), IMAGE_MAX),
            price_from: required_number(errors, "precio_desde", self.precio_desde, Decimal::ZERO, None),
            featured: self.destacado.unwrap_or(false),
            active: self.activo.unwrap_or(true),
            pdf_url: pdf_url(errors, self.pdf_url.as_deref()),
            reservation_message: optional_text(errors, "mensaje_reserva", self.mensaje_reserva.as_deref(), TEXT_MAX),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewHotel {
    pub destino: Option<i64>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub imagen: Option<String>,
    pub direccion: Option<String>,
    pub estrellas: Option<i16>,
    pub precio_noche: Option<Decimal>,
    pub servicios: Option<ListInput>,
    pub disponible: Option<bool>,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
}

impl NewHotel {
    pub fn into_record(self, errors: &mut FieldErrors, now: DateTime<Utc>) -> Hotel {
        Hotel {
            id: 0,
            destination_id: required_id(errors, "destino", self.destino),
            name: text(errors, "nombre", self.nombre.as_deref(), TITLE_MAX),
            description: text(errors, "descripcion", self.descripcion.as_deref(), TEXT_MAX),
            image: text(errors, "imagen", self.imagen.as_deref(), IMAGE_MAX),
            address: text(errors, "direccion", self.direccion.as_deref(), ADDRESS_MAX),
            stars: required_number(errors, "estrellas", self.estrellas, 1, Some(5)),
            price_per_night: required_number(errors, "precio_noche", self.precio_noche, Decimal::ZERO, None),
            services: list(self.servicios),
            available: self.disponible.unwrap_or(true),
            pdf_url: pdf_url(errors, self.pdf_url.as_deref()),
            reservation_message: optional_text(errors, "mensaje_reserva", self.mensaje_reserva.as_deref(), TEXT_MAX),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFlight {
    pub aerolinea: Option<i64>,
    pub origen: Option<i64>,
    pub destino: Option<i64>,
    pub tipo_vuelo: Option<String>,
    pub numero_vuelo: Option<String>,
    pub duracion: Option<String>,
    pub precio: Option<Decimal>,
    pub moneda: Option<String>,
    pub disponible: Option<bool>,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
}

impl NewFlight {
    pub fn into_record(self, errors: &mut FieldErrors, now: DateTime<Utc>) -> Flight {
        Flight {
            id: 0,
            airline_id: required_id(errors, "aerolinea", self.aerolinea),
            origin_city_id: required_id(errors, "origen", self.origen),
            destination_city_id: required_id(errors, "destino", self.destino),
            flight_type: choice(errors, "tipo_vuelo", self.tipo_vuelo.as_deref(), Some(FlightType::Directo)),
            flight_number: optional_text(errors, "numero_vuelo", self.numero_vuelo.as_deref(), 20),
            duration: text(errors, "duracion", self.duracion.as_deref(), 50),
            price: required_number(errors, "precio", self.precio, Decimal::ZERO, None),
            currency: default_currency(errors, self.moneda.as_deref()),
            available: self.disponible.unwrap_or(true),
            pdf_url: pdf_url(errors, self.pdf_url.as_deref()),
            reservation_message: optional_text(errors, "mensaje_reserva", self.mensaje_reserva.as_deref(), TEXT_MAX),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRentalCar {
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub categoria: Option<String>,
    pub anio: Option<i32>,
    pub pasajeros: Option<i16>,
    pub transmision: Option<String>,
    pub precio_dia: Option<Decimal>,
    pub imagen: Option<String>,
    pub ciudad: Option<i64>,
    pub direccion_recogida: Option<String>,
    pub caracteristicas: Option<ListInput>,
    pub disponible: Option<bool>,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
}

impl NewRentalCar {
    pub fn into_record(self, errors: &mut FieldErrors, now: DateTime<Utc>) -> RentalCar {
        RentalCar {
            id: 0,
            brand: text(errors, "marca", self.marca.as_deref(), NAME_MAX),
            model: text(errors, "modelo", self.modelo.as_deref(), NAME_MAX),
            category: choice(errors, "categoria", self.categoria.as_deref(), None),
            year: required_number(errors, "anio", self.anio, 1950, Some(2100)),
            passengers: required_number(errors, "pasajeros", self.pasajeros, 1, Some(50)),
            transmission: choice(errors, "transmision", self.transmision.as_deref(), None),
            price_per_day: required_number(errors, "precio_dia", self.precio_dia, Decimal::ZERO, None),
            image: text(errors, "imagen", self.imagen.as_deref(), IMAGE_MAX),
            city_id: required_id(errors, "ciudad", self.ciudad),
            pickup_address: optional_text(errors, "direccion_recogida", self.direccion_recogida.as_deref(), ADDRESS_MAX),
            features: list(self.caracteristicas),
            available: self.disponible.unwrap_or(true),
            pdf_url: pdf_url(errors, self.pdf_url.as_deref()),
            reservation_message: optional_text(errors, "mensaje_reserva", self.mensaje_reserva.as_deref(), TEXT_MAX),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPackage {
    pub titulo: Option<String>,
    pub subtitulo: Option<String>,
    pub imagen: Option<String>,
    pub descripcion_corta: Option<String>,
    pub region: Option<i64>,
    pub pais: Option<i64>,
    pub ciudad: Option<i64>,
    pub precio: Option<Decimal>,
    pub moneda: Option<String>,
    pub tipo_paquete: Option<String>,
    pub noches: Option<i32>,
    pub dias: Option<i32>,
    pub ciudades_salida: Option<String>,
    pub fechas_salida: Option<String>,
    pub aerolinea: Option<i64>,
    pub titulo_detalle: Option<String>,
    pub descripcion_larga: Option<String>,
    pub temporada: Option<String>,
    pub tipo_viaje: Option<String>,
    pub vigencia_desde: Option<NaiveDate>,
    pub vigencia_hasta: Option<NaiveDate>,
    pub mapa_imagen: Option<String>,
    pub idioma: Option<String>,
    pub moneda_local: Option<String>,
    pub lugares_destacados: Option<ListInput>,
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
    #[serde(default)]
    pub incluye_vuelo: bool,
    #[serde(default)]
    pub incluye_hotel: bool,
    #[serde(default)]
    pub incluye_comidas: bool,
    #[serde(default)]
    pub incluye_traslados: bool,
    #[serde(default)]
    pub incluye_tours: bool,
    #[serde(default)]
    pub incluye_seguro: bool,
    pub pdf_url: Option<String>,
    pub mensaje_reserva: Option<String>,
    pub destacado: Option<bool>,
    pub activo: Option<bool>,
}

impl NewPackage {
    pub fn into_record(self, errors: &mut FieldErrors, now: DateTime<Utc>) -> TravelPackage {
        let section = |errors: &mut FieldErrors, field: &str, value: &Option<String>| {
            optional_text(errors, field, value.as_deref(), TEXT_MAX)
        };

        if let (Some(from), Some(until)) = (self.vigencia_desde, self.vigencia_hasta)
            && from > until
        {
            errors.add(
                "vigencia_hasta",
                "La fecha final debe ser posterior a la fecha inicial.",
            );
        }

        let sections = PackageSections {
            included: section(errors, "que_incluye", &self.que_incluye),
            not_included: section(errors, "que_no_incluye", &self.que_no_incluye),
            how_to_book: section(errors, "como_reservar", &self.como_reservar),
            important_notes: section(errors, "notas_importantes", &self.notas_importantes),
            flight_schedule: section(errors, "horarios_vuelo", &self.horarios_vuelo),
            baggage_policy: section(errors, "politica_equipaje", &self.politica_equipaje),
            travel_requirements: section(errors, "requisitos_viaje", &self.requisitos_viaje),
            payment_methods: section(errors, "formas_pago", &self.formas_pago),
            cancellation_policy: section(errors, "politica_cancelacion", &self.politica_cancelacion),
        };

        TravelPackage {
            id: 0,
            title: text(errors, "titulo", self.titulo.as_deref(), TITLE_MAX),
            subtitle: optional_text(errors, "subtitulo", self.subtitulo.as_deref(), TITLE_MAX),
            image: text(errors, "imagen", self.imagen.as_deref(), IMAGE_MAX),
            short_description: text(errors, "descripcion_corta", self.descripcion_corta.as_deref(), TEXT_MAX),
            region_id: required_id(errors, "region", self.region),
            country_id: required_id(errors, "pais", self.pais),
            city_id: self.ciudad,
            price: required_number(errors, "precio", self.precio, Decimal::ZERO, None),
            currency: default_currency(errors, self.moneda.as_deref()),
            package_type: choice(errors, "tipo_paquete", self.tipo_paquete.as_deref(), Some(PackageType::Vacaciones)),
            nights: required_number(errors, "noches", self.noches, 1, None),
            days: required_number(errors, "dias", self.dias, 1, None),
            departure_cities: optional_text(errors, "ciudades_salida", self.ciudades_salida.as_deref(), ADDRESS_MAX),
            departure_dates: optional_text(errors, "fechas_salida", self.fechas_salida.as_deref(), ADDRESS_MAX),
            airline_id: self.aerolinea,
            detail_title: optional_text(errors, "titulo_detalle", self.titulo_detalle.as_deref(), ADDRESS_MAX),
            long_description: section(errors, "descripcion_larga", &self.descripcion_larga),
            season: choice(errors, "temporada", self.temporada.as_deref(), Some(Season::Media)),
            trip_type: choice(errors, "tipo_viaje", self.tipo_viaje.as_deref(), Some(TripType::Individual)),
            valid_from: self.vigencia_desde,
            valid_until: self.vigencia_hasta,
            map_image: optional_text(errors, "mapa_imagen", self.mapa_imagen.as_deref(), IMAGE_MAX),
            language: optional_text(errors, "idioma", self.idioma.as_deref(), NAME_MAX),
            local_currency: optional_text(errors, "moneda_local", self.moneda_local.as_deref(), NAME_MAX),
            highlighted_places: list(self.lugares_destacados),
            required_documents: section(errors, "documentos_requeridos", &self.documentos_requeridos),
            temperature: optional_text(errors, "temperatura", self.temperatura.as_deref(), NAME_MAX),
            sections,
            includes: PackageIncludes {
                flight: self.incluye_vuelo,
                hotel: self.incluye_hotel,
                meals: self.incluye_comidas,
                transfers: self.incluye_traslados,
                tours: self.incluye_tours,
                insurance: self.incluye_seguro,
            },
            pdf_url: pdf_url(errors, self.pdf_url.as_deref()),
            reservation_message: section(errors, "mensaje_reserva", &self.mensaje_reserva),
            featured: self.destacado.unwrap_or(false),
            active: self.activo.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

/// `import` 命令读取的目录文件；按引用顺序写入
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogImport {
    pub aerolineas: Vec<NewAirline>,
    pub ciudades: Vec<NewCity>,
    pub destinos: Vec<NewDestination>,
    pub hoteles: Vec<NewHotel>,
    pub vuelos: Vec<NewFlight>,
    pub autos: Vec<NewRentalCar>,
    pub paquetes: Vec<NewPackage>,
}
