//! Inventory catalog service
//!
//! Public reads return views with the display fields resolved; admin writes
//! validate payloads, check references against the live geography and
//! persist through the storage layer.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::catalog_input::*;
use super::geography_service::{airline_not_found, country_not_found, region_not_found};
use super::views::*;
use crate::errors::{FieldErrors, Result, TravelError};
use crate::storage::models::{GeoKeys, GeoLookup, Hotel};
use crate::storage::{
    DestinationFilter, FlightFilter, HotelFilter, PackageFilter, RentalCarFilter, SeaOrmStorage,
};

/// 每个区域最多展示的套餐数
pub const PACKAGES_PER_REGION: u64 = 6;

/// 导入统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

pub struct CatalogService {
    storage: Arc<SeaOrmStorage>,
}

impl CatalogService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    // ============ Destinations ============

    pub async fn list_destinations(&self, filter: &DestinationFilter) -> Result<Vec<DestinationView>> {
        let destinations = self.storage.list_destinations(filter).await?;
        Ok(destinations.iter().map(DestinationView::from).collect())
    }

    pub async fn get_destination(&self, id: i64) -> Result<DestinationView> {
        self.storage
            .get_destination(id)
            .await?
            .map(|d| DestinationView::from(&d))
            .ok_or_else(|| TravelError::not_found(format!("Destino {} no encontrado", id)))
    }

    // ============ Hotels ============

    async fn destination_names<'a>(
        &self,
        hotels: impl IntoIterator<Item = &'a Hotel>,
    ) -> Result<HashMap<i64, String>> {
        let ids: BTreeSet<i64> = hotels.into_iter().map(|h| h.destination_id).collect();
        self.storage.destination_names(&ids).await
    }

    pub async fn list_hotels(&self, filter: &HotelFilter) -> Result<Vec<HotelView>> {
        let hotels = self.storage.list_hotels(filter).await?;
        let names = self.destination_names(&hotels).await?;
        Ok(hotels
            .iter()
            .map(|h| {
                let name = names.get(&h.destination_id).map(String::as_str).unwrap_or_default();
                HotelView::build(h, name)
            })
            .collect())
    }

    pub async fn get_hotel(&self, id: i64) -> Result<HotelView> {
        let hotel = self
            .storage
            .get_hotel(id)
            .await?
            .ok_or_else(|| TravelError::not_found(format!("Hotel {} no encontrado", id)))?;
        let names = self.destination_names([&hotel]).await?;
        let name = names.get(&hotel.destination_id).map(String::as_str).unwrap_or_default();
        Ok(HotelView::build(&hotel, name))
    }

    // ============ Flights ============

    /// 按航空公司、出发城市、到达城市名称排序
    pub async fn list_flights(&self, filter: &FlightFilter) -> Result<Vec<FlightView>> {
        let flights = self.storage.list_flights(filter).await?;
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().flights(&flights))
            .await?;
        let mut views: Vec<FlightView> = flights.iter().map(|f| FlightView::build(f, &geo)).collect();
        views.sort_by(|a, b| {
            (&a.aerolinea_nombre, &a.origen_nombre, &a.destino_nombre, a.id).cmp(&(
                &b.aerolinea_nombre,
                &b.origen_nombre,
                &b.destino_nombre,
                b.id,
            ))
        });
        Ok(views)
    }

    pub async fn get_flight(&self, id: i64) -> Result<FlightView> {
        let flight = self
            .storage
            .get_flight(id)
            .await?
            .ok_or_else(|| TravelError::not_found(format!("Vuelo {} no encontrado", id)))?;
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().flights([&flight]))
            .await?;
        Ok(FlightView::build(&flight, &geo))
    }

    /// 停用或不存在的航空公司返回 NotFound
    pub async fn flights_of_airline(&self, airline_id: i64) -> Result<Vec<FlightView>> {
        self.storage
            .get_airline(airline_id)
            .await?
            .ok_or_else(|| airline_not_found(airline_id))?;
        self.list_flights(&FlightFilter {
            airline_id: Some(airline_id),
            ..Default::default()
        })
        .await
    }

    // ============ Rental cars ============

    pub async fn list_rental_cars(&self, filter: &RentalCarFilter) -> Result<Vec<RentalCarView>> {
        let cars = self.storage.list_rental_cars(filter).await?;
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().rental_cars(&cars))
            .await?;
        Ok(cars.iter().map(|c| RentalCarView::build(c, &geo)).collect())
    }

    pub async fn get_rental_car(&self, id: i64) -> Result<RentalCarView> {
        let car = self
            .storage
            .get_rental_car(id)
            .await?
            .ok_or_else(|| TravelError::not_found(format!("Auto {} no encontrado", id)))?;
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().rental_cars([&car]))
            .await?;
        Ok(RentalCarView::build(&car, &geo))
    }

    // ============ Packages ============

    pub async fn list_packages(&self, filter: &PackageFilter) -> Result<Vec<PackageSummary>> {
        let packages = self.storage.list_packages(filter).await?;
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().packages(&packages))
            .await?;
        Ok(packages
            .iter()
            .map(|p| PackageSummary::build(p, &geo))
            .collect())
    }

    pub async fn get_package(&self, id: i64) -> Result<PackageDetail> {
        let package = self
            .storage
            .get_package(id)
            .await?
            .ok_or_else(|| TravelError::not_found(format!("Paquete {} no encontrado", id)))?;
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().packages([&package]))
            .await?;
        Ok(PackageDetail::build(&package, &geo))
    }

    pub async fn featured_packages(&self) -> Result<Vec<PackageSummary>> {
        self.list_packages(&PackageFilter::featured()).await
    }

    /// 每个启用区域最多 [`PACKAGES_PER_REGION`] 个套餐，没有套餐的区域不出现
    pub async fn packages_by_region(&self) -> Result<Vec<RegionPackages>> {
        let regions = self.storage.list_regions().await?;

        let mut grouped = Vec::new();
        for region in regions {
            let filter = PackageFilter {
                limit: Some(PACKAGES_PER_REGION),
                ..PackageFilter::for_region(region.id)
            };
            let packages = self.storage.list_packages(&filter).await?;
            if !packages.is_empty() {
                grouped.push((region, packages));
            }
        }

        let keys = GeoKeys::default().packages(grouped.iter().flat_map(|(_, p)| p));
        let geo = self.storage.load_geo_lookup(&keys).await?;
        Ok(grouped
            .iter()
            .map(|(region, packages)| RegionPackages {
                region: RegionView::from(region),
                paquetes: packages
                    .iter()
                    .map(|p| PackageSummary::build(p, &geo))
                    .collect(),
            })
            .collect())
    }

    pub async fn packages_of_region(&self, region_id: i64) -> Result<Vec<PackageSummary>> {
        self.storage
            .get_region(region_id)
            .await?
            .ok_or_else(|| region_not_found(region_id))?;
        self.list_packages(&PackageFilter::for_region(region_id)).await
    }

    pub async fn packages_of_country(&self, country_id: i64) -> Result<Vec<PackageSummary>> {
        self.storage
            .get_country(country_id)
            .await?
            .ok_or_else(|| country_not_found(country_id))?;
        self.list_packages(&PackageFilter::for_country(country_id)).await
    }

    // ============ Admin writes ============

    pub async fn create_airline(&self, input: NewAirline) -> Result<AirlineView> {
        let mut errors = FieldErrors::new();
        let record = input.into_record(&mut errors);
        errors.into_result()?;

        let airline = self.storage.insert_airline(&record).await?;
        Ok(AirlineView::from(&airline))
    }

    pub async fn create_city(&self, input: NewCity) -> Result<CityView> {
        let mut errors = FieldErrors::new();
        let record = input.into_record(&mut errors);
        let mut geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().country(record.country_id))
            .await?;
        if !errors.contains("pais") && geo.country(record.country_id).is_none() {
            errors.add("pais", invalid_reference(record.country_id));
        }
        errors.into_result()?;

        let city = self.storage.insert_city(&record).await?;
        geo.cities.insert(city.id, city.clone());
        Ok(CityView::build(&city, &geo))
    }

    pub async fn create_destination(&self, input: NewDestination) -> Result<DestinationView> {
        let mut errors = FieldErrors::new();
        let record = input.into_record(&mut errors, Utc::now());
        errors.into_result()?;

        let destination = self.storage.insert_destination(&record).await?;
        Ok(DestinationView::from(&destination))
    }

    pub async fn create_hotel(&self, input: NewHotel) -> Result<HotelView> {
        let mut errors = FieldErrors::new();
        let record = input.into_record(&mut errors, Utc::now());
        let destination = if errors.contains("destino") {
            None
        } else {
            // 停用的目的地也允许挂酒店，只是不会公开展示
            let ids = BTreeSet::from([record.destination_id]);
            let names = self.storage.destination_names(&ids).await?;
            let name = names.get(&record.destination_id).cloned();
            if name.is_none() {
                errors.add("destino", invalid_reference(record.destination_id));
            }
            name
        };
        errors.into_result()?;

        let hotel = self.storage.insert_hotel(&record).await?;
        Ok(HotelView::build(&hotel, destination.as_deref().unwrap_or_default()))
    }

    pub async fn create_flight(&self, input: NewFlight) -> Result<FlightView> {
        let mut errors = FieldErrors::new();
        let record = input.into_record(&mut errors, Utc::now());
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().flights([&record]))
            .await?;
        check_airline(&mut errors, &geo, "aerolinea", Some(record.airline_id));
        check_city(&mut errors, &geo, "origen", Some(record.origin_city_id));
        check_city(&mut errors, &geo, "destino", Some(record.destination_city_id));
        errors.into_result()?;

        let flight = self.storage.insert_flight(&record).await?;
        Ok(FlightView::build(&flight, &geo))
    }

    pub async fn create_rental_car(&self, input: NewRentalCar) -> Result<RentalCarView> {
        let mut errors = FieldErrors::new();
        let record = input.into_record(&mut errors, Utc::now());
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().rental_cars([&record]))
            .await?;
        check_city(&mut errors, &geo, "ciudad", Some(record.city_id));
        errors.into_result()?;

        let car = self.storage.insert_rental_car(&record).await?;
        Ok(RentalCarView::build(&car, &geo))
    }

    /// 国家必须属于所选区域，城市必须属于所选国家
    pub async fn create_package(&self, input: NewPackage) -> Result<PackageDetail> {
        let mut errors = FieldErrors::new();
        let record = input.into_record(&mut errors, Utc::now());
        let geo = self
            .storage
            .load_geo_lookup(&GeoKeys::default().packages([&record]))
            .await?;

        if !errors.contains("region") && geo.region(record.region_id).is_none() {
            errors.add("region", invalid_reference(record.region_id));
        }
        if !errors.contains("pais") {
            match geo.country(record.country_id) {
                None => errors.add("pais", invalid_reference(record.country_id)),
                Some(country) if country.region_id != record.region_id => errors.add(
                    "pais",
                    "El país seleccionado no pertenece a la región seleccionada.",
                ),
                Some(_) => {}
            }
        }
        if let Some(city_id) = record.city_id {
            match geo.city(city_id) {
                None => errors.add("ciudad", invalid_reference(city_id)),
                Some(city) if city.country_id != record.country_id => errors.add(
                    "ciudad",
                    "La ciudad seleccionada no pertenece al país seleccionado.",
                ),
                Some(_) => {}
            }
        }
        check_airline(&mut errors, &geo, "aerolinea", record.airline_id);
        errors.into_result()?;

        let package = self.storage.insert_package(&record).await?;
        Ok(PackageDetail::build(&package, &geo))
    }

    // ============ Bulk import ============

    /// 逐条写入；单条失败记入 summary，不中断其余记录
    pub async fn import_catalog(&self, import: CatalogImport) -> ImportSummary {
        let mut summary = ImportSummary::default();

        macro_rules! import_all {
            ($items:expr, $create:ident, $label:literal) => {
                for (index, item) in $items.into_iter().enumerate() {
                    match self.$create(item).await {
                        Ok(_) => summary.created += 1,
                        Err(e) => {
                            warn!("Import {} #{} failed: {}", $label, index + 1, e);
                            summary.failed += 1;
                            summary
                                .errors
                                .push(format!("{} #{}: {}", $label, index + 1, describe(&e)));
                        }
                    }
                }
            };
        }

        import_all!(import.aerolineas, create_airline, "aerolinea");
        import_all!(import.ciudades, create_city, "ciudad");
        import_all!(import.destinos, create_destination, "destino");
        import_all!(import.hoteles, create_hotel, "hotel");
        import_all!(import.vuelos, create_flight, "vuelo");
        import_all!(import.autos, create_rental_car, "auto");
        import_all!(import.paquetes, create_package, "paquete");

        info!(
            "Catalog import finished: {} created, {} failed",
            summary.created, summary.failed
        );
        summary
    }
}

fn invalid_reference(id: i64) -> String {
    format!(
        "Clave primaria \"{}\" inválida - objeto no existe.",
        id
    )
}

fn check_city(errors: &mut FieldErrors, geo: &GeoLookup, field: &str, id: Option<i64>) {
    if let Some(id) = id
        && !errors.contains(field)
        && geo.city(id).is_none()
    {
        errors.add(field, invalid_reference(id));
    }
}

fn check_airline(errors: &mut FieldErrors, geo: &GeoLookup, field: &str, id: Option<i64>) {
    if let Some(id) = id
        && !errors.contains(field)
        && geo.airline(id).is_none()
    {
        errors.add(field, invalid_reference(id));
    }
}

/// 校验错误展开为 "campo: mensaje"
fn describe(err: &TravelError) -> String {
    match err.field_errors() {
        Some(fields) if !fields.is_empty() => fields
            .fields()
            .map(|f| format!("{}: {}", f, fields.get(f).unwrap_or_default().join(" ")))
            .collect::<Vec<_>>()
            .join("; "),
        _ => err.message().to_string(),
    }
}
