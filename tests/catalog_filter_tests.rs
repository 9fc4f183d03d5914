//! Catalog filtering tests
//!
//! Filter composition, geography visibility and the admin write rules,
//! exercised through `CatalogService` on a seeded temporary store.

mod common;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;

use common::{country_id, insert_city, insert_country, package_input, region_id, seeded_storage};
use travel_catalog::errors::{FieldErrors, TravelError};
use travel_catalog::services::{
    CatalogService, NewAirline, NewDestination, NewFlight, NewHotel, NewRentalCar,
};
use travel_catalog::storage::models::{Country, GeoKeys, RegionName, Season};
use travel_catalog::storage::{CityMatch, FlightFilter, PackageFilter, RegionRef, RentalCarFilter};

const DRIVE_VIEW: &str = "https://drive.google.com/file/d/1AbC_d-2XyZ/view?usp=sharing";
const DRIVE_PREVIEW: &str = "https://drive.google.com/file/d/1AbC_d-2XyZ/preview";

fn titles(packages: &[travel_catalog::services::views::PackageSummary]) -> Vec<&str> {
    let mut out: Vec<&str> = packages.iter().map(|p| p.titulo.as_str()).collect();
    out.sort();
    out
}

#[tokio::test]
async fn test_package_filters_combine_with_and() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let europa = region_id(&db.storage, RegionName::Europa).await;
    let cuba = country_id(&db.storage, "Cuba").await;
    let espana = country_id(&db.storage, "España").await;

    // 依次满足 0、1、2、3 个条件（region=caribe, temporada=alta, precio<=1000）
    let fixtures = [
        package_input(europa, espana, "Ninguno", json!({"temporada": "baja", "precio": 2000.0})),
        package_input(caribe, cuba, "Uno", json!({"temporada": "baja", "precio": 2000.0})),
        package_input(caribe, cuba, "Dos", json!({"temporada": "alta", "precio": 2000.0})),
        package_input(caribe, cuba, "Tres", json!({"temporada": "alta", "precio": 800.0})),
    ];
    for input in fixtures {
        catalog.create_package(input).await.unwrap();
    }

    let all = PackageFilter {
        region: Some(RegionRef::Name(RegionName::Caribe)),
        season: Some(Season::Alta),
        max_price: Some(Decimal::from(1000)),
        ..Default::default()
    };
    assert_eq!(titles(&catalog.list_packages(&all).await.unwrap()), vec!["Tres"]);

    let by_region = PackageFilter {
        region: Some(RegionRef::Id(caribe)),
        ..Default::default()
    };
    assert_eq!(
        titles(&catalog.list_packages(&by_region).await.unwrap()),
        vec!["Dos", "Tres", "Uno"]
    );

    let by_season = PackageFilter {
        season: Some(Season::Alta),
        ..Default::default()
    };
    assert_eq!(
        titles(&catalog.list_packages(&by_season).await.unwrap()),
        vec!["Dos", "Tres"]
    );

    // precio igual al máximo cuenta
    let by_price = PackageFilter {
        max_price: Some(Decimal::from(800)),
        ..Default::default()
    };
    assert_eq!(titles(&catalog.list_packages(&by_price).await.unwrap()), vec!["Tres"]);

    let unfiltered = catalog.list_packages(&PackageFilter::default()).await.unwrap();
    assert_eq!(unfiltered.len(), 4);
}

#[tokio::test]
async fn test_price_filter_respects_cents() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let cuba = country_id(&db.storage, "Cuba").await;

    catalog
        .create_package(package_input(caribe, cuba, "Centavos", json!({"precio": "999.99"})))
        .await
        .unwrap();

    let at_limit = PackageFilter {
        max_price: Some(Decimal::new(99999, 2)),
        ..Default::default()
    };
    let found = catalog.list_packages(&at_limit).await.unwrap();
    assert_eq!(titles(&found), vec!["Centavos"]);
    assert_eq!(found[0].precio, Decimal::new(99999, 2));

    let below = PackageFilter {
        max_price: Some(Decimal::new(99998, 2)),
        ..Default::default()
    };
    assert!(catalog.list_packages(&below).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_featured_packages_come_first() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let cuba = country_id(&db.storage, "Cuba").await;

    catalog
        .create_package(package_input(caribe, cuba, "Normal", json!({})))
        .await
        .unwrap();
    catalog
        .create_package(package_input(caribe, cuba, "Destacado", json!({"destacado": true})))
        .await
        .unwrap();

    let listed = catalog.list_packages(&PackageFilter::default()).await.unwrap();
    assert_eq!(listed[0].titulo, "Destacado");

    let featured = catalog.featured_packages().await.unwrap();
    assert_eq!(featured.len(), 1);
    assert!(featured[0].destacado);
}

#[tokio::test]
async fn test_inactive_country_hides_its_packages() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let closed = insert_country(&db.storage, caribe, "Isla Cerrada", false).await;

    let mut errors = FieldErrors::new();
    let record = package_input(caribe, closed, "Oculto", json!({})).into_record(&mut errors, Utc::now());
    assert!(errors.is_empty());
    let hidden = db.storage.insert_package(&record).await.unwrap();

    assert!(catalog.list_packages(&PackageFilter::default()).await.unwrap().is_empty());
    assert!(matches!(
        catalog.get_package(hidden.id).await.unwrap_err(),
        TravelError::NotFound(_)
    ));
    assert!(catalog.packages_by_region().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_packages_by_region_caps_and_skips_empty_regions() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let europa = region_id(&db.storage, RegionName::Europa).await;
    let cuba = country_id(&db.storage, "Cuba").await;
    let francia = country_id(&db.storage, "Francia").await;

    for i in 0..8 {
        catalog
            .create_package(package_input(caribe, cuba, &format!("Cuba {}", i), json!({})))
            .await
            .unwrap();
    }
    catalog
        .create_package(package_input(europa, francia, "París", json!({})))
        .await
        .unwrap();

    let groups = catalog.packages_by_region().await.unwrap();
    assert_eq!(groups.len(), 2);

    let caribe_group = groups.iter().find(|g| g.region.id == caribe).unwrap();
    assert_eq!(caribe_group.paquetes.len(), 6);
    let europa_group = groups.iter().find(|g| g.region.id == europa).unwrap();
    assert_eq!(europa_group.paquetes.len(), 1);
    assert_eq!(europa_group.paquetes[0].pais_nombre, "Francia");
}

#[tokio::test]
async fn test_create_package_checks_geography_consistency() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let espana = country_id(&db.storage, "España").await;
    let cuba = country_id(&db.storage, "Cuba").await;
    let madrid = insert_city(&db.storage, espana, "Madrid", "MAD", true).await;

    let err = catalog
        .create_package(package_input(caribe, espana, "Mal", json!({})))
        .await
        .unwrap_err();
    let fields = err.field_errors().unwrap();
    assert!(fields.contains("pais"));
    assert!(!fields.contains("region"));

    let err = catalog
        .create_package(package_input(caribe, cuba, "Mal", json!({"ciudad": madrid})))
        .await
        .unwrap_err();
    assert!(err.field_errors().unwrap().contains("ciudad"));

    assert!(catalog.list_packages(&PackageFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_package_normalizes_pdf_link() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let cuba = country_id(&db.storage, "Cuba").await;

    let created = catalog
        .create_package(package_input(caribe, cuba, "Con PDF", json!({"pdf_url": DRIVE_VIEW})))
        .await
        .unwrap();
    assert_eq!(created.resumen.pdf_url.as_deref(), Some(DRIVE_PREVIEW));

    let stored = catalog.get_package(created.resumen.id).await.unwrap();
    assert_eq!(stored.resumen.pdf_url.as_deref(), Some(DRIVE_PREVIEW));

    let err = catalog
        .create_package(package_input(
            caribe,
            cuba,
            "PDF inválido",
            json!({"pdf_url": "https://example.com/folleto.pdf"}),
        ))
        .await
        .unwrap_err();
    assert!(err.field_errors().unwrap().contains("pdf_url"));
}

#[tokio::test]
async fn test_flight_city_match_by_id_and_text() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let ecuador = country_id(&db.storage, "Ecuador").await;
    let mexico = country_id(&db.storage, "México").await;
    let quito = insert_city(&db.storage, ecuador, "Quito", "UIO", true).await;
    let guayaquil = insert_city(&db.storage, ecuador, "Guayaquil", "GYE", true).await;
    let cancun = insert_city(&db.storage, mexico, "Cancún", "CUN", true).await;

    let airline = catalog
        .create_airline(NewAirline {
            nombre: Some("Avianca".into()),
            codigo: Some("av".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(airline.codigo.as_deref(), Some("AV"));

    for (origin, destination) in [(quito, cancun), (guayaquil, cancun), (quito, guayaquil)] {
        catalog
            .create_flight(NewFlight {
                aerolinea: Some(airline.id),
                origen: Some(origin),
                destino: Some(destination),
                duracion: Some("4h".into()),
                precio: Some(Decimal::from(450)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let by_id = FlightFilter {
        origin: CityMatch::parse(&quito.to_string()),
        ..Default::default()
    };
    assert_eq!(catalog.list_flights(&by_id).await.unwrap().len(), 2);

    // código de aeropuerto sin distinguir mayúsculas
    let by_code = FlightFilter {
        origin: CityMatch::parse("uio"),
        destination: CityMatch::parse("cancún"),
        ..Default::default()
    };
    let flights = catalog.list_flights(&by_code).await.unwrap();
    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0].origen_nombre, "Quito");
    assert_eq!(flights[0].aerolinea_nombre, "Avianca");

    assert_eq!(catalog.flights_of_airline(airline.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_flight_with_inactive_city_is_hidden() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let ecuador = country_id(&db.storage, "Ecuador").await;
    let quito = insert_city(&db.storage, ecuador, "Quito", "UIO", true).await;
    let closed = insert_city(&db.storage, ecuador, "Aeropuerto Viejo", "OLD", false).await;

    let airline = catalog
        .create_airline(NewAirline {
            nombre: Some("LATAM".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut errors = FieldErrors::new();
    let record = NewFlight {
        aerolinea: Some(airline.id),
        origen: Some(quito),
        destino: Some(closed),
        duracion: Some("1h".into()),
        precio: Some(Decimal::from(90)),
        ..Default::default()
    }
    .into_record(&mut errors, Utc::now());
    assert!(errors.is_empty());
    let flight = db.storage.insert_flight(&record).await.unwrap();

    assert!(catalog.list_flights(&FlightFilter::default()).await.unwrap().is_empty());
    assert!(matches!(
        catalog.get_flight(flight.id).await.unwrap_err(),
        TravelError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_hotels_of_inactive_destination_are_hidden() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());

    let open = catalog
        .create_destination(NewDestination {
            nombre: Some("Cancún".into()),
            pais: Some("México".into()),
            descripcion: Some("Playas".into()),
            imagen: Some("destinos/cancun.jpg".into()),
            precio_desde: Some(Decimal::from(500)),
            ..Default::default()
        })
        .await
        .unwrap();
    let closed = catalog
        .create_destination(NewDestination {
            nombre: Some("Tulum".into()),
            pais: Some("México".into()),
            descripcion: Some("Ruinas".into()),
            imagen: Some("destinos/tulum.jpg".into()),
            precio_desde: Some(Decimal::from(600)),
            activo: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    for (destination, name) in [(open.id, "Hotel Playa"), (closed.id, "Hotel Selva")] {
        catalog
            .create_hotel(NewHotel {
                destino: Some(destination),
                nombre: Some(name.into()),
                descripcion: Some("Frente al mar".into()),
                imagen: Some("hoteles/h.jpg".into()),
                direccion: Some("Zona hotelera".into()),
                estrellas: Some(4),
                precio_noche: Some(Decimal::from(120)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let hotels = catalog.list_hotels(&Default::default()).await.unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].nombre, "Hotel Playa");
    assert_eq!(hotels[0].destino_nombre, "Cancún");

    let err = catalog
        .create_hotel(NewHotel {
            destino: Some(9999),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.field_errors().unwrap().contains("destino"));
}

#[tokio::test]
async fn test_rental_car_location_and_region_filters() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let ecuador = country_id(&db.storage, "Ecuador").await;
    let espana = country_id(&db.storage, "España").await;
    let quito = insert_city(&db.storage, ecuador, "Quito", "UIO", true).await;
    let madrid = insert_city(&db.storage, espana, "Madrid", "MAD", true).await;

    let car = |brand: &str, city: i64, category: &str, address: &str| NewRentalCar {
        marca: Some(brand.into()),
        modelo: Some("Base".into()),
        categoria: Some(category.into()),
        anio: Some(2024),
        pasajeros: Some(5),
        transmision: Some("automatica".into()),
        precio_dia: Some(Decimal::from(45)),
        imagen: Some("autos/a.jpg".into()),
        ciudad: Some(city),
        direccion_recogida: Some(address.into()),
        ..Default::default()
    };
    catalog.create_rental_car(car("Kia", quito, "suv", "Aeropuerto Mariscal Sucre")).await.unwrap();
    catalog.create_rental_car(car("Seat", madrid, "economico", "Estación Atocha")).await.unwrap();

    let by_location = RentalCarFilter {
        location: Some("atocha".into()),
        ..Default::default()
    };
    let cars = catalog.list_rental_cars(&by_location).await.unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].marca, "Seat");

    // el nombre de la ciudad también cuenta como ubicación
    let by_city_name = RentalCarFilter {
        location: Some("quito".into()),
        ..Default::default()
    };
    assert_eq!(catalog.list_rental_cars(&by_city_name).await.unwrap()[0].marca, "Kia");

    let by_region = RentalCarFilter {
        region: Some(RegionRef::Name(RegionName::Ecuador)),
        ..Default::default()
    };
    let cars = catalog.list_rental_cars(&by_region).await.unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].ciudad, quito);

    let by_country = RentalCarFilter {
        country_id: Some(espana),
        ..Default::default()
    };
    assert_eq!(catalog.list_rental_cars(&by_country).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_inactive_package_is_hidden_everywhere() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let caribe = region_id(&db.storage, RegionName::Caribe).await;
    let cuba = country_id(&db.storage, "Cuba").await;

    let hidden = catalog
        .create_package(package_input(
            caribe,
            cuba,
            "Retirado",
            json!({"activo": false, "destacado": true}),
        ))
        .await
        .unwrap();
    catalog
        .create_package(package_input(caribe, cuba, "Vigente", json!({})))
        .await
        .unwrap();

    let listed = catalog.list_packages(&PackageFilter::default()).await.unwrap();
    assert_eq!(titles(&listed), vec!["Vigente"]);
    assert!(matches!(
        catalog.get_package(hidden.resumen.id).await.unwrap_err(),
        TravelError::NotFound(_)
    ));
    assert!(catalog.featured_packages().await.unwrap().is_empty());

    let groups = catalog.packages_by_region().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(titles(&groups[0].paquetes), vec!["Vigente"]);
}

#[tokio::test]
async fn test_unavailable_inventory_is_hidden() {
    let db = seeded_storage().await;
    let catalog = CatalogService::new(db.storage.clone());
    let ecuador = country_id(&db.storage, "Ecuador").await;
    let quito = insert_city(&db.storage, ecuador, "Quito", "UIO", true).await;
    let guayaquil = insert_city(&db.storage, ecuador, "Guayaquil", "GYE", true).await;

    let destination = catalog
        .create_destination(NewDestination {
            nombre: Some("Galápagos".into()),
            pais: Some("Ecuador".into()),
            descripcion: Some("Islas".into()),
            imagen: Some("destinos/galapagos.jpg".into()),
            precio_desde: Some(Decimal::from(900)),
            ..Default::default()
        })
        .await
        .unwrap();
    let hotel = catalog
        .create_hotel(NewHotel {
            destino: Some(destination.id),
            nombre: Some("Hotel Cerrado".into()),
            descripcion: Some("En remodelación".into()),
            imagen: Some("hoteles/h.jpg".into()),
            direccion: Some("Puerto Ayora".into()),
            estrellas: Some(3),
            precio_noche: Some(Decimal::from(80)),
            disponible: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(catalog.list_hotels(&Default::default()).await.unwrap().is_empty());
    assert!(matches!(
        catalog.get_hotel(hotel.id).await.unwrap_err(),
        TravelError::NotFound(_)
    ));

    let airline = catalog
        .create_airline(NewAirline {
            nombre: Some("TAME".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let flight = catalog
        .create_flight(NewFlight {
            aerolinea: Some(airline.id),
            origen: Some(quito),
            destino: Some(guayaquil),
            duracion: Some("45m".into()),
            precio: Some(Decimal::from(60)),
            disponible: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(catalog.list_flights(&FlightFilter::default()).await.unwrap().is_empty());
    assert!(catalog.flights_of_airline(airline.id).await.unwrap().is_empty());
    assert!(matches!(
        catalog.get_flight(flight.id).await.unwrap_err(),
        TravelError::NotFound(_)
    ));

    let car = catalog
        .create_rental_car(NewRentalCar {
            marca: Some("Chevrolet".into()),
            modelo: Some("Sail".into()),
            categoria: Some("economico".into()),
            anio: Some(2022),
            pasajeros: Some(5),
            transmision: Some("manual".into()),
            precio_dia: Some(Decimal::from(35)),
            imagen: Some("autos/sail.jpg".into()),
            ciudad: Some(quito),
            direccion_recogida: Some("Aeropuerto Mariscal Sucre".into()),
            disponible: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(catalog.list_rental_cars(&RentalCarFilter::default()).await.unwrap().is_empty());
    assert!(matches!(
        catalog.get_rental_car(car.id).await.unwrap_err(),
        TravelError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_duplicate_country_is_conflict() {
    let db = seeded_storage().await;
    let europa = region_id(&db.storage, RegionName::Europa).await;

    // "Francia" ya existe en Europa tras el seed
    let err = db
        .storage
        .insert_country(&Country {
            id: 0,
            region_id: europa,
            name: "Francia".into(),
            code: None,
            flag_image: None,
            active: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TravelError::Conflict(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_geo_lookup_loads_only_referenced_nodes() {
    let db = seeded_storage().await;
    let ecuador = country_id(&db.storage, "Ecuador").await;
    let quito = insert_city(&db.storage, ecuador, "Quito", "UIO", true).await;

    let geo = db
        .storage
        .load_geo_lookup(&GeoKeys::default().city(quito))
        .await
        .unwrap();
    assert_eq!(geo.cities.len(), 1);
    assert_eq!(geo.countries.len(), 1);
    assert_eq!(geo.regions.len(), 1);
    assert!(geo.airlines.is_empty());
    assert_eq!(geo.city_location(quito), "Quito, Ecuador, Ecuador");

    let empty = db.storage.load_geo_lookup(&GeoKeys::default()).await.unwrap();
    assert!(empty.regions.is_empty() && empty.countries.is_empty());
}
