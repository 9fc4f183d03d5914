//! Catalog write operations
//!
//! Records arrive already validated (PDF links normalized, lists split);
//! a zero id lets the database assign one.

use sea_orm::ActiveModelTrait;
use tracing::info;

use super::converters::*;
use super::{SeaOrmStorage, db_err};
use crate::errors::Result;
use crate::storage::models::{
    Airline, City, Country, Destination, Flight, Hotel, Region, RentalCar, TravelPackage,
};

impl SeaOrmStorage {
    pub async fn insert_region(&self, region: &Region) -> Result<Region> {
        let model = region_to_active_model(region)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_region", e))?;
        Ok(model_to_region(model))
    }

    pub async fn insert_country(&self, country: &Country) -> Result<Country> {
        let model = country_to_active_model(country)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_country", e))?;
        Ok(model_to_country(model))
    }

    pub async fn insert_city(&self, city: &City) -> Result<City> {
        let model = city_to_active_model(city)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_city", e))?;
        info!("City created: {} ({})", model.name, model.id);
        Ok(model_to_city(model))
    }

    pub async fn insert_airline(&self, airline: &Airline) -> Result<Airline> {
        let model = airline_to_active_model(airline)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_airline", e))?;
        info!("Airline created: {} ({})", model.name, model.id);
        Ok(model_to_airline(model))
    }

    pub async fn insert_destination(&self, destination: &Destination) -> Result<Destination> {
        let model = destination_to_active_model(destination)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_destination", e))?;
        info!("Destination created: {} ({})", model.name, model.id);
        Ok(model_to_destination(model))
    }

    pub async fn insert_hotel(&self, hotel: &Hotel) -> Result<Hotel> {
        let model = hotel_to_active_model(hotel)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_hotel", e))?;
        info!("Hotel created: {} ({})", model.name, model.id);
        Ok(model_to_hotel(model))
    }

    pub async fn insert_flight(&self, flight: &Flight) -> Result<Flight> {
        let model = flight_to_active_model(flight)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_flight", e))?;
        info!("Flight created: {}", model.id);
        Ok(model_to_flight(model))
    }

    pub async fn insert_rental_car(&self, car: &RentalCar) -> Result<RentalCar> {
        let model = rental_car_to_active_model(car)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_rental_car", e))?;
        info!(
            "Rental car created: {} {} ({})",
            model.brand, model.model, model.id
        );
        Ok(model_to_rental_car(model))
    }

    pub async fn insert_package(&self, package: &TravelPackage) -> Result<TravelPackage> {
        let model = package_to_active_model(package)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_package", e))?;
        info!("Package created: {} ({})", model.title, model.id);
        Ok(model_to_package(model))
    }
}
