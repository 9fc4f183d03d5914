//! Catalog queries
//!
//! Every public read combines the row's own `active`/`available` flag, the
//! visibility of the geography it hangs from and the caller's filters.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};

use super::converters::{
    model_to_destination, model_to_flight, model_to_hotel, model_to_package, model_to_rental_car,
};
use super::{SeaOrmStorage, scope};
use crate::errors::Result;
use crate::storage::filters::{
    CityMatch, DestinationFilter, FlightFilter, HotelFilter, PackageFilter, RentalCarFilter,
};
use crate::storage::models::{Destination, Flight, Hotel, RentalCar, TravelPackage};

use migration::entities::{destination, flight, hotel, rental_car, travel_package};

fn visible_hotels() -> Select<hotel::Entity> {
    hotel::Entity::find()
        .filter(hotel::Column::Available.eq(true))
        .filter(hotel::Column::DestinationId.in_subquery(scope::active_destination_ids()))
}

fn visible_flights() -> Select<flight::Entity> {
    flight::Entity::find()
        .filter(flight::Column::Available.eq(true))
        .filter(flight::Column::AirlineId.in_subquery(scope::active_airline_ids()))
        .filter(flight::Column::OriginCityId.in_subquery(scope::active_city_ids()))
        .filter(flight::Column::DestinationCityId.in_subquery(scope::active_city_ids()))
}

fn visible_rental_cars() -> Select<rental_car::Entity> {
    rental_car::Entity::find()
        .filter(rental_car::Column::Available.eq(true))
        .filter(rental_car::Column::CityId.in_subquery(scope::active_city_ids()))
}

fn visible_packages() -> Select<travel_package::Entity> {
    travel_package::Entity::find()
        .filter(travel_package::Column::Active.eq(true))
        .filter(travel_package::Column::RegionId.in_subquery(scope::active_region_ids()))
        .filter(travel_package::Column::CountryId.in_subquery(scope::active_country_ids()))
        .filter(
            Condition::any()
                .add(travel_package::Column::CityId.is_null())
                .add(travel_package::Column::CityId.in_subquery(scope::active_city_ids())),
        )
}

fn city_condition(column: flight::Column, matcher: &CityMatch) -> Condition {
    match matcher {
        CityMatch::Id(id) => Condition::all().add(column.eq(*id)),
        CityMatch::Text(text) => {
            Condition::all().add(column.in_subquery(scope::city_ids_matching(text)))
        }
    }
}

impl SeaOrmStorage {
    // ---------------------------------------------------------------
    // Destinations
    // ---------------------------------------------------------------

    /// 推荐优先，其次按名称
    pub async fn list_destinations(&self, filter: &DestinationFilter) -> Result<Vec<Destination>> {
        let mut select = destination::Entity::find().filter(destination::Column::Active.eq(true));
        if filter.featured_only {
            select = select.filter(destination::Column::Featured.eq(true));
        }
        if let Some(country) = filter.country.as_deref().filter(|c| !c.trim().is_empty()) {
            select = select.filter(scope::icontains(destination::Column::Country, country));
        }
        let select = select
            .order_by_desc(destination::Column::Featured)
            .order_by_asc(destination::Column::Name);

        let models = self.fetch_all("list_destinations", select).await?;
        Ok(models.into_iter().map(model_to_destination).collect())
    }

    /// 给定 id 的目的地名称，含停用的
    pub async fn destination_names(&self, ids: &BTreeSet<i64>) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let select = destination::Entity::find()
            .filter(destination::Column::Id.is_in(ids.iter().copied()));
        let models = self.fetch_all("destination_names", select).await?;
        Ok(models.into_iter().map(|d| (d.id, d.name)).collect())
    }

    pub async fn get_destination(&self, id: i64) -> Result<Option<Destination>> {
        let select = destination::Entity::find_by_id(id)
            .filter(destination::Column::Active.eq(true));
        let model = self.fetch_one("get_destination", select).await?;
        Ok(model.map(model_to_destination))
    }

    // ---------------------------------------------------------------
    // Hotels
    // ---------------------------------------------------------------

    pub async fn list_hotels(&self, filter: &HotelFilter) -> Result<Vec<Hotel>> {
        let mut select = visible_hotels();
        if let Some(destination_id) = filter.destination_id {
            select = select.filter(hotel::Column::DestinationId.eq(destination_id));
        }
        let models = self
            .fetch_all("list_hotels", select.order_by_asc(hotel::Column::Name))
            .await?;
        Ok(models.into_iter().map(model_to_hotel).collect())
    }

    pub async fn get_hotel(&self, id: i64) -> Result<Option<Hotel>> {
        let select = visible_hotels().filter(hotel::Column::Id.eq(id));
        let model = self.fetch_one("get_hotel", select).await?;
        Ok(model.map(model_to_hotel))
    }

    // ---------------------------------------------------------------
    // Flights
    // ---------------------------------------------------------------

    /// 排序（航空公司、出发地、目的地名称）由服务层完成
    pub async fn list_flights(&self, filter: &FlightFilter) -> Result<Vec<Flight>> {
        let mut select = visible_flights();
        if let Some(origin) = &filter.origin {
            select = select.filter(city_condition(flight::Column::OriginCityId, origin));
        }
        if let Some(destination) = &filter.destination {
            select = select.filter(city_condition(flight::Column::DestinationCityId, destination));
        }
        if let Some(airline_id) = filter.airline_id {
            select = select.filter(flight::Column::AirlineId.eq(airline_id));
        }
        let models = self
            .fetch_all("list_flights", select.order_by_asc(flight::Column::Id))
            .await?;
        Ok(models.into_iter().map(model_to_flight).collect())
    }

    pub async fn get_flight(&self, id: i64) -> Result<Option<Flight>> {
        let select = visible_flights().filter(flight::Column::Id.eq(id));
        let model = self.fetch_one("get_flight", select).await?;
        Ok(model.map(model_to_flight))
    }

    // ---------------------------------------------------------------
    // Rental cars
    // ---------------------------------------------------------------

    pub async fn list_rental_cars(&self, filter: &RentalCarFilter) -> Result<Vec<RentalCar>> {
        let mut select = visible_rental_cars();
        if let Some(category) = filter.category {
            select = select.filter(rental_car::Column::Category.eq(category.as_ref()));
        }
        if let Some(location) = filter.location.as_deref().filter(|l| !l.trim().is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(scope::icontains(rental_car::Column::PickupAddress, location))
                    .add(rental_car::Column::CityId.in_subquery(scope::city_ids_matching(location))),
            );
        }
        if let Some(city_id) = filter.city_id {
            select = select.filter(rental_car::Column::CityId.eq(city_id));
        }
        if let Some(country_id) = filter.country_id {
            select = select
                .filter(rental_car::Column::CityId.in_subquery(scope::city_ids_in_country(country_id)));
        }
        if let Some(region) = filter.region {
            select = select
                .filter(rental_car::Column::CityId.in_subquery(scope::city_ids_in_region(region)));
        }
        let select = select
            .order_by_asc(rental_car::Column::Brand)
            .order_by_asc(rental_car::Column::Model);

        let models = self.fetch_all("list_rental_cars", select).await?;
        Ok(models.into_iter().map(model_to_rental_car).collect())
    }

    pub async fn get_rental_car(&self, id: i64) -> Result<Option<RentalCar>> {
        let select = visible_rental_cars().filter(rental_car::Column::Id.eq(id));
        let model = self.fetch_one("get_rental_car", select).await?;
        Ok(model.map(model_to_rental_car))
    }

    // ---------------------------------------------------------------
    // Packages
    // ---------------------------------------------------------------

    /// 推荐优先，其次最新
    pub async fn list_packages(&self, filter: &PackageFilter) -> Result<Vec<TravelPackage>> {
        let mut select = visible_packages();
        if let Some(region) = filter.region {
            select = select.filter(travel_package::Column::RegionId.in_subquery(scope::region_ids(region)));
        }
        if let Some(country_id) = filter.country_id {
            select = select.filter(travel_package::Column::CountryId.eq(country_id));
        }
        if let Some(package_type) = filter.package_type {
            select = select.filter(travel_package::Column::PackageType.eq(package_type.as_ref()));
        }
        if let Some(season) = filter.season {
            select = select.filter(travel_package::Column::Season.eq(season.as_ref()));
        }
        if let Some(max_price) = filter.max_price {
            select = select.filter(travel_package::Column::Price.lte(max_price));
        }
        if filter.featured_only {
            select = select.filter(travel_package::Column::Featured.eq(true));
        }
        if let Some(airline_id) = filter.airline_id {
            select = select.filter(travel_package::Column::AirlineId.eq(airline_id));
        }

        let mut select = select
            .order_by_desc(travel_package::Column::Featured)
            .order_by_desc(travel_package::Column::CreatedAt)
            .order_by_desc(travel_package::Column::Id);
        if let Some(limit) = filter.limit {
            select = select.limit(limit);
        }

        let models = self.fetch_all("list_packages", select).await?;
        Ok(models.into_iter().map(model_to_package).collect())
    }

    pub async fn get_package(&self, id: i64) -> Result<Option<TravelPackage>> {
        let select = visible_packages().filter(travel_package::Column::Id.eq(id));
        let model = self.fetch_one("get_package", select).await?;
        Ok(model.map(model_to_package))
    }
}
