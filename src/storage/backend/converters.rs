use std::str::FromStr;

use sea_orm::ActiveValue::{NotSet, Set};
use tracing::warn;

use crate::storage::models::*;
use crate::utils::{decode_list, encode_list};
use migration::entities::{
    airline, city, contact_message, contact_request, country, customer, destination, flight,
    hotel, region, rental_car, travel_package,
};

/// 解析枚举列；未知值记录警告并回退到默认值
fn parse_choice<E>(column: &str, raw: &str) -> E
where
    E: FromStr + Default,
{
    E::from_str(raw).unwrap_or_else(|_| {
        warn!("Unknown value '{}' in column {}, using default", raw, column);
        E::default()
    })
}

/// id 为 0 表示新记录，交给数据库分配
fn id_value(id: i64) -> sea_orm::ActiveValue<i64> {
    if id == 0 { NotSet } else { Set(id) }
}

// ============================================================
// Geography
// ============================================================

pub fn model_to_region(model: region::Model) -> Region {
    Region {
        id: model.id,
        name: parse_choice("regions.name", &model.name),
        description: model.description,
        image: model.image,
        active: model.active,
        display_order: model.display_order,
    }
}

pub fn region_to_active_model(region: &Region) -> region::ActiveModel {
    region::ActiveModel {
        id: id_value(region.id),
        name: Set(region.name.as_ref().to_string()),
        description: Set(region.description.clone()),
        image: Set(region.image.clone()),
        active: Set(region.active),
        display_order: Set(region.display_order),
    }
}

pub fn model_to_country(model: country::Model) -> Country {
    Country {
        id: model.id,
        region_id: model.region_id,
        name: model.name,
        code: model.code,
        flag_image: model.flag_image,
        active: model.active,
    }
}

pub fn country_to_active_model(country: &Country) -> country::ActiveModel {
    country::ActiveModel {
        id: id_value(country.id),
        region_id: Set(country.region_id),
        name: Set(country.name.clone()),
        code: Set(country.code.clone()),
        flag_image: Set(country.flag_image.clone()),
        active: Set(country.active),
    }
}

pub fn model_to_city(model: city::Model) -> City {
    City {
        id: model.id,
        country_id: model.country_id,
        name: model.name,
        airport_code: model.airport_code,
        is_capital: model.is_capital,
        image: model.image,
        active: model.active,
    }
}

pub fn city_to_active_model(city: &City) -> city::ActiveModel {
    city::ActiveModel {
        id: id_value(city.id),
        country_id: Set(city.country_id),
        name: Set(city.name.clone()),
        airport_code: Set(city.airport_code.clone()),
        is_capital: Set(city.is_capital),
        image: Set(city.image.clone()),
        active: Set(city.active),
    }
}

pub fn model_to_airline(model: airline::Model) -> Airline {
    Airline {
        id: model.id,
        name: model.name,
        code: model.code,
        logo: model.logo,
        origin_country: model.origin_country,
        active: model.active,
    }
}

pub fn airline_to_active_model(airline: &Airline) -> airline::ActiveModel {
    airline::ActiveModel {
        id: id_value(airline.id),
        name: Set(airline.name.clone()),
        code: Set(airline.code.clone()),
        logo: Set(airline.logo.clone()),
        origin_country: Set(airline.origin_country.clone()),
        active: Set(airline.active),
    }
}

// ============================================================
// Catalog
// ============================================================

pub fn model_to_destination(model: destination::Model) -> Destination {
    Destination {
        id: model.id,
        name: model.name,
        country: model.country,
        description: model.description,
        image: model.image,
        price_from: model.price_from,
        featured: model.featured,
        active: model.active,
        pdf_url: model.pdf_url,
        reservation_message: model.reservation_message,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn destination_to_active_model(d: &Destination) -> destination::ActiveModel {
    destination::ActiveModel {
        id: id_value(d.id),
        name: Set(d.name.clone()),
        country: Set(d.country.clone()),
        description: Set(d.description.clone()),
        image: Set(d.image.clone()),
        price_from: Set(d.price_from),
        featured: Set(d.featured),
        active: Set(d.active),
        pdf_url: Set(d.pdf_url.clone()),
        reservation_message: Set(d.reservation_message.clone()),
        created_at: Set(d.created_at),
        updated_at: Set(d.updated_at),
    }
}

pub fn model_to_hotel(model: hotel::Model) -> Hotel {
    Hotel {
        id: model.id,
        destination_id: model.destination_id,
        name: model.name,
        description: model.description,
        image: model.image,
        address: model.address,
        stars: model.stars,
        price_per_night: model.price_per_night,
        services: decode_list(&model.services),
        available: model.available,
        pdf_url: model.pdf_url,
        reservation_message: model.reservation_message,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn hotel_to_active_model(h: &Hotel) -> hotel::ActiveModel {
    hotel::ActiveModel {
        id: id_value(h.id),
        destination_id: Set(h.destination_id),
        name: Set(h.name.clone()),
        description: Set(h.description.clone()),
        image: Set(h.image.clone()),
        address: Set(h.address.clone()),
        stars: Set(h.stars),
        price_per_night: Set(h.price_per_night),
        services: Set(encode_list(&h.services)),
        available: Set(h.available),
        pdf_url: Set(h.pdf_url.clone()),
        reservation_message: Set(h.reservation_message.clone()),
        created_at: Set(h.created_at),
        updated_at: Set(h.updated_at),
    }
}

pub fn model_to_flight(model: flight::Model) -> Flight {
    Flight {
        id: model.id,
        airline_id: model.airline_id,
        origin_city_id: model.origin_city_id,
        destination_city_id: model.destination_city_id,
        flight_type: parse_choice("flights.flight_type", &model.flight_type),
        flight_number: model.flight_number,
        duration: model.duration,
        price: model.price,
        currency: model.currency,
        available: model.available,
        pdf_url: model.pdf_url,
        reservation_message: model.reservation_message,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn flight_to_active_model(f: &Flight) -> flight::ActiveModel {
    flight::ActiveModel {
        id: id_value(f.id),
        airline_id: Set(f.airline_id),
        origin_city_id: Set(f.origin_city_id),
        destination_city_id: Set(f.destination_city_id),
        flight_type: Set(f.flight_type.as_ref().to_string()),
        flight_number: Set(f.flight_number.clone()),
        duration: Set(f.duration.clone()),
        price: Set(f.price),
        currency: Set(f.currency.clone()),
        available: Set(f.available),
        pdf_url: Set(f.pdf_url.clone()),
        reservation_message: Set(f.reservation_message.clone()),
        created_at: Set(f.created_at),
        updated_at: Set(f.updated_at),
    }
}

pub fn model_to_rental_car(model: rental_car::Model) -> RentalCar {
    RentalCar {
        id: model.id,
        brand: model.brand,
        model: model.model,
        category: parse_choice("rental_cars.category", &model.category),
        year: model.year,
        passengers: model.passengers,
        transmission: parse_choice("rental_cars.transmission", &model.transmission),
        price_per_day: model.price_per_day,
        image: model.image,
        city_id: model.city_id,
        pickup_address: model.pickup_address,
        features: decode_list(&model.features),
        available: model.available,
        pdf_url: model.pdf_url,
        reservation_message: model.reservation_message,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn rental_car_to_active_model(car: &RentalCar) -> rental_car::ActiveModel {
    rental_car::ActiveModel {
        id: id_value(car.id),
        brand: Set(car.brand.clone()),
        model: Set(car.model.clone()),
        category: Set(car.category.as_ref().to_string()),
        year: Set(car.year),
        passengers: Set(car.passengers),
        transmission: Set(car.transmission.as_ref().to_string()),
        price_per_day: Set(car.price_per_day),
        image: Set(car.image.clone()),
        city_id: Set(car.city_id),
        pickup_address: Set(car.pickup_address.clone()),
        features: Set(encode_list(&car.features)),
        available: Set(car.available),
        pdf_url: Set(car.pdf_url.clone()),
        reservation_message: Set(car.reservation_message.clone()),
        created_at: Set(car.created_at),
        updated_at: Set(car.updated_at),
    }
}

pub fn model_to_package(model: travel_package::Model) -> TravelPackage {
    TravelPackage {
        id: model.id,
        title: model.title,
        subtitle: model.subtitle,
        image: model.image,
        short_description: model.short_description,
        region_id: model.region_id,
        country_id: model.country_id,
        city_id: model.city_id,
        price: model.price,
        currency: model.currency,
        package_type: parse_choice("travel_packages.package_type", &model.package_type),
        nights: model.nights,
        days: model.days,
        departure_cities: model.departure_cities,
        departure_dates: model.departure_dates,
        airline_id: model.airline_id,
        detail_title: model.detail_title,
        long_description: model.long_description,
        season: parse_choice("travel_packages.season", &model.season),
        trip_type: parse_choice("travel_packages.trip_type", &model.trip_type),
        valid_from: model.valid_from,
        valid_until: model.valid_until,
        map_image: model.map_image,
        language: model.language,
        local_currency: model.local_currency,
        highlighted_places: decode_list(&model.highlighted_places),
        required_documents: model.required_documents,
        temperature: model.temperature,
        sections: PackageSections {
            included: model.included,
            not_included: model.not_included,
            how_to_book: model.how_to_book,
            important_notes: model.important_notes,
            flight_schedule: model.flight_schedule,
            baggage_policy: model.baggage_policy,
            travel_requirements: model.travel_requirements,
            payment_methods: model.payment_methods,
            cancellation_policy: model.cancellation_policy,
        },
        includes: PackageIncludes {
            flight: model.includes_flight,
            hotel: model.includes_hotel,
            meals: model.includes_meals,
            transfers: model.includes_transfers,
            tours: model.includes_tours,
            insurance: model.includes_insurance,
        },
        pdf_url: model.pdf_url,
        reservation_message: model.reservation_message,
        featured: model.featured,
        active: model.active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn package_to_active_model(p: &TravelPackage) -> travel_package::ActiveModel {
    let s = &p.sections;
    travel_package::ActiveModel {
        id: id_value(p.id),
        title: Set(p.title.clone()),
        subtitle: Set(p.subtitle.clone()),
        image: Set(p.image.clone()),
        short_description: Set(p.short_description.clone()),
        region_id: Set(p.region_id),
        country_id: Set(p.country_id),
        city_id: Set(p.city_id),
        price: Set(p.price),
        currency: Set(p.currency.clone()),
        package_type: Set(p.package_type.as_ref().to_string()),
        nights: Set(p.nights),
        days: Set(p.days),
        departure_cities: Set(p.departure_cities.clone()),
        departure_dates: Set(p.departure_dates.clone()),
        airline_id: Set(p.airline_id),
        detail_title: Set(p.detail_title.clone()),
        long_description: Set(p.long_description.clone()),
        season: Set(p.season.as_ref().to_string()),
        trip_type: Set(p.trip_type.as_ref().to_string()),
        valid_from: Set(p.valid_from),
        valid_until: Set(p.valid_until),
        map_image: Set(p.map_image.clone()),
        language: Set(p.language.clone()),
        local_currency: Set(p.local_currency.clone()),
        highlighted_places: Set(encode_list(&p.highlighted_places)),
        required_documents: Set(p.required_documents.clone()),
        temperature: Set(p.temperature.clone()),
        included: Set(s.included.clone()),
        not_included: Set(s.not_included.clone()),
        how_to_book: Set(s.how_to_book.clone()),
        important_notes: Set(s.important_notes.clone()),
        flight_schedule: Set(s.flight_schedule.clone()),
        baggage_policy: Set(s.baggage_policy.clone()),
        travel_requirements: Set(s.travel_requirements.clone()),
        payment_methods: Set(s.payment_methods.clone()),
        cancellation_policy: Set(s.cancellation_policy.clone()),
        includes_flight: Set(p.includes.flight),
        includes_hotel: Set(p.includes.hotel),
        includes_meals: Set(p.includes.meals),
        includes_transfers: Set(p.includes.transfers),
        includes_tours: Set(p.includes.tours),
        includes_insurance: Set(p.includes.insurance),
        pdf_url: Set(p.pdf_url.clone()),
        reservation_message: Set(p.reservation_message.clone()),
        featured: Set(p.featured),
        active: Set(p.active),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

// ============================================================
// Contact
// ============================================================

pub fn model_to_customer(model: customer::Model) -> Customer {
    Customer {
        id: model.id,
        full_name: model.full_name,
        email: model.email,
        phone: model.phone,
        registered_at: model.registered_at,
    }
}

pub fn model_to_contact_request(model: contact_request::Model) -> ContactRequest {
    ContactRequest {
        id: model.id,
        customer_id: model.customer_id,
        message: model.message,
        created_at: model.created_at,
        handled: model.handled,
    }
}

pub fn model_to_contact_message(model: contact_message::Model) -> ContactMessage {
    ContactMessage {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        subject: model.subject,
        message: model.message,
        sent_at: model.sent_at,
        read: model.read,
        replied: model.replied,
    }
}

pub fn contact_message_to_active_model(m: &ContactMessage) -> contact_message::ActiveModel {
    contact_message::ActiveModel {
        id: id_value(m.id),
        name: Set(m.name.clone()),
        email: Set(m.email.clone()),
        phone: Set(m.phone.clone()),
        subject: Set(m.subject.clone()),
        message: Set(m.message.clone()),
        sent_at: Set(m.sent_at),
        read: Set(m.read),
        replied: Set(m.replied),
    }
}
