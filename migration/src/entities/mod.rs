pub mod airline;
pub mod city;
pub mod contact_message;
pub mod contact_request;
pub mod country;
pub mod customer;
pub mod destination;
pub mod flight;
pub mod hotel;
pub mod region;
pub mod rental_car;
pub mod travel_package;

pub use airline::Entity as AirlineEntity;
pub use city::Entity as CityEntity;
pub use contact_message::Entity as ContactMessageEntity;
pub use contact_request::Entity as ContactRequestEntity;
pub use country::Entity as CountryEntity;
pub use customer::Entity as CustomerEntity;
pub use destination::Entity as DestinationEntity;
pub use flight::Entity as FlightEntity;
pub use hotel::Entity as HotelEntity;
pub use region::Entity as RegionEntity;
pub use rental_car::Entity as RentalCarEntity;
pub use travel_package::Entity as TravelPackageEntity;
