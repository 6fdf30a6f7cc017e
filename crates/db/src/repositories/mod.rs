//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that must run inside the
//! caller's transaction take `&mut sqlx::Transaction<'_, Postgres>` instead.

pub mod bike_repo;
pub mod city_repo;
pub mod rental_repo;
pub mod station_repo;
pub mod support_ticket_repo;
pub mod user_repo;

pub use bike_repo::BikeRepo;
pub use city_repo::CityRepo;
pub use rental_repo::RentalRepo;
pub use station_repo::StationRepo;
pub use support_ticket_repo::SupportTicketRepo;
pub use user_repo::UserRepo;
