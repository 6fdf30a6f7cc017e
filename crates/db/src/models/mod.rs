//! Entity models: one row struct per table plus `Create*` input DTOs.

pub mod bike;
pub mod city;
pub mod rental;
pub mod station;
pub mod support_ticket;
pub mod user;

pub use bike::{Bike, CreateBike};
pub use city::City;
pub use rental::{CreateRental, Rental};
pub use station::{CreateStation, Station, StationWithCity};
pub use support_ticket::{CreateSupportTicket, SupportTicket, TicketExportRow};
pub use user::{CreateUser, User};
