//! sqlx/Postgres persistence layer for Velofleet.
//!
//! Entity models live in [`models`], repository structs in [`repositories`].
//! Schema migrations are embedded; run them with
//! `velofleet_db::MIGRATOR.run(&pool)`.

pub mod models;
pub mod repositories;

/// Embedded migrations from `crates/db/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
