//! City entity model.

use serde::Serialize;
use sqlx::FromRow;
use velofleet_core::types::DbId;

/// A row from the `cities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
    pub id: DbId,
    pub name: String,
}
