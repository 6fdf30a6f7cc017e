//! Support ticket entity models.

use serde::Serialize;
use sqlx::FromRow;
use velofleet_core::ticket::ProblemType;
use velofleet_core::types::{DbId, Timestamp};

/// A row from the `support_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportTicket {
    pub id: DbId,
    pub bike_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub problem_type: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// Input for creating a support ticket.
#[derive(Debug, Clone)]
pub struct CreateSupportTicket {
    pub bike_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub problem: ProblemType,
    pub description: String,
}

/// A ticket joined with its reporter's username, as the CSV export needs it.
#[derive(Debug, Clone, FromRow)]
pub struct TicketExportRow {
    pub id: DbId,
    pub bike_id: Option<DbId>,
    pub username: Option<String>,
    pub problem_type: String,
    pub description: String,
    pub created_at: Timestamp,
}
