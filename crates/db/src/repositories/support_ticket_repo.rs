//! Repository for the `support_tickets` table.

use sqlx::{PgPool, Postgres, Transaction};

use crate::models::support_ticket::{CreateSupportTicket, SupportTicket, TicketExportRow};

const COLUMNS: &str = "id, bike_id, user_id, problem_type, description, created_at";

/// Provides CRUD operations for support tickets.
pub struct SupportTicketRepo;

impl SupportTicketRepo {
    /// Insert a new ticket, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSupportTicket,
    ) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets (bike_id, user_id, problem_type, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(input.bike_id)
            .bind(input.user_id)
            .bind(input.problem.as_db_str())
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of tickets in a single transaction. Returns the number
    /// inserted.
    pub async fn insert_many(
        pool: &PgPool,
        inputs: &[CreateSupportTicket],
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;
        for input in inputs {
            sqlx::query(
                "INSERT INTO support_tickets (bike_id, user_id, problem_type, description)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(input.bike_id)
            .bind(input.user_id)
            .bind(input.problem.as_db_str())
            .bind(&input.description)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(inputs.len())
    }

    /// List all tickets ordered by creation.
    pub async fn list(pool: &PgPool) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM support_tickets ORDER BY id");
        sqlx::query_as::<_, SupportTicket>(&query)
            .fetch_all(pool)
            .await
    }

    /// Tickets joined with their reporter's username, ordered by ID. These
    /// are the rows the CSV export writes.
    pub async fn list_export_rows(pool: &PgPool) -> Result<Vec<TicketExportRow>, sqlx::Error> {
        sqlx::query_as::<_, TicketExportRow>(
            "SELECT t.id, t.bike_id, u.username, t.problem_type, t.description, t.created_at
             FROM support_tickets t
             LEFT JOIN users u ON u.id = t.user_id
             ORDER BY t.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete every ticket. Returns the number of deleted rows.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM support_tickets").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete every ticket within the caller's transaction.
    pub async fn delete_all_tx(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM support_tickets")
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Total number of tickets.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM support_tickets")
            .fetch_one(pool)
            .await
    }
}
