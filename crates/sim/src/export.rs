//! Support ticket CSV export.

use std::path::Path;

use sqlx::PgPool;

use velofleet_core::ticket::ProblemType;
use velofleet_db::models::TicketExportRow;
use velofleet_db::repositories::SupportTicketRepo;

use crate::error::SimError;

/// Header of the export, fixed by the downstream ingest.
pub const CSV_HEADER: [&str; 6] = [
    "id",
    "velo_id",
    "utilisateur",
    "type_probleme",
    "description",
    "date_creation",
];

/// Export every ticket to `path`. Returns the number of rows written.
pub async fn export_tickets_csv(pool: &PgPool, path: &Path) -> Result<usize, SimError> {
    let rows = SupportTicketRepo::list_export_rows(pool).await?;
    let mut writer = csv::Writer::from_path(path)?;
    write_rows(&rows, &mut writer)?;
    Ok(rows.len())
}

fn write_rows<W: std::io::Write>(
    rows: &[TicketExportRow],
    writer: &mut csv::Writer<W>,
) -> Result<(), SimError> {
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        // Problem codes render as their French display label; an unknown
        // code falls back to the raw value rather than dropping the row.
        let problem_label = ProblemType::from_db_str(&row.problem_type)
            .map(|p| p.label().to_string())
            .unwrap_or_else(|| row.problem_type.clone());
        writer.write_record([
            row.id.to_string(),
            row.bike_id.map(|id| id.to_string()).unwrap_or_default(),
            row.username.clone().unwrap_or_default(),
            problem_label,
            row.description.clone(),
            row.created_at.to_rfc3339(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn row(id: i64, username: Option<&str>) -> TicketExportRow {
        TicketExportRow {
            id,
            bike_id: Some(42),
            username: username.map(str::to_string),
            problem_type: "low_battery".to_string(),
            description: "Batterie à 7.9% à la fin de la location.".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 15, 8, 30, 0).unwrap(),
        }
    }

    fn render(rows: &[TicketExportRow]) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_rows(rows, &mut writer).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn header_matches_the_ingest_contract() {
        let output = render(&[]);
        assert_eq!(
            output.lines().next().unwrap(),
            "id,velo_id,utilisateur,type_probleme,description,date_creation"
        );
    }

    #[test]
    fn rows_use_display_labels_and_rfc3339_dates() {
        let output = render(&[row(1, Some("camille.moreau12"))]);
        let line = output.lines().nth(1).unwrap();
        assert!(line.starts_with("1,42,camille.moreau12,Batterie faible,"));
        assert!(line.contains("2025-06-15T08:30:00+00:00"));
    }

    #[test]
    fn missing_user_renders_empty_field() {
        let output = render(&[row(2, None)]);
        let line = output.lines().nth(1).unwrap();
        assert!(line.starts_with("2,42,,Batterie faible,"));
    }
}
