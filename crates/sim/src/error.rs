//! Simulation-domain error type.

/// Errors raised by the batch jobs.
///
/// The precondition variants mean the operator ran commands out of order
/// (or against the wrong database); they abort the run and are never
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("no stations exist; create cities and stations before generating history")]
    NoStations,

    #[error("no bikes exist; run generate-history first")]
    NoBikes,

    #[error("database already contains data; seeding aborted")]
    DatabaseNotEmpty,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
