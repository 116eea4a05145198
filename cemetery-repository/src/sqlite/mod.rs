//! SQLite implementation of the cemetery repository.
//!
//! Every repository holds a `sqlx::SqlitePool` handed to it by the caller and
//! takes a connection per operation. The schema lives in the crate's
//! `migrations` directory and is applied with [`run_migrations`].
mod body_repository;
mod cemetery_repository;
mod grave_repository;
pub(crate) mod rows;
pub mod transaction;

pub use body_repository::SqliteBodyRepository;
pub use cemetery_repository::SqliteCemeteryRepository;
pub use grave_repository::SqliteGraveRepository;
pub use transaction::{with_transaction, SqliteTransaction};

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::SqlitePool;
use tracing::error;

use crate::errors::ManagerError;

/// Embedded schema migrations for the `graves` and `bodies` tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates or upgrades the schema.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Builds the error mapper for a failed statement: logs the storage error and
/// wraps it as `ServiceFailure` with `message` as context.
pub(crate) fn storage_failure(
    message: impl Into<String>,
) -> impl FnOnce(sqlx::Error) -> ManagerError {
    let message = message.into();
    move |e| {
        error!(error = %e, "{}", message);
        ManagerError::service_failure(message, e)
    }
}
