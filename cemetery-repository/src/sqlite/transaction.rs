//! Scoped transactions.
//!
//! [`with_transaction`] begins a transaction on a connection of its own, runs
//! the body, commits when the body succeeds and rolls back when it fails. If
//! the future is dropped half way, the `sqlx::Transaction` guard rolls back
//! when the connection goes back to the pool. The connection leaves the pool
//! in auto-commit mode again in every case.
use futures::future::BoxFuture;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{error, warn};

use crate::errors::ManagerError;

pub type SqliteTransaction = Transaction<'static, Sqlite>;

/// Runs `body` inside one transaction.
///
/// # Arguments
///
/// * `pool` - Pool the connection is taken from
/// * `context` - Operation name used in logs and `ServiceFailure` messages
/// * `body` - Statements to run; returning `Err` rolls everything back
///
/// # Returns
///
/// * `Ok(T)` - The body succeeded and the transaction was committed
/// * `Err(ManagerError)` - The body's own error after rollback, or
///   `ServiceFailure` when begin or commit failed
pub async fn with_transaction<T, F>(
    pool: &SqlitePool,
    context: &str,
    body: F,
) -> Result<T, ManagerError>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut SqliteTransaction) -> BoxFuture<'c, Result<T, ManagerError>> + Send,
{
    let mut tx = pool.begin().await.map_err(|e| {
        error!(error = %e, context, "Failed to begin transaction");
        ManagerError::service_failure(format!("{}: cannot begin transaction", context), e)
    })?;

    match body(&mut tx).await {
        Ok(value) => {
            tx.commit().await.map_err(|e| {
                error!(error = %e, context, "Failed to commit transaction");
                ManagerError::service_failure(format!("{}: cannot commit transaction", context), e)
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, context, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}
