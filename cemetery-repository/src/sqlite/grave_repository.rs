//! SQLite-backed grave store.
use async_trait::async_trait;
use cemetery_shared::types::{Grave, GraveId};
use sqlx::SqlitePool;
use tracing::debug;

use super::rows::{at_most_one, graves_from_rows, GraveRow};
use super::storage_failure;
use crate::arguments::{require, require_id};
use crate::errors::ManagerError;
use crate::interfaces::GraveRepository;
use crate::validation::validate_grave;

/// Grave store over the `graves` table.
pub struct SqliteGraveRepository {
    pool: SqlitePool,
}

impl SqliteGraveRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GraveRepository for SqliteGraveRepository {
    async fn create_grave(&self, grave: Option<&mut Grave>) -> Result<(), ManagerError> {
        let grave = require(grave, "grave")?;
        if grave.id.is_some() {
            return Err(ManagerError::illegal_entity("grave id is already set"));
        }
        validate_grave(grave)?;

        let result = sqlx::query(
            "INSERT INTO graves (position_column, position_row, capacity, note) VALUES (?, ?, ?, ?)",
        )
        .bind(grave.column)
        .bind(grave.row)
        .bind(grave.capacity)
        .bind(grave.note.as_deref())
        .execute(&self.pool)
        .await
        .map_err(storage_failure("Error when inserting grave into db"))?;

        let id = result.last_insert_rowid();
        grave.id = Some(id);
        debug!(grave_id = id, capacity = grave.capacity, "Grave created");
        Ok(())
    }

    async fn get_grave(&self, id: Option<GraveId>) -> Result<Option<Grave>, ManagerError> {
        let id = require(id, "id")?;

        let rows: Vec<GraveRow> = sqlx::query_as(
            "SELECT id, position_column, position_row, capacity, note FROM graves WHERE id = ?",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure(format!(
            "Error when getting grave with id = {} from DB",
            id
        )))?;

        at_most_one(rows, &format!("grave id {}", id))?
            .map(Grave::try_from)
            .transpose()
    }

    async fn update_grave(&self, grave: Option<&Grave>) -> Result<(), ManagerError> {
        let grave = require(grave, "grave")?;
        validate_grave(grave)?;
        let id = require_id(grave.id, "grave")?;

        // Lowering the capacity below the current number of bodies is allowed;
        // the grave then reports as full until bodies are removed.
        let result = sqlx::query(
            "UPDATE graves SET position_column = ?, position_row = ?, capacity = ?, note = ? WHERE id = ?",
        )
        .bind(grave.column)
        .bind(grave.row)
        .bind(grave.capacity)
        .bind(grave.note.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_failure(format!("Error when updating grave {} in the db", grave)))?;

        let count = result.rows_affected();
        if count != 1 {
            return Err(ManagerError::illegal_entity(format!(
                "updated {} instead of 1 grave",
                count
            )));
        }
        debug!(grave_id = id, "Grave updated");
        Ok(())
    }

    async fn delete_grave(&self, grave: Option<&Grave>) -> Result<(), ManagerError> {
        let grave = require(grave, "grave")?;
        let id = require_id(grave.id, "grave")?;

        let result = sqlx::query(
            "DELETE FROM graves WHERE id = ? AND NOT EXISTS (SELECT 1 FROM bodies WHERE bodies.grave_id = graves.id)",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_failure(format!("Error when deleting grave {} from the db", grave)))?;

        let count = result.rows_affected();
        if count != 1 {
            return Err(ManagerError::illegal_entity(format!(
                "deleted {} instead of 1 grave (missing, or still holding bodies)",
                count
            )));
        }
        debug!(grave_id = id, "Grave deleted");
        Ok(())
    }

    async fn find_all_graves(&self) -> Result<Vec<Grave>, ManagerError> {
        let rows: Vec<GraveRow> = sqlx::query_as(
            "SELECT id, position_column, position_row, capacity, note FROM graves ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("Error when getting all graves from DB"))?;

        graves_from_rows(rows)
    }
}
