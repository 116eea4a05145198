//! SQLite-backed body store.
use async_trait::async_trait;
use cemetery_shared::types::{Body, BodyId};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use super::rows::{at_most_one, bodies_from_rows, BodyRow};
use super::storage_failure;
use crate::arguments::{require, require_id};
use crate::clock::Clock;
use crate::errors::ManagerError;
use crate::interfaces::BodyRepository;
use crate::validation::validate_body;

/// Body store over the `bodies` table.
///
/// When constructed with a clock, birth and death dates after the clock's
/// current date are rejected.
pub struct SqliteBodyRepository {
    pool: SqlitePool,
    clock: Option<Arc<dyn Clock>>,
}

impl SqliteBodyRepository {
    /// Creates a store that does not check dates against the current date.
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite pool with the schema applied
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, clock: None }
    }

    /// Creates a store that rejects dates later than `clock.today()`.
    pub fn with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock: Some(clock),
        }
    }

    fn validate(&self, body: &Body) -> Result<(), ManagerError> {
        validate_body(body, self.clock.as_deref())
    }
}

#[async_trait]
impl BodyRepository for SqliteBodyRepository {
    async fn create_body(&self, body: Option<&mut Body>) -> Result<(), ManagerError> {
        let body = require(body, "body")?;
        if body.id.is_some() {
            return Err(ManagerError::illegal_entity("body id is already set"));
        }
        self.validate(body)?;

        let result = sqlx::query(
            "INSERT INTO bodies (name, gender, born, died, vampire) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(body.name.as_deref())
        .bind(body.gender.map(|g| g.as_str()))
        .bind(body.born)
        .bind(body.died)
        .bind(body.vampire)
        .execute(&self.pool)
        .await
        .map_err(storage_failure("Error when inserting body into db"))?;

        let id = result.last_insert_rowid();
        body.id = Some(id);
        debug!(body_id = id, "Body created");
        Ok(())
    }

    async fn get_body(&self, id: Option<BodyId>) -> Result<Option<Body>, ManagerError> {
        let id = require(id, "id")?;

        let rows: Vec<BodyRow> = sqlx::query_as(
            "SELECT id, name, gender, born, died, vampire FROM bodies WHERE id = ?",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure(format!(
            "Error when getting body with id = {} from DB",
            id
        )))?;

        at_most_one(rows, &format!("body id {}", id))?
            .map(Body::try_from)
            .transpose()
    }

    async fn update_body(&self, body: Option<&Body>) -> Result<(), ManagerError> {
        let body = require(body, "body")?;
        self.validate(body)?;
        let id = require_id(body.id, "body")?;

        let result = sqlx::query(
            "UPDATE bodies SET name = ?, gender = ?, born = ?, died = ?, vampire = ? WHERE id = ?",
        )
        .bind(body.name.as_deref())
        .bind(body.gender.map(|g| g.as_str()))
        .bind(body.born)
        .bind(body.died)
        .bind(body.vampire)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_failure(format!("Error when updating body {} in the db", body)))?;

        let count = result.rows_affected();
        if count != 1 {
            return Err(ManagerError::illegal_entity(format!(
                "updated {} body records instead of 1",
                count
            )));
        }
        debug!(body_id = id, "Body updated");
        Ok(())
    }

    async fn delete_body(&self, body: Option<&Body>) -> Result<(), ManagerError> {
        let body = require(body, "body")?;
        let id = require_id(body.id, "body")?;

        let result = sqlx::query("DELETE FROM bodies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_failure(format!("Error when deleting body {} from the db", body)))?;

        let count = result.rows_affected();
        if count != 1 {
            return Err(ManagerError::illegal_entity(format!(
                "deleted {} instead of 1 body",
                count
            )));
        }
        debug!(body_id = id, "Body deleted");
        Ok(())
    }

    async fn find_all_bodies(&self) -> Result<Vec<Body>, ManagerError> {
        let rows: Vec<BodyRow> = sqlx::query_as(
            "SELECT id, name, gender, born, died, vampire FROM bodies ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("Error when getting all bodies from DB"))?;

        bodies_from_rows(rows)
    }
}
