//! SQLite implementation of the cemetery operations.
//!
//! Burial state lives in `bodies.grave_id`: `NULL` for an unburied body, the
//! grave's id otherwise. Only this module writes that column.
//!
//! ## Capacity under concurrency
//!
//! `put_body_into_grave` reads the grave's occupancy and writes the body's
//! `grave_id` in one transaction. SQLite allows a single writer at a time, so
//! the transaction starts with a write on the grave row that also returns its
//! capacity and occupancy. That statement takes the write lock before anything
//! is read, which makes it the equivalent of `SELECT ... FOR UPDATE`: a second
//! caller waits (bounded by the busy timeout) and then sees the first burial.
use async_trait::async_trait;
use cemetery_shared::types::{Body, Grave};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use super::rows::{at_most_one, bodies_from_rows, graves_from_rows, BodyRow, GraveRow};
use super::storage_failure;
use super::transaction::with_transaction;
use crate::arguments::{require, require_id};
use crate::errors::ManagerError;
use crate::interfaces::CemeteryRepository;

pub struct SqliteCemeteryRepository {
    pool: SqlitePool,
}

impl SqliteCemeteryRepository {
    /// Creates a new SQLite cemetery repository.
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite pool with the schema applied; shared with the body and
    ///   grave stores
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CemeteryRepository for SqliteCemeteryRepository {
    async fn find_grave_with_body(
        &self,
        body: Option<&Body>,
    ) -> Result<Option<Grave>, ManagerError> {
        let body = require(body, "body")?;
        let body_id = require_id(body.id, "body")?;

        let rows: Vec<GraveRow> = sqlx::query_as(
            r#"
            SELECT graves.id, graves.position_column, graves.position_row, graves.capacity, graves.note
            FROM graves JOIN bodies ON graves.id = bodies.grave_id
            WHERE bodies.id = ?
            "#,
        )
        .bind(body_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure(format!(
            "Error when trying to find grave with body {}",
            body
        )))?;

        at_most_one(rows, &format!("grave of body {}", body_id))?
            .map(Grave::try_from)
            .transpose()
    }

    async fn find_bodies_in_grave(&self, grave: Option<&Grave>) -> Result<Vec<Body>, ManagerError> {
        let grave = require(grave, "grave")?;
        let grave_id = require_id(grave.id, "grave")?;

        let rows: Vec<BodyRow> = sqlx::query_as(
            "SELECT id, name, gender, born, died, vampire FROM bodies WHERE grave_id = ? ORDER BY id",
        )
        .bind(grave_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure(format!(
            "Error when trying to find bodies in grave {}",
            grave
        )))?;

        bodies_from_rows(rows)
    }

    async fn find_unburied_bodies(&self) -> Result<Vec<Body>, ManagerError> {
        let rows: Vec<BodyRow> = sqlx::query_as(
            "SELECT id, name, gender, born, died, vampire FROM bodies WHERE grave_id IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("Error when trying to find unburied bodies"))?;

        bodies_from_rows(rows)
    }

    async fn find_empty_graves(&self) -> Result<Vec<Grave>, ManagerError> {
        let rows: Vec<GraveRow> = sqlx::query_as(
            r#"
            SELECT graves.id, graves.position_column, graves.position_row, graves.capacity, graves.note
            FROM graves LEFT JOIN bodies ON graves.id = bodies.grave_id
            GROUP BY graves.id, graves.position_column, graves.position_row, graves.capacity, graves.note
            HAVING COUNT(bodies.id) = 0
            ORDER BY graves.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("Error when trying to find empty graves"))?;

        graves_from_rows(rows)
    }

    async fn find_graves_with_free_space(&self) -> Result<Vec<Grave>, ManagerError> {
        let rows: Vec<GraveRow> = sqlx::query_as(
            r#"
            SELECT graves.id, graves.position_column, graves.position_row, graves.capacity, graves.note
            FROM graves LEFT JOIN bodies ON graves.id = bodies.grave_id
            GROUP BY graves.id, graves.position_column, graves.position_row, graves.capacity, graves.note
            HAVING COUNT(bodies.id) < graves.capacity
            ORDER BY graves.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure(
            "Error when trying to find graves with some free space",
        ))?;

        graves_from_rows(rows)
    }

    async fn put_body_into_grave(
        &self,
        body: Option<&Body>,
        grave: Option<&Grave>,
    ) -> Result<(), ManagerError> {
        let grave = require(grave, "grave")?;
        let grave_id = require_id(grave.id, "grave")?;
        let body = require(body, "body")?;
        let body_id = require_id(body.id, "body")?;

        let grave_label = grave.to_string();
        let body_label = body.to_string();

        let result = with_transaction(&self.pool, "put body into grave", move |tx| {
            Box::pin(async move {
                // Write-locks the grave before reading its occupancy.
                let occupancy: Vec<(i64, i64)> = sqlx::query_as(
                    r#"
                    UPDATE graves SET capacity = capacity
                    WHERE id = ?1
                    RETURNING capacity, (SELECT COUNT(*) FROM bodies WHERE grave_id = ?1)
                    "#,
                )
                .bind(grave_id)
                .fetch_all(&mut **tx)
                .await
                .map_err(storage_failure(format!(
                    "Error when checking free space in {}",
                    grave_label
                )))?;

                let (capacity, occupied) = at_most_one(occupancy, &grave_label)?.ok_or_else(|| {
                    ManagerError::illegal_entity(format!(
                        "{} does not exist in the database",
                        grave_label
                    ))
                })?;
                if occupied >= capacity {
                    return Err(ManagerError::illegal_entity(format!(
                        "{} is already full",
                        grave_label
                    )));
                }

                let updated = sqlx::query(
                    "UPDATE bodies SET grave_id = ? WHERE id = ? AND grave_id IS NULL",
                )
                .bind(grave_id)
                .bind(body_id)
                .execute(&mut **tx)
                .await
                .map_err(storage_failure("Error when putting body into grave"))?;

                match updated.rows_affected() {
                    1 => Ok(()),
                    0 => Err(ManagerError::illegal_entity(format!(
                        "{} not found or it is already placed in some grave",
                        body_label
                    ))),
                    n => Err(ManagerError::integrity(format!(
                        "{} bodies updated for {}",
                        n, body_label
                    ))),
                }
            })
        })
        .await;

        match &result {
            Ok(()) => debug!(body_id, grave_id, "Body put into grave"),
            Err(ManagerError::IllegalEntity(reason)) => {
                warn!(body_id, grave_id, reason = %reason, "Burial rejected")
            }
            Err(_) => {}
        }
        result
    }

    async fn remove_body_from_grave(
        &self,
        body: Option<&Body>,
        grave: Option<&Grave>,
    ) -> Result<(), ManagerError> {
        let grave = require(grave, "grave")?;
        let grave_id = require_id(grave.id, "grave")?;
        let body = require(body, "body")?;
        let body_id = require_id(body.id, "body")?;

        // A single conditional statement: releasing space needs no capacity check.
        let result = sqlx::query("UPDATE bodies SET grave_id = NULL WHERE id = ? AND grave_id = ?")
            .bind(body_id)
            .bind(grave_id)
            .execute(&self.pool)
            .await
            .map_err(storage_failure(format!(
                "Error when removing body {} from grave {}",
                body, grave
            )))?;

        match result.rows_affected() {
            1 => {
                debug!(body_id, grave_id, "Body removed from grave");
                Ok(())
            }
            0 => {
                warn!(body_id, grave_id, "Removal rejected");
                Err(ManagerError::illegal_entity(format!(
                    "{} is not placed in {}",
                    body, grave
                )))
            }
            n => Err(ManagerError::integrity(format!(
                "{} bodies updated for {}",
                n, body
            ))),
        }
    }
}
