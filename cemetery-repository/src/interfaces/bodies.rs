use async_trait::async_trait;
use cemetery_shared::types::{Body, BodyId};

use crate::errors::ManagerError;

/// Create, read, update and delete operations for bodies.
///
/// Entity arguments are optional so that an absent argument coming from a
/// caller is reported as `InvalidArgument` rather than rejected earlier.
/// Implementations never touch the grave a body rests in; that is left to
/// [`crate::interfaces::CemeteryRepository`].
#[async_trait]
pub trait BodyRepository: Send + Sync {
    /// Persists a new body and writes the generated id back onto it.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - `body` is `None`
    /// * `IllegalEntity` - the body already has an id
    /// * `Validation` - the body breaks a domain rule
    /// * `ServiceFailure` - the store failed
    async fn create_body(&self, body: Option<&mut Body>) -> Result<(), ManagerError>;

    /// Returns the body with the given id, or `None` if there is no such body.
    async fn get_body(&self, id: Option<BodyId>) -> Result<Option<Body>, ManagerError>;

    /// Overwrites the stored attributes of an existing body.
    ///
    /// Fails with `IllegalEntity` when the id is missing or when the update did
    /// not affect exactly one row.
    async fn update_body(&self, body: Option<&Body>) -> Result<(), ManagerError>;

    /// Deletes an existing body. Fails with `IllegalEntity` when the delete did
    /// not affect exactly one row.
    async fn delete_body(&self, body: Option<&Body>) -> Result<(), ManagerError>;

    /// Returns all bodies ordered by id.
    async fn find_all_bodies(&self) -> Result<Vec<Body>, ManagerError>;
}
