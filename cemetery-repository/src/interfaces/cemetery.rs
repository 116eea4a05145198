//! This module defines the `CemeteryRepository` trait: burying bodies into
//! graves under the capacity limit, and the queries that depend on burials.
use async_trait::async_trait;
use cemetery_shared::types::{Body, Grave};

use crate::errors::ManagerError;

/// Places bodies into graves and answers questions about who rests where.
///
/// A body is either unburied or buried in exactly one grave. The number of
/// bodies in a grave never exceeds its capacity in any committed state
/// produced by these operations, including under concurrent callers.
///
/// For every method taking entities, an absent argument is `InvalidArgument`
/// and an argument without id is `IllegalEntity`.
#[async_trait]
pub trait CemeteryRepository: Send + Sync {
    /// Returns the grave the body is buried in, or `None` for an unburied body.
    async fn find_grave_with_body(&self, body: Option<&Body>)
        -> Result<Option<Grave>, ManagerError>;

    /// Returns the bodies buried in the grave. Empty when there are none.
    async fn find_bodies_in_grave(&self, grave: Option<&Grave>) -> Result<Vec<Body>, ManagerError>;

    /// Returns the bodies not buried in any grave.
    async fn find_unburied_bodies(&self) -> Result<Vec<Body>, ManagerError>;

    /// Returns the graves holding no body.
    async fn find_empty_graves(&self) -> Result<Vec<Grave>, ManagerError>;

    /// Returns the graves holding fewer bodies than their capacity.
    async fn find_graves_with_free_space(&self) -> Result<Vec<Grave>, ManagerError>;

    /// Buries the body in the grave.
    ///
    /// The capacity check and the burial happen in one transaction. On any
    /// failure nothing is changed.
    ///
    /// # Errors
    ///
    /// * `IllegalEntity` - the grave does not exist or is full, or the body
    ///   does not exist or is already buried somewhere
    /// * `ServiceFailure` - the store failed
    async fn put_body_into_grave(
        &self,
        body: Option<&Body>,
        grave: Option<&Grave>,
    ) -> Result<(), ManagerError>;

    /// Takes the body out of the grave. Fails with `IllegalEntity` when the
    /// body is not buried in that grave.
    async fn remove_body_from_grave(
        &self,
        body: Option<&Body>,
        grave: Option<&Grave>,
    ) -> Result<(), ManagerError>;
}
