use async_trait::async_trait;
use cemetery_shared::types::{Grave, GraveId};

use crate::errors::ManagerError;

/// Create, read, update and delete operations for graves.
///
/// Same argument and error conventions as [`crate::interfaces::BodyRepository`].
#[async_trait]
pub trait GraveRepository: Send + Sync {
    async fn create_grave(&self, grave: Option<&mut Grave>) -> Result<(), ManagerError>;

    async fn get_grave(&self, id: Option<GraveId>) -> Result<Option<Grave>, ManagerError>;

    /// Overwrites position, capacity and note. The capacity may be lowered
    /// below the number of bodies already buried; such a grave is then treated
    /// as full.
    async fn update_grave(&self, grave: Option<&Grave>) -> Result<(), ManagerError>;

    /// Deletes a grave. A grave that still holds bodies cannot be deleted and
    /// the attempt is reported as `IllegalEntity`.
    async fn delete_grave(&self, grave: Option<&Grave>) -> Result<(), ManagerError>;

    async fn find_all_graves(&self) -> Result<Vec<Grave>, ManagerError>;
}
