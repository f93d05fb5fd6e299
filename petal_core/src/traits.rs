//! Core traits for the cleanup tooling.

use async_trait::async_trait;

use crate::error::LifecycleError;
use crate::types::{DeletionFailure, LifecycleState, ResourceKind, ResourceRef};

/// Per-kind lifecycle operations against the control plane.
///
/// One implementation exists per resource kind. The deletion loop is generic
/// over this trait and never talks to the remote API directly, which also
/// keeps the loop testable with scripted fakes.
#[async_trait]
pub trait ResourceLifecycle: Send + Sync {
    /// The kind of resource this implementation manages.
    fn kind(&self) -> ResourceKind;

    /// List every resource of this kind in the project.
    async fn list(&self) -> Result<Vec<ResourceRef>, LifecycleError>;

    /// Fetch the current lifecycle state of one resource.
    ///
    /// Must fail with [`LifecycleError::NotFound`] when the resource no
    /// longer exists, distinguishable from transient failures.
    async fn describe_state(&self, name: &str) -> Result<LifecycleState, LifecycleError>;

    /// Delete one resource by name.
    async fn delete(&self, name: &str) -> Result<(), LifecycleError>;

    /// Clear guards that would prevent deletion, before the generic loop
    /// runs. Returns failure records for resources that must be excluded
    /// from the loop entirely. The default is a no-op; only indexes carry
    /// deletion protection today.
    async fn prepare(
        &self,
        _resources: &[ResourceRef],
    ) -> Result<Vec<DeletionFailure>, LifecycleError> {
        Ok(Vec::new())
    }
}
