//! Lifecycle adapters over the control-plane client, one per resource kind.
//!
//! Each kind has its own API quirks: indexes report `status.state` and may
//! carry deletion protection, collections report a bare `status` string,
//! and backups have no describe-by-name endpoint at all.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use petal_client::models::BackupModel;
use petal_client::{ClientError, ControlPlaneClient, DeletionProtection};
use petal_core::{
    DeletionFailure, LifecycleError, LifecycleState, ResourceKind, ResourceLifecycle, ResourceRef,
};
use tracing::{debug, error};

fn map_err(kind: ResourceKind, name: &str, err: ClientError) -> LifecycleError {
    if err.is_not_found() {
        LifecycleError::not_found(kind, name)
    } else {
        LifecycleError::Other(anyhow::Error::new(err))
    }
}

fn opaque(err: ClientError) -> LifecycleError {
    LifecycleError::Other(anyhow::Error::new(err))
}

/// Index lifecycle operations, including the deletion-protection gate.
pub struct IndexAdapter {
    client: Arc<ControlPlaneClient>,
    /// Pause between protection-disable calls, matching the loop's pacing.
    pause: Duration,
    /// When false, the presence of any protected index fails the whole
    /// index pass up front instead of silently disabling protection.
    force: bool,
}

impl IndexAdapter {
    pub fn new(client: Arc<ControlPlaneClient>, pause: Duration, force: bool) -> Self {
        Self {
            client,
            pause,
            force,
        }
    }
}

#[async_trait]
impl ResourceLifecycle for IndexAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Index
    }

    async fn list(&self) -> Result<Vec<ResourceRef>, LifecycleError> {
        let indexes = self.client.list_indexes().await.map_err(opaque)?;
        Ok(indexes
            .into_iter()
            .map(|index| ResourceRef {
                deletion_protected: index.deletion_protection.is_enabled(),
                name: index.name,
            })
            .collect())
    }

    async fn describe_state(&self, name: &str) -> Result<LifecycleState, LifecycleError> {
        let index = self
            .client
            .describe_index(name)
            .await
            .map_err(|err| map_err(ResourceKind::Index, name, err))?;
        Ok(LifecycleState::parse(&index.status.state))
    }

    async fn delete(&self, name: &str) -> Result<(), LifecycleError> {
        self.client
            .delete_index(name)
            .await
            .map_err(|err| map_err(ResourceKind::Index, name, err))
    }

    /// Disable deletion protection on every protected index before the
    /// generic loop runs. An index whose protection cannot be disabled is
    /// recorded as undeletable and excluded from the loop entirely.
    async fn prepare(
        &self,
        resources: &[ResourceRef],
    ) -> Result<Vec<DeletionFailure>, LifecycleError> {
        let protected: Vec<&ResourceRef> = resources
            .iter()
            .filter(|resource| resource.deletion_protected)
            .collect();
        if protected.is_empty() {
            return Ok(Vec::new());
        }

        if !self.force {
            let names: Vec<&str> = protected.iter().map(|r| r.name.as_str()).collect();
            return Err(LifecycleError::Other(anyhow::anyhow!(
                "indexes with deletion protection enabled cannot be deleted: {names:?}"
            )));
        }

        let mut failures = Vec::new();
        for resource in protected {
            debug!(index = %resource.name, "disabling deletion protection");
            tokio::time::sleep(self.pause).await;
            if let Err(err) = self
                .client
                .configure_index(&resource.name, DeletionProtection::Disabled)
                .await
            {
                error!(index = %resource.name, error = %err, "could not disable deletion protection");
                failures.push(DeletionFailure::new(
                    ResourceKind::Index,
                    &resource.name,
                    format!("Failed to disable deletion protection: {err}"),
                ));
            }
        }
        Ok(failures)
    }
}

/// Collection lifecycle operations.
pub struct CollectionAdapter {
    client: Arc<ControlPlaneClient>,
}

impl CollectionAdapter {
    pub fn new(client: Arc<ControlPlaneClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceLifecycle for CollectionAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Collection
    }

    async fn list(&self) -> Result<Vec<ResourceRef>, LifecycleError> {
        let collections = self.client.list_collections().await.map_err(opaque)?;
        Ok(collections
            .into_iter()
            .map(|collection| ResourceRef::new(collection.name))
            .collect())
    }

    async fn describe_state(&self, name: &str) -> Result<LifecycleState, LifecycleError> {
        let collection = self
            .client
            .describe_collection(name)
            .await
            .map_err(|err| map_err(ResourceKind::Collection, name, err))?;
        Ok(LifecycleState::parse(&collection.status))
    }

    async fn delete(&self, name: &str) -> Result<(), LifecycleError> {
        self.client
            .delete_collection(name)
            .await
            .map_err(|err| map_err(ResourceKind::Collection, name, err))
    }
}

/// Backup lifecycle operations.
///
/// The API has no describe-by-name endpoint for backups, so both describe
/// and delete list all backups and scan for the name. The scan is
/// correctness-relevant: a name that is absent from the list is the only
/// "not found" signal available for backups.
pub struct BackupAdapter {
    client: Arc<ControlPlaneClient>,
}

impl BackupAdapter {
    pub fn new(client: Arc<ControlPlaneClient>) -> Self {
        Self { client }
    }

    async fn find_by_name(&self, name: &str) -> Result<BackupModel, LifecycleError> {
        let backups = self.client.list_backups().await.map_err(opaque)?;
        backups
            .into_iter()
            .find(|backup| backup.name == name)
            .ok_or_else(|| LifecycleError::not_found(ResourceKind::Backup, name))
    }
}

#[async_trait]
impl ResourceLifecycle for BackupAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Backup
    }

    async fn list(&self) -> Result<Vec<ResourceRef>, LifecycleError> {
        let backups = self.client.list_backups().await.map_err(opaque)?;
        Ok(backups
            .into_iter()
            .map(|backup| ResourceRef::new(backup.name))
            .collect())
    }

    async fn describe_state(&self, name: &str) -> Result<LifecycleState, LifecycleError> {
        let backup = self.find_by_name(name).await?;
        Ok(LifecycleState::parse(&backup.status))
    }

    async fn delete(&self, name: &str) -> Result<(), LifecycleError> {
        let backup = self.find_by_name(name).await?;
        self.client
            .delete_backup(&backup.backup_id)
            .await
            .map_err(|err| map_err(ResourceKind::Backup, name, err))
    }
}
