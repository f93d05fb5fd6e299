//! Multi-round cleanup orchestrator.

use std::sync::Arc;
use std::time::Duration;

use petal_client::ControlPlaneClient;
use petal_core::{DeletionFailure, LifecycleError, ResourceLifecycle};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::adapters::{BackupAdapter, CollectionAdapter, IndexAdapter};
use crate::eraser::{Eraser, EraserConfig};

/// Fixed pre-pass delay ladder, in seconds. This is a bounded-total-time
/// fallback ladder, not exponential backoff; CI jobs depend on these exact
/// values.
pub const PASS_DELAYS_SECS: [u64; 5] = [0, 60, 120, 240, 240];

#[derive(Debug, Error)]
pub enum CleanupError {
    /// Undeletable resources remained after every pass.
    #[error("{count} resources could not be deleted after {passes} cleanup passes")]
    ResourcesRemain { count: usize, passes: usize },

    /// A pass failed outright, e.g. a list call kept failing.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Deletes every backup, collection, and index in a project, retrying whole
/// passes on a fixed delay ladder.
///
/// Pass order is fixed: backups depend on nothing, and indexes go last
/// because they may carry deletion protection or back collections.
pub struct ProjectCleaner {
    backups: Box<dyn ResourceLifecycle>,
    collections: Box<dyn ResourceLifecycle>,
    indexes: Box<dyn ResourceLifecycle>,
    eraser: Eraser,
    pass_delays: Vec<Duration>,
}

impl ProjectCleaner {
    pub fn new(
        backups: Box<dyn ResourceLifecycle>,
        collections: Box<dyn ResourceLifecycle>,
        indexes: Box<dyn ResourceLifecycle>,
        config: EraserConfig,
    ) -> Self {
        Self {
            backups,
            collections,
            indexes,
            eraser: Eraser::new(config),
            pass_delays: PASS_DELAYS_SECS
                .iter()
                .map(|secs| Duration::from_secs(*secs))
                .collect(),
        }
    }

    /// Cleaner over the real control-plane adapters. `force` controls
    /// whether deletion protection on indexes is disabled or treated as
    /// fatal.
    pub fn for_client(client: Arc<ControlPlaneClient>, config: EraserConfig, force: bool) -> Self {
        let backups = Box::new(BackupAdapter::new(client.clone()));
        let collections = Box::new(CollectionAdapter::new(client.clone()));
        let indexes = Box::new(IndexAdapter::new(client, config.pause, force));
        Self::new(backups, collections, indexes, config)
    }

    /// Override the pass delay ladder. The ladder's length is the total
    /// number of passes.
    pub fn with_pass_delays(mut self, delays: Vec<Duration>) -> Self {
        self.pass_delays = delays;
        self
    }

    async fn run_pass(&self) -> Result<Vec<DeletionFailure>, LifecycleError> {
        let mut failures = self.eraser.delete_all(self.backups.as_ref()).await?;
        failures.extend(self.eraser.delete_all(self.collections.as_ref()).await?);
        failures.extend(self.eraser.delete_all(self.indexes.as_ref()).await?);
        Ok(failures)
    }

    /// Drain the project, retrying failed passes on the fixed ladder. Fails
    /// once the ladder is exhausted with resources still remaining.
    pub async fn cleanup_all(&self) -> Result<(), CleanupError> {
        let passes = self.pass_delays.len();
        let mut remaining = 0;
        for (round, delay) in self.pass_delays.iter().enumerate() {
            if !delay.is_zero() {
                info!(round = round + 1, ?delay, "waiting before next cleanup pass");
                tokio::time::sleep(*delay).await;
            }
            let failures = self.run_pass().await?;
            if failures.is_empty() {
                info!(round = round + 1, "project fully drained");
                return Ok(());
            }
            remaining = failures.len();
            warn!(
                round = round + 1,
                remaining, "cleanup pass left undeletable resources"
            );
        }
        error!(remaining, passes, "cleanup passes exhausted");
        Err(CleanupError::ResourcesRemain {
            count: remaining,
            passes,
        })
    }
}
