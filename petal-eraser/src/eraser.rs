//! The per-kind deletion loop.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use petal_core::{DeletionFailure, LifecycleError, ResourceLifecycle, ResourceRef};
use tracing::{debug, error};

use crate::retry::RetryCounter;

/// Tuning for one deletion pass.
#[derive(Debug, Clone)]
pub struct EraserConfig {
    /// Fixed pause before every queue iteration, regardless of queue size.
    /// Throttles request rate so large projects do not trip control-plane
    /// rate limits.
    pub pause: Duration,
    /// Ceiling for describe failures, not-yet-deletable observations, and
    /// delete failures, each counted independently per resource.
    pub max_retries: u32,
    /// Ceiling for observations of a resource that is already terminating.
    /// Healthy terminations can take a while, so this budget is larger than
    /// `max_retries`.
    pub terminating_max_retries: u32,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            pause: Duration::from_secs(5),
            max_retries: 3,
            terminating_max_retries: 10,
        }
    }
}

/// Drains one kind of resource from a project.
///
/// Resources cycle through a FIFO queue with tail requeue, so no single
/// stuck resource can starve the others from being rechecked.
#[derive(Debug, Clone, Default)]
pub struct Eraser {
    config: EraserConfig,
}

impl Eraser {
    pub fn new(config: EraserConfig) -> Self {
        Self { config }
    }

    /// Delete every resource the adapter lists. Returns a failure record
    /// for each resource that exhausted one of its retry ceilings; an empty
    /// list means the kind is fully drained.
    pub async fn delete_all(
        &self,
        adapter: &dyn ResourceLifecycle,
    ) -> Result<Vec<DeletionFailure>, LifecycleError> {
        let kind = adapter.kind();
        let resources = adapter.list().await?;
        if resources.is_empty() {
            debug!("no {} to delete", kind.plural());
            return Ok(Vec::new());
        }

        // Resources that fail the prepare phase (e.g. deletion protection
        // could not be disabled) are recorded and never enter the loop.
        let mut failures = adapter.prepare(&resources).await?;
        let excluded: HashSet<&str> = failures.iter().map(|f| f.name.as_str()).collect();
        let queue: VecDeque<ResourceRef> = resources
            .iter()
            .filter(|resource| !excluded.contains(resource.name.as_str()))
            .cloned()
            .collect();
        drop(excluded);

        self.drain(adapter, queue, &mut failures).await;

        if failures.is_empty() {
            debug!("all {} deleted", kind.plural());
        } else {
            error!("{} {} could not be deleted", failures.len(), kind.plural());
            for failure in &failures {
                error!(%kind, name = %failure.name, reason = %failure.reason, "not deleted");
            }
        }
        Ok(failures)
    }

    async fn drain(
        &self,
        adapter: &dyn ResourceLifecycle,
        mut queue: VecDeque<ResourceRef>,
        failures: &mut Vec<DeletionFailure>,
    ) {
        let kind = adapter.kind();
        let mut state_check_retries = RetryCounter::new(self.config.max_retries);
        let mut is_deletable_retries = RetryCounter::new(self.config.max_retries);
        let mut failed_delete_retries = RetryCounter::new(self.config.max_retries);
        let mut is_terminating_retries = RetryCounter::new(self.config.terminating_max_retries);

        while !queue.is_empty() {
            debug!("{} {} left to delete", queue.len(), kind.plural());
            tokio::time::sleep(self.config.pause).await;
            let Some(resource) = queue.pop_front() else {
                break;
            };
            let resource_name = resource.name.clone();
            let name = resource_name.as_str();

            state_check_retries.increment(name);
            let state = match adapter.describe_state(name).await {
                Ok(state) => state,
                Err(err) if err.is_not_found() => {
                    debug!(%kind, name, "already deleted, continuing");
                    continue;
                }
                Err(err) => {
                    if state_check_retries.is_maxed_out(name) {
                        error!(%kind, name, error = %err, "giving up describing");
                        failures.push(DeletionFailure::new(
                            kind,
                            name,
                            format!("Error describing {kind} {name}: {err}"),
                        ));
                    } else {
                        debug!(%kind, name, "describe failed, returned to the back of the queue");
                        queue.push_back(resource);
                    }
                    continue;
                }
            };
            debug!(%kind, name, %state, "observed state");

            if state.is_terminating() {
                is_terminating_retries.increment(name);
                if is_terminating_retries.is_maxed_out(name) {
                    error!(%kind, name, "stuck terminating, skipping");
                    failures.push(DeletionFailure::new(
                        kind,
                        name,
                        format!("{kind} has been in the terminating state for too long"),
                    ));
                } else {
                    debug!(%kind, name, "already being deleted, requeueing to recheck later");
                    queue.push_back(resource);
                }
                continue;
            }

            if !state.is_deletable() {
                is_deletable_retries.increment(name);
                if is_deletable_retries.is_maxed_out(name) {
                    let attempts = is_deletable_retries.count(name);
                    error!(%kind, name, %state, attempts, "never became deletable, skipping");
                    failures.push(DeletionFailure::new(
                        kind,
                        name,
                        format!("Not in a deleteable state after {attempts} attempts"),
                    ));
                } else {
                    debug!(%kind, name, %state, "not deletable yet, returned to the back of the queue");
                    queue.push_back(resource);
                }
                continue;
            }

            match adapter.delete(name).await {
                Ok(()) => {
                    debug!(%kind, name, "deleted");
                }
                Err(err) if err.is_not_found() => {
                    debug!(%kind, name, "already deleted, continuing");
                }
                Err(err) => {
                    error!(%kind, name, error = %err, "delete failed");
                    failed_delete_retries.increment(name);
                    if failed_delete_retries.is_maxed_out(name) {
                        let attempts = failed_delete_retries.count(name);
                        failures.push(DeletionFailure::new(
                            kind,
                            name,
                            format!("Failed to delete after {attempts} attempts"),
                        ));
                    } else {
                        debug!(%kind, name, "returned to the back of the queue");
                        queue.push_back(resource);
                    }
                }
            }
        }
    }
}
