//! Scripted fake adapter for loop and orchestrator tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use petal_core::{LifecycleError, LifecycleState, ResourceKind, ResourceLifecycle, ResourceRef};

type DescribeFn = Box<dyn Fn(&str, u32) -> Result<LifecycleState, LifecycleError> + Send + Sync>;
type DeleteFn = Box<dyn Fn(&str, u32) -> Result<(), LifecycleError> + Send + Sync>;

/// A `ResourceLifecycle` whose behavior is scripted per call. The closures
/// receive the resource name and the 1-based call number for that name.
pub struct FakeAdapter {
    kind: ResourceKind,
    resources: Vec<ResourceRef>,
    describe: DescribeFn,
    delete: DeleteFn,
    describe_calls: Mutex<HashMap<String, u32>>,
    delete_calls: Mutex<HashMap<String, u32>>,
    list_calls: AtomicUsize,
    list_log: Option<Arc<Mutex<Vec<ResourceKind>>>>,
}

impl FakeAdapter {
    pub fn new(kind: ResourceKind, resources: Vec<ResourceRef>) -> Self {
        Self {
            kind,
            resources,
            describe: Box::new(|_, _| Ok(LifecycleState::Ready)),
            delete: Box::new(|_, _| Ok(())),
            describe_calls: Mutex::new(HashMap::new()),
            delete_calls: Mutex::new(HashMap::new()),
            list_calls: AtomicUsize::new(0),
            list_log: None,
        }
    }

    pub fn on_describe(
        mut self,
        describe: impl Fn(&str, u32) -> Result<LifecycleState, LifecycleError> + Send + Sync + 'static,
    ) -> Self {
        self.describe = Box::new(describe);
        self
    }

    pub fn on_delete(
        mut self,
        delete: impl Fn(&str, u32) -> Result<(), LifecycleError> + Send + Sync + 'static,
    ) -> Self {
        self.delete = Box::new(delete);
        self
    }

    /// Record every list call into a shared log, for cross-adapter ordering
    /// assertions.
    pub fn with_list_log(mut self, log: Arc<Mutex<Vec<ResourceKind>>>) -> Self {
        self.list_log = Some(log);
        self
    }

    pub fn describe_count(&self, name: &str) -> u32 {
        self.describe_calls
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn delete_count(&self, name: &str) -> u32 {
        self.delete_calls
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceLifecycle for FakeAdapter {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn list(&self) -> Result<Vec<ResourceRef>, LifecycleError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.list_log {
            log.lock().unwrap().push(self.kind);
        }
        Ok(self.resources.clone())
    }

    async fn describe_state(&self, name: &str) -> Result<LifecycleState, LifecycleError> {
        let nth = {
            let mut calls = self.describe_calls.lock().unwrap();
            let entry = calls.entry(name.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };
        (self.describe)(name, nth)
    }

    async fn delete(&self, name: &str) -> Result<(), LifecycleError> {
        let nth = {
            let mut calls = self.delete_calls.lock().unwrap();
            let entry = calls.entry(name.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };
        (self.delete)(name, nth)
    }
}

pub fn transient(message: &str) -> LifecycleError {
    LifecycleError::Other(anyhow::anyhow!("{message}"))
}
