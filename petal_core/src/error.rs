//! Error type surfaced by `ResourceLifecycle` implementations.

use thiserror::Error;

use crate::types::ResourceKind;

/// Errors surfaced by a lifecycle adapter.
///
/// The deletion loop only needs to tell "the resource is already gone" apart
/// from everything else; remote causes stay opaque behind `Other`.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{kind} {name} not found")]
    NotFound { kind: ResourceKind, name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LifecycleError {
    pub fn not_found(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
