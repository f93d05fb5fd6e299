//! Domain types shared across the cleanup tooling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kinds of project-scoped resources the cleanup tooling manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Index,
    Collection,
    Backup,
}

impl ResourceKind {
    /// Plural form used in log lines and summaries.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Index => "indexes",
            Self::Collection => "collections",
            Self::Backup => "backups",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Index => "index",
            Self::Collection => "collection",
            Self::Backup => "backup",
        };
        f.write_str(label)
    }
}

/// Lifecycle state reported by the control plane for a resource.
///
/// The remote vocabulary is open (new states can appear without notice), so
/// anything unrecognized is carried verbatim in `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Ready,
    InitializationFailed,
    Terminating,
    Terminated,
    Other(String),
}

impl LifecycleState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Ready" => Self::Ready,
            "InitializationFailed" => Self::InitializationFailed,
            "Terminating" => Self::Terminating,
            "Terminated" => Self::Terminated,
            other => Self::Other(other.to_string()),
        }
    }

    /// Deletion may be attempted from these states.
    pub fn is_deletable(&self) -> bool {
        matches!(self, Self::Ready | Self::InitializationFailed)
    }

    /// The control plane is already tearing the resource down.
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Terminating | Self::Terminated)
    }
}

impl From<&str> for LifecycleState {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("Ready"),
            Self::InitializationFailed => f.write_str("InitializationFailed"),
            Self::Terminating => f.write_str("Terminating"),
            Self::Terminated => f.write_str("Terminated"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Handle to a remote resource as returned by a list call.
///
/// The deletion loop reads only `name`; `deletion_protected` is consumed by
/// the index prepare phase and is never set for the other kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub name: String,
    pub deletion_protected: bool,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deletion_protected: false,
        }
    }

    pub fn protected(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deletion_protected: true,
        }
    }
}

/// Permanent failure record for a resource that exhausted one of its retry
/// ceilings during a deletion pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionFailure {
    pub kind: ResourceKind,
    pub name: String,
    pub reason: String,
}

impl DeletionFailure {
    pub fn new(kind: ResourceKind, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            reason: reason.into(),
        }
    }
}
