//! Wire models for the control-plane API.
//!
//! Only the fields the cleanup tooling consumes are modeled; unknown fields
//! in responses are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionProtection {
    Enabled,
    #[default]
    Disabled,
}

impl DeletionProtection {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexStatus {
    #[serde(default)]
    pub ready: bool,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexModel {
    pub name: String,
    #[serde(default)]
    pub dimension: Option<u32>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub deletion_protection: DeletionProtection,
    pub status: IndexStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexList {
    #[serde(default)]
    pub indexes: Vec<IndexModel>,
}

/// Collections report a bare status string rather than a nested status
/// object.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionModel {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub record_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionList {
    #[serde(default)]
    pub collections: Vec<CollectionModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackupModel {
    pub backup_id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub source_index_name: Option<String>,
}

/// Backups are listed under a `data` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BackupList {
    #[serde(default)]
    pub data: Vec<BackupModel>,
}

#[derive(Debug, Serialize)]
pub struct ConfigureIndexRequest {
    pub deletion_protection: DeletionProtection,
}
