//! # Petal Control-Plane Client
//!
//! HTTP client for the Petal management API, covering only the operations
//! the cleanup tooling consumes: list/describe/delete for indexes,
//! collections, and backups, plus the deletion-protection toggle for
//! indexes. Transient failures (429, 5xx, timeouts) are retried with
//! bounded exponential backoff and jitter.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod retry;

pub use client::ControlPlaneClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use models::{BackupModel, CollectionModel, DeletionProtection, IndexModel};
pub use retry::RetryPolicy;
