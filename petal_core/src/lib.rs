//! # Petal Admin Core
//!
//! Shared types and traits for the Petal admin cleanup tooling.
//!
//! This crate provides:
//! - Domain types for project-scoped resources and their lifecycle states
//! - The `ResourceLifecycle` trait implemented by the per-kind adapters
//! - The error type adapters surface to the deletion loop

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items for convenience
pub use error::LifecycleError;
pub use traits::ResourceLifecycle;
pub use types::{DeletionFailure, LifecycleState, ResourceKind, ResourceRef};
