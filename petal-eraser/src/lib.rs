//! # Petal Project Eraser
//!
//! Drains a Petal project of its indexes, collections, and backups so the
//! project itself can be deleted. Built for CI cleanup, where hanging is
//! worse than giving up: every retry has an explicit ceiling, and whatever
//! cannot be deleted is reported rather than retried forever.
//!
//! The core is a single-queue reconciliation loop per resource kind
//! ([`Eraser`]): each resource is described, requeued while it is busy or
//! still terminating, and deleted once it reaches a deletable state, with
//! independent retry budgets per failure category. [`ProjectCleaner`] wraps
//! whole passes in a fixed multi-round delay ladder.

pub mod adapters;
pub mod eraser;
pub mod orchestrator;
pub mod retry;

pub use adapters::{BackupAdapter, CollectionAdapter, IndexAdapter};
pub use eraser::{Eraser, EraserConfig};
pub use orchestrator::{CleanupError, PASS_DELAYS_SECS, ProjectCleaner};
pub use retry::RetryCounter;
