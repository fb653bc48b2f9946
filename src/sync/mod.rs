//! Provider synchronization workflows.
//!
//! # Data Flow
//! ```text
//! CompactionOutcome
//!     → firewall.rs::sync_firewall
//!         find filter by ref → create / update / leave
//!         find rule by ref   → create / update / leave
//!     → SyncReport (printed as JSON by the CLI)
//!
//! teardown: delete rule, then filter
//! purge:    one of the two payload shapes → purge_cache
//! ```
//!
//! # Design Decisions
//! - The `ref` marker is the only ownership signal; ids are never stored
//!   locally between runs
//! - Sync is idempotent; running it twice in a row performs zero writes
//!   the second time

pub mod firewall;
pub mod purge;

use thiserror::Error;

use crate::provider::types::ProviderError;

/// Errors from the sync workflows.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("specify either --everything or at least one --file, not both")]
    AmbiguousPurge,
}

pub use firewall::{sync_firewall, teardown, SyncAction, SyncReport, TeardownReport};
pub use purge::{build_purge_request, purge};
