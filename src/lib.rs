//! Path allowlist generation and edge firewall sync.

pub mod config;
pub mod inventory;
pub mod pathset;
pub mod provider;
pub mod resilience;
pub mod sync;

pub use config::GuardConfig;
pub use pathset::{CompactionOutcome, Compactor};
pub use provider::EdgeClient;
