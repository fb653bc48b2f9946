//! Edge provider API subsystem.
//!
//! # Data Flow
//! ```text
//! sync workflow
//!     → client.rs (bearer auth, request id, retry with backoff)
//!     → provider REST API (filters, firewall rules, purge_cache)
//!     → types.rs (envelope decode, success flag, error surfacing)
//! ```
//!
//! # Design Decisions
//! - Zone-scoped: every endpoint lives under /zones/{zone_id}/
//! - The envelope's `success` flag is authoritative even on HTTP 200
//! - Only objects carrying this tool's `ref` marker are ever touched

pub mod client;
pub mod types;

pub use client::EdgeClient;
pub use types::{
    ApiEnvelope, ApiMessage, Filter, FilterRef, FirewallRule, NewFilter, NewFirewallRule,
    ProviderError, ProviderResult, PurgeReceipt, PurgeRequest,
};
