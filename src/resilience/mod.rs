//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Provider API call:
//!     → client sends, observes result
//!     → On failure: retries.rs (is the failure transient? is the method safe?)
//!     → backoff.rs (jittered exponential delay before the next attempt)
//! ```
//!
//! # Design Decisions
//! - Every attempt runs under the configured request timeout
//! - Retries only for idempotent requests
//! - Jittered backoff prevents thundering herd against a rate-limited API

pub mod backoff;
pub mod retries;

pub use backoff::backoff_delay;
pub use retries::{is_idempotent, is_retryable};
