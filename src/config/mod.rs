//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → env override (PATHGUARD_API_TOKEN)
//!     → validation.rs (semantic checks)
//!     → GuardConfig (validated, immutable)
//!
//! API commands additionally run:
//!     validation.rs::validate_for_api (zone + token present)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a run never mutates it
//! - All fields have defaults so `pathguard generate` works from an empty
//!   file plus an inventory section
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, ConfigError, API_TOKEN_ENV, DEFAULT_CONFIG_FILE};
pub use schema::{
    BudgetConfig, GuardConfig, InventoryConfig, ObservabilityConfig, ProviderConfig, RetryConfig,
    RuleConfig,
};
pub use validation::{validate_config, validate_for_api, ValidationError, KNOWN_ACTIONS};
