//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the tool.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    /// Edge provider API settings.
    pub provider: ProviderConfig,

    /// Expression size budget settings.
    pub budget: BudgetConfig,

    /// Where the path inventory comes from.
    pub inventory: InventoryConfig,

    /// Managed filter and rule settings.
    pub rule: RuleConfig,

    /// Retry configuration for provider calls.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Edge provider API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the provider's REST API.
    pub api_base: String,

    /// Zone the managed filter and rule live in.
    pub zone_id: String,

    /// API token. The `PATHGUARD_API_TOKEN` environment variable takes
    /// precedence over this field, so the file never has to hold a secret.
    pub api_token: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.cloudflare.com/client/v4".to_string(),
            zone_id: String::new(),
            api_token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Expression size budget.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Hard character limit the provider enforces on expressions.
    pub hard_limit: usize,

    /// Headroom kept below the hard limit.
    pub safety_margin: usize,

    /// Upper bound on condense passes per run.
    pub max_condense_passes: usize,
}

impl BudgetConfig {
    /// The budget compaction actually targets.
    pub fn effective(&self) -> usize {
        self.hard_limit.saturating_sub(self.safety_margin)
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            hard_limit: 4096,
            safety_margin: 256,
            max_condense_passes: 10,
        }
    }
}

/// Path inventory sources.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InventoryConfig {
    /// JSON route manifest exported by the application, if any.
    pub routes_manifest: Option<PathBuf>,

    /// Directories whose files are served verbatim under `/`.
    pub asset_roots: Vec<PathBuf>,

    /// Paths to include that no source reports (health endpoints,
    /// well-known files).
    pub extra_paths: Vec<String>,

    /// Patterns whose matches are dropped from the inventory before
    /// compaction. Same wildcard grammar as the path set itself.
    pub ignore_patterns: Vec<String>,
}

/// Managed filter and firewall rule settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Marker stored in the provider-side `ref` field. Sync finds its own
    /// objects by this value and never touches anything else.
    pub ref_tag: String,

    /// Human-readable description for the filter and rule.
    pub description: String,

    /// Action taken when a request matches the expression.
    pub action: String,

    /// Create or update the rule in a paused state.
    pub paused: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            ref_tag: "pathguard-managed".to_string(),
            description: "Block paths outside the known application surface".to_string(),
            action: "block".to_string(),
            paused: false,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts per request.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
