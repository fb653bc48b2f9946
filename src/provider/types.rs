//! Provider API payloads and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard response envelope for the provider's v4 API.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    pub result: Option<T>,
}

/// One entry of the envelope's `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub code: i64,
    pub message: String,
}

/// A filter holds the match expression; firewall rules reference filters
/// by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub id: String,

    pub expression: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Marker this tool uses to find its own filter again.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_tag: Option<String>,

    #[serde(default)]
    pub paused: bool,
}

/// Payload for filter creation; the provider assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewFilter {
    pub expression: String,
    pub description: String,
    #[serde(rename = "ref")]
    pub ref_tag: String,
}

/// A firewall rule binding a filter to an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallRule {
    pub id: String,

    pub action: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_tag: Option<String>,

    #[serde(default)]
    pub paused: bool,

    pub filter: FilterRef,
}

/// The filter a rule points at. Responses carry the full filter object
/// here; only the id matters to this tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRef {
    pub id: String,
}

/// Payload for rule creation; the provider assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewFirewallRule {
    pub action: String,
    pub description: String,
    #[serde(rename = "ref")]
    pub ref_tag: String,
    pub paused: bool,
    pub filter: FilterRef,
}

/// The two purge payload shapes the provider accepts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PurgeRequest {
    Everything { purge_everything: bool },
    Files { files: Vec<String> },
}

impl PurgeRequest {
    /// Flush the entire zone cache.
    pub fn everything() -> Self {
        Self::Everything {
            purge_everything: true,
        }
    }

    /// Flush specific URLs only.
    pub fn files(files: Vec<String>) -> Self {
        Self::Files { files }
    }
}

/// Purge responses carry the zone id back.
#[derive(Debug, Deserialize)]
pub struct PurgeReceipt {
    pub id: String,
}

/// Errors that can occur talking to the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection, TLS or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Our own payload failed to serialize.
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// The response body did not match the expected envelope.
    #[error("unexpected response shape ({0})")]
    Decode(String),

    /// The provider answered and reported failure.
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The envelope claimed success but carried no result payload.
    #[error("response missing result payload")]
    MissingResult,

    /// The configured API base does not parse as a URL.
    #[error("invalid api base url '{0}'")]
    InvalidBaseUrl(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
