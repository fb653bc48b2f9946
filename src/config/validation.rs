//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (budget margins, pass caps, attempt counts)
//! - Check the provider endpoint parses as a URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GuardConfig → Result<(), Vec<ValidationError>>
//! - Credentials are checked separately: `generate` runs fine without a
//!   zone or token, API commands do not

use thiserror::Error;
use url::Url;

use crate::config::schema::GuardConfig;

/// Actions the provider accepts on a firewall rule.
pub const KNOWN_ACTIONS: &[&str] = &[
    "block",
    "challenge",
    "js_challenge",
    "managed_challenge",
    "log",
    "bypass",
    "allow",
];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("budget.safety_margin ({margin}) must be smaller than budget.hard_limit ({hard_limit})")]
    MarginTooLarge { margin: usize, hard_limit: usize },

    #[error("budget.max_condense_passes must be at least 1")]
    ZeroPassCap,

    #[error("provider.api_base is not a valid URL: {0}")]
    InvalidApiBase(String),

    #[error("rule.action '{0}' is not a recognized firewall action")]
    UnknownAction(String),

    #[error("retries.max_attempts must be at least 1 when retries are enabled")]
    ZeroAttempts,

    #[error("provider.zone_id is required for this command")]
    MissingZoneId,

    #[error("provider.api_token is required for this command; set it in the config or via PATHGUARD_API_TOKEN")]
    MissingApiToken,
}

/// Validate everything a local run depends on.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.budget.safety_margin >= config.budget.hard_limit {
        errors.push(ValidationError::MarginTooLarge {
            margin: config.budget.safety_margin,
            hard_limit: config.budget.hard_limit,
        });
    }
    if config.budget.max_condense_passes == 0 {
        errors.push(ValidationError::ZeroPassCap);
    }
    if Url::parse(&config.provider.api_base).is_err() {
        errors.push(ValidationError::InvalidApiBase(
            config.provider.api_base.clone(),
        ));
    }
    if !KNOWN_ACTIONS.contains(&config.rule.action.as_str()) {
        errors.push(ValidationError::UnknownAction(config.rule.action.clone()));
    }
    if config.retries.enabled && config.retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the credentials API commands need on top of [`validate_config`].
pub fn validate_for_api(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.provider.zone_id.is_empty() {
        errors.push(ValidationError::MissingZoneId);
    }
    if config.provider.api_token.is_empty() {
        errors.push(ValidationError::MissingApiToken);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GuardConfig::default()).is_ok());
    }

    #[test]
    fn test_all_problems_are_reported_together() {
        let mut config = GuardConfig::default();
        config.budget.hard_limit = 50;
        config.budget.safety_margin = 50;
        config.budget.max_condense_passes = 0;
        config.provider.api_base = "not a url".to_string();
        config.rule.action = "detonate".to_string();
        config.retries.max_attempts = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroPassCap));
        assert!(errors.contains(&ValidationError::ZeroAttempts));
    }

    #[test]
    fn test_disabled_retries_allow_zero_attempts() {
        let mut config = GuardConfig::default();
        config.retries.enabled = false;
        config.retries.max_attempts = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_api_commands_need_credentials() {
        let config = GuardConfig::default();
        let errors = validate_for_api(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingZoneId));
        assert!(errors.contains(&ValidationError::MissingApiToken));

        let mut configured = GuardConfig::default();
        configured.provider.zone_id = "zone-1".to_string();
        configured.provider.api_token = "token".to_string();
        assert!(validate_for_api(&configured).is_ok());
    }

    #[test]
    fn test_known_actions_pass() {
        for action in KNOWN_ACTIONS {
            let mut config = GuardConfig::default();
            config.rule.action = action.to_string();
            assert!(validate_config(&config).is_ok(), "{action} rejected");
        }
    }
}
