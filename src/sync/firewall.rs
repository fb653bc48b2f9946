//! Managed filter and rule synchronization.
//!
//! # Responsibilities
//! - Find this tool's filter and rule by their `ref` marker
//! - Create whatever is missing, update whatever diverges
//! - Report per-object outcomes so `--dry-run` and CI logs stay honest
//!
//! # Design Decisions
//! - An identical remote expression means no write at all; sync is
//!   idempotent and safe to run on every deploy
//! - Teardown deletes the rule before the filter because the rule holds a
//!   reference to it
//! - Objects without the marker are invisible to this code, whatever else
//!   lives in the zone

use serde::Serialize;

use crate::config::schema::RuleConfig;
use crate::pathset::CompactionOutcome;
use crate::provider::types::{FilterRef, NewFilter, NewFirewallRule};
use crate::provider::EdgeClient;
use crate::sync::SyncError;

/// What sync did to one provider-side object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Created,
    Updated,
    Unchanged,
}

/// Outcome of one sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub filter_id: String,
    pub filter_action: SyncAction,
    pub rule_id: String,
    pub rule_action: SyncAction,
    pub expression_chars: usize,
    pub within_budget: bool,
    pub condense_passes: usize,
    pub paths: usize,
}

/// Outcome of a teardown run.
#[derive(Debug, Clone, Serialize)]
pub struct TeardownReport {
    pub rule_deleted: bool,
    pub filter_deleted: bool,
}

/// Bring the managed filter and rule in line with a compaction outcome.
pub async fn sync_firewall(
    client: &EdgeClient,
    rule_config: &RuleConfig,
    outcome: &CompactionOutcome,
) -> Result<SyncReport, SyncError> {
    let ref_tag = &rule_config.ref_tag;

    // Filter first; the rule needs its id.
    let (filter, filter_action) = match client.find_filter(ref_tag).await? {
        Some(existing) if existing.expression == outcome.expression => {
            tracing::info!(filter_id = %existing.id, "Managed filter already up to date");
            (existing, SyncAction::Unchanged)
        }
        Some(mut existing) => {
            existing.expression = outcome.expression.clone();
            existing.description = Some(rule_config.description.clone());
            let updated = client.update_filter(&existing).await?;
            tracing::info!(filter_id = %updated.id, "Managed filter expression updated");
            (updated, SyncAction::Updated)
        }
        None => {
            let created = client
                .create_filter(&NewFilter {
                    expression: outcome.expression.clone(),
                    description: rule_config.description.clone(),
                    ref_tag: ref_tag.clone(),
                })
                .await?;
            tracing::info!(filter_id = %created.id, "Managed filter created");
            (created, SyncAction::Created)
        }
    };

    let (rule, rule_action) = match client.find_rule(ref_tag).await? {
        Some(existing)
            if existing.action == rule_config.action
                && existing.paused == rule_config.paused
                && existing.filter.id == filter.id =>
        {
            tracing::info!(rule_id = %existing.id, "Managed rule already up to date");
            (existing, SyncAction::Unchanged)
        }
        Some(mut existing) => {
            existing.action = rule_config.action.clone();
            existing.paused = rule_config.paused;
            existing.description = Some(rule_config.description.clone());
            existing.filter = FilterRef {
                id: filter.id.clone(),
            };
            let updated = client.update_rule(&existing).await?;
            tracing::info!(rule_id = %updated.id, action = %updated.action, "Managed rule updated");
            (updated, SyncAction::Updated)
        }
        None => {
            let created = client
                .create_rule(&NewFirewallRule {
                    action: rule_config.action.clone(),
                    description: rule_config.description.clone(),
                    ref_tag: ref_tag.clone(),
                    paused: rule_config.paused,
                    filter: FilterRef {
                        id: filter.id.clone(),
                    },
                })
                .await?;
            tracing::info!(rule_id = %created.id, action = %created.action, "Managed rule created");
            (created, SyncAction::Created)
        }
    };

    Ok(SyncReport {
        filter_id: filter.id,
        filter_action,
        rule_id: rule.id,
        rule_action,
        expression_chars: outcome.expression_chars(),
        within_budget: outcome.within_budget,
        condense_passes: outcome.condense_passes,
        paths: outcome.paths.len(),
    })
}

/// Remove the managed rule and filter. Absent objects are not errors;
/// teardown of a clean zone reports both as untouched.
pub async fn teardown(
    client: &EdgeClient,
    rule_config: &RuleConfig,
) -> Result<TeardownReport, SyncError> {
    let ref_tag = &rule_config.ref_tag;

    let rule_deleted = match client.find_rule(ref_tag).await? {
        Some(rule) => {
            client.delete_rule(&rule.id).await?;
            tracing::info!(rule_id = %rule.id, "Managed rule deleted");
            true
        }
        None => false,
    };

    let filter_deleted = match client.find_filter(ref_tag).await? {
        Some(filter) => {
            client.delete_filter(&filter.id).await?;
            tracing::info!(filter_id = %filter.id, "Managed filter deleted");
            true
        }
        None => false,
    };

    Ok(TeardownReport {
        rule_deleted,
        filter_deleted,
    })
}
