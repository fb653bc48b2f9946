//! Edge provider API client.
//!
//! # Responsibilities
//! - Wrap the provider's v4 REST endpoints the sync workflow needs
//! - Authenticate with a bearer token, stamp every request with an id
//! - Retry transient failures with jittered exponential backoff
//! - Surface provider-reported errors with their code and message
//!
//! # Design Decisions
//! - One `reqwest::Client` per process; connection reuse comes free
//! - Retries go through the resilience policy: idempotent methods only,
//!   transport errors and 429/5xx; API rejections fail fast
//! - Response bodies are read as text first so a non-envelope body turns
//!   into a decode error instead of a misleading transport error

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::config::schema::{ProviderConfig, RetryConfig};
use crate::provider::types::{
    ApiEnvelope, Filter, FirewallRule, NewFilter, NewFirewallRule, ProviderError, ProviderResult,
    PurgeReceipt, PurgeRequest,
};
use crate::resilience::{backoff_delay, is_retryable};

/// Client for the zone-scoped endpoints of the provider API.
#[derive(Debug, Clone)]
pub struct EdgeClient {
    http: reqwest::Client,
    base: String,
    zone_id: String,
    api_token: String,
    retry: RetryConfig,
}

impl EdgeClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `provider` - API endpoint, zone and credentials
    /// * `retry` - Retry policy for transient failures
    pub fn new(provider: &ProviderConfig, retry: RetryConfig) -> ProviderResult<Self> {
        let base = Url::parse(&provider.api_base)
            .map_err(|_| ProviderError::InvalidBaseUrl(provider.api_base.clone()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base: base.as_str().trim_end_matches('/').to_string(),
            zone_id: provider.zone_id.clone(),
            api_token: provider.api_token.clone(),
            retry,
        })
    }

    /// Find this tool's filter by its `ref` marker, if it exists.
    pub async fn find_filter(&self, ref_tag: &str) -> ProviderResult<Option<Filter>> {
        let filters: Vec<Filter> = self
            .send(Method::GET, &self.endpoint("filters"), None)
            .await?;
        Ok(filters
            .into_iter()
            .find(|f| f.ref_tag.as_deref() == Some(ref_tag)))
    }

    /// Create a filter. The endpoint takes an array; this sends one.
    pub async fn create_filter(&self, filter: &NewFilter) -> ProviderResult<Filter> {
        let body = serde_json::to_value([filter])?;
        let mut created: Vec<Filter> = self
            .send(Method::POST, &self.endpoint("filters"), Some(body))
            .await?;
        if created.is_empty() {
            return Err(ProviderError::MissingResult);
        }
        Ok(created.remove(0))
    }

    /// Replace a filter wholesale.
    pub async fn update_filter(&self, filter: &Filter) -> ProviderResult<Filter> {
        let url = format!("{}/{}", self.endpoint("filters"), filter.id);
        let body = serde_json::to_value(filter)?;
        self.send(Method::PUT, &url, Some(body)).await
    }

    /// Delete a filter by id.
    pub async fn delete_filter(&self, id: &str) -> ProviderResult<()> {
        let url = format!("{}/{}", self.endpoint("filters"), id);
        self.send_unit(Method::DELETE, &url, None).await
    }

    /// Find this tool's firewall rule by its `ref` marker, if it exists.
    pub async fn find_rule(&self, ref_tag: &str) -> ProviderResult<Option<FirewallRule>> {
        let rules: Vec<FirewallRule> = self
            .send(Method::GET, &self.endpoint("firewall/rules"), None)
            .await?;
        Ok(rules
            .into_iter()
            .find(|r| r.ref_tag.as_deref() == Some(ref_tag)))
    }

    /// Create a firewall rule. The endpoint takes an array; this sends one.
    pub async fn create_rule(&self, rule: &NewFirewallRule) -> ProviderResult<FirewallRule> {
        let body = serde_json::to_value([rule])?;
        let mut created: Vec<FirewallRule> = self
            .send(Method::POST, &self.endpoint("firewall/rules"), Some(body))
            .await?;
        if created.is_empty() {
            return Err(ProviderError::MissingResult);
        }
        Ok(created.remove(0))
    }

    /// Replace a firewall rule wholesale.
    pub async fn update_rule(&self, rule: &FirewallRule) -> ProviderResult<FirewallRule> {
        let url = format!("{}/{}", self.endpoint("firewall/rules"), rule.id);
        let body = serde_json::to_value(rule)?;
        self.send(Method::PUT, &url, Some(body)).await
    }

    /// Delete a firewall rule by id.
    pub async fn delete_rule(&self, id: &str) -> ProviderResult<()> {
        let url = format!("{}/{}", self.endpoint("firewall/rules"), id);
        self.send_unit(Method::DELETE, &url, None).await
    }

    /// Flush the zone cache, entirely or for specific URLs.
    pub async fn purge_cache(&self, request: &PurgeRequest) -> ProviderResult<PurgeReceipt> {
        let body = serde_json::to_value(request)?;
        self.send(Method::POST, &self.endpoint("purge_cache"), Some(body))
            .await
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}/zones/{}/{}", self.base, self.zone_id, suffix)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> ProviderResult<T> {
        let envelope = self.send_envelope::<T>(method, url, body).await?;
        envelope.result.ok_or(ProviderError::MissingResult)
    }

    /// Like [`send`](Self::send) but tolerates a null result, which delete
    /// endpoints are allowed to return.
    async fn send_unit(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> ProviderResult<()> {
        self.send_envelope::<serde_json::Value>(method, url, body)
            .await?;
        Ok(())
    }

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> ProviderResult<ApiEnvelope<T>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let request_id = Uuid::new_v4();
            let mut request = self
                .http
                .request(method.clone(), url)
                .bearer_auth(&self.api_token)
                .header("x-request-id", request_id.to_string());
            if let Some(body) = &body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if is_retryable(&method, Some(status)) && self.attempts_left(attempt) {
                        let delay = self.delay(attempt);
                        tracing::warn!(
                            %request_id,
                            method = %method,
                            url,
                            status = %status,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "Transient provider status, backing off"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    let text = response.text().await?;
                    tracing::debug!(
                        %request_id,
                        method = %method,
                        url,
                        status = %status,
                        "Provider response"
                    );
                    return decode_envelope(status, &text);
                }
                Err(err) => {
                    if is_retryable(&method, None) && self.attempts_left(attempt) {
                        let delay = self.delay(attempt);
                        tracing::warn!(
                            %request_id,
                            method = %method,
                            url,
                            error = %err,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "Provider request failed, backing off"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    tracing::error!(
                        %request_id,
                        method = %method,
                        url,
                        error = %err,
                        "Provider request failed"
                    );
                    return Err(ProviderError::Transport(err));
                }
            }
        }
    }

    fn attempts_left(&self, attempt: u32) -> bool {
        self.retry.enabled && attempt < self.retry.max_attempts
    }

    fn delay(&self, attempt: u32) -> Duration {
        backoff_delay(
            attempt,
            Duration::from_millis(self.retry.base_delay_ms),
            Duration::from_millis(self.retry.max_delay_ms),
        )
    }
}

fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> ProviderResult<ApiEnvelope<T>> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|err| ProviderError::Decode(format!("status {status}: {err}")))?;
    if !status.is_success() || !envelope.success {
        let message = envelope
            .errors
            .first()
            .map(|e| format!("{} (code {})", e.message, e.code))
            .unwrap_or_else(|| format!("http status {status}"));
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(envelope)
}
