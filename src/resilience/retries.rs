//! Retry policy for provider API calls.
//!
//! # Responsibilities
//! - Determine whether a failed request is worth retrying
//! - Keep non-idempotent writes from being replayed
//!
//! # Design Decisions
//! - Never retry POST/PATCH: a create that half-succeeded server-side
//!   would be duplicated on replay
//! - Transport errors (no status at all) are retryable for idempotent
//!   methods; the request never reached a handler or the response was lost
//! - 429 and 5xx are transient; every other status fails fast because the
//!   request will not get better on its own

use reqwest::{Method, StatusCode};

/// True if replaying `method` cannot change the outcome.
pub fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::PUT | Method::DELETE)
}

/// Decide whether an attempt that failed with `status` (or with no
/// response at all) should be retried.
pub fn is_retryable(method: &Method, status: Option<StatusCode>) -> bool {
    if !is_idempotent(method) {
        return false;
    }
    match status {
        Some(status) => {
            status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_retry_on_idempotent_methods() {
        assert!(is_retryable(&Method::GET, Some(StatusCode::INTERNAL_SERVER_ERROR)));
        assert!(is_retryable(&Method::GET, Some(StatusCode::SERVICE_UNAVAILABLE)));
        assert!(is_retryable(&Method::DELETE, Some(StatusCode::BAD_GATEWAY)));
        assert!(is_retryable(&Method::PUT, Some(StatusCode::TOO_MANY_REQUESTS)));
    }

    #[test]
    fn test_client_errors_fail_fast() {
        assert!(!is_retryable(&Method::GET, Some(StatusCode::BAD_REQUEST)));
        assert!(!is_retryable(&Method::GET, Some(StatusCode::FORBIDDEN)));
        assert!(!is_retryable(&Method::GET, Some(StatusCode::NOT_FOUND)));
    }

    #[test]
    fn test_writes_are_never_replayed() {
        assert!(!is_retryable(&Method::POST, Some(StatusCode::SERVICE_UNAVAILABLE)));
        assert!(!is_retryable(&Method::POST, None));
        assert!(!is_retryable(&Method::PATCH, Some(StatusCode::INTERNAL_SERVER_ERROR)));
    }

    #[test]
    fn test_transport_failures_retry_on_idempotent_methods() {
        assert!(is_retryable(&Method::GET, None));
        assert!(is_retryable(&Method::DELETE, None));
    }
}
