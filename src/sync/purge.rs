//! Cache purge operations.

use crate::provider::types::PurgeRequest;
use crate::provider::EdgeClient;
use crate::sync::SyncError;

/// Turn CLI flags into one of the two purge payload shapes.
///
/// Exactly one of `everything` or a non-empty `files` list must be given.
pub fn build_purge_request(
    everything: bool,
    files: Vec<String>,
) -> Result<PurgeRequest, SyncError> {
    match (everything, files.is_empty()) {
        (true, true) => Ok(PurgeRequest::everything()),
        (false, false) => Ok(PurgeRequest::files(files)),
        _ => Err(SyncError::AmbiguousPurge),
    }
}

/// Send a purge request and return the zone id the provider acknowledged.
pub async fn purge(client: &EdgeClient, request: PurgeRequest) -> Result<String, SyncError> {
    let scope = match &request {
        PurgeRequest::Everything { .. } => "everything".to_string(),
        PurgeRequest::Files { files } => format!("{} file(s)", files.len()),
    };
    let receipt = client.purge_cache(&request).await?;
    tracing::info!(zone = %receipt.id, scope = %scope, "Cache purge accepted");
    Ok(receipt.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_alone_is_valid() {
        let request = build_purge_request(true, vec![]).unwrap();
        assert_eq!(request, PurgeRequest::everything());
    }

    #[test]
    fn test_files_alone_are_valid() {
        let files = vec!["https://example.com/app.css".to_string()];
        let request = build_purge_request(false, files.clone()).unwrap();
        assert_eq!(request, PurgeRequest::files(files));
    }

    #[test]
    fn test_both_flags_are_ambiguous() {
        let err = build_purge_request(true, vec!["https://example.com/x".to_string()])
            .unwrap_err();
        assert!(matches!(err, SyncError::AmbiguousPurge));
    }

    #[test]
    fn test_neither_flag_is_ambiguous() {
        let err = build_purge_request(false, vec![]).unwrap_err();
        assert!(matches!(err, SyncError::AmbiguousPurge));
    }
}
