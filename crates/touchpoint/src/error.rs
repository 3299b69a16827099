use thiserror::Error;

/// Recoverable failures of the attribution core.
///
/// None of these escape the public tracker operations; each one degrades to
/// direct attribution or an empty ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("malformed referrer url `{referrer}`: {reason}")]
    MalformedReferrerUrl { referrer: String, reason: String },

    #[error("malformed persisted payload: {reason}")]
    MalformedPersistedPayload { reason: String },

    #[error("failed to write `{key}` to visit store: {reason}")]
    StorageWriteFailure { key: String, reason: String },
}
