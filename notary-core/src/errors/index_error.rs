use crate::models::BackendId;

/// Backend query and composition errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Retryable backend failure (network, rate limit, stale mirror).
    #[error("backend {backend} transient failure: {reason}")]
    Transient { backend: BackendId, reason: String },

    /// Non-retryable backend failure (malformed query, authorization).
    #[error("backend {backend} permanent failure: {reason}")]
    Permanent { backend: BackendId, reason: String },

    /// A single backend exceeded its per-call timeout.
    #[error("backend {backend} timed out after {elapsed_ms} ms")]
    Timeout { backend: BackendId, elapsed_ms: u64 },

    /// The aggregate call as a whole exceeded its deadline.
    #[error("aggregate deadline exceeded after {elapsed_ms} ms")]
    DeadlineExceeded { elapsed_ms: u64 },

    /// Every backend of an aggregate call failed.
    #[error("all {attempted} backends unavailable")]
    BackendsUnavailable { attempted: usize },

    /// Every backend of a failover chain failed.
    #[error("all {attempted} backends failed, last error: {last}")]
    AllBackendsFailed { attempted: usize, last: String },
}

impl IndexError {
    /// Whether retrying the same call could reasonably succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transient { .. } | Self::Timeout { .. } | Self::DeadlineExceeded { .. }
        )
    }
}
