//! FailoverIndex — one backend at a time, in priority order.

use std::sync::Arc;

use async_trait::async_trait;

use notary_core::errors::{IndexError, NotaryError, NotaryResult};
use notary_core::models::{Address, BackendId, Cid, CommitmentRecord};
use notary_core::traits::ICommitmentIndex;

/// Sequential priority failover over an ordered backend list.
///
/// A clean answer from backend `i` (found *or* a valid empty negative)
/// ends the call; backend `i+1` is only consulted when `i` errors. Unlike
/// [`AggregateIndex`](crate::AggregateIndex), results are never merged:
/// this composition trusts a single authoritative-enough source at a time,
/// trading completeness for latency and cost.
pub struct FailoverIndex {
    backends: Vec<Arc<dyn ICommitmentIndex>>,
    id: BackendId,
}

impl FailoverIndex {
    pub fn new(backends: Vec<Arc<dyn ICommitmentIndex>>) -> Self {
        Self {
            backends,
            id: BackendId::new("failover"),
        }
    }

    fn exhausted(&self, last: Option<NotaryError>) -> NotaryError {
        IndexError::AllBackendsFailed {
            attempted: self.backends.len(),
            last: last
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no backends configured".to_string()),
        }
        .into()
    }
}

#[async_trait]
impl ICommitmentIndex for FailoverIndex {
    fn backend_id(&self) -> BackendId {
        self.id.clone()
    }

    async fn find_by_object(&self, object_cid: &Cid) -> NotaryResult<Vec<CommitmentRecord>> {
        let mut last = None;
        for backend in &self.backends {
            match backend.find_by_object(object_cid).await {
                Ok(records) => return Ok(records),
                Err(error) => {
                    tracing::warn!(
                        backend = %backend.backend_id(),
                        %error,
                        "failover: backend failed, trying next"
                    );
                    last = Some(error);
                }
            }
        }
        Err(self.exhausted(last))
    }

    async fn find_by_owner(&self, owner: &Address) -> NotaryResult<Vec<CommitmentRecord>> {
        let mut last = None;
        for backend in &self.backends {
            match backend.find_by_owner(owner).await {
                Ok(records) => return Ok(records),
                Err(error) => {
                    tracing::warn!(
                        backend = %backend.backend_id(),
                        %error,
                        "failover: backend failed, trying next"
                    );
                    last = Some(error);
                }
            }
        }
        Err(self.exhausted(last))
    }

    async fn find_by_owner_set(
        &self,
        owner: &Address,
        set_cid: &Cid,
    ) -> NotaryResult<Vec<CommitmentRecord>> {
        let mut last = None;
        for backend in &self.backends {
            match backend.find_by_owner_set(owner, set_cid).await {
                Ok(records) => return Ok(records),
                Err(error) => {
                    tracing::warn!(
                        backend = %backend.backend_id(),
                        %error,
                        "failover: backend failed, trying next"
                    );
                    last = Some(error);
                }
            }
        }
        Err(self.exhausted(last))
    }

    async fn set_exists(&self, owner: &Address, set_cid: &Cid) -> NotaryResult<bool> {
        let mut last = None;
        for backend in &self.backends {
            match backend.set_exists(owner, set_cid).await {
                Ok(exists) => return Ok(exists),
                Err(error) => {
                    tracing::warn!(
                        backend = %backend.backend_id(),
                        %error,
                        "failover: backend failed, trying next"
                    );
                    last = Some(error);
                }
            }
        }
        Err(self.exhausted(last))
    }
}
