//! AggregateIndex — fan out to every backend, merge one ordered answer.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures_util::future::join_all;

use notary_core::config::IndexConfig;
use notary_core::errors::{IndexError, NotaryError, NotaryResult};
use notary_core::models::{Address, BackendId, Cid, CommitmentRecord};
use notary_core::traits::ICommitmentIndex;

/// One absorbed backend failure from an aggregate call.
#[derive(Debug)]
pub struct BackendFailure {
    pub backend: BackendId,
    pub error: NotaryError,
}

/// An aggregate answer plus the diagnostic log of absorbed failures.
///
/// A failure entry means that backend contributed nothing to `value`; the
/// call as a whole still succeeded because at least one backend answered.
#[derive(Debug)]
pub struct Aggregated<T> {
    pub value: T,
    pub failures: Vec<BackendFailure>,
}

/// Queries every configured backend concurrently and merges results into a
/// single timestamp-ordered answer.
///
/// Each backend call runs under its own timeout; the whole call is bounded
/// by the overall deadline. Dropping the call future cancels all in-flight
/// backend futures, so a cancelled aggregate is all-or-nothing: no
/// partially merged answer escapes.
pub struct AggregateIndex {
    backends: Vec<Arc<dyn ICommitmentIndex>>,
    config: IndexConfig,
    id: BackendId,
}

impl AggregateIndex {
    pub fn new(backends: Vec<Arc<dyn ICommitmentIndex>>, config: IndexConfig) -> Self {
        Self {
            backends,
            config,
            id: BackendId::new("aggregate"),
        }
    }

    /// Run one prepared future per backend, in priority order, each under
    /// the per-backend timeout and all under the overall deadline.
    ///
    /// Returns per-backend successes (priority order preserved) and the
    /// failure log. Errors only when no backend succeeded.
    async fn collect<T, Fut>(&self, calls: Vec<Fut>) -> NotaryResult<Aggregated<Vec<T>>>
    where
        Fut: Future<Output = NotaryResult<T>>,
    {
        let started = Instant::now();
        let per_backend = self.config.backend_timeout();

        let bounded = calls.into_iter().enumerate().map(|(i, call)| {
            let backend = self.backends[i].backend_id();
            async move {
                match tokio::time::timeout(per_backend, call).await {
                    Ok(result) => (backend, result),
                    Err(_) => (
                        backend.clone(),
                        Err(IndexError::Timeout {
                            backend,
                            elapsed_ms: per_backend.as_millis() as u64,
                        }
                        .into()),
                    ),
                }
            }
        });

        let outcomes = tokio::time::timeout(self.config.overall_deadline(), join_all(bounded))
            .await
            .map_err(|_| IndexError::DeadlineExceeded {
                elapsed_ms: started.elapsed().as_millis() as u64,
            })?;

        let attempted = outcomes.len();
        let mut successes = Vec::with_capacity(attempted);
        let mut failures = Vec::new();
        for (backend, result) in outcomes {
            match result {
                Ok(value) => successes.push(value),
                Err(error) => failures.push(BackendFailure { backend, error }),
            }
        }

        if successes.is_empty() {
            return Err(IndexError::BackendsUnavailable { attempted }.into());
        }
        Ok(Aggregated {
            value: successes,
            failures,
        })
    }

    /// Union of per-backend record lists: duplicates collapse by
    /// `record_id` (first occurrence in backend-priority order wins), then
    /// a stable sort orders by ascending timestamp so ties keep backend
    /// priority and insertion order.
    fn merge(lists: Vec<Vec<CommitmentRecord>>) -> Vec<CommitmentRecord> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut merged = Vec::new();
        for list in lists {
            for record in list {
                if seen.insert(record.record_id.clone()) {
                    merged.push(record);
                }
            }
        }
        merged.sort_by_key(|r| r.timestamp);
        merged
    }

    pub async fn find_by_object_aggregated(
        &self,
        object_cid: &Cid,
    ) -> NotaryResult<Aggregated<Vec<CommitmentRecord>>> {
        let calls = self
            .backends
            .iter()
            .map(|b| b.find_by_object(object_cid))
            .collect();
        let collected = self.collect(calls).await?;
        Ok(Aggregated {
            value: Self::merge(collected.value),
            failures: collected.failures,
        })
    }

    pub async fn find_by_owner_aggregated(
        &self,
        owner: &Address,
    ) -> NotaryResult<Aggregated<Vec<CommitmentRecord>>> {
        let calls = self
            .backends
            .iter()
            .map(|b| b.find_by_owner(owner))
            .collect();
        let collected = self.collect(calls).await?;
        Ok(Aggregated {
            value: Self::merge(collected.value),
            failures: collected.failures,
        })
    }

    pub async fn find_by_owner_set_aggregated(
        &self,
        owner: &Address,
        set_cid: &Cid,
    ) -> NotaryResult<Aggregated<Vec<CommitmentRecord>>> {
        let calls = self
            .backends
            .iter()
            .map(|b| b.find_by_owner_set(owner, set_cid))
            .collect();
        let collected = self.collect(calls).await?;
        Ok(Aggregated {
            value: Self::merge(collected.value),
            failures: collected.failures,
        })
    }

    /// Existence is a logical OR: committed anywhere this composition can
    /// see means committed.
    pub async fn set_exists_aggregated(
        &self,
        owner: &Address,
        set_cid: &Cid,
    ) -> NotaryResult<Aggregated<bool>> {
        let calls = self
            .backends
            .iter()
            .map(|b| b.set_exists(owner, set_cid))
            .collect();
        let collected = self.collect(calls).await?;
        Ok(Aggregated {
            value: collected.value.into_iter().any(|exists| exists),
            failures: collected.failures,
        })
    }

    fn log_failures(&self, failures: &[BackendFailure]) {
        for failure in failures {
            tracing::warn!(
                backend = %failure.backend,
                error = %failure.error,
                "aggregate: backend failure absorbed"
            );
        }
    }
}

#[async_trait]
impl ICommitmentIndex for AggregateIndex {
    fn backend_id(&self) -> BackendId {
        self.id.clone()
    }

    async fn find_by_object(&self, object_cid: &Cid) -> NotaryResult<Vec<CommitmentRecord>> {
        let result = self.find_by_object_aggregated(object_cid).await?;
        self.log_failures(&result.failures);
        Ok(result.value)
    }

    async fn find_by_owner(&self, owner: &Address) -> NotaryResult<Vec<CommitmentRecord>> {
        let result = self.find_by_owner_aggregated(owner).await?;
        self.log_failures(&result.failures);
        Ok(result.value)
    }

    async fn find_by_owner_set(
        &self,
        owner: &Address,
        set_cid: &Cid,
    ) -> NotaryResult<Vec<CommitmentRecord>> {
        let result = self.find_by_owner_set_aggregated(owner, set_cid).await?;
        self.log_failures(&result.failures);
        Ok(result.value)
    }

    async fn set_exists(&self, owner: &Address, set_cid: &Cid) -> NotaryResult<bool> {
        let result = self.set_exists_aggregated(owner, set_cid).await?;
        self.log_failures(&result.failures);
        Ok(result.value)
    }
}
