//! Shared test fixtures: scripted mock backend, record builders, tracing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use notary_core::errors::{IndexError, NotaryResult};
use notary_core::models::{Address, BackendId, Cid, CommitmentRecord};
use notary_core::traits::ICommitmentIndex;

/// Install a tracing subscriber honoring `RUST_LOG`. Safe to call from
/// every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Timestamp helper: seconds since the epoch, UTC.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

/// Build a commitment record with a fresh backend-assigned id.
pub fn record(
    owner: &str,
    object_cid: &str,
    set_cid: Option<&str>,
    timestamp: DateTime<Utc>,
) -> CommitmentRecord {
    record_with_id(
        &uuid::Uuid::new_v4().to_string(),
        owner,
        object_cid,
        set_cid,
        timestamp,
    )
}

/// Build a commitment record with an explicit backend-assigned id, for
/// duplicate-collapse scenarios.
pub fn record_with_id(
    record_id: &str,
    owner: &str,
    object_cid: &str,
    set_cid: Option<&str>,
    timestamp: DateTime<Utc>,
) -> CommitmentRecord {
    CommitmentRecord {
        record_id: record_id.to_string(),
        owner: Address::new(owner),
        object_cid: Cid::new(object_cid),
        set_cid: set_cid.map(Cid::new),
        timestamp,
        backend: BackendId::new("fixture"),
    }
}

enum FailureMode {
    Transient,
    Permanent,
}

/// Scripted backend: serves a fixed record list, optionally fails or
/// delays every call, and counts how often it was queried.
pub struct MockBackend {
    id: BackendId,
    records: Vec<CommitmentRecord>,
    failure: Option<FailureMode>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockBackend {
    pub fn healthy(id: &str) -> Self {
        Self {
            id: BackendId::new(id),
            records: Vec::new(),
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A backend whose every call fails transiently.
    pub fn failing(id: &str) -> Self {
        Self {
            failure: Some(FailureMode::Transient),
            ..Self::healthy(id)
        }
    }

    /// A backend whose every call fails permanently.
    pub fn failing_permanent(id: &str) -> Self {
        Self {
            failure: Some(FailureMode::Permanent),
            ..Self::healthy(id)
        }
    }

    pub fn with_records(mut self, records: Vec<CommitmentRecord>) -> Self {
        self.records = records;
        self
    }

    /// Delay every call, for timeout scenarios (pairs with tokio's paused
    /// test clock).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many capability calls this backend has served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn pre_call(&self) -> NotaryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failure {
            Some(FailureMode::Transient) => Err(IndexError::Transient {
                backend: self.id.clone(),
                reason: "scripted transient failure".to_string(),
            }
            .into()),
            Some(FailureMode::Permanent) => Err(IndexError::Permanent {
                backend: self.id.clone(),
                reason: "scripted permanent failure".to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn select(&self, pred: impl Fn(&CommitmentRecord) -> bool) -> Vec<CommitmentRecord> {
        let mut matched: Vec<CommitmentRecord> =
            self.records.iter().filter(|r| pred(r)).cloned().collect();
        matched.sort_by_key(|r| r.timestamp);
        matched
    }
}

#[async_trait]
impl ICommitmentIndex for MockBackend {
    fn backend_id(&self) -> BackendId {
        self.id.clone()
    }

    async fn find_by_object(&self, object_cid: &Cid) -> NotaryResult<Vec<CommitmentRecord>> {
        self.pre_call().await?;
        Ok(self.select(|r| &r.object_cid == object_cid))
    }

    async fn find_by_owner(&self, owner: &Address) -> NotaryResult<Vec<CommitmentRecord>> {
        self.pre_call().await?;
        Ok(self.select(|r| &r.owner == owner))
    }

    async fn find_by_owner_set(
        &self,
        owner: &Address,
        set_cid: &Cid,
    ) -> NotaryResult<Vec<CommitmentRecord>> {
        self.pre_call().await?;
        Ok(self.select(|r| &r.owner == owner && r.set_cid.as_ref() == Some(set_cid)))
    }

    async fn set_exists(&self, owner: &Address, set_cid: &Cid) -> NotaryResult<bool> {
        self.pre_call().await?;
        Ok(self
            .records
            .iter()
            .any(|r| &r.owner == owner && r.set_cid.as_ref() == Some(set_cid)))
    }
}
