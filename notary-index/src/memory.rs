//! In-memory reference backend.

use std::sync::RwLock;

use async_trait::async_trait;

use notary_core::errors::NotaryResult;
use notary_core::models::{Address, BackendId, Cid, CommitmentRecord};
use notary_core::traits::ICommitmentIndex;

/// Insert-only in-memory commitment store.
///
/// The honest, infallible backend used by integration tests, benches, and
/// examples. Records are stamped with this backend's id on insert, the way
/// a real backend attributes what it returns.
pub struct MemoryBackend {
    id: BackendId,
    records: RwLock<Vec<CommitmentRecord>>,
}

impl MemoryBackend {
    pub fn new(id: impl Into<BackendId>) -> Self {
        Self {
            id: id.into(),
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, mut record: CommitmentRecord) {
        record.backend = self.id.clone();
        self.write().push(record);
    }

    pub fn insert_all(&self, records: impl IntoIterator<Item = CommitmentRecord>) {
        let mut guard = self.write();
        for mut record in records {
            record.backend = self.id.clone();
            guard.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<CommitmentRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<CommitmentRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    fn select(&self, pred: impl Fn(&CommitmentRecord) -> bool) -> Vec<CommitmentRecord> {
        let mut matched: Vec<CommitmentRecord> =
            self.read().iter().filter(|r| pred(r)).cloned().collect();
        matched.sort_by_key(|r| r.timestamp);
        matched
    }
}

#[async_trait]
impl ICommitmentIndex for MemoryBackend {
    fn backend_id(&self) -> BackendId {
        self.id.clone()
    }

    async fn find_by_object(&self, object_cid: &Cid) -> NotaryResult<Vec<CommitmentRecord>> {
        Ok(self.select(|r| &r.object_cid == object_cid))
    }

    async fn find_by_owner(&self, owner: &Address) -> NotaryResult<Vec<CommitmentRecord>> {
        Ok(self.select(|r| &r.owner == owner))
    }

    async fn find_by_owner_set(
        &self,
        owner: &Address,
        set_cid: &Cid,
    ) -> NotaryResult<Vec<CommitmentRecord>> {
        Ok(self.select(|r| &r.owner == owner && r.set_cid.as_ref() == Some(set_cid)))
    }

    async fn set_exists(&self, owner: &Address, set_cid: &Cid) -> NotaryResult<bool> {
        Ok(self
            .read()
            .iter()
            .any(|r| &r.owner == owner && r.set_cid.as_ref() == Some(set_cid)))
    }
}
