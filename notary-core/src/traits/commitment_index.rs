//! ICommitmentIndex — the uniform read capability over commitment records.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::NotaryResult;
use crate::models::{Address, BackendId, Cid, CommitmentRecord};

/// Read-only query capability over previously recorded commitments.
///
/// Concrete backends (direct chain queries, SQL mirrors) implement this
/// trait; so do `AggregateIndex` and `FailoverIndex` in `notary-index`,
/// which compose by wrapping instances of the same trait. Backend calls are
/// the only suspension points in the workspace.
///
/// `find_*` results are ordered ascending by timestamp. An empty result is
/// a valid negative answer, not an error.
#[async_trait]
pub trait ICommitmentIndex: Send + Sync {
    /// Name of this index for diagnostics and record attribution.
    fn backend_id(&self) -> BackendId;

    /// All commitments of an object fingerprint, across owners and sets.
    async fn find_by_object(&self, object_cid: &Cid) -> NotaryResult<Vec<CommitmentRecord>>;

    /// All commitments recorded by an owner.
    async fn find_by_owner(&self, owner: &Address) -> NotaryResult<Vec<CommitmentRecord>>;

    /// Membership records of one owner's set.
    async fn find_by_owner_set(
        &self,
        owner: &Address,
        set_cid: &Cid,
    ) -> NotaryResult<Vec<CommitmentRecord>>;

    /// Whether any commitment links `owner` to `set_cid`.
    async fn set_exists(&self, owner: &Address, set_cid: &Cid) -> NotaryResult<bool>;
}

/// Blanket impl: `Arc<T>` implements `ICommitmentIndex` by delegating to the
/// inner `T`, so shared handles pass wherever `&dyn ICommitmentIndex` is
/// expected.
#[async_trait]
impl<T: ICommitmentIndex + ?Sized> ICommitmentIndex for Arc<T> {
    fn backend_id(&self) -> BackendId {
        (**self).backend_id()
    }

    async fn find_by_object(&self, object_cid: &Cid) -> NotaryResult<Vec<CommitmentRecord>> {
        (**self).find_by_object(object_cid).await
    }

    async fn find_by_owner(&self, owner: &Address) -> NotaryResult<Vec<CommitmentRecord>> {
        (**self).find_by_owner(owner).await
    }

    async fn find_by_owner_set(
        &self,
        owner: &Address,
        set_cid: &Cid,
    ) -> NotaryResult<Vec<CommitmentRecord>> {
        (**self).find_by_owner_set(owner, set_cid).await
    }

    async fn set_exists(&self, owner: &Address, set_cid: &Cid) -> NotaryResult<bool> {
        (**self).set_exists(owner, set_cid).await
    }
}
