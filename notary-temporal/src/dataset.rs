//! Dataset replay surface: reads filtered through the point-in-time clock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notary_core::errors::NotaryResult;
use notary_core::models::{Address, Cid};
use notary_core::traits::ICommitmentIndex;

use crate::clock::PitClock;

/// One dataset member: an object fingerprint and its commitment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub object_cid: Cid,
    pub timestamp: DateTime<Utc>,
}

/// Serializable dataset state, without the clock handle. The shape a
/// producer hands to a consumer alongside the underlying data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub name: Option<String>,
    pub owner: Address,
    pub set_cid: Cid,
    pub records: Vec<DatasetRecord>,
}

/// A named, append-only collection of committed object fingerprints,
/// ordered ascending by commitment time.
///
/// Every read takes the clock state implicitly: while the clock is
/// engaged at `t`, only the prefix of records with `timestamp <= t` is
/// visible, and "latest" means latest within that prefix. An empty prefix
/// reads as explicit absence, never an error.
pub struct Dataset {
    name: Option<String>,
    owner: Address,
    set_cid: Cid,
    records: Vec<DatasetRecord>,
    clock: Arc<PitClock>,
}

impl Dataset {
    /// Empty dataset for a named set; the set fingerprint is derived from
    /// the name.
    pub fn named(owner: Address, name: &str, clock: Arc<PitClock>) -> Self {
        Self {
            name: Some(name.to_string()),
            owner,
            set_cid: Cid::for_set_name(name),
            records: Vec::new(),
            clock,
        }
    }

    /// Reconstruct a dataset from the commitment records an index holds
    /// for `(owner, set_cid)`.
    pub async fn load(
        index: &dyn ICommitmentIndex,
        owner: Address,
        set_cid: Cid,
        clock: Arc<PitClock>,
    ) -> NotaryResult<Self> {
        let committed = index.find_by_owner_set(&owner, &set_cid).await?;
        let mut records: Vec<DatasetRecord> = committed
            .into_iter()
            .map(|r| DatasetRecord {
                object_cid: r.object_cid,
                timestamp: r.timestamp,
            })
            .collect();
        records.sort_by_key(|r| r.timestamp);
        tracing::debug!(owner = %owner, set_cid = %set_cid, records = records.len(), "dataset loaded");
        Ok(Self {
            name: None,
            owner,
            set_cid,
            records,
            clock,
        })
    }

    /// Rebuild from a snapshot, attaching a clock.
    pub fn from_snapshot(snapshot: DatasetSnapshot, clock: Arc<PitClock>) -> Self {
        let mut records = snapshot.records;
        records.sort_by_key(|r| r.timestamp);
        Self {
            name: snapshot.name,
            owner: snapshot.owner,
            set_cid: snapshot.set_cid,
            records,
            clock,
        }
    }

    pub fn from_json(json: &str, clock: Arc<PitClock>) -> NotaryResult<Self> {
        Ok(Self::from_snapshot(serde_json::from_str(json)?, clock))
    }

    /// Clock-independent state for persistence or hand-off.
    pub fn snapshot(&self) -> DatasetSnapshot {
        DatasetSnapshot {
            name: self.name.clone(),
            owner: self.owner.clone(),
            set_cid: self.set_cid.clone(),
            records: self.records.clone(),
        }
    }

    pub fn to_json(&self) -> NotaryResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Record a member with its backend-assigned commitment time.
    /// Membership is cumulative; ordering by timestamp is maintained.
    pub fn append(&mut self, object_cid: Cid, timestamp: DateTime<Utc>) {
        let record = DatasetRecord {
            object_cid,
            timestamp,
        };
        let at = self.records.partition_point(|r| r.timestamp <= timestamp);
        self.records.insert(at, record);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn set_cid(&self) -> &Cid {
        &self.set_cid
    }

    /// Records visible as of the current clock state.
    pub fn records(&self) -> &[DatasetRecord] {
        self.visible()
    }

    /// Latest visible record, or explicit absence when nothing was
    /// committed as of the clock time.
    pub fn last_record(&self) -> Option<&DatasetRecord> {
        self.visible().last()
    }

    /// Commitment times of the visible records.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.visible().iter().map(|r| r.timestamp).collect()
    }

    pub fn len(&self) -> usize {
        self.visible().len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }

    /// The visible prefix: everything in live mode, otherwise the records
    /// whose commitment time had occurred as of the virtual time.
    fn visible(&self) -> &[DatasetRecord] {
        match self.clock.current() {
            None => &self.records,
            Some(t) => {
                let end = self.records.partition_point(|r| r.timestamp <= t);
                &self.records[..end]
            }
        }
    }
}
