// crates/caremesh-core/src/traits.rs

use std::collections::HashMap;

use async_trait::async_trait;

use crate::credit::ContinuityCreditEvent;
use crate::error::MeshError;
use crate::fingerprint::Fingerprint;
use crate::participant::Participant;
use crate::record::{PatientRecord, ResponseTrend};

/// Trait for the participant settings table.
///
/// Implemented by caremesh-store (in-memory backend). Mutations are applied
/// under a single writer at a time; reads return cloned snapshots.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Retrieve a participant by id.
    async fn get(&self, id: &str) -> Result<Participant, MeshError>;

    /// List all participants.
    async fn list(&self) -> Result<Vec<Participant>, MeshError>;

    /// Add a new participant. Fails with `InvalidInput` if the id is taken.
    async fn register(&self, participant: Participant) -> Result<(), MeshError>;

    /// Apply a settings update — the only mutation path for participant
    /// state. `contribution_pct` must be in [0, 100].
    async fn update_settings(
        &self,
        id: &str,
        opted_in: bool,
        contribution_pct: u8,
    ) -> Result<Participant, MeshError>;
}

/// Trait for patient-record storage.
///
/// Records are immutable once inserted; there is no update or delete.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record created at intake time.
    async fn insert(&self, record: PatientRecord) -> Result<(), MeshError>;

    /// All records matching the fingerprint, across all participants.
    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Vec<PatientRecord>, MeshError>;
}

/// Trait for the append-only continuity-credit event log.
///
/// `insert_if_absent` is the one operation that must be a true atomic
/// check-and-set; credit totals are always derived from event counts.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Insert the event unless its (fingerprint, contributor, requester)
    /// triple is already recorded. Returns `true` if a new event was
    /// inserted.
    async fn insert_if_absent(&self, event: ContinuityCreditEvent) -> Result<bool, MeshError>;

    /// The `n` most recent events, newest first.
    async fn recent(&self, n: usize) -> Result<Vec<ContinuityCreditEvent>, MeshError>;

    /// Distinct-event counts keyed by contributor id.
    async fn count_by_contributor(&self) -> Result<HashMap<String, u64>, MeshError>;
}

/// Trait for the outcome-sample source feeding the benchmark aggregator.
#[async_trait]
pub trait OutcomeSampleSource: Send + Sync {
    /// One response-trend sample per (patient, participant) pair for the
    /// given participant. Pairs without level-2 data contribute nothing.
    async fn samples_for(&self, participant_id: &str) -> Result<Vec<ResponseTrend>, MeshError>;
}
