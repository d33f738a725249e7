// crates/caremesh-daemon/src/shared.rs
//
// MeshSharedState: the daemon-owned shared mutable state of the engine.
//
// Constructed once in main.rs and injected into the RPC server. The
// engine itself never owns state; its lifecycle (construction, teardown)
// belongs here, in the surrounding service.

use std::sync::Arc;
use std::time::Instant;

use caremesh_store::{InMemoryEventLog, InMemoryParticipantStore, InMemoryRecordStore};

/// Shared state for the daemon: the participant settings table, the
/// patient-record store (which doubles as the outcome-sample source),
/// and the credit event log.
#[derive(Clone)]
pub struct MeshSharedState {
    /// Participant settings table.
    pub participants: Arc<InMemoryParticipantStore>,
    /// Patient records and outcome samples.
    pub records: Arc<InMemoryRecordStore>,
    /// Append-only continuity-credit event log.
    pub events: Arc<InMemoryEventLog>,
    /// Daemon start time for uptime reporting.
    pub start_time: Instant,
}

impl MeshSharedState {
    /// Create empty shared state.
    pub fn new() -> Self {
        Self {
            participants: Arc::new(InMemoryParticipantStore::new()),
            records: Arc::new(InMemoryRecordStore::new()),
            events: Arc::new(InMemoryEventLog::new()),
            start_time: Instant::now(),
        }
    }
}

impl Default for MeshSharedState {
    fn default() -> Self {
        Self::new()
    }
}
