// crates/caremesh-core/src/credit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// Immutable record of one continuity-credit award: `contributor`'s shared
/// data for `fingerprint` was reused by `requester`.
///
/// The event log is append-only and the set of (fingerprint, contributor,
/// requester) triples is unique — replaying the same reuse never creates a
/// second event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuityCreditEvent {
    /// Patient the reused history belongs to.
    pub fingerprint: Fingerprint,
    /// Participant whose shared data was reused (the credited party).
    pub contributor: String,
    /// Participant that reused the data.
    pub requester: String,
    /// When the reuse was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ContinuityCreditEvent {
    /// The idempotency key for this event: one credit per
    /// (patient, contributor, requester) triple, ever.
    pub fn key(&self) -> (Fingerprint, String, String) {
        (
            self.fingerprint.clone(),
            self.contributor.clone(),
            self.requester.clone(),
        )
    }
}
