// crates/caremesh-credits/src/ledger.rs
//
// Award-and-record of continuity credits on reuse events.
//
// Eligibility gates on the contributor's own standing: a contributor earns
// credit when it is opted in and clears level 1, regardless of how much
// the requester itself shares — the reward follows the data that was
// reused. A participant never earns credit from its own reuse.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use caremesh_core::{
    ContextLevel, ContinuityCreditEvent, EventLog, Fingerprint, MeshError, Participant,
};

/// Outcome category of a reuse submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReuseStatus {
    /// At least one new credit event was inserted.
    Recorded,
    /// Every triple was already on the log; nothing changed.
    AlreadyRecorded,
    /// No eligible contributor to credit.
    NoContributors,
}

/// Result of recording one reuse action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReuseOutcome {
    pub status: ReuseStatus,
    /// True when any new credit was awarded.
    pub credited: bool,
    /// Number of newly inserted events (0 on replay).
    pub credits_awarded: usize,
    /// The newly inserted events, in contributor order.
    pub events: Vec<ContinuityCreditEvent>,
}

/// The continuity-credit ledger, backed by an append-only event log.
pub struct CreditLedger {
    log: Arc<dyn EventLog>,
}

impl CreditLedger {
    /// Create a ledger over the given event log.
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }

    /// Record a reuse of shared history: one credit to each eligible
    /// contributor, idempotently.
    ///
    /// `contributors` is the resolved (opted-in) contributor set for the
    /// fingerprint; the ledger additionally requires level >= 1 and
    /// excludes the requester itself.
    pub async fn record_reuse(
        &self,
        fingerprint: &Fingerprint,
        requester_id: &str,
        contributors: &[Participant],
    ) -> Result<ReuseOutcome, MeshError> {
        let eligible: Vec<&Participant> = contributors
            .iter()
            .filter(|c| {
                c.id != requester_id
                    && c.opted_in
                    && c.context_level() >= ContextLevel::Basic
            })
            .collect();

        if eligible.is_empty() {
            return Ok(ReuseOutcome {
                status: ReuseStatus::NoContributors,
                credited: false,
                credits_awarded: 0,
                events: Vec::new(),
            });
        }

        // One timestamp per reuse action, shared by its events.
        let timestamp = Utc::now();
        let mut inserted = Vec::new();
        for contributor in eligible {
            let event = ContinuityCreditEvent {
                fingerprint: fingerprint.clone(),
                contributor: contributor.id.clone(),
                requester: requester_id.to_string(),
                timestamp,
            };
            if self.log.insert_if_absent(event.clone()).await? {
                inserted.push(event);
            }
        }

        let status = if inserted.is_empty() {
            ReuseStatus::AlreadyRecorded
        } else {
            ReuseStatus::Recorded
        };
        Ok(ReuseOutcome {
            status,
            credited: !inserted.is_empty(),
            credits_awarded: inserted.len(),
            events: inserted,
        })
    }

    /// Per-contributor credit totals, derived from event counts.
    pub async fn totals(&self) -> Result<HashMap<String, u64>, MeshError> {
        self.log.count_by_contributor().await
    }

    /// The `n` most recent credit events, newest first.
    pub async fn recent_events(&self, n: usize) -> Result<Vec<ContinuityCreditEvent>, MeshError> {
        self.log.recent(n).await
    }
}
