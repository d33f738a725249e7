// crates/caremesh-rpc/src/handlers/care.rs
//
// Continue-care handler: re-resolves the contributor set for the patient
// and drives the credit ledger. Replaying the same action is absorbed by
// the ledger's idempotent insert, never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use caremesh_core::{ContinuityCreditEvent, Participant, ParticipantStore, RecordStore};
use caremesh_credits::{CreditLedger, ReuseOutcome, ReuseStatus};
use caremesh_gating::intake::resolve_contributors;

use crate::handlers::intake::fingerprint_for;

/// Request to record a continue-care action for a patient.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueCareRequest {
    pub participant_id: String,
    pub full_name: String,
    /// YYYY-MM-DD.
    pub dob: String,
    pub phone_last4: String,
}

/// A credit event as shown to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditEventView {
    /// Patient fingerprint the reused history belongs to.
    pub patient_id: String,
    /// Credited contributor.
    pub from: String,
    /// Reusing participant.
    pub to: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&ContinuityCreditEvent> for CreditEventView {
    fn from(event: &ContinuityCreditEvent) -> Self {
        Self {
            patient_id: event.fingerprint.to_string(),
            from: event.contributor.clone(),
            to: event.requester.clone(),
            timestamp: event.timestamp,
        }
    }
}

/// Response after a continue-care action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueCareResponse {
    pub status: ReuseStatus,
    pub credited: bool,
    pub credits_awarded: usize,
    pub events: Vec<CreditEventView>,
}

impl From<ReuseOutcome> for ContinueCareResponse {
    fn from(outcome: ReuseOutcome) -> Self {
        Self {
            status: outcome.status,
            credited: outcome.credited,
            credits_awarded: outcome.credits_awarded,
            events: outcome.events.iter().map(CreditEventView::from).collect(),
        }
    }
}

/// Handle a continue-care action.
pub async fn handle_continue_care(
    participants: &dyn ParticipantStore,
    records: &dyn RecordStore,
    ledger: &CreditLedger,
    request: ContinueCareRequest,
) -> Result<ContinueCareResponse, String> {
    // Surface an unknown requester before touching the ledger.
    participants
        .get(&request.participant_id)
        .await
        .map_err(|e| e.to_string())?;

    let fingerprint = fingerprint_for(&request.full_name, &request.dob, &request.phone_last4)
        .map_err(|e| e.to_string())?;

    let resolution = resolve_contributors(participants, records, &fingerprint)
        .await
        .map_err(|e| e.to_string())?;
    let contributors: Vec<Participant> = resolution
        .contributors
        .into_iter()
        .map(|c| c.participant)
        .collect();

    let outcome = ledger
        .record_reuse(&fingerprint, &request.participant_id, &contributors)
        .await
        .map_err(|e| e.to_string())?;

    if outcome.status == ReuseStatus::Recorded {
        tracing::info!(
            "Continuity credits: {} awarded for reuse by {}",
            outcome.credits_awarded,
            request.participant_id
        );
    }
    Ok(ContinueCareResponse::from(outcome))
}
