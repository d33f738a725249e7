// crates/caremesh-rpc/src/handlers/intake.rs
//
// Intake handlers: the composite intake check and record submission.
// Input validation (date formats, phone digits) happens here, before the
// engine or any store is touched.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use caremesh_core::{
    Fingerprint, MeshError, ParticipantStore, PatientRecord, RecordStore, ResponseTrend,
};
use caremesh_gating::intake::{intake_check, IntakeReport};

/// Parse a `YYYY-MM-DD` date field, rejecting anything else as
/// `InvalidInput`.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, MeshError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| MeshError::InvalidInput(format!("{} must be a YYYY-MM-DD date", field)))
}

/// Validate an identity triple and compute its fingerprint.
pub(crate) fn fingerprint_for(
    full_name: &str,
    dob: &str,
    phone_last4: &str,
) -> Result<Fingerprint, MeshError> {
    let dob = parse_date("dob", dob)?;
    Fingerprint::compute(full_name, dob, phone_last4)
}

// ---------------------------------------------------------------------------
// Intake check
// ---------------------------------------------------------------------------

/// Request for an intake check against the network.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeCheckRequest {
    pub participant_id: String,
    pub full_name: String,
    /// YYYY-MM-DD.
    pub dob: String,
    pub phone_last4: String,
}

/// Handle an intake check.
pub async fn handle_check(
    participants: &dyn ParticipantStore,
    records: &dyn RecordStore,
    request: IntakeCheckRequest,
) -> Result<IntakeReport, String> {
    let fingerprint = fingerprint_for(&request.full_name, &request.dob, &request.phone_last4)
        .map_err(|e| e.to_string())?;
    intake_check(participants, records, &request.participant_id, &fingerprint)
        .await
        .map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Record submission
// ---------------------------------------------------------------------------

/// Request to create a patient record at intake time. The record is
/// owned by the submitting participant and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRecordRequest {
    pub participant_id: String,
    pub full_name: String,
    /// YYYY-MM-DD.
    pub dob: String,
    pub phone_last4: String,
    /// YYYY-MM-DD.
    pub start_date: String,
    /// YYYY-MM-DD.
    pub end_date: String,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub interventions: Vec<String>,
    #[serde(default)]
    pub response_trend: Option<ResponseTrend>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<String>,
}

/// Response after creating a record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRecordResponse {
    pub record_id: Uuid,
    pub fingerprint: Fingerprint,
}

/// Handle a record submission.
pub async fn handle_submit_record(
    participants: &dyn ParticipantStore,
    records: &dyn RecordStore,
    request: SubmitRecordRequest,
) -> Result<SubmitRecordResponse, String> {
    // The owner must exist before any record is written.
    let owner = participants
        .get(&request.participant_id)
        .await
        .map_err(|e| e.to_string())?;

    let fingerprint = fingerprint_for(&request.full_name, &request.dob, &request.phone_last4)
        .map_err(|e| e.to_string())?;
    let start_date = parse_date("startDate", &request.start_date).map_err(|e| e.to_string())?;
    let end_date = parse_date("endDate", &request.end_date).map_err(|e| e.to_string())?;
    if end_date < start_date {
        return Err(MeshError::InvalidInput(
            "endDate must not precede startDate".to_string(),
        )
        .to_string());
    }

    let record = PatientRecord {
        id: Uuid::now_v7(),
        participant_id: owner.id,
        fingerprint: fingerprint.clone(),
        start_date,
        end_date,
        conditions: request.conditions,
        interventions: request.interventions,
        response_trend: request.response_trend,
        red_flags: request.red_flags,
        timeline: request.timeline,
        created_at: Utc::now(),
    };
    let record_id = record.id;
    records.insert(record).await.map_err(|e| e.to_string())?;
    tracing::info!(
        "Participant {} contributed record {}",
        request.participant_id,
        record_id
    );

    Ok(SubmitRecordResponse {
        record_id,
        fingerprint,
    })
}
