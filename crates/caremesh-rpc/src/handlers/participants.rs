// crates/caremesh-rpc/src/handlers/participants.rs
//
// Participant roster handlers: list, get, register, and settings update.
// The settings update is the only mutation path for participant state;
// the derived level and status badge are recomputed on every response.

use serde::{Deserialize, Serialize};

use caremesh_core::level::validate_contribution_pct;
use caremesh_core::{ContextLevel, Participant, ParticipantStore};

/// A participant as shown to callers, with its derived level and badge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub id: String,
    pub name: String,
    pub opted_in: bool,
    pub contribution_pct: u8,
    pub context_level: ContextLevel,
    pub network_status: String,
}

impl From<&Participant> for ParticipantView {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.clone(),
            name: participant.name.clone(),
            opted_in: participant.opted_in,
            contribution_pct: participant.contribution_pct,
            context_level: participant.context_level(),
            network_status: participant.status_label().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Request to list the roster. No parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParticipantsRequest {}

/// Handle a roster listing.
pub async fn handle_list(
    participants: &dyn ParticipantStore,
    _request: ListParticipantsRequest,
) -> Result<Vec<ParticipantView>, String> {
    let roster = participants.list().await.map_err(|e| e.to_string())?;
    Ok(roster.iter().map(ParticipantView::from).collect())
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// Request for a single participant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParticipantRequest {
    pub participant_id: String,
}

/// Handle a single-participant lookup.
pub async fn handle_get(
    participants: &dyn ParticipantStore,
    request: GetParticipantRequest,
) -> Result<ParticipantView, String> {
    let participant = participants
        .get(&request.participant_id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(ParticipantView::from(&participant))
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

/// Request to add a participant to the roster.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParticipantRequest {
    pub id: String,
    pub name: String,
    pub opted_in: bool,
    pub contribution_pct: i64,
}

/// Handle a participant registration.
pub async fn handle_register(
    participants: &dyn ParticipantStore,
    request: RegisterParticipantRequest,
) -> Result<ParticipantView, String> {
    let pct = validate_contribution_pct(request.contribution_pct).map_err(|e| e.to_string())?;
    let participant = Participant {
        id: request.id,
        name: request.name,
        opted_in: request.opted_in,
        contribution_pct: pct,
    };
    participants
        .register(participant.clone())
        .await
        .map_err(|e| e.to_string())?;
    tracing::info!("Registered participant {}", participant.id);
    Ok(ParticipantView::from(&participant))
}

// ---------------------------------------------------------------------------
// Update settings
// ---------------------------------------------------------------------------

/// Request to change a participant's sharing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub participant_id: String,
    pub opted_in: bool,
    pub contribution_pct: i64,
}

/// Handle a settings update. Out-of-range percentages are rejected
/// before any state change.
pub async fn handle_update_settings(
    participants: &dyn ParticipantStore,
    request: UpdateSettingsRequest,
) -> Result<ParticipantView, String> {
    let pct = validate_contribution_pct(request.contribution_pct).map_err(|e| e.to_string())?;
    let updated = participants
        .update_settings(&request.participant_id, request.opted_in, pct)
        .await
        .map_err(|e| e.to_string())?;
    tracing::info!(
        "Participant {} now optedIn={} at {}% (level {})",
        updated.id,
        updated.opted_in,
        updated.contribution_pct,
        updated.context_level().as_u8()
    );
    Ok(ParticipantView::from(&updated))
}
