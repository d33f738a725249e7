// crates/caremesh-rpc/src/handlers/node.rs

use std::time::Instant;

use serde::{Deserialize, Serialize};

use caremesh_core::ParticipantStore;

/// Request for node health. No parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthRequest {}

/// Liveness and basic roster stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub participant_count: usize,
}

/// Handle a health check.
pub async fn handle_health(
    participants: &dyn ParticipantStore,
    start_time: Instant,
    _request: HealthRequest,
) -> Result<HealthResponse, String> {
    let roster = participants.list().await.map_err(|e| e.to_string())?;
    Ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: start_time.elapsed().as_secs(),
        participant_count: roster.len(),
    })
}
