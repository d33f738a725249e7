// crates/caremesh-rpc/src/handlers/benchmark.rs

use serde::Deserialize;

use caremesh_benchmark::{benchmark_for, BenchmarkReport};
use caremesh_core::{OutcomeSampleSource, ParticipantStore};

/// Request for a participant's outcome benchmark.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRequest {
    pub participant_id: String,
}

/// Handle a benchmark query. Lockouts (opted out, level 0, no peers)
/// come back as eligible=false with a reason, not as errors.
pub async fn handle_get(
    participants: &dyn ParticipantStore,
    samples: &dyn OutcomeSampleSource,
    request: BenchmarkRequest,
) -> Result<BenchmarkReport, String> {
    benchmark_for(participants, samples, &request.participant_id)
        .await
        .map_err(|e| e.to_string())
}
