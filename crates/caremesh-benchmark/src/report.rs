// crates/caremesh-benchmark/src/report.rs
//
// The benchmark eligibility gate and report assembly.
//
// Eligibility, in priority order: the requester must be opted in, must
// clear level 1, and at least one *other* sharing participant must have
// outcome samples to average. A lockout is a normal response with a
// reason code, never an error.

use serde::Serialize;

use caremesh_core::{ContextLevel, MeshError, OutcomeSampleSource, ParticipantStore};

use crate::distribution::TrendDistribution;

/// Why a benchmark view is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkLockReason {
    /// Requester has not opted into the network.
    NotOptedIn,
    /// Requester is opted in but below level 1.
    #[serde(rename = "locked_level_0")]
    LockedLevel0,
    /// No other sharing participant has outcome samples.
    NoParticipants,
}

/// A participant's benchmark: its own trend distribution against the
/// anonymized network average.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<BenchmarkLockReason>,
    pub own_distribution: TrendDistribution,
    pub network_average: TrendDistribution,
}

impl BenchmarkReport {
    fn locked(reason: BenchmarkLockReason, own: TrendDistribution) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
            own_distribution: own,
            network_average: TrendDistribution::ZERO,
        }
    }
}

/// Compute the benchmark for a requester.
///
/// The network average is the mean of per-participant distributions over
/// every *other* opted-in, level >= 1 participant that has at least one
/// sample. No participant identity survives the averaging.
///
/// # Errors
/// `NotFound` if the requester id is unknown.
pub async fn benchmark_for(
    participants: &dyn ParticipantStore,
    samples: &dyn OutcomeSampleSource,
    requester_id: &str,
) -> Result<BenchmarkReport, MeshError> {
    let requester = participants.get(requester_id).await?;

    if !requester.opted_in {
        return Ok(BenchmarkReport::locked(
            BenchmarkLockReason::NotOptedIn,
            TrendDistribution::ZERO,
        ));
    }
    if requester.context_level() < ContextLevel::Basic {
        return Ok(BenchmarkReport::locked(
            BenchmarkLockReason::LockedLevel0,
            TrendDistribution::ZERO,
        ));
    }

    let own_samples = samples.samples_for(&requester.id).await?;
    let own = TrendDistribution::from_samples(&own_samples).rounded();

    let mut peer_distributions = Vec::new();
    for peer in participants.list().await? {
        if peer.id == requester.id || peer.context_level() < ContextLevel::Basic {
            continue;
        }
        let peer_samples = samples.samples_for(&peer.id).await?;
        if peer_samples.is_empty() {
            continue;
        }
        peer_distributions.push(TrendDistribution::from_samples(&peer_samples));
    }

    if peer_distributions.is_empty() {
        return Ok(BenchmarkReport::locked(
            BenchmarkLockReason::NoParticipants,
            own,
        ));
    }

    Ok(BenchmarkReport {
        eligible: true,
        reason: None,
        own_distribution: own,
        network_average: TrendDistribution::mean(&peer_distributions).rounded(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use caremesh_core::{Fingerprint, Participant, PatientRecord, RecordStore, ResponseTrend};
    use caremesh_store::{InMemoryParticipantStore, InMemoryRecordStore};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    async fn roster(entries: &[(&str, bool, u8)]) -> InMemoryParticipantStore {
        let store = InMemoryParticipantStore::new();
        for (id, opted_in, pct) in entries {
            store
                .register(Participant {
                    id: id.to_string(),
                    name: format!("Clinic {}", id),
                    opted_in: *opted_in,
                    contribution_pct: *pct,
                })
                .await
                .unwrap();
        }
        store
    }

    async fn add_outcome(
        records: &InMemoryRecordStore,
        owner: &str,
        patient: &str,
        trend: ResponseTrend,
    ) {
        records
            .insert(PatientRecord {
                id: Uuid::now_v7(),
                participant_id: owner.to_string(),
                fingerprint: Fingerprint::compute(
                    patient,
                    NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
                    "1234",
                )
                .unwrap(),
                start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
                conditions: vec!["Hypertension".to_string()],
                interventions: vec!["Medication Management".to_string()],
                response_trend: Some(trend),
                red_flags: vec![],
                timeline: vec![],
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn opted_out_requester_is_locked_first() {
        let participants = roster(&[("A", true, 85), ("B", false, 90)]).await;
        let records = InMemoryRecordStore::new();
        add_outcome(&records, "A", "p1", ResponseTrend::Improving).await;

        let report = benchmark_for(&participants, &records, "B").await.unwrap();
        assert!(!report.eligible);
        assert_eq!(report.reason, Some(BenchmarkLockReason::NotOptedIn));
    }

    #[tokio::test]
    async fn level_0_requester_is_locked_even_with_network_samples() {
        let participants = roster(&[("A", true, 85), ("D", true, 5)]).await;
        let records = InMemoryRecordStore::new();
        add_outcome(&records, "A", "p1", ResponseTrend::Improving).await;

        let report = benchmark_for(&participants, &records, "D").await.unwrap();
        assert!(!report.eligible);
        assert_eq!(report.reason, Some(BenchmarkLockReason::LockedLevel0));
    }

    #[tokio::test]
    async fn no_other_sampled_participant_locks_with_own_distribution() {
        let participants = roster(&[("A", true, 85), ("C", true, 30)]).await;
        let records = InMemoryRecordStore::new();
        // Only the requester has samples; C shares but has none.
        add_outcome(&records, "A", "p1", ResponseTrend::Worse).await;

        let report = benchmark_for(&participants, &records, "A").await.unwrap();
        assert!(!report.eligible);
        assert_eq!(report.reason, Some(BenchmarkLockReason::NoParticipants));
        assert_eq!(report.own_distribution.worse, 1.0);
        assert_eq!(report.network_average, TrendDistribution::ZERO);
    }

    #[tokio::test]
    async fn zero_own_samples_is_still_eligible() {
        let participants = roster(&[("A", true, 85), ("C", true, 30)]).await;
        let records = InMemoryRecordStore::new();
        // The peer has samples; the requester has none.
        add_outcome(&records, "C", "p1", ResponseTrend::Plateau).await;

        let report = benchmark_for(&participants, &records, "A").await.unwrap();
        assert!(report.eligible);
        assert!(report.reason.is_none());
        assert_eq!(report.own_distribution, TrendDistribution::ZERO);
        assert_eq!(report.network_average.plateau, 1.0);
    }

    #[tokio::test]
    async fn network_average_is_participant_level() {
        let participants = roster(&[("A", true, 85), ("C", true, 30), ("E", true, 50)]).await;
        let records = InMemoryRecordStore::new();
        // C: three improving patients. E: one worse patient. Pooling the
        // samples would give 0.75/0.25; participant averaging gives 0.5/0.5.
        for patient in ["p1", "p2", "p3"] {
            add_outcome(&records, "C", patient, ResponseTrend::Improving).await;
        }
        add_outcome(&records, "E", "p4", ResponseTrend::Worse).await;

        let report = benchmark_for(&participants, &records, "A").await.unwrap();
        assert!(report.eligible);
        assert_eq!(report.network_average.improving, 0.5);
        assert_eq!(report.network_average.worse, 0.5);
    }

    #[tokio::test]
    async fn non_sharing_peers_are_excluded_from_the_average() {
        let participants = roster(&[("A", true, 85), ("B", false, 90), ("D", true, 5)]).await;
        let records = InMemoryRecordStore::new();
        add_outcome(&records, "A", "p1", ResponseTrend::Improving).await;
        add_outcome(&records, "B", "p2", ResponseTrend::Worse).await;
        add_outcome(&records, "D", "p3", ResponseTrend::Worse).await;

        // B is opted out and D is level 0 — neither counts as a peer.
        let report = benchmark_for(&participants, &records, "A").await.unwrap();
        assert!(!report.eligible);
        assert_eq!(report.reason, Some(BenchmarkLockReason::NoParticipants));
    }

    #[tokio::test]
    async fn unknown_requester_is_not_found() {
        let participants = roster(&[]).await;
        let records = InMemoryRecordStore::new();
        assert!(matches!(
            benchmark_for(&participants, &records, "Z").await,
            Err(MeshError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn locked_report_omits_reason_only_when_eligible() {
        let participants = roster(&[("A", true, 85), ("C", true, 30)]).await;
        let records = InMemoryRecordStore::new();
        add_outcome(&records, "C", "p1", ResponseTrend::Plateau).await;

        let report = benchmark_for(&participants, &records, "A").await.unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("reason").is_none());
        assert!(json.get("ownDistribution").is_some());
        assert!(json.get("networkAverage").is_some());
    }
}
