// crates/caremesh-gating/src/intake.rs
//
// The composite intake-check pipeline: level derivation, reciprocity
// gating, record matching, summary building, and what-if scenarios, all
// from one consistent snapshot of the participant table and record store.
//
// Whether a match exists is never gated; only the matched content is.

use serde::Serialize;

use caremesh_core::{
    ContextLevel, Fingerprint, MeshError, Participant, ParticipantStore, PatientRecord,
    RecordStore,
};

use crate::reciprocity::{self, GateReport};
use crate::summary::{build_shared_summary, Contribution, SharedSummary};
use crate::unlocks::{next_level_unlocks, what_if_scenarios, WhatIfScenario};

/// The requester's own view of its standing, echoed in every intake
/// response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterView {
    pub id: String,
    pub opted_in: bool,
    pub contribution_pct: u8,
    pub context_level: ContextLevel,
}

/// Network-wide participation statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    /// Opted-in participants.
    pub participating_count: usize,
    /// Opted-in participants as a rounded percentage of the roster.
    pub participating_pct: u32,
}

/// Preview of what the requester's next level would unlock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedPreview {
    pub next_level_unlocks: Vec<String>,
}

/// The composite intake-check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReport {
    pub match_found: bool,
    pub fingerprint: Fingerprint,
    pub requesting_participant: RequesterView,
    pub network_stats: NetworkStats,
    pub gating: GateReport,
    pub shared_summary: Option<SharedSummary>,
    pub locked_preview: LockedPreview,
    pub what_if: Vec<WhatIfScenario>,
}

/// A contributor resolved for a fingerprint: the opted-in owner and its
/// records for that patient, ordered by participant id.
#[derive(Debug, Clone)]
pub struct ResolvedContributor {
    pub participant: Participant,
    pub records: Vec<PatientRecord>,
}

/// Outcome of resolving a fingerprint against the record store.
#[derive(Debug, Clone)]
pub struct MatchResolution {
    /// True when any record carries the fingerprint, regardless of its
    /// owner's opt-in state or level.
    pub match_found: bool,
    /// Opted-in owners with records for the patient, ascending by id.
    /// The requester's own records resolve like anyone else's.
    pub contributors: Vec<ResolvedContributor>,
}

/// Resolve a fingerprint to its contributing participants.
///
/// Records whose owner is missing from the participant table or opted
/// out are counted for `match_found` but contribute nothing further —
/// their owner's existence is not revealed.
pub async fn resolve_contributors(
    participants: &dyn ParticipantStore,
    records: &dyn RecordStore,
    fingerprint: &Fingerprint,
) -> Result<MatchResolution, MeshError> {
    let matched = records.find_by_fingerprint(fingerprint).await?;
    let match_found = !matched.is_empty();

    let mut by_owner: std::collections::BTreeMap<String, Vec<PatientRecord>> =
        std::collections::BTreeMap::new();
    for record in matched {
        by_owner
            .entry(record.participant_id.clone())
            .or_default()
            .push(record);
    }

    let mut contributors = Vec::new();
    for (owner_id, owner_records) in by_owner {
        let owner = match participants.get(&owner_id).await {
            Ok(participant) => participant,
            Err(MeshError::NotFound(_)) => continue,
            Err(other) => return Err(other),
        };
        if !owner.opted_in {
            continue;
        }
        contributors.push(ResolvedContributor {
            participant: owner,
            records: owner_records,
        });
    }

    Ok(MatchResolution {
        match_found,
        contributors,
    })
}

/// Run the full intake check for a requester and a precomputed
/// fingerprint.
///
/// # Errors
/// `NotFound` if the requester id is unknown. Gating denials are not
/// errors; they surface as reason codes in the report.
pub async fn intake_check(
    participants: &dyn ParticipantStore,
    records: &dyn RecordStore,
    requester_id: &str,
    fingerprint: &Fingerprint,
) -> Result<IntakeReport, MeshError> {
    let requester = participants.get(requester_id).await?;
    let requester_level = requester.context_level();

    let resolution = resolve_contributors(participants, records, fingerprint).await?;

    let contributor_participants: Vec<Participant> = resolution
        .contributors
        .iter()
        .map(|c| c.participant.clone())
        .collect();
    let gating = reciprocity::evaluate(&requester, &contributor_participants);

    let shared_summary = if !resolution.match_found || requester_level == ContextLevel::Isolated
    {
        None
    } else {
        let contributions: Vec<Contribution<'_>> = resolution
            .contributors
            .iter()
            .map(|c| Contribution {
                participant_id: c.participant.id.as_str(),
                visible_level: reciprocity::visible_level(
                    requester_level,
                    c.participant.context_level(),
                ),
                records: &c.records,
            })
            .collect();
        build_shared_summary(&contributions)
    };

    let roster = participants.list().await?;
    let participating_count = roster.iter().filter(|p| p.opted_in).count();
    let participating_pct = if roster.is_empty() {
        0
    } else {
        ((participating_count as f64 / roster.len() as f64) * 100.0).round() as u32
    };

    Ok(IntakeReport {
        match_found: resolution.match_found,
        fingerprint: fingerprint.clone(),
        requesting_participant: RequesterView {
            id: requester.id.clone(),
            opted_in: requester.opted_in,
            contribution_pct: requester.contribution_pct,
            context_level: requester_level,
        },
        network_stats: NetworkStats {
            participating_count,
            participating_pct,
        },
        gating,
        shared_summary,
        locked_preview: LockedPreview {
            next_level_unlocks: next_level_unlocks(requester_level)
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        what_if: what_if_scenarios(requester.opted_in, requester.contribution_pct),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reciprocity::GateReason;
    use caremesh_core::ResponseTrend;
    use caremesh_store::{InMemoryParticipantStore, InMemoryRecordStore};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn patient_fp() -> Fingerprint {
        Fingerprint::compute("John Doe", date(1990, 1, 15), "1234").unwrap()
    }

    async fn seeded_stores() -> (InMemoryParticipantStore, InMemoryRecordStore) {
        let participants = InMemoryParticipantStore::new();
        for (id, opted_in, pct) in [("A", true, 85), ("B", false, 0), ("C", true, 30)] {
            participants
                .register(Participant {
                    id: id.to_string(),
                    name: format!("Clinic {}", id),
                    opted_in,
                    contribution_pct: pct,
                })
                .await
                .unwrap();
        }

        let records = InMemoryRecordStore::new();
        let mut a_record = PatientRecord {
            id: Uuid::now_v7(),
            participant_id: "A".to_string(),
            fingerprint: patient_fp(),
            start_date: date(2023, 1, 15),
            end_date: date(2023, 6, 20),
            conditions: vec!["Hypertension".to_string(), "Type 2 Diabetes".to_string()],
            interventions: vec!["Medication Management".to_string()],
            response_trend: Some(ResponseTrend::Improving),
            red_flags: vec!["Non-adherence to medication".to_string()],
            timeline: vec!["Initial diagnosis Jan 2023".to_string()],
            created_at: Utc::now(),
        };
        records.insert(a_record.clone()).await.unwrap();

        a_record.id = Uuid::now_v7();
        a_record.participant_id = "C".to_string();
        a_record.start_date = date(2023, 7, 1);
        a_record.end_date = date(2024, 1, 10);
        a_record.conditions = vec!["Hypertension".to_string(), "High Cholesterol".to_string()];
        a_record.interventions = vec!["Dietary Changes".to_string()];
        a_record.response_trend = Some(ResponseTrend::Plateau);
        a_record.red_flags = vec!["Elevated BP readings".to_string()];
        records.insert(a_record).await.unwrap();

        (participants, records)
    }

    #[tokio::test]
    async fn trusted_requester_sees_own_data_fully_and_peer_at_peer_level() {
        let (participants, records) = seeded_stores().await;
        let report = intake_check(&participants, &records, "A", &patient_fp())
            .await
            .unwrap();

        assert!(report.match_found);
        assert_eq!(
            report.requesting_participant.context_level,
            ContextLevel::Trusted
        );
        assert_eq!(report.gating.contributing_count, 2);

        let own = report
            .gating
            .contributors
            .iter()
            .find(|g| g.id == "A")
            .unwrap();
        assert_eq!(own.visible_level, ContextLevel::Trusted);
        assert!(!own.is_capped);

        let peer = report
            .gating
            .contributors
            .iter()
            .find(|g| g.id == "C")
            .unwrap();
        assert_eq!(peer.visible_level, ContextLevel::Basic);

        // C's conditions reach the merge, C's red flags do not.
        let summary = report.shared_summary.unwrap();
        assert!(summary
            .conditions()
            .contains(&"High Cholesterol".to_string()));
        let red_flags = summary.red_flags().unwrap();
        assert!(red_flags.contains(&"Non-adherence to medication".to_string()));
        assert!(!red_flags.contains(&"Elevated BP readings".to_string()));
    }

    #[tokio::test]
    async fn opted_out_requester_gets_match_but_null_summary() {
        let (participants, records) = seeded_stores().await;
        let report = intake_check(&participants, &records, "B", &patient_fp())
            .await
            .unwrap();

        assert!(report.match_found, "match existence is not gated");
        assert_eq!(
            report.requesting_participant.context_level,
            ContextLevel::Isolated
        );
        assert!(report.shared_summary.is_none());
        assert_eq!(report.gating.reason, GateReason::NotOptedIn);
        assert_eq!(report.gating.contributing_count, 0);
        // Everything the requester could do about it is spelled out.
        assert_eq!(report.what_if.len(), 3);
        assert_eq!(
            report.locked_preview.next_level_unlocks,
            vec!["conditions", "dateRanges"]
        );
    }

    #[tokio::test]
    async fn unknown_patient_is_no_match_not_error() {
        let (participants, records) = seeded_stores().await;
        let unknown = Fingerprint::compute("Nobody Here", date(2001, 2, 3), "0000").unwrap();
        let report = intake_check(&participants, &records, "A", &unknown)
            .await
            .unwrap();

        assert!(!report.match_found);
        assert!(report.shared_summary.is_none());
        assert_eq!(report.gating.reason, GateReason::NoContributors);
    }

    #[tokio::test]
    async fn unknown_requester_is_not_found() {
        let (participants, records) = seeded_stores().await;
        let err = intake_check(&participants, &records, "Z", &patient_fp()).await;
        assert!(matches!(err, Err(MeshError::NotFound(_))));
    }

    #[tokio::test]
    async fn opted_out_owner_counts_for_match_only() {
        let (participants, records) = seeded_stores().await;
        // B owns the only record for this patient, but B is opted out.
        let fp = Fingerprint::compute("Alex Rivera", date(1978, 11, 3), "9012").unwrap();
        records
            .insert(PatientRecord {
                id: Uuid::now_v7(),
                participant_id: "B".to_string(),
                fingerprint: fp.clone(),
                start_date: date(2023, 3, 10),
                end_date: date(2023, 9, 25),
                conditions: vec!["Sciatica".to_string()],
                interventions: vec![],
                response_trend: None,
                red_flags: vec![],
                timeline: vec![],
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let report = intake_check(&participants, &records, "A", &fp).await.unwrap();
        assert!(report.match_found);
        assert!(report.gating.contributors.is_empty());
        assert_eq!(report.gating.reason, GateReason::NoContributors);
        assert!(report.shared_summary.is_none());
    }

    #[tokio::test]
    async fn network_stats_count_opted_in_roster() {
        let (participants, records) = seeded_stores().await;
        let report = intake_check(&participants, &records, "A", &patient_fp())
            .await
            .unwrap();
        assert_eq!(report.network_stats.participating_count, 2);
        assert_eq!(report.network_stats.participating_pct, 67);
    }

    #[tokio::test]
    async fn wire_shape_uses_contract_field_names() {
        let (participants, records) = seeded_stores().await;
        let report = intake_check(&participants, &records, "A", &patient_fp())
            .await
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("matchFound").is_some());
        assert!(json.get("requestingParticipant").is_some());
        assert!(json["gating"].get("contributingCount").is_some());
        assert!(json["gating"]["contributors"][0].get("isCapped").is_some());
        assert!(json["lockedPreview"].get("nextLevelUnlocks").is_some());
        assert!(json["networkStats"].get("participatingPct").is_some());
    }
}
