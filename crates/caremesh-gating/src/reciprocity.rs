// crates/caremesh-gating/src/reciprocity.rs
//
// The reciprocity gate: per-contributor visible levels and the aggregate
// gating statistics for an intake check.
//
// visible = min(requester level, contributor level). A contributor is
// "capped" when the requester's own level is the limiting factor — the
// contributor had more to offer than the requester is cleared to see.

use serde::Serialize;

use caremesh_core::{ContextLevel, Participant};

/// Gating outcome for a single contributor, as shown to the requester.
///
/// Nothing beyond the contributor's id, name, and level is ever exposed
/// here — in particular, not its opt-in flag or raw percentage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorGate {
    /// Contributor participant id.
    pub id: String,
    /// Contributor display name.
    pub name: String,
    /// The contributor's own derived level.
    pub contributor_level: ContextLevel,
    /// What the requester actually sees: min(requester, contributor).
    pub visible_level: ContextLevel,
    /// True when visible_level < contributor_level.
    pub is_capped: bool,
}

/// Why a requester's view is (or is not) gated, selected by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateReason {
    /// Requester has not opted into the network.
    NotOptedIn,
    /// Requester is opted in but below the level-1 threshold.
    #[serde(rename = "level_0")]
    Level0,
    /// No contributor clears level 1 for this patient.
    NoContributors,
    /// At least one contributor is visible.
    Ok,
}

/// Aggregate gating statistics for one intake check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateReport {
    /// Contributors with a visible level above 0.
    pub contributing_count: usize,
    /// Contributors whose detail is capped by the requester's level.
    pub capped_count: usize,
    /// Per-contributor gating outcomes, ordered by contributor id.
    pub contributors: Vec<ContributorGate>,
    /// Gating reason, by priority: not_opted_in, level_0,
    /// no_contributors, ok.
    pub reason: GateReason,
}

/// The reciprocity rule: a requester sees a contributor's data at the
/// lower of the two levels.
pub fn visible_level(requester: ContextLevel, contributor: ContextLevel) -> ContextLevel {
    requester.min(contributor)
}

/// Evaluate the gate for a requester against the opted-in contributors
/// holding records for the matched patient.
///
/// Contributors are reported in ascending id order for determinism.
pub fn evaluate(requester: &Participant, contributors: &[Participant]) -> GateReport {
    let requester_level = requester.context_level();

    let mut gates: Vec<ContributorGate> = contributors
        .iter()
        .map(|contributor| {
            let contributor_level = contributor.context_level();
            let visible = visible_level(requester_level, contributor_level);
            ContributorGate {
                id: contributor.id.clone(),
                name: contributor.name.clone(),
                contributor_level,
                visible_level: visible,
                is_capped: visible < contributor_level,
            }
        })
        .collect();
    gates.sort_by(|a, b| a.id.cmp(&b.id));

    let contributing_count = gates
        .iter()
        .filter(|g| g.visible_level > ContextLevel::Isolated)
        .count();
    let capped_count = gates.iter().filter(|g| g.is_capped).count();

    let reason = if !requester.opted_in {
        GateReason::NotOptedIn
    } else if requester_level == ContextLevel::Isolated {
        GateReason::Level0
    } else if !gates
        .iter()
        .any(|g| g.contributor_level >= ContextLevel::Basic)
    {
        GateReason::NoContributors
    } else {
        GateReason::Ok
    };

    GateReport {
        contributing_count,
        capped_count,
        contributors: gates,
        reason,
    }
}
