// crates/caremesh-gating/src/summary.rs
//
// Leveled shared-summary building.
//
// Each contributor's records are disclosed strictly by its visible level,
// then merged across contributors: list fields are unioned in first-seen
// order and deduplicated; scalar fields come from the contributor with
// the highest visible level, ties broken by ascending participant id.
//
// The summary is an explicit per-level struct set, not an all-optional
// bag — a level-2 field cannot be read off a level-1 summary at all.

use chrono::NaiveDate;
use serde::Serialize;

use caremesh_core::{ContextLevel, PatientRecord, ResponseTrend};

/// Merged timeline entries are truncated to this many bullets.
const TIMELINE_MAX: usize = 5;

/// One contributor's input to the merge: its visible level and records.
#[derive(Debug, Clone)]
pub struct Contribution<'a> {
    /// Contributor participant id (used for deterministic ordering).
    pub participant_id: &'a str,
    /// min(requester level, contributor level) for this contributor.
    pub visible_level: ContextLevel,
    /// The contributor's records for the matched patient.
    pub records: &'a [PatientRecord],
}

/// A covered episode-of-care date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A summary whose deepest visible contribution is level 1.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicSummary {
    pub conditions: Vec<String>,
    pub date_ranges: Vec<DateRange>,
}

/// A summary whose deepest visible contribution is level 2.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalSummary {
    pub conditions: Vec<String>,
    pub date_ranges: Vec<DateRange>,
    pub interventions: Vec<String>,
    pub response_trend: Option<ResponseTrend>,
}

/// A summary whose deepest visible contribution is level 3.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSummary {
    pub conditions: Vec<String>,
    pub date_ranges: Vec<DateRange>,
    pub interventions: Vec<String>,
    pub response_trend: Option<ResponseTrend>,
    pub red_flags: Vec<String>,
    pub timeline: Vec<String>,
    pub last_seen_date: Option<NaiveDate>,
}

/// The merged cross-contributor summary, shaped by the deepest visible
/// level among the qualifying contributors.
///
/// Serializes untagged, so the wire shape is a flat object whose fields
/// grow with the level.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SharedSummary {
    Basic(BasicSummary),
    Clinical(ClinicalSummary),
    Full(FullSummary),
}

impl SharedSummary {
    /// Conditions — present at every level.
    pub fn conditions(&self) -> &[String] {
        match self {
            SharedSummary::Basic(s) => &s.conditions,
            SharedSummary::Clinical(s) => &s.conditions,
            SharedSummary::Full(s) => &s.conditions,
        }
    }

    /// Date ranges — present at every level.
    pub fn date_ranges(&self) -> &[DateRange] {
        match self {
            SharedSummary::Basic(s) => &s.date_ranges,
            SharedSummary::Clinical(s) => &s.date_ranges,
            SharedSummary::Full(s) => &s.date_ranges,
        }
    }

    /// Interventions — visible from level 2.
    pub fn interventions(&self) -> Option<&[String]> {
        match self {
            SharedSummary::Basic(_) => None,
            SharedSummary::Clinical(s) => Some(&s.interventions),
            SharedSummary::Full(s) => Some(&s.interventions),
        }
    }

    /// Response trend — visible from level 2, when any contributor has one.
    pub fn response_trend(&self) -> Option<ResponseTrend> {
        match self {
            SharedSummary::Basic(_) => None,
            SharedSummary::Clinical(s) => s.response_trend,
            SharedSummary::Full(s) => s.response_trend,
        }
    }

    /// Red flags — visible at level 3.
    pub fn red_flags(&self) -> Option<&[String]> {
        match self {
            SharedSummary::Full(s) => Some(&s.red_flags),
            _ => None,
        }
    }

    /// Timeline — visible at level 3.
    pub fn timeline(&self) -> Option<&[String]> {
        match self {
            SharedSummary::Full(s) => Some(&s.timeline),
            _ => None,
        }
    }

    /// Last-seen date — visible at level 3.
    pub fn last_seen_date(&self) -> Option<NaiveDate> {
        match self {
            SharedSummary::Full(s) => s.last_seen_date,
            _ => None,
        }
    }
}

/// Append `item` unless an equal element is already present, preserving
/// first-seen order.
fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Merge contributions into one level-bounded summary.
///
/// Returns `None` when no contributor clears level 1 — a legitimate
/// state, not an error. The caller is responsible for withholding the
/// summary entirely from a level-0 requester.
pub fn build_shared_summary(contributions: &[Contribution<'_>]) -> Option<SharedSummary> {
    let mut eligible: Vec<&Contribution<'_>> = contributions
        .iter()
        .filter(|c| c.visible_level >= ContextLevel::Basic && !c.records.is_empty())
        .collect();
    if eligible.is_empty() {
        return None;
    }
    // Ascending id order drives both first-seen merging and tie-breaks.
    eligible.sort_by_key(|c| c.participant_id);

    let deepest = eligible
        .iter()
        .map(|c| c.visible_level)
        .max()
        .unwrap_or(ContextLevel::Basic);

    // Level 1: conditions and date ranges from every visible contributor.
    let mut conditions = Vec::new();
    let mut date_ranges = Vec::new();
    for contribution in &eligible {
        for record in contribution.records {
            for condition in &record.conditions {
                push_unique(&mut conditions, condition.clone());
            }
            push_unique(
                &mut date_ranges,
                DateRange {
                    start: record.start_date,
                    end: record.end_date,
                },
            );
        }
    }

    if deepest < ContextLevel::Collaborative {
        return Some(SharedSummary::Basic(BasicSummary {
            conditions,
            date_ranges,
        }));
    }

    // Level 2: interventions and response trend from contributors visible
    // at level 2 or deeper. Within one contributor the trend is the
    // worst-severity trend across its records; across contributors the
    // highest visible level wins.
    let mut interventions = Vec::new();
    let mut response_trend: Option<ResponseTrend> = None;
    let mut trend_source_level: Option<ContextLevel> = None;
    for contribution in eligible
        .iter()
        .filter(|c| c.visible_level >= ContextLevel::Collaborative)
    {
        for record in contribution.records {
            for intervention in &record.interventions {
                push_unique(&mut interventions, intervention.clone());
            }
        }
        let worst =
            ResponseTrend::worst(contribution.records.iter().filter_map(|r| r.response_trend));
        if let Some(trend) = worst {
            // Strictly-greater keeps the lowest id on level ties, since
            // iteration is in ascending id order.
            if trend_source_level.map_or(true, |best| contribution.visible_level > best) {
                trend_source_level = Some(contribution.visible_level);
                response_trend = Some(trend);
            }
        }
    }

    if deepest < ContextLevel::Trusted {
        return Some(SharedSummary::Clinical(ClinicalSummary {
            conditions,
            date_ranges,
            interventions,
            response_trend,
        }));
    }

    // Level 3: red flags, timeline, and last-seen date from contributors
    // visible at level 3.
    let mut red_flags = Vec::new();
    let mut timeline = Vec::new();
    let mut last_seen_date: Option<NaiveDate> = None;
    let mut last_seen_level: Option<ContextLevel> = None;
    for contribution in eligible
        .iter()
        .filter(|c| c.visible_level >= ContextLevel::Trusted)
    {
        for record in contribution.records {
            for flag in &record.red_flags {
                push_unique(&mut red_flags, flag.clone());
            }
            for entry in &record.timeline {
                push_unique(&mut timeline, entry.clone());
            }
        }
        let latest = contribution.records.iter().map(|r| r.end_date).max();
        if let Some(date) = latest {
            if last_seen_level.map_or(true, |best| contribution.visible_level > best) {
                last_seen_level = Some(contribution.visible_level);
                last_seen_date = Some(date);
            }
        }
    }
    timeline.truncate(TIMELINE_MAX);

    Some(SharedSummary::Full(FullSummary {
        conditions,
        date_ranges,
        interventions,
        response_trend,
        red_flags,
        timeline,
        last_seen_date,
    }))
}
