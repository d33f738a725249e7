// crates/caremesh-core/src/record.rs
//
// Patient records: the leveled clinical context a participant contributes
// for one patient. A record is created at intake time by its owning
// participant and is immutable afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fingerprint::Fingerprint;

/// Response-trend category for an episode of care.
///
/// Variant order is severity order: `Worse` is the worst outcome, so the
/// derived `Ord` makes `iter().max()` pick the worst trend in a set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResponseTrend {
    Improving,
    Plateau,
    Worse,
}

impl ResponseTrend {
    /// The worst-severity trend in a set, or `None` when empty.
    pub fn worst<I: IntoIterator<Item = ResponseTrend>>(trends: I) -> Option<ResponseTrend> {
        trends.into_iter().max()
    }
}

/// One participant's clinical record for one patient.
///
/// Fields are grouped by the context level at which they become visible
/// to other participants:
///   level 1 — `conditions`, `start_date`/`end_date`
///   level 2 — `interventions`, `response_trend`
///   level 3 — `red_flags`, `timeline`, `end_date` as last-seen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique identifier (UUID v7 for time-ordering).
    pub id: Uuid,
    /// Owning participant. Exactly one participant owns each record.
    pub participant_id: String,
    /// Patient fingerprint this record belongs to.
    pub fingerprint: Fingerprint,
    /// Start of the covered episode of care.
    pub start_date: NaiveDate,
    /// End of the covered episode of care (doubles as last-seen date).
    pub end_date: NaiveDate,
    /// Diagnosed conditions (level 1).
    pub conditions: Vec<String>,
    /// Intervention categories (level 2).
    pub interventions: Vec<String>,
    /// Response trend over the episode (level 2).
    pub response_trend: Option<ResponseTrend>,
    /// Red flags (level 3).
    pub red_flags: Vec<String>,
    /// Short timeline bullets (level 3).
    pub timeline: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
