// crates/caremesh-core/src/level.rs
//
// Context levels: the ordinal 0-3 scale that gates how much shared detail
// a participant may see. A level is always derived from (opted-in,
// contribution percentage) — it is never stored, so it can never go stale.

use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Ordinal context level, derived from a participant's opt-in flag and
/// contribution percentage.
///
/// Thresholds: below 10% (or opted out) is `Isolated`; below 40% is
/// `Basic`; below 80% is `Collaborative`; 80% and above is `Trusted`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum ContextLevel {
    /// Level 0 — no shared context visible.
    Isolated,
    /// Level 1 — conditions and date ranges.
    Basic,
    /// Level 2 — adds interventions and response trend.
    Collaborative,
    /// Level 3 — adds red flags, timeline, and last-seen date.
    Trusted,
}

/// Contribution percentage at which level 1 unlocks.
pub const BASIC_THRESHOLD_PCT: u8 = 10;
/// Contribution percentage at which level 2 unlocks.
pub const COLLABORATIVE_THRESHOLD_PCT: u8 = 40;
/// Contribution percentage at which level 3 unlocks.
pub const TRUSTED_THRESHOLD_PCT: u8 = 80;

impl ContextLevel {
    /// Derive the context level from opt-in state and contribution
    /// percentage. Pure; the caller validates the percentage range.
    pub fn derive(opted_in: bool, contribution_pct: u8) -> Self {
        if !opted_in || contribution_pct < BASIC_THRESHOLD_PCT {
            ContextLevel::Isolated
        } else if contribution_pct < COLLABORATIVE_THRESHOLD_PCT {
            ContextLevel::Basic
        } else if contribution_pct < TRUSTED_THRESHOLD_PCT {
            ContextLevel::Collaborative
        } else {
            ContextLevel::Trusted
        }
    }

    /// Network status badge for this level.
    pub fn status_label(&self) -> &'static str {
        match self {
            ContextLevel::Isolated => "Isolated",
            ContextLevel::Basic => "Basic",
            ContextLevel::Collaborative => "Collaborative",
            ContextLevel::Trusted => "Trusted Contributor",
        }
    }

    /// The next level up, or `None` at the top of the scale.
    pub fn next(&self) -> Option<ContextLevel> {
        match self {
            ContextLevel::Isolated => Some(ContextLevel::Basic),
            ContextLevel::Basic => Some(ContextLevel::Collaborative),
            ContextLevel::Collaborative => Some(ContextLevel::Trusted),
            ContextLevel::Trusted => None,
        }
    }

    /// The contribution percentage threshold that unlocks this level,
    /// or `None` for level 0 (which has no threshold).
    pub fn threshold_pct(&self) -> Option<u8> {
        match self {
            ContextLevel::Isolated => None,
            ContextLevel::Basic => Some(BASIC_THRESHOLD_PCT),
            ContextLevel::Collaborative => Some(COLLABORATIVE_THRESHOLD_PCT),
            ContextLevel::Trusted => Some(TRUSTED_THRESHOLD_PCT),
        }
    }

    /// Numeric form (0-3) for wire contracts and ordering.
    pub fn as_u8(&self) -> u8 {
        match self {
            ContextLevel::Isolated => 0,
            ContextLevel::Basic => 1,
            ContextLevel::Collaborative => 2,
            ContextLevel::Trusted => 3,
        }
    }
}

impl From<ContextLevel> for u8 {
    fn from(level: ContextLevel) -> u8 {
        level.as_u8()
    }
}

impl TryFrom<u8> for ContextLevel {
    type Error = MeshError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ContextLevel::Isolated),
            1 => Ok(ContextLevel::Basic),
            2 => Ok(ContextLevel::Collaborative),
            3 => Ok(ContextLevel::Trusted),
            other => Err(MeshError::InvalidInput(format!(
                "context level must be 0-3, got {}",
                other
            ))),
        }
    }
}

/// Validate a caller-supplied contribution percentage.
///
/// Accepts any integer in [0, 100]; everything else is `InvalidInput`.
pub fn validate_contribution_pct(pct: i64) -> Result<u8, MeshError> {
    if (0..=100).contains(&pct) {
        Ok(pct as u8)
    } else {
        Err(MeshError::InvalidInput(format!(
            "contributionPct must be in [0, 100], got {}",
            pct
        )))
    }
}
