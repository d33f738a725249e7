// crates/caremesh-gating/src/unlocks.rs
//
// The static unlock table: which summary fields become visible at each
// context level, plus the what-if scenarios derived from it. Purely
// descriptive — field names only, never values.

use serde::Serialize;

use caremesh_core::level::{
    BASIC_THRESHOLD_PCT, COLLABORATIVE_THRESHOLD_PCT, TRUSTED_THRESHOLD_PCT,
};
use caremesh_core::ContextLevel;

/// Fields newly visible at level 1.
pub const BASIC_UNLOCKS: &[&str] = &["conditions", "dateRanges"];
/// Fields newly visible at level 2.
pub const COLLABORATIVE_UNLOCKS: &[&str] = &["interventions", "responseTrend"];
/// Fields newly visible at level 3.
pub const TRUSTED_UNLOCKS: &[&str] = &["redFlags", "timeline", "lastSeenDate"];

/// Field names newly unlocked at the given level (empty for level 0).
pub fn unlocks_at(level: ContextLevel) -> &'static [&'static str] {
    match level {
        ContextLevel::Isolated => &[],
        ContextLevel::Basic => BASIC_UNLOCKS,
        ContextLevel::Collaborative => COLLABORATIVE_UNLOCKS,
        ContextLevel::Trusted => TRUSTED_UNLOCKS,
    }
}

/// Field names the requester would newly unlock at its next level.
/// Empty at the top of the scale.
pub fn next_level_unlocks(current: ContextLevel) -> &'static [&'static str] {
    match current.next() {
        Some(next) => unlocks_at(next),
        None => &[],
    }
}

/// One what-if scenario: the minimal contribution increase needed to
/// reach a not-yet-attained level, and what that level unlocks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfScenario {
    /// Contribution percentage that attains the target level.
    pub target_pct: u8,
    /// The level attained at `target_pct`.
    pub target_level: ContextLevel,
    /// Field names newly visible at the target level.
    pub unlocks: Vec<String>,
    /// Percentage-point increase needed from the current setting.
    pub increase_needed: u8,
}

/// What-if scenarios for every level above the requester's current one,
/// ordered by ascending target level.
pub fn what_if_scenarios(opted_in: bool, contribution_pct: u8) -> Vec<WhatIfScenario> {
    let current = ContextLevel::derive(opted_in, contribution_pct);

    let thresholds = [
        (BASIC_THRESHOLD_PCT, ContextLevel::Basic),
        (COLLABORATIVE_THRESHOLD_PCT, ContextLevel::Collaborative),
        (TRUSTED_THRESHOLD_PCT, ContextLevel::Trusted),
    ];

    thresholds
        .into_iter()
        .filter(|(_, level)| *level > current)
        .map(|(threshold, level)| WhatIfScenario {
            target_pct: threshold,
            target_level: level,
            unlocks: unlocks_at(level).iter().map(|s| s.to_string()).collect(),
            increase_needed: threshold.saturating_sub(contribution_pct),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_has_no_further_unlocks() {
        assert!(next_level_unlocks(ContextLevel::Trusted).is_empty());
        assert_eq!(next_level_unlocks(ContextLevel::Isolated), BASIC_UNLOCKS);
        assert_eq!(
            next_level_unlocks(ContextLevel::Collaborative),
            TRUSTED_UNLOCKS
        );
    }

    #[test]
    fn scenarios_cover_only_unattained_levels() {
        let scenarios = what_if_scenarios(true, 45); // level 2
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].target_pct, 80);
        assert_eq!(scenarios[0].target_level, ContextLevel::Trusted);
        assert_eq!(scenarios[0].increase_needed, 35);

        assert!(what_if_scenarios(true, 85).is_empty());
    }

    #[test]
    fn opted_out_requester_sees_full_ladder() {
        let scenarios = what_if_scenarios(false, 50);
        assert_eq!(scenarios.len(), 3);
        let targets: Vec<u8> = scenarios.iter().map(|s| s.target_pct).collect();
        assert_eq!(targets, vec![10, 40, 80]);
        // Already past a threshold percentage: no increase needed, the
        // scenario is about opting in.
        assert_eq!(scenarios[0].increase_needed, 0);
        assert_eq!(scenarios[1].increase_needed, 0);
        assert_eq!(scenarios[2].increase_needed, 30);
    }

    #[test]
    fn scenarios_ascend_by_target_level() {
        let scenarios = what_if_scenarios(true, 0);
        let levels: Vec<ContextLevel> = scenarios.iter().map(|s| s.target_level).collect();
        assert_eq!(
            levels,
            vec![
                ContextLevel::Basic,
                ContextLevel::Collaborative,
                ContextLevel::Trusted
            ]
        );
        assert_eq!(scenarios[2].unlocks, vec!["redFlags", "timeline", "lastSeenDate"]);
    }
}
