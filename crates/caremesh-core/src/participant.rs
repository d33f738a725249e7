// crates/caremesh-core/src/participant.rs

use serde::{Deserialize, Serialize};

use crate::level::ContextLevel;

/// A participating organization (clinic) in the CareMesh network.
///
/// Only `opted_in` and `contribution_pct` are mutable, and only through an
/// explicit settings update. The context level and status label are derived
/// on every read — they are never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Stable participant identifier (e.g. "A").
    pub id: String,
    /// Display name shown to other participants.
    pub name: String,
    /// Whether the participant shares data with the network.
    pub opted_in: bool,
    /// Self-reported sharing intensity, 0-100.
    pub contribution_pct: u8,
}

impl Participant {
    /// Derive the current context level from opt-in state and contribution
    /// percentage.
    pub fn context_level(&self) -> ContextLevel {
        ContextLevel::derive(self.opted_in, self.contribution_pct)
    }

    /// Network status badge for the derived level.
    pub fn status_label(&self) -> &'static str {
        self.context_level().status_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(opted_in: bool, pct: u8) -> Participant {
        Participant {
            id: "A".to_string(),
            name: "Clinic A".to_string(),
            opted_in,
            contribution_pct: pct,
        }
    }

    #[test]
    fn level_tracks_settings() {
        assert_eq!(participant(true, 85).context_level(), ContextLevel::Trusted);
        assert_eq!(participant(true, 30).context_level(), ContextLevel::Basic);
        assert_eq!(participant(false, 85).context_level(), ContextLevel::Isolated);
    }

    #[test]
    fn status_follows_level() {
        assert_eq!(participant(true, 85).status_label(), "Trusted Contributor");
        assert_eq!(participant(false, 0).status_label(), "Isolated");
    }
}
