// crates/caremesh-gating/src/lib.rs
//
// caremesh-gating: Reciprocity gate, record matching, leveled summary
// building, and what-if unlock scenarios for the CareMesh network.
//
// This crate implements the visibility side of the engine: how much of
// another participant's shared record a requester may see. The rule is
// reciprocal — a requester sees each contributor's data at
// min(requester level, contributor level), so nobody reads deeper than
// they share.

pub mod intake;
pub mod reciprocity;
pub mod summary;
pub mod unlocks;

pub use intake::{intake_check, resolve_contributors, IntakeReport, MatchResolution};
pub use reciprocity::{visible_level, ContributorGate, GateReason, GateReport};
pub use summary::{build_shared_summary, Contribution, SharedSummary};
pub use unlocks::{next_level_unlocks, what_if_scenarios, WhatIfScenario};
