// crates/caremesh-credits/src/lib.rs
//
// caremesh-credits: The continuity-credit ledger for the CareMesh network.
//
// Contributors earn one credit each time another participant reuses their
// shared history for a patient — at most once per (patient, contributor,
// requester) triple, ever. Totals are derived from event counts, never
// incremented, so replays cannot cause drift.

pub mod ledger;

pub use ledger::{CreditLedger, ReuseOutcome, ReuseStatus};
