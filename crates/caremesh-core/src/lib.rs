// crates/caremesh-core/src/lib.rs
//
// caremesh-core: Core types, context-level model, and store traits for
// the CareMesh network.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the canonical data structures (participants, patient records,
// credit events), the patient fingerprint, the error taxonomy, and the
// trait interfaces the engines consume.

pub mod credit;
pub mod error;
pub mod fingerprint;
pub mod level;
pub mod participant;
pub mod record;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use caremesh_core::Participant;`

// Participant types
pub use participant::Participant;

// Context-level model
pub use level::ContextLevel;

// Patient record types
pub use record::{PatientRecord, ResponseTrend};

// Fingerprint
pub use fingerprint::{normalize_name, Fingerprint};

// Credit events
pub use credit::ContinuityCreditEvent;

// Error type
pub use error::MeshError;

// Traits
pub use traits::{EventLog, OutcomeSampleSource, ParticipantStore, RecordStore};
