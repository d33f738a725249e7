// crates/caremesh-store/src/lib.rs
//
// caremesh-store: In-memory store implementations for the CareMesh engine.
//
// The engine is stateless per request except for two shared mutable
// resources: the participant settings table and the credit event log.
// Both live here, behind tokio synchronization primitives — the
// participant table and record store under RwLocks (concurrent readers,
// single writer), the event log under one Mutex so insert-if-absent is a
// true atomic check-and-set. Reads hand out cloned snapshots, so no
// reader ever observes a partially applied update.

pub mod events;
pub mod participants;
pub mod records;

pub use events::InMemoryEventLog;
pub use participants::InMemoryParticipantStore;
pub use records::InMemoryRecordStore;
