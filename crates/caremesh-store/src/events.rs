// crates/caremesh-store/src/events.rs
//
// In-memory continuity-credit event log.
//
// One Mutex guards both the append-only event list and the set of recorded
// idempotency keys, so insert-if-absent is an atomic check-and-set: two
// concurrent replays of the same reuse can never both insert. Credit
// totals are derived from event counts on demand, never incremented.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use caremesh_core::{ContinuityCreditEvent, EventLog, Fingerprint, MeshError};

#[derive(Debug, Default)]
struct LogInner {
    events: Vec<ContinuityCreditEvent>,
    recorded: HashSet<(Fingerprint, String, String)>,
}

/// In-memory append-only event log.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    inner: Mutex<LogInner>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LogInner::default()),
        }
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn insert_if_absent(&self, event: ContinuityCreditEvent) -> Result<bool, MeshError> {
        let mut log = self.inner.lock().await;
        if !log.recorded.insert(event.key()) {
            return Ok(false);
        }
        log.events.push(event);
        Ok(true)
    }

    async fn recent(&self, n: usize) -> Result<Vec<ContinuityCreditEvent>, MeshError> {
        let log = self.inner.lock().await;
        Ok(log.events.iter().rev().take(n).cloned().collect())
    }

    async fn count_by_contributor(&self) -> Result<HashMap<String, u64>, MeshError> {
        let log = self.inner.lock().await;
        let mut counts: HashMap<String, u64> = HashMap::new();
        for event in &log.events {
            *counts.entry(event.contributor.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn event(patient: &str, from: &str, to: &str) -> ContinuityCreditEvent {
        ContinuityCreditEvent {
            fingerprint: Fingerprint::compute(
                patient,
                NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
                "1234",
            )
            .unwrap(),
            contributor: from.to_string(),
            requester: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn duplicate_triple_is_absorbed() {
        let log = InMemoryEventLog::new();
        assert!(log.insert_if_absent(event("john doe", "A", "B")).await.unwrap());
        assert!(!log.insert_if_absent(event("john doe", "A", "B")).await.unwrap());

        let counts = log.count_by_contributor().await.unwrap();
        assert_eq!(counts.get("A"), Some(&1));
    }

    #[tokio::test]
    async fn distinct_triples_all_insert() {
        let log = InMemoryEventLog::new();
        assert!(log.insert_if_absent(event("john doe", "A", "B")).await.unwrap());
        assert!(log.insert_if_absent(event("john doe", "C", "B")).await.unwrap());
        assert!(log.insert_if_absent(event("jane smith", "A", "B")).await.unwrap());
        assert!(log.insert_if_absent(event("john doe", "A", "C")).await.unwrap());

        let counts = log.count_by_contributor().await.unwrap();
        assert_eq!(counts.get("A"), Some(&3));
        assert_eq!(counts.get("C"), Some(&1));
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_bounded() {
        let log = InMemoryEventLog::new();
        for from in ["A", "C", "D", "E"] {
            log.insert_if_absent(event("john doe", from, "B")).await.unwrap();
        }
        let recent = log.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].contributor, "E");
        assert_eq!(recent[1].contributor, "D");
    }

    #[tokio::test]
    async fn concurrent_replays_insert_exactly_once() {
        use std::sync::Arc;

        let log = Arc::new(InMemoryEventLog::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.insert_if_absent(event("john doe", "A", "B")).await.unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(
            log.count_by_contributor().await.unwrap().get("A"),
            Some(&1)
        );
    }
}
