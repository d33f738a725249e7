// crates/caremesh-store/src/records.rs
//
// In-memory patient-record store. Append-only: records are created at
// intake time and never mutated, so readers only ever see whole records.
//
// Doubles as the outcome-sample source: a (patient, participant) pair
// yields one sample — the response trend of the pair's latest record.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use caremesh_core::{
    Fingerprint, MeshError, OutcomeSampleSource, PatientRecord, RecordStore, ResponseTrend,
};

/// In-memory record store.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Vec<PatientRecord>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, record: PatientRecord) -> Result<(), MeshError> {
        let mut records = self.inner.write().await;
        records.push(record);
        Ok(())
    }

    async fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Vec<PatientRecord>, MeshError> {
        let records = self.inner.read().await;
        Ok(records
            .iter()
            .filter(|r| &r.fingerprint == fingerprint)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OutcomeSampleSource for InMemoryRecordStore {
    async fn samples_for(&self, participant_id: &str) -> Result<Vec<ResponseTrend>, MeshError> {
        let records = self.inner.read().await;

        // One sample per patient: keep the latest record per fingerprint.
        let mut latest: HashMap<&Fingerprint, &PatientRecord> = HashMap::new();
        for record in records.iter().filter(|r| r.participant_id == participant_id) {
            latest
                .entry(&record.fingerprint)
                .and_modify(|current| {
                    if record.end_date > current.end_date {
                        *current = record;
                    }
                })
                .or_insert(record);
        }

        Ok(latest
            .values()
            .filter_map(|record| record.response_trend)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn fp(tag: &str) -> Fingerprint {
        Fingerprint::compute(
            tag,
            NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            "1234",
        )
        .unwrap()
    }

    fn record(
        owner: &str,
        fingerprint: &Fingerprint,
        end: NaiveDate,
        trend: Option<ResponseTrend>,
    ) -> PatientRecord {
        PatientRecord {
            id: Uuid::now_v7(),
            participant_id: owner.to_string(),
            fingerprint: fingerprint.clone(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: end,
            conditions: vec!["Hypertension".to_string()],
            interventions: vec![],
            response_trend: trend,
            red_flags: vec![],
            timeline: vec![],
            created_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn find_returns_all_owners_for_a_fingerprint() {
        let store = InMemoryRecordStore::new();
        let patient = fp("john doe");
        store
            .insert(record("A", &patient, date(2023, 6, 20), None))
            .await
            .unwrap();
        store
            .insert(record("C", &patient, date(2024, 1, 10), None))
            .await
            .unwrap();
        store
            .insert(record("A", &fp("jane smith"), date(2023, 2, 15), None))
            .await
            .unwrap();

        let found = store.find_by_fingerprint(&patient).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn no_match_is_empty_not_error() {
        let store = InMemoryRecordStore::new();
        let found = store.find_by_fingerprint(&fp("nobody")).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn one_sample_per_patient_pair_latest_record_wins() {
        let store = InMemoryRecordStore::new();
        let patient = fp("alex rivera");
        store
            .insert(record(
                "C",
                &patient,
                date(2023, 9, 25),
                Some(ResponseTrend::Plateau),
            ))
            .await
            .unwrap();
        store
            .insert(record(
                "C",
                &patient,
                date(2024, 3, 15),
                Some(ResponseTrend::Improving),
            ))
            .await
            .unwrap();
        store
            .insert(record(
                "C",
                &fp("maria chen"),
                date(2024, 6, 30),
                Some(ResponseTrend::Worse),
            ))
            .await
            .unwrap();

        let mut samples = store.samples_for("C").await.unwrap();
        samples.sort();
        assert_eq!(samples, vec![ResponseTrend::Improving, ResponseTrend::Worse]);
    }

    #[tokio::test]
    async fn records_without_trend_yield_no_sample() {
        let store = InMemoryRecordStore::new();
        store
            .insert(record("A", &fp("john doe"), date(2023, 6, 20), None))
            .await
            .unwrap();
        assert!(store.samples_for("A").await.unwrap().is_empty());
        assert!(store.samples_for("B").await.unwrap().is_empty());
    }
}
