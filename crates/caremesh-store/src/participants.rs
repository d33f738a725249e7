// crates/caremesh-store/src/participants.rs
//
// In-memory participant settings table.
//
// Keyed by participant id. The RwLock gives many concurrent readers and a
// single writer; `update_settings` is the only mutation path after
// registration, so a participant's level can never be observed mid-update.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use caremesh_core::level::validate_contribution_pct;
use caremesh_core::{MeshError, Participant, ParticipantStore};

/// In-memory participant table.
#[derive(Debug, Default)]
pub struct InMemoryParticipantStore {
    inner: RwLock<HashMap<String, Participant>>,
}

impl InMemoryParticipantStore {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ParticipantStore for InMemoryParticipantStore {
    async fn get(&self, id: &str) -> Result<Participant, MeshError> {
        let table = self.inner.read().await;
        table
            .get(id)
            .cloned()
            .ok_or_else(|| MeshError::NotFound(format!("participant {}", id)))
    }

    async fn list(&self) -> Result<Vec<Participant>, MeshError> {
        let table = self.inner.read().await;
        let mut participants: Vec<Participant> = table.values().cloned().collect();
        // Deterministic roster ordering.
        participants.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(participants)
    }

    async fn register(&self, participant: Participant) -> Result<(), MeshError> {
        validate_contribution_pct(i64::from(participant.contribution_pct))?;
        let mut table = self.inner.write().await;
        if table.contains_key(&participant.id) {
            return Err(MeshError::InvalidInput(format!(
                "participant {} already registered",
                participant.id
            )));
        }
        table.insert(participant.id.clone(), participant);
        Ok(())
    }

    async fn update_settings(
        &self,
        id: &str,
        opted_in: bool,
        contribution_pct: u8,
    ) -> Result<Participant, MeshError> {
        validate_contribution_pct(i64::from(contribution_pct))?;
        let mut table = self.inner.write().await;
        let participant = table
            .get_mut(id)
            .ok_or_else(|| MeshError::NotFound(format!("participant {}", id)))?;
        participant.opted_in = opted_in;
        participant.contribution_pct = contribution_pct;
        Ok(participant.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caremesh_core::ContextLevel;

    fn participant(id: &str, opted_in: bool, pct: u8) -> Participant {
        Participant {
            id: id.to_string(),
            name: format!("Clinic {}", id),
            opted_in,
            contribution_pct: pct,
        }
    }

    #[tokio::test]
    async fn register_then_get() {
        let store = InMemoryParticipantStore::new();
        store.register(participant("A", true, 85)).await.unwrap();
        let got = store.get("A").await.unwrap();
        assert_eq!(got.name, "Clinic A");
        assert_eq!(got.context_level(), ContextLevel::Trusted);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let store = InMemoryParticipantStore::new();
        store.register(participant("A", true, 85)).await.unwrap();
        let err = store.register(participant("A", false, 0)).await;
        assert!(matches!(err, Err(MeshError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn unknown_participant_is_not_found() {
        let store = InMemoryParticipantStore::new();
        assert!(matches!(store.get("Z").await, Err(MeshError::NotFound(_))));
        assert!(matches!(
            store.update_settings("Z", true, 50).await,
            Err(MeshError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn settings_update_changes_derived_level() {
        let store = InMemoryParticipantStore::new();
        store.register(participant("C", true, 30)).await.unwrap();
        let updated = store.update_settings("C", true, 45).await.unwrap();
        assert_eq!(updated.context_level(), ContextLevel::Collaborative);

        let updated = store.update_settings("C", false, 45).await.unwrap();
        assert_eq!(updated.context_level(), ContextLevel::Isolated);
        // Percentage is kept as submitted; the level derivation handles
        // the opted-out case.
        assert_eq!(updated.contribution_pct, 45);
    }

    #[tokio::test]
    async fn list_is_sorted_by_id() {
        let store = InMemoryParticipantStore::new();
        store.register(participant("C", true, 30)).await.unwrap();
        store.register(participant("A", true, 85)).await.unwrap();
        store.register(participant("B", false, 0)).await.unwrap();
        let ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }
}
