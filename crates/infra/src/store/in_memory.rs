use tokio::sync::RwLock;

use exctrack_core::{ExceptionId, ExceptionRecord, NewException};

use super::r#trait::{ExceptionStore, StoreError};

/// In-memory exception store.
///
/// Intended for tests/dev. Records are kept in insertion order, which is this
/// backend's natural order for `find_all`. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryExceptionStore {
    records: RwLock<Vec<ExceptionRecord>>,
}

impl InMemoryExceptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ExceptionStore for InMemoryExceptionStore {
    async fn insert(&self, new: NewException) -> Result<ExceptionRecord, StoreError> {
        let mut records = self.records.write().await;

        // Object ids are process-unique already; the loop only guards against
        // a record that was restored with a colliding id.
        let mut id = ExceptionId::new();
        while records.iter().any(|r| r.id() == id) {
            id = ExceptionId::new();
        }

        let record = ExceptionRecord::from_new(id, new);
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: ExceptionId) -> Result<Option<ExceptionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<ExceptionRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn update(&self, record: &ExceptionRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or(StoreError::NotFound(record.id()))?;
        *slot = record.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use proptest::prelude::*;

    use super::*;

    fn new_exception(name: &str, visit: &str) -> NewException {
        NewException {
            error_name: name.to_string(),
            reason_message: "connection reset".to_string(),
            timestamp: "2024-01-01T00:00:00Z".parse().unwrap(),
            visit_id: visit.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_zero_retries() {
        let store = InMemoryExceptionStore::new();
        let record = store.insert(new_exception("DBTimeout", "V1")).await.unwrap();

        assert_eq!(record.retry_count(), 0);
        assert_eq!(record.visit_id(), "V1");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn find_by_id_returns_inserted_record() {
        let store = InMemoryExceptionStore::new();
        let inserted = store.insert(new_exception("DBTimeout", "V1")).await.unwrap();

        let found = store.find_by_id(inserted.id()).await.unwrap();
        assert_eq!(found, Some(inserted));
    }

    #[tokio::test]
    async fn find_by_id_unknown_is_none() {
        let store = InMemoryExceptionStore::new();
        store.insert(new_exception("DBTimeout", "V1")).await.unwrap();

        let missing: ExceptionId = "000000000000000000000000".parse().unwrap();
        assert_eq!(store.find_by_id(missing).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_persists_retry_increment() {
        let store = InMemoryExceptionStore::new();
        let mut record = store.insert(new_exception("DBTimeout", "V1")).await.unwrap();

        record.record_retry();
        store.update(&record).await.unwrap();

        let reloaded = store.find_by_id(record.id()).await.unwrap().unwrap();
        assert_eq!(reloaded.retry_count(), 1);
    }

    #[tokio::test]
    async fn update_unknown_record_is_not_found() {
        let store = InMemoryExceptionStore::new();
        let ghost = ExceptionRecord::from_new(ExceptionId::new(), new_exception("Ghost", "V0"));

        let err = store.update(&ghost).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(ghost.id()));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = InMemoryExceptionStore::new();
        let a = store.insert(new_exception("A", "V1")).await.unwrap();
        let b = store.insert(new_exception("B", "V2")).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![a, b]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 32,
            ..ProptestConfig::default()
        })]

        /// Property: after N inserts, listing returns exactly the N inserted ids.
        #[test]
        fn list_matches_inserted_ids(names in prop::collection::vec("[A-Za-z]{1,12}", 0..20)) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let store = InMemoryExceptionStore::new();
                let mut inserted = HashSet::new();
                for name in &names {
                    let record = store
                        .insert(NewException {
                            error_name: name.clone(),
                            reason_message: String::new(),
                            timestamp: Utc::now(),
                            visit_id: "V".to_string(),
                        })
                        .await
                        .unwrap();
                    // Fresh, previously unused id on every insert.
                    assert!(inserted.insert(record.id()));
                }

                let listed: HashSet<_> = store
                    .find_all()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|r| r.id())
                    .collect();
                assert_eq!(listed, inserted);
                assert_eq!(store.len().await, names.len());
            });
        }
    }
}
