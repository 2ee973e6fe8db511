use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::StatisticStore;
use crate::batch::StatisticBatch;
use crate::errors::{StoreError, StoreResult};

/// A store that lives as long as the process. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    stats: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatisticStore for MemoryStore {
    fn get(&self, name: &str) -> StoreResult<Option<Value>> {
        let stats = self.stats.lock().map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(stats.get(name).cloned())
    }

    fn names(&self) -> StoreResult<Vec<String>> {
        let stats = self.stats.lock().map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(stats.keys().cloned().collect())
    }

    fn commit(&self, batch: StatisticBatch) -> StoreResult<()> {
        batch.validate()?;
        let mut stats = self.stats.lock().map_err(|e| StoreError::Lock(e.to_string()))?;
        stats.extend(batch.into_entries());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_upsert_replaces() {
        let store = MemoryStore::new();
        store.upsert("nuclear_base_composition", json!({"A": 1})).unwrap();
        store.upsert("nuclear_base_composition", json!({"A": 2})).unwrap();

        assert_eq!(store.get("nuclear_base_composition").unwrap(), Some(json!({"A": 2})));
        assert_eq!(store.names().unwrap(), vec!["nuclear_base_composition".to_string()]);
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[rstest]
    fn test_failed_batch_commits_nothing() {
        let store = MemoryStore::new();
        let mut batch = StatisticBatch::new();
        batch.stage("gene_density_1mb", json!({"bin_size": 1000000}));
        batch.stage("", json!(null));

        assert!(store.commit(batch).is_err());
        assert!(store.names().unwrap().is_empty());
    }
}
