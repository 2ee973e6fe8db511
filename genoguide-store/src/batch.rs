use serde_json::Value;

use crate::errors::{StoreError, StoreResult};

///
/// Statistics staged for one all-or-nothing commit.
///
/// Staging a name twice keeps the later value, matching upsert semantics.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticBatch {
    entries: Vec<(String, Value)>,
}

impl StatisticBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, name: &str, value: Value) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Fails on the first name that no store would accept.
    pub fn validate(&self) -> StoreResult<()> {
        for (name, _) in &self.entries {
            if name.trim().is_empty() {
                return Err(StoreError::InvalidName(name.clone()));
            }
        }
        Ok(())
    }

    pub fn into_entries(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl FromIterator<(String, Value)> for StatisticBatch {
    fn from_iter<It: IntoIterator<Item = (String, Value)>>(iter: It) -> Self {
        let mut batch = StatisticBatch::new();
        for (name, value) in iter {
            batch.stage(&name, value);
        }
        batch
    }
}
