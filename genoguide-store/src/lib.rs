//! Persistence for computed statistics.
//!
//! A statistic is a unique name mapped to an arbitrary JSON value. Writing a
//! name again replaces its value; there is no history. Writes go through a
//! [`StatisticBatch`], which a store applies completely or not at all.
//!
//! - [`MemoryStore`]: process-local
//! - [`JsonFileStore`]: one JSON file, safe for concurrent writers

pub mod batch;
pub mod errors;
pub mod json_file;
pub mod memory;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use batch::StatisticBatch;
pub use errors::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// A stored statistic as handed to readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticRecord {
    pub stat_name: String,
    pub stat_value: Value,
}

pub trait StatisticStore: Send + Sync {
    fn get(&self, name: &str) -> StoreResult<Option<Value>>;

    /// All stored names, sorted.
    fn names(&self) -> StoreResult<Vec<String>>;

    /// Apply every staged statistic, or none of them.
    fn commit(&self, batch: StatisticBatch) -> StoreResult<()>;

    /// Insert or replace a single statistic.
    fn upsert(&self, name: &str, value: Value) -> StoreResult<()> {
        let mut batch = StatisticBatch::new();
        batch.stage(name, value);
        self.commit(batch)
    }

    fn get_record(&self, name: &str) -> StoreResult<Option<StatisticRecord>> {
        Ok(self.get(name)?.map(|stat_value| StatisticRecord {
            stat_name: name.to_string(),
            stat_value,
        }))
    }
}
