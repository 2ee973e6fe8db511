//! A statistic store kept in one JSON object on disk.
//!
//! Writers take an exclusive advisory lock on a `<store>.lock` sidecar,
//! re-read the current file, apply their batch and replace the file with a
//! rename, so a reader never sees a half-written store and two concurrent
//! writers cannot lose each other's statistics.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::debug;
use serde_json::Value;

use crate::StatisticStore;
use crate::batch::StatisticBatch;
use crate::errors::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (not create) a store at `path`. The file is created on the first
    /// commit; until then the store reads as empty.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sidecar(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn lock_file(&self) -> StoreResult<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.sidecar(".lock"))?;
        Ok(file)
    }

    fn read_all(&self) -> StoreResult<BTreeMap<String, Value>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write_all(&self, stats: &BTreeMap<String, Value>) -> StoreResult<()> {
        let tmp_path = self.sidecar(".tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, stats)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Readers never create anything. Without a sidecar no writer has run, and
    /// the store file, if any, was put in place by a rename.
    fn read_locked(&self) -> StoreResult<BTreeMap<String, Value>> {
        let lock = match File::open(self.sidecar(".lock")) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.read_all(),
            Err(e) => return Err(e.into()),
        };
        FileExt::lock_shared(&lock)?;
        let stats = self.read_all();
        FileExt::unlock(&lock)?;
        stats
    }
}

impl StatisticStore for JsonFileStore {
    fn get(&self, name: &str) -> StoreResult<Option<Value>> {
        Ok(self.read_locked()?.remove(name))
    }

    fn names(&self) -> StoreResult<Vec<String>> {
        Ok(self.read_locked()?.into_keys().collect())
    }

    fn commit(&self, batch: StatisticBatch) -> StoreResult<()> {
        batch.validate()?;
        if batch.is_empty() {
            return Ok(());
        }

        let lock = self.lock_file()?;
        FileExt::lock_exclusive(&lock)?;

        let result = self.read_all().and_then(|mut stats| {
            let n = batch.len();
            stats.extend(batch.into_entries());
            self.write_all(&stats)?;
            debug!("Committed {} statistics to {}", n, self.path.display());
            Ok(())
        });

        FileExt::unlock(&lock)?;
        result
    }
}
