//! JSON file-backed fetch cache.
//!
//! The whole mapping is held in memory and rewritten to disk after every
//! miss, so a session killed mid-way keeps everything it already downloaded.

use std::collections::BTreeMap;
use std::fs;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::Error;

/// Hit and miss counters for one store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Persistent key-value store for raw fetch results.
///
/// Keys are URLs or canonical keys from [`super::canonical_key`]; values are
/// stored verbatim (page text as JSON strings, API bodies as JSON objects).
/// Entries are never overwritten or removed.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
    stats: CacheStats,
}

impl CacheStore {
    /// Load the store persisted at `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = read_entries(&path).unwrap_or_else(|reason| {
            tracing::debug!(path = %path.display(), %reason, "starting with empty cache");
            BTreeMap::new()
        });

        tracing::debug!(path = %path.display(), entries = entries.len(), "cache loaded");

        Self { path, entries, stats: CacheStats::default() }
    }

    /// Return the value cached under `key`, fetching and persisting it on a miss.
    ///
    /// `fetch` is only invoked when `key` is absent. If it fails nothing is
    /// stored and its error is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the error from `fetch`, or [`Error::CacheIo`] if the updated
    /// mapping cannot be written.
    pub async fn get_or_fetch<F, Fut>(&mut self, key: &str, fetch: F) -> Result<Value, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, Error>>,
    {
        if let Some(value) = self.entries.get(key) {
            tracing::info!(key, "Using cache");
            self.stats.hits += 1;
            return Ok(value.clone());
        }

        tracing::info!(key, "Fetching");
        self.stats.misses += 1;

        let value = fetch().await?;
        self.entries.insert(key.to_string(), value.clone());
        self.save()?;

        Ok(value)
    }

    /// Look up a key without fetching.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Write the entire mapping to disk.
    ///
    /// The file is written next to its destination and renamed into place.
    pub fn save(&self) -> Result<(), Error> {
        let io_err = |source| Error::CacheIo { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| io_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        let tmp = self.tmp_path();
        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(&body).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "cache saved");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "cache.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, Value>, String> {
    let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&raw).map_err(|e| e.to_string())
}
