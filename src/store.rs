//! Key-value stores backing the record and move caches
//!
//! Stores are write-once per key: once a key is present, later writes for it
//! are ignored.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;

/// Namespace of the record cache (lookup key -> trimmed record)
pub const RECORD_NAMESPACE: &str = "pokedex";

/// Namespace of the move cache (move name -> description)
pub const MOVE_NAMESPACE: &str = "pokemon-moves";

/// Keyed cache storage injected into the resource controllers
pub trait CacheStore<V>: Send + Sync {
    /// Get a copy of the value stored under `key`
    fn get(&self, key: &str) -> Option<V>;

    /// Store `value` under `key` unless the key is already present.
    ///
    /// Returns `Ok(true)` when the value was inserted.
    fn set(&self, key: &str, value: V) -> Result<bool>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory store, used in tests and for throwaway sessions
#[derive(Debug)]
pub struct MemoryStore<V> {
    entries: Mutex<BTreeMap<String, V>>,
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `entries`
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Keys currently stored, sorted
    pub fn keys(&self) -> Vec<String> {
        lock(&self.entries).keys().cloned().collect()
    }
}

impl<V: Clone + Send> CacheStore<V> for MemoryStore<V> {
    fn get(&self, key: &str) -> Option<V> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: V) -> Result<bool> {
        let mut entries = lock(&self.entries);
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value);
        Ok(true)
    }

    fn len(&self) -> usize {
        lock(&self.entries).len()
    }
}

/// Durable store persisting one namespace as a JSON object on disk.
///
/// The file is read lazily on first access; a missing or unreadable file is
/// treated as an empty mapping. Every successful insert rewrites the file.
#[derive(Debug)]
pub struct JsonFileStore<V> {
    path: PathBuf,
    entries: Mutex<Option<BTreeMap<String, V>>>,
}

impl<V> JsonFileStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send,
{
    /// Store for `namespace` inside `cache_dir`, i.e. `{cache_dir}/{namespace}.json`
    pub fn open(cache_dir: &Path, namespace: &str) -> Self {
        Self::at_path(cache_dir.join(format!("{}.json", namespace)))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, V> {
        if !path.exists() {
            log::info!("No cache file at {:?}, starting empty", path);
            return BTreeMap::new();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, V>>(&content) {
                Ok(entries) => {
                    log::info!("Loaded {} cache entries from {:?}", entries.len(), path);
                    entries
                }
                Err(e) => {
                    log::warn!("Failed to parse cache file {:?}, starting fresh: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                log::warn!("Failed to read cache file {:?}, starting fresh: {}", path, e);
                BTreeMap::new()
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, V>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;

        log::debug!("Saved {} cache entries to {:?}", entries.len(), self.path);
        Ok(())
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut BTreeMap<String, V>) -> R) -> R {
        let mut guard = lock(&self.entries);
        let entries = guard.get_or_insert_with(|| Self::load(&self.path));
        f(entries)
    }
}

impl<V> CacheStore<V> for JsonFileStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send,
{
    fn get(&self, key: &str) -> Option<V> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: V) -> Result<bool> {
        self.with_entries(|entries| {
            if entries.contains_key(key) {
                return Ok(false);
            }
            entries.insert(key.to_string(), value);
            self.save(entries)?;
            Ok(true)
        })
    }

    fn len(&self) -> usize {
        self.with_entries(|entries| entries.len())
    }
}
