//! Cache-backed resolution of creature records
//!
//! A request is served from the record store when possible, otherwise fetched
//! from PokeAPI and stored in trimmed form. Only one fetch runs at a time;
//! requests arriving meanwhile are dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::PokeApiClient;
use crate::lookup::LookupKey;
use crate::models::{CreatureRecord, TrimmedRecord};
use crate::state::{InFlightGuard, Resolution, ResourceState};
use crate::store::{lock, CacheStore};

pub struct RecordCache {
    api: PokeApiClient,
    store: Arc<dyn CacheStore<TrimmedRecord>>,
    state: Mutex<ResourceState<CreatureRecord>>,
    in_flight: AtomicBool,
    /// Canonical key of the most recent request, dropped ones included
    requested: Mutex<Option<String>>,
}

impl RecordCache {
    pub fn new(api: PokeApiClient, store: Arc<dyn CacheStore<TrimmedRecord>>) -> Self {
        Self {
            api,
            store,
            state: Mutex::new(ResourceState::Idle),
            in_flight: AtomicBool::new(false),
            requested: Mutex::new(None),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ResourceState<CreatureRecord> {
        lock(&self.state).clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Canonical key of the most recent request
    pub fn requested(&self) -> Option<String> {
        lock(&self.requested).clone()
    }

    pub fn store(&self) -> &Arc<dyn CacheStore<TrimmedRecord>> {
        &self.store
    }

    fn set_state(&self, state: ResourceState<CreatureRecord>) {
        log::debug!("Record state -> {}", state.label());
        *lock(&self.state) = state;
    }

    fn is_latest(&self, cache_key: &str) -> bool {
        lock(&self.requested).as_deref() == Some(cache_key)
    }

    /// Resolve `key` to its record.
    ///
    /// A cache hit returns the stored (trimmed) record without touching the
    /// network. A fetched record is stored trimmed, but the full record is
    /// returned. Failures are never stored.
    pub async fn resolve(&self, key: &LookupKey) -> Resolution<CreatureRecord> {
        let cache_key = key.canonical();
        *lock(&self.requested) = Some(cache_key.clone());

        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight) else {
            log::debug!("Record fetch in flight, dropping request for {}", cache_key);
            return Resolution::Busy;
        };

        if let Some(cached) = self.store.get(&cache_key) {
            log::info!("Cache hit for pokemon {}", cache_key);
            let record = cached.into_record();
            self.set_state(ResourceState::Resolved(record.clone()));
            return Resolution::Resolved(record);
        }

        log::info!("Cache miss for pokemon {}, fetching from PokeAPI", cache_key);
        self.set_state(ResourceState::Loading);

        let record = match self.api.fetch_pokemon(key).await {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Failed to fetch pokemon {}: {}", cache_key, e);
                if self.is_latest(&cache_key) {
                    self.set_state(ResourceState::NotFound);
                    return Resolution::NotFound;
                }
                // Nothing published for a key that is no longer wanted
                self.set_state(ResourceState::Idle);
                return Resolution::Busy;
            }
        };

        // Stored under the request's own key even if a newer request arrived
        match self.store.set(&cache_key, TrimmedRecord::from(&record)) {
            Ok(true) => log::debug!("Cached pokemon {}", cache_key),
            Ok(false) => log::debug!("Pokemon {} was already cached", cache_key),
            Err(e) => log::warn!("Failed to save record cache: {}", e),
        }

        if self.is_latest(&cache_key) {
            self.set_state(ResourceState::Resolved(record.clone()));
            Resolution::Resolved(record)
        } else {
            log::info!(
                "Pokemon {} resolved after a newer request, not publishing",
                cache_key
            );
            self.set_state(ResourceState::Idle);
            Resolution::Superseded(record)
        }
    }
}

#[cfg(test)]
#[path = "record_cache_tests.rs"]
mod tests;
