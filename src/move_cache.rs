//! Cache-backed resolution of move descriptions
//!
//! Descriptions are the flavor text of one fixed version group. A failed lookup
//! yields the "Not Found!" placeholder, which is shown but never stored.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::models::{MoveDescription, MoveRef};
use crate::state::{InFlightGuard, Resolution, ResourceState};
use crate::store::{lock, CacheStore};

pub struct MoveDescriptionCache {
    api: PokeApiClient,
    store: Arc<dyn CacheStore<MoveDescription>>,
    version_group: String,
    /// Resolved holds the description currently shown to the user
    state: Mutex<ResourceState<MoveDescription>>,
    in_flight: AtomicBool,
}

impl MoveDescriptionCache {
    pub fn new(
        api: PokeApiClient,
        store: Arc<dyn CacheStore<MoveDescription>>,
        version_group: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            version_group: version_group.into(),
            state: Mutex::new(ResourceState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn version_group(&self) -> &str {
        &self.version_group
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading()
    }

    pub fn store(&self) -> &Arc<dyn CacheStore<MoveDescription>> {
        &self.store
    }

    /// The description currently shown, if any. Nothing is shown while a
    /// fetch runs.
    pub fn active(&self) -> Option<MoveDescription> {
        lock(&self.state).data().cloned()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ResourceState<MoveDescription> {
        lock(&self.state).clone()
    }

    /// Close the shown description. The store is left untouched.
    pub fn dismiss(&self) {
        let mut state = lock(&self.state);
        if let ResourceState::Resolved(description) = &*state {
            log::debug!("Dismissed description of {}", description.name);
            *state = ResourceState::Idle;
        }
    }

    fn set_state(&self, state: ResourceState<MoveDescription>) {
        log::debug!("Move state -> {}", state.label());
        *lock(&self.state) = state;
    }

    /// Resolve the description of `move_name`, fetching `detail_uri` on a
    /// cache miss.
    ///
    /// Returns `Busy` without doing anything if a fetch is already running or
    /// no detail URI is given.
    pub async fn resolve(
        &self,
        move_name: &str,
        detail_uri: Option<&str>,
    ) -> Resolution<MoveDescription> {
        let Some(detail_uri) = detail_uri.filter(|uri| !uri.is_empty()) else {
            log::debug!("Move {} has no detail link, skipping", move_name);
            return Resolution::Busy;
        };

        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight) else {
            log::debug!("Move fetch in flight, dropping request for {}", move_name);
            return Resolution::Busy;
        };

        if let Some(cached) = self.store.get(move_name) {
            log::info!("Cache hit for move {}", move_name);
            self.set_state(ResourceState::Resolved(cached.clone()));
            return Resolution::Resolved(cached);
        }

        log::info!("Cache miss for move {}, fetching from PokeAPI", move_name);
        self.set_state(ResourceState::Loading);
        let description = match self.fetch_description(move_name, detail_uri).await {
            Ok(description) => {
                match self.store.set(move_name, description.clone()) {
                    Ok(true) => log::debug!("Cached move {}", move_name),
                    Ok(false) => log::debug!("Move {} was already cached", move_name),
                    Err(e) => log::warn!("Failed to save move cache: {}", e),
                }
                description
            }
            Err(e) => {
                log::warn!("Failed to resolve move {}: {}", move_name, e);
                MoveDescription::not_found(move_name)
            }
        };

        self.set_state(ResourceState::Resolved(description.clone()));
        Resolution::Resolved(description)
    }

    /// Resolve a move taken from a creature's move list
    pub async fn resolve_ref(&self, move_ref: &MoveRef) -> Resolution<MoveDescription> {
        self.resolve(&move_ref.name, Some(&move_ref.url)).await
    }

    async fn fetch_description(&self, move_name: &str, detail_uri: &str) -> Result<MoveDescription> {
        let detail = self.api.fetch_move_detail(detail_uri).await?;
        let text = detail
            .flavor_text_for(&self.version_group)
            .ok_or_else(|| PokedexError::NotFoundInSource {
                move_name: move_name.to_string(),
                version_group: self.version_group.clone(),
            })?;
        Ok(MoveDescription::new(move_name, text))
    }
}

#[cfg(test)]
#[path = "move_cache_tests.rs"]
mod tests;
