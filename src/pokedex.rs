//! Wires the API client, durable stores and both controllers together

use std::sync::Arc;

use crate::api::PokeApiClient;
use crate::config::Config;
use crate::lookup::LookupKey;
use crate::models::{MoveDescription, TrimmedRecord};
use crate::move_cache::MoveDescriptionCache;
use crate::presentation::{card_view, CardView};
use crate::record_cache::RecordCache;
use crate::store::{CacheStore, JsonFileStore, MOVE_NAMESPACE, RECORD_NAMESPACE};

/// One card view session: a record controller and a move controller
pub struct Pokedex {
    pub records: RecordCache,
    pub moves: MoveDescriptionCache,
}

impl Pokedex {
    /// Session backed by the JSON cache files in `config.cache_dir`
    pub fn open(config: &Config) -> Self {
        log::info!("Cache directory: {:?}", config.cache_dir);
        let records: Arc<dyn CacheStore<TrimmedRecord>> =
            Arc::new(JsonFileStore::<TrimmedRecord>::open(&config.cache_dir, RECORD_NAMESPACE));
        let moves: Arc<dyn CacheStore<MoveDescription>> =
            Arc::new(JsonFileStore::<MoveDescription>::open(&config.cache_dir, MOVE_NAMESPACE));
        Self::with_stores(config, records, moves)
    }

    pub fn with_stores(
        config: &Config,
        records: Arc<dyn CacheStore<TrimmedRecord>>,
        moves: Arc<dyn CacheStore<MoveDescription>>,
    ) -> Self {
        let api = PokeApiClient::new(config);
        Self {
            records: RecordCache::new(api.clone(), records),
            moves: MoveDescriptionCache::new(api, moves, config.version_group.clone()),
        }
    }

    /// Current view for `requested`, including the shown move description
    pub fn view(&self, requested: &LookupKey) -> CardView {
        let active = self.moves.active();
        card_view(&self.records.state(), requested, active.as_ref())
    }
}
