//! Pokedex Cache - creature card data from PokeAPI
//!
//! Resolves creature records and move descriptions through persistent local
//! caches so that each one is fetched from the network at most once.

pub mod api;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod move_cache;
pub mod pokedex;
pub mod presentation;
pub mod record_cache;
pub mod state;
pub mod store;

// Re-export commonly used items
pub use api::PokeApiClient;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use lookup::LookupKey;
pub use models::{CreatureRecord, MoveDescription, MoveRef, TrimmedRecord};
pub use move_cache::MoveDescriptionCache;
pub use pokedex::Pokedex;
pub use presentation::{card_view, render_text, CardView};
pub use record_cache::RecordCache;
pub use state::{Resolution, ResourceState};
pub use store::{CacheStore, JsonFileStore, MemoryStore};
