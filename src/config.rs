//! Runtime configuration shared by the API client and the cache stores

use std::path::PathBuf;

/// Public PokeAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Version group whose flavor text is used as a move description
pub const DEFAULT_VERSION_GROUP: &str = "firered-leafgreen";

pub const DEFAULT_USER_AGENT: &str = "Pokedex-Cache/1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API base URL without trailing slash
    pub base_url: String,
    /// Directory holding the persisted cache files
    pub cache_dir: PathBuf,
    pub version_group: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: default_cache_dir(),
            version_group: DEFAULT_VERSION_GROUP.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Override the base URL, dropping any trailing slash
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_version_group(mut self, version_group: impl Into<String>) -> Self {
        self.version_group = version_group.into();
        self
    }
}

/// Returns the default cache directory: ~/.cache/pokedex_cache
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pokedex_cache")
}
