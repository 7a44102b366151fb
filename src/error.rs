//! Error types for pokedex_cache

use thiserror::Error;

/// Unified error type for API and cache operations
#[derive(Debug, Error)]
pub enum PokedexError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error status code
    #[error("HTTP error {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Failed to parse JSON response or cache file
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Move detail has no flavor text for the wanted version group
    #[error("No '{version_group}' description for move: {move_name}")]
    NotFoundInSource {
        move_name: String,
        version_group: String,
    },

    /// Cache file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Identifier cannot be turned into a lookup key
    #[error("Invalid creature identifier: '{0}'")]
    InvalidLookupKey(String),
}

/// Result alias for pokedex_cache operations
pub type Result<T> = std::result::Result<T, PokedexError>;
