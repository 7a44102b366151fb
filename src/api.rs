//! PokeAPI client for creature records and move details
//!
//! Uses async reqwest for non-blocking HTTP requests.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::lookup::LookupKey;
use crate::models::{CreatureRecord, MoveDetail};

/// PokeAPI client
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
}

impl PokeApiClient {
    pub fn new(config: &Config) -> Self {
        log::debug!("Creating PokeAPI client for {}", config.base_url);
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the full record for `key`
    pub fn pokemon_url(&self, key: &LookupKey) -> String {
        format!(
            "{}/pokemon/{}",
            self.base_url,
            urlencoding::encode(&key.canonical())
        )
    }

    /// Fetch the full creature record
    pub async fn fetch_pokemon(&self, key: &LookupKey) -> Result<CreatureRecord> {
        let url = self.pokemon_url(key);
        log::info!("Fetching pokemon from PokeAPI: {}", url);
        self.get_json(&url).await
    }

    /// Fetch a move's detail from the URI listed in a creature's move list
    pub async fn fetch_move_detail(&self, url: &str) -> Result<MoveDetail> {
        log::info!("Fetching move detail from PokeAPI: {}", url);
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        // Decode separately so shape errors surface as Parse, not Network
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
