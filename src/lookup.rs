//! Canonical creature lookup keys and pokedex number formatting

use std::fmt;
use std::str::FromStr;

use crate::error::{PokedexError, Result};

/// Identifier a creature is requested by.
///
/// The canonical form doubles as the record cache key and as the last path
/// segment of the record URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    /// National pokedex number (1-based)
    Number(u32),
    /// Lower-cased, hyphenated name
    Name(String),
}

impl LookupKey {
    /// Parse a user supplied identifier: digits become a pokedex number,
    /// anything else a name.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PokedexError::InvalidLookupKey(input.to_string()));
        }

        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            return match trimmed.parse::<u32>() {
                Ok(0) | Err(_) => Err(PokedexError::InvalidLookupKey(input.to_string())),
                Ok(number) => Ok(LookupKey::Number(number)),
            };
        }

        let name = trimmed
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        Ok(LookupKey::Name(name))
    }

    /// Key for a 0-based position in the national pokedex list
    pub fn from_index(index: usize) -> Result<Self> {
        index
            .checked_add(1)
            .and_then(|number| u32::try_from(number).ok())
            .map(LookupKey::Number)
            .ok_or_else(|| PokedexError::InvalidLookupKey(index.to_string()))
    }

    pub fn canonical(&self) -> String {
        match self {
            LookupKey::Number(number) => number.to_string(),
            LookupKey::Name(name) => name.clone(),
        }
    }

    pub fn number(&self) -> Option<u32> {
        match self {
            LookupKey::Number(number) => Some(*number),
            LookupKey::Name(_) => None,
        }
    }
}

impl FromStr for LookupKey {
    type Err = PokedexError;

    fn from_str(s: &str) -> Result<Self> {
        LookupKey::parse(s)
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// Pokedex number zero-padded to three digits, e.g. `25` -> `"025"`
pub fn full_pokedex_number(number: u32) -> String {
    format!("{:03}", number)
}
