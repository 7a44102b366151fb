//! PokeAPI payload types and the records kept in the caches

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Description text used when a move description could not be resolved
pub const NOT_FOUND_DESCRIPTION: &str = "Not Found!";

/// Sprite slots holding nested sprite sets rather than a single image
const NESTED_SPRITE_SLOTS: [&str; 2] = ["versions", "other"];

/// `{ "name": ..., "url": ... }` reference used all over PokeAPI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub base_stat: i32,
    #[serde(default)]
    pub effort: i32,
    pub stat: NamedResource,
}

impl Stat {
    pub fn name(&self) -> &str {
        &self.stat.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

impl TypeRef {
    pub fn name(&self) -> &str {
        &self.type_.name
    }
}

/// A move name plus the URI its detail (and description) is fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRef {
    pub name: String,
    pub url: String,
}

/// How a creature learns a move in one version group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionGroupDetail {
    #[serde(default)]
    pub level_learned_at: u32,
    pub move_learn_method: NamedResource,
    pub version_group: NamedResource,
}

/// Entry of a record's move list
///
/// Freshly fetched records carry the full learn detail; cached records only
/// keep the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_ref: MoveRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub version_group_details: Vec<VersionGroupDetail>,
}

impl MoveSlot {
    pub fn name(&self) -> &str {
        &self.move_ref.name
    }

    pub fn url(&self) -> &str {
        &self.move_ref.url
    }

    /// Copy of this slot without learn detail
    pub fn trimmed(&self) -> Self {
        Self {
            move_ref: self.move_ref.clone(),
            version_group_details: Vec::new(),
        }
    }
}

/// Sprite slot name to image URI, `null`, or a nested sprite set.
/// Slot order is kept as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sprites(pub Map<String, Value>);

impl Sprites {
    /// URI of a single-image slot, `None` for null, nested or missing slots
    pub fn get(&self, slot: &str) -> Option<&str> {
        self.0.get(slot).and_then(Value::as_str)
    }

    /// The default front sprite, used as the fallback for the primary image
    pub fn default_sprite(&self) -> Option<&str> {
        self.get("front_default")
    }

    /// Slots eligible for display: a non-empty URI, not a nested set
    pub fn display_slots(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(slot, _)| !NESTED_SPRITE_SLOTS.contains(&slot.as_str()))
            .filter(|(_, value)| value.as_str().is_some_and(|uri| !uri.is_empty()))
            .map(|(slot, _)| slot.as_str())
            .collect()
    }
}

/// Full creature record as returned by `GET /pokemon/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    /// 0 when the payload carries no id
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub stats: Vec<Stat>,
    pub types: Vec<TypeRef>,
    pub moves: Vec<MoveSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl CreatureRecord {
    /// The move reference by name, if this creature can learn it
    pub fn find_move(&self, name: &str) -> Option<&MoveRef> {
        self.moves
            .iter()
            .map(|slot| &slot.move_ref)
            .find(|move_ref| move_ref.name == name)
    }

    pub fn has_move_detail(&self) -> bool {
        self.moves
            .iter()
            .any(|slot| !slot.version_group_details.is_empty())
    }
}

/// A creature record reduced to what the record cache persists.
///
/// Moves keep only name and URI; the learn detail is dropped on construction,
/// including when read back from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CreatureRecord", into = "CreatureRecord")]
pub struct TrimmedRecord(CreatureRecord);

impl TrimmedRecord {
    pub fn record(&self) -> &CreatureRecord {
        &self.0
    }

    pub fn into_record(self) -> CreatureRecord {
        self.0
    }
}

impl From<CreatureRecord> for TrimmedRecord {
    fn from(mut record: CreatureRecord) -> Self {
        for slot in &mut record.moves {
            slot.version_group_details.clear();
        }
        Self(record)
    }
}

impl From<&CreatureRecord> for TrimmedRecord {
    fn from(record: &CreatureRecord) -> Self {
        Self(CreatureRecord {
            id: record.id,
            name: record.name.clone(),
            stats: record.stats.clone(),
            types: record.types.clone(),
            moves: record.moves.iter().map(MoveSlot::trimmed).collect(),
            sprites: record.sprites.clone(),
        })
    }
}

impl From<TrimmedRecord> for CreatureRecord {
    fn from(trimmed: TrimmedRecord) -> Self {
        trimmed.0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    #[serde(default)]
    pub language: Option<NamedResource>,
    #[serde(default)]
    pub version_group: Option<NamedResource>,
}

/// Move detail as returned by the move's detail URI
#[derive(Debug, Clone, Deserialize)]
pub struct MoveDetail {
    #[serde(default)]
    pub name: Option<String>,
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

impl MoveDetail {
    /// Flavor text of the first entry belonging to `version_group`
    pub fn flavor_text_for(&self, version_group: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| {
                entry
                    .version_group
                    .as_ref()
                    .is_some_and(|group| group.name == version_group)
            })
            .map(|entry| entry.flavor_text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescription {
    pub name: String,
    pub description: String,
}

impl MoveDescription {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Placeholder shown when the description lookup failed
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::new(name, NOT_FOUND_DESCRIPTION)
    }

    pub fn is_not_found(&self) -> bool {
        self.description == NOT_FOUND_DESCRIPTION
    }

    /// Description with the API's embedded line breaks collapsed to spaces
    pub fn display_text(&self) -> String {
        self.description.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
