//! Shapes resolved records into what the card view displays
//!
//! Nothing here fetches or caches; it only reads already resolved data.

use std::cmp::Ordering;

use crate::lookup::{full_pokedex_number, LookupKey};
use crate::models::{CreatureRecord, MoveDescription, MoveRef};
use crate::state::ResourceState;

/// Directory of the bundled artwork, one `NNN.png` per pokedex number
pub const ASSET_DIR: &str = "pokemon";

#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    Loading,
    NotFound,
    Card(CreatureCard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatureCard {
    /// Header number, e.g. `"025"`
    pub number: String,
    pub name: String,
    pub types: Vec<String>,
    pub primary_image: PrimaryImage,
    pub images: Vec<SpriteImage>,
    pub stats: Vec<StatRow>,
    /// Sorted for display
    pub moves: Vec<MoveButton>,
    pub overlay: Option<MoveOverlay>,
}

/// Bundled artwork, with the API sprite to use when the asset fails to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryImage {
    pub asset_path: Option<String>,
    pub fallback_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub slot: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub label: String,
    pub value: i32,
}

/// A selectable move; `name` and `url` are what the move cache resolves with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveButton {
    pub name: String,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOverlay {
    pub title: String,
    pub description: String,
}

/// Replace hyphens with spaces: `"special-defense"` -> `"special defense"`
pub fn humanize(name: &str) -> String {
    name.replace('-', " ")
}

/// Primary collation weight: punctuation, then digits, then letters
/// (case-folded)
fn primary_weight(c: char) -> (u8, char) {
    if c.is_alphabetic() {
        (2, c.to_lowercase().next().unwrap_or(c))
    } else if c.is_numeric() {
        (1, c)
    } else {
        (0, c)
    }
}

/// Locale-style string comparison.
///
/// Letters compare case-insensitively first; on a tie lower case sorts before
/// upper case, then code point order decides. Matches the default collation
/// for names made of ASCII letters, digits and punctuation.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| {
            a.chars()
                .map(|c| c.is_uppercase())
                .cmp(b.chars().map(|c| c.is_uppercase()))
        })
        .then_with(|| a.cmp(b))
}

/// Moves in display order; equal names keep their input order
pub fn sort_moves<'a>(moves: impl IntoIterator<Item = &'a MoveRef>) -> Vec<&'a MoveRef> {
    let mut sorted: Vec<&MoveRef> = moves.into_iter().collect();
    sorted.sort_by(|a, b| locale_compare(&a.name, &b.name));
    sorted
}

/// Build the view for the current record state and shown move description
pub fn card_view(
    state: &ResourceState<CreatureRecord>,
    requested: &LookupKey,
    active: Option<&MoveDescription>,
) -> CardView {
    match state {
        ResourceState::Idle | ResourceState::Loading => CardView::Loading,
        ResourceState::NotFound => CardView::NotFound,
        ResourceState::Resolved(record) => CardView::Card(creature_card(record, requested, active)),
    }
}

fn creature_card(
    record: &CreatureRecord,
    requested: &LookupKey,
    active: Option<&MoveDescription>,
) -> CreatureCard {
    let number = Some(record.id)
        .filter(|id| *id > 0)
        .or_else(|| requested.number())
        .map(full_pokedex_number);

    let primary_image = PrimaryImage {
        asset_path: number
            .as_ref()
            .map(|number| format!("{}/{}.png", ASSET_DIR, number)),
        fallback_uri: record.sprites.default_sprite().map(str::to_string),
    };

    let images = record
        .sprites
        .display_slots()
        .into_iter()
        .filter_map(|slot| {
            record.sprites.get(slot).map(|uri| SpriteImage {
                slot: slot.to_string(),
                uri: uri.to_string(),
            })
        })
        .collect();

    let stats = record
        .stats
        .iter()
        .map(|stat| StatRow {
            label: humanize(stat.name()),
            value: stat.base_stat,
        })
        .collect();

    let moves = sort_moves(record.moves.iter().map(|slot| &slot.move_ref))
        .into_iter()
        .map(|move_ref| MoveButton {
            name: move_ref.name.clone(),
            label: humanize(&move_ref.name),
            url: move_ref.url.clone(),
        })
        .collect();

    let overlay = active.map(|description| MoveOverlay {
        title: humanize(&description.name),
        description: description.display_text(),
    });

    CreatureCard {
        number: number.unwrap_or_default(),
        name: record.name.clone(),
        types: record.types.iter().map(|t| t.name().to_string()).collect(),
        primary_image,
        images,
        stats,
        moves,
        overlay,
    }
}

/// Plain-text rendering of a card view for the terminal
pub fn render_text(view: &CardView) -> String {
    let card = match view {
        CardView::Loading => return "Loading...\n".to_string(),
        CardView::NotFound => return "NotFound.\n".to_string(),
        CardView::Card(card) => card,
    };

    let mut out = String::new();

    if let Some(overlay) = &card.overlay {
        out.push_str(&format!("[ {} ]\n", overlay.title));
        out.push_str(&format!("  {}\n", overlay.description));
        out.push('\n');
    }

    out.push_str(&format!("#{} {}\n", card.number, card.name));
    out.push_str(&format!("Types: {}\n", card.types.join(", ")));

    match (&card.primary_image.asset_path, &card.primary_image.fallback_uri) {
        (Some(asset), Some(fallback)) => {
            out.push_str(&format!("Image: {} (fallback {})\n", asset, fallback));
        }
        (Some(asset), None) => {
            out.push_str(&format!("Image: {}\n", asset));
        }
        (None, Some(fallback)) => {
            out.push_str(&format!("Image: {}\n", fallback));
        }
        (None, None) => {}
    }
    for image in &card.images {
        out.push_str(&format!("  {}: {}\n", image.slot, image.uri));
    }

    out.push_str("\nStats\n");
    for row in &card.stats {
        out.push_str(&format!("  {:<16}{:>4}\n", row.label, row.value));
    }

    out.push_str("\nMoves\n");
    for button in &card.moves {
        out.push_str(&format!("  {}\n", button.label));
    }

    out
}
