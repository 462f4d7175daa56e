// Pure mapping from raw catalog records to the read models.
// No I/O here; missing optional fields already defaulted at deserialization.

use pokescout_api::Pokemon;

use crate::models::{Card, Detail, StatEntry};

/// Project a raw record to the list-view card
pub fn to_card(p: &Pokemon) -> Card {
    Card {
        id: p.id,
        name: p.name.clone(),
        sprite: sprite_of(p),
        types: p.types.iter().map(|t| t.type_ref.name.clone()).collect(),
    }
}

/// Project a raw record to the full detail view
pub fn to_detail(p: &Pokemon) -> Detail {
    Detail {
        card: to_card(p),
        height: p.height,
        weight: p.weight,
        abilities: p.abilities.iter().map(|a| a.ability.name.clone()).collect(),
        stats: p
            .stats
            .iter()
            .map(|s| StatEntry {
                label: format_stat_label(&s.stat.name),
                value: s.base_stat,
            })
            .collect(),
        moves: p.moves.iter().map(|m| m.move_ref.name.clone()).collect(),
    }
}

/// Prefer the animated showdown front sprite, fall back to the default one
fn sprite_of(p: &Pokemon) -> Option<String> {
    p.sprites
        .other
        .as_ref()
        .and_then(|o| o.showdown.as_ref())
        .and_then(|s| s.front_default.clone())
        .or_else(|| p.sprites.front_default.clone())
}

/// Human-friendly label for a stat key.
///
/// "hp" renders as the acronym "HP"; everything else gets dashes replaced
/// with spaces and each word capitalized ("special-attack" -> "Special Attack").
pub fn format_stat_label(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    if name.eq_ignore_ascii_case("hp") {
        return "HP".to_string();
    }

    name.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
