//! Moxfield deck responses (`/v2/decks/all/{id}`).
//!
//! Every zone is an object keyed by card name:
//!
//! ```json
//! "mainboard": {
//!   "Fire // Ice": { "quantity": 1, "card": { "layout": "split", "set": "apc", "cn": "128", "scryfall_id": "..." } }
//! }
//! ```

use serde_json::Value;

use super::{
    array_field, card_quantity, names_in, require_name, require_object, str_field, text_field,
};
use crate::error::{Deck2TriceError, Result};
use crate::models::{face_name, CardRecord, DeckModel, Provider, Zone};

const ZONES: [(&str, Zone); 5] = [
    ("mainboard", Zone::Mainboard),
    ("sideboard", Zone::Sideboard),
    ("maybeboard", Zone::Maybeboard),
    ("commanders", Zone::Commanders),
    ("companions", Zone::Companions),
];

pub fn parse_deck(raw: &Value) -> Result<DeckModel> {
    require_object(raw, Provider::Moxfield)?;
    let mut deck = DeckModel::new(require_name(raw, Provider::Moxfield)?);
    deck.description = str_field(raw, "description").unwrap_or_default().to_string();
    deck.format = str_field(raw, "format").unwrap_or_default().to_string();

    for (key, zone) in ZONES {
        *deck.zone_mut(zone) = parse_zone(raw, key)?;
    }

    deck.themes = names_in(raw, "hubs");
    Ok(deck)
}

fn parse_zone(raw: &Value, key: &str) -> Result<Vec<CardRecord>> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(cards)) => Ok(cards
            .iter()
            .filter_map(|(name, entry)| parse_card(name, entry))
            .collect()),
        Some(_) => Err(Deck2TriceError::MalformedSource(format!(
            "moxfield zone '{}' is not an object",
            key
        ))),
    }
}

fn parse_card(listed_name: &str, entry: &Value) -> Option<CardRecord> {
    let quantity = card_quantity(entry, listed_name)?;
    let card = entry.get("card").unwrap_or(&Value::Null);
    let layout = str_field(card, "layout").unwrap_or_default();

    Some(
        CardRecord::new(face_name(listed_name, layout), quantity)
            .with_set_code(str_field(card, "set").unwrap_or_default())
            .with_collector_number(text_field(card, "cn").unwrap_or_default())
            .with_uuid(text_field(card, "scryfall_id").unwrap_or_default()),
    )
}

/// Public ids from `/v2/users/{user}/decks`.
pub fn user_deck_ids(raw: &Value) -> Result<Vec<String>> {
    require_object(raw, Provider::Moxfield)?;
    Ok(array_field(raw, "data", Provider::Moxfield)?
        .iter()
        .filter_map(|deck| text_field(deck, "publicId"))
        .collect())
}
