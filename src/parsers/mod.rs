//! Provider response parsers.
//!
//! Each module maps one provider's raw JSON deck into a [`DeckModel`]. Parsing
//! is tolerant: absent or `null` optional fields fall back to empty values.
//! Only a response that cannot identify its deck (not an object, no string
//! `name`) or a zone with the wrong shape is rejected.

pub mod archidekt;
pub mod moxfield;

use log::debug;
use serde_json::Value;

use crate::error::{Deck2TriceError, Result};
use crate::models::{DeckModel, Provider};

/// Parse a raw provider deck response.
pub fn parse(raw: &Value, provider: Provider) -> Result<DeckModel> {
    match provider {
        Provider::Moxfield => moxfield::parse_deck(raw),
        Provider::Archidekt => archidekt::parse_deck(raw),
    }
}

/// Extract deck ids from a provider's "decks of user" listing.
pub fn user_deck_ids(raw: &Value, provider: Provider) -> Result<Vec<String>> {
    match provider {
        Provider::Moxfield => moxfield::user_deck_ids(raw),
        Provider::Archidekt => archidekt::user_deck_ids(raw),
    }
}

// ---------------------------------------------------------------------------
// Shared field helpers
// ---------------------------------------------------------------------------

/// String field of an object; `null` and non-strings count as absent.
pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// String or number rendered as text. Used for ids and collector numbers,
/// which providers send either way.
pub(crate) fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Copy count of a card entry. Missing or unreadable counts mean one copy;
/// entries with fewer than one copy are skipped.
pub(crate) fn card_quantity(entry: &Value, name: &str) -> Option<u32> {
    let quantity = match entry.get("quantity") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(1),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(1),
        _ => 1,
    };
    if quantity < 1 {
        debug!("Skipping '{}' with quantity {}", name, quantity);
        return None;
    }
    Some(u32::try_from(quantity).unwrap_or(u32::MAX))
}

pub(crate) fn require_object<'a>(
    raw: &'a Value,
    provider: Provider,
) -> Result<&'a serde_json::Map<String, Value>> {
    raw.as_object().ok_or_else(|| {
        Deck2TriceError::MalformedSource(format!("{} deck response is not a JSON object", provider))
    })
}

pub(crate) fn require_name(raw: &Value, provider: Provider) -> Result<String> {
    str_field(raw, "name").map(str::to_string).ok_or_else(|| {
        Deck2TriceError::MalformedSource(format!("{} deck response has no name", provider))
    })
}

/// `name` of every object in the list under `key`, skipping unnamed entries.
pub(crate) fn names_in(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| str_field(item, "name"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Array under `key`; absent or `null` is empty, any other shape is malformed.
pub(crate) fn array_field<'a>(raw: &'a Value, key: &str, provider: Provider) -> Result<&'a [Value]> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(Deck2TriceError::MalformedSource(format!(
            "{} field '{}' is not a list",
            provider, key
        ))),
    }
}
