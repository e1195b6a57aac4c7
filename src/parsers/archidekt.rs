//! Archidekt deck responses (`/api/decks/{id}/`).
//!
//! Cards are listed once under `cards`, each carrying the names of the
//! categories it belongs to. Category flags under `categories` decide which
//! zone a category's cards land in; see [`route_category`].

use std::collections::HashMap;

use log::{debug, warn};
use serde_json::Value;

use super::{
    array_field, card_quantity, names_in, require_name, require_object, str_field, text_field,
};
use crate::config::archidekt_format;
use crate::error::Result;
use crate::models::{CardRecord, DeckModel, Provider, Zone};

/// Name used when an entry carries neither an oracle name nor its own name.
pub const UNKNOWN_CARD_NAME: &str = "Unknown";

/// Deck-level flags of an Archidekt category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFlags {
    /// Premier categories hold the deck's commanders/companions.
    pub is_premier: bool,
    /// Whether the category's cards count toward the deck.
    pub included_in_deck: bool,
}

impl Default for CategoryFlags {
    fn default() -> Self {
        Self {
            is_premier: false,
            included_in_deck: true,
        }
    }
}

impl CategoryFlags {
    fn from_json(category: &Value) -> Self {
        let defaults = Self::default();
        Self {
            is_premier: category
                .get("isPremier")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.is_premier),
            included_in_deck: category
                .get("includedInDeck")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.included_in_deck),
        }
    }
}

/// Zone for the cards of one category, or `None` when they are dropped.
///
/// Category names win over flags: `Commander`, `Sideboard` and `Maybeboard`
/// always route by name. A token category is the tokens zone when kept out of
/// the deck and dropped otherwise; tokens never reach the mainboard. Anything
/// else goes to the mainboard when included and not premier.
pub fn route_category(name: &str, flags: CategoryFlags) -> Option<Zone> {
    let name = name.to_lowercase();
    match name.as_str() {
        "commander" => Some(Zone::Commanders),
        "sideboard" => Some(Zone::Sideboard),
        "maybeboard" => Some(Zone::Maybeboard),
        _ if name.contains("token") => (!flags.included_in_deck).then_some(Zone::Tokens),
        _ if flags.included_in_deck && !flags.is_premier => Some(Zone::Mainboard),
        _ => None,
    }
}

pub fn parse_deck(raw: &Value) -> Result<DeckModel> {
    require_object(raw, Provider::Archidekt)?;
    let mut deck = DeckModel::new(require_name(raw, Provider::Archidekt)?);
    deck.description = str_field(raw, "description").unwrap_or_default().to_string();
    deck.format = raw
        .get("deckFormat")
        .and_then(Value::as_i64)
        .map(archidekt_format)
        .unwrap_or_default()
        .to_string();

    let flags: HashMap<&str, CategoryFlags> = array_field(raw, "categories", Provider::Archidekt)?
        .iter()
        .filter_map(|c| Some((str_field(c, "name")?, CategoryFlags::from_json(c))))
        .collect();

    for (category, entries) in group_by_category(array_field(raw, "cards", Provider::Archidekt)?) {
        let category_flags = flags.get(category).copied().unwrap_or_default();
        let cards = entries.into_iter().filter_map(parse_card);
        match route_category(category, category_flags) {
            Some(zone) => deck.zone_mut(zone).extend(cards),
            None => warn!(
                "Dropping {} card(s) of category '{}' from '{}' (premier: {}, in deck: {})",
                cards.count(),
                category,
                deck.name,
                category_flags.is_premier,
                category_flags.included_in_deck
            ),
        }
    }

    deck.themes = names_in(raw, "deckTags");
    Ok(deck)
}

/// Entries per category, in the order categories are first seen. An entry in
/// several categories appears under each of them.
fn group_by_category(entries: &[Value]) -> Vec<(&str, Vec<&Value>)> {
    let mut groups: Vec<(&str, Vec<&Value>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let categories = entry
            .get("categories")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for category in categories.iter().filter_map(Value::as_str) {
            let slot = *index.entry(category).or_insert_with(|| {
                groups.push((category, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(entry);
        }
    }

    groups
}

fn parse_card(entry: &Value) -> Option<CardRecord> {
    let card = entry.get("card").unwrap_or(&Value::Null);
    let name = card
        .get("oracleCard")
        .and_then(|oracle| str_field(oracle, "name"))
        .or_else(|| str_field(card, "name"))
        .unwrap_or_else(|| {
            debug!("Card entry without a name, using '{}'", UNKNOWN_CARD_NAME);
            UNKNOWN_CARD_NAME
        });
    let quantity = card_quantity(entry, name)?;
    let set_code = card
        .get("edition")
        .and_then(|edition| str_field(edition, "editioncode"))
        .unwrap_or_default();

    Some(
        CardRecord::new(name, quantity)
            .with_set_code(set_code)
            .with_collector_number(text_field(card, "collectorNumber").unwrap_or_default())
            .with_uuid(text_field(card, "uid").unwrap_or_default()),
    )
}

/// Deck ids from `/api/decks/v3/?ownerUsername={user}`.
pub fn user_deck_ids(raw: &Value) -> Result<Vec<String>> {
    require_object(raw, Provider::Archidekt)?;
    Ok(array_field(raw, "results", Provider::Archidekt)?
        .iter()
        .filter_map(|deck| text_field(deck, "id"))
        .collect())
}
