//! Shared fixtures for the deck2trice integration tests.
//!
//! Provides trimmed-down provider responses, an in-memory [`DeckSource`], and
//! `read_cod()` which reads a written `.cod` file back with quick-xml.

#![allow(dead_code)]

use deck2trice::{DeckSource, Deck2TriceError, Provider, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Provider responses
// ---------------------------------------------------------------------------

pub fn moxfield_deck() -> Value {
    json!({
        "name": "Atraxa Superfriends",
        "description": "Proliferate & win",
        "format": "commander",
        "mainboard": {
            "Sol Ring": {
                "quantity": 1,
                "card": { "layout": "normal", "set": "lea", "cn": "270", "scryfall_id": "sol-ring-id" }
            },
            "Fire // Ice": {
                "quantity": 1,
                "card": { "layout": "split", "set": "apc", "cn": "128", "scryfall_id": "fire-ice-id" }
            },
            "Delver of Secrets // Insectile Aberration": {
                "quantity": 4,
                "card": { "layout": "transform", "set": "isd" }
            },
            "Forest": {
                "quantity": 10,
                "card": { "layout": "normal" }
            }
        },
        "sideboard": {
            "Pyroblast": { "quantity": 2, "card": { "layout": "normal", "set": "ice" } }
        },
        "maybeboard": {
            "Doubling Season": { "quantity": 1, "card": { "layout": "normal" } }
        },
        "commanders": {
            "Atraxa, Praetors' Voice": {
                "quantity": 1,
                "card": { "layout": "normal", "set": "2xm", "cn": "190", "scryfall_id": "atraxa-id" }
            }
        },
        "companions": {
            "Lurrus of the Dream-Den": { "quantity": 1, "card": { "layout": "normal" } }
        },
        "hubs": [
            { "name": "Superfriends" },
            { "name": "Proliferate" }
        ]
    })
}

pub fn moxfield_user_decks() -> Value {
    json!({
        "pageNumber": 1,
        "data": [
            { "publicId": "g5uBDBFSe0OzEoC_jRInQw", "name": "Atraxa Superfriends" },
            { "publicId": "x9YtQ2", "name": "Burn" },
            { "name": "no id" }
        ]
    })
}

pub fn archidekt_deck() -> Value {
    json!({
        "id": 123456,
        "name": "Meren Reanimator",
        "description": "Graveyard value",
        "deckFormat": 3,
        "categories": [
            { "name": "Commander", "isPremier": true, "includedInDeck": true },
            { "name": "Creature", "isPremier": false, "includedInDeck": true },
            { "name": "Maybeboard", "isPremier": false, "includedInDeck": true },
            { "name": "Tokens", "isPremier": false, "includedInDeck": false },
            { "name": "Sideboard", "isPremier": false, "includedInDeck": false },
            { "name": "Considering", "isPremier": false, "includedInDeck": false }
        ],
        "cards": [
            archidekt_card("Meren of Clan Nel Toth", 1, &["Commander"]),
            archidekt_card("Sakura-Tribe Elder", 1, &["Creature", "Ramp"]),
            archidekt_card("Eternal Witness", 1, &["Creature"]),
            archidekt_card("Spore Frog", 1, &["Maybeboard"]),
            archidekt_card("Zombie", 3, &["Tokens"]),
            archidekt_card("Duress", 2, &["Sideboard"]),
            archidekt_card("Grave Pact", 1, &["Considering"])
        ],
        "deckTags": [
            { "name": "Aristocrats" },
            { "name": "Reanimator" }
        ]
    })
}

pub fn archidekt_card(name: &str, quantity: u32, categories: &[&str]) -> Value {
    json!({
        "quantity": quantity,
        "categories": categories,
        "card": {
            "uid": format!("{}-uid", name.to_lowercase().replace(' ', "-")),
            "collectorNumber": "42",
            "edition": { "editioncode": "cmr", "editionname": "Commander Legends" },
            "oracleCard": { "name": name }
        }
    })
}

pub fn archidekt_user_decks() -> Value {
    json!({
        "count": 2,
        "results": [
            { "id": 123456, "name": "Meren Reanimator" },
            { "id": "654321", "name": "Mono Red" }
        ]
    })
}

// ---------------------------------------------------------------------------
// In-memory deck source
// ---------------------------------------------------------------------------

/// Serves decks from memory. Ids listed without a deck fail to fetch.
pub struct FakeSource {
    pub provider: Provider,
    pub listed: Vec<String>,
    pub decks: HashMap<String, Value>,
    pub fail_listing: bool,
}

impl FakeSource {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            listed: Vec::new(),
            decks: HashMap::new(),
            fail_listing: false,
        }
    }

    pub fn with_deck(mut self, id: &str, deck: Value) -> Self {
        self.listed.push(id.to_string());
        self.decks.insert(id.to_string(), deck);
        self
    }

    pub fn with_missing(mut self, id: &str) -> Self {
        self.listed.push(id.to_string());
        self
    }
}

impl DeckSource for FakeSource {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn user_deck_ids(&mut self) -> Result<Vec<String>> {
        if self.fail_listing {
            return Err(Deck2TriceError::InvalidArgument("listing unavailable".into()));
        }
        Ok(self.listed.clone())
    }

    fn decklist(&mut self, deck_id: &str) -> Result<Value> {
        self.decks.get(deck_id).cloned().ok_or_else(|| {
            Deck2TriceError::InvalidArgument(format!("no deck with id {}", deck_id))
        })
    }
}

// ---------------------------------------------------------------------------
// .cod reader
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CodFile {
    pub version: String,
    pub deckname: String,
    pub banner: Option<(String, String)>,
    pub comments: String,
    pub tags: Vec<String>,
    /// Zone name and the attributes of each card in it.
    pub zones: Vec<(String, Vec<HashMap<String, String>>)>,
}

impl CodFile {
    pub fn zone(&self, name: &str) -> &[HashMap<String, String>] {
        self.zones
            .iter()
            .find(|(zone, _)| zone == name)
            .map(|(_, cards)| cards.as_slice())
            .unwrap_or_else(|| panic!("no zone named {}", name))
    }

    pub fn zone_names(&self, name: &str) -> Vec<String> {
        self.zone(name).iter().map(|c| c["name"].clone()).collect()
    }
}

fn attributes(e: &BytesStart<'_>) -> HashMap<String, String> {
    e.attributes()
        .map(|a| {
            let a = a.unwrap();
            (
                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                a.unescape_value().unwrap().into_owned(),
            )
        })
        .collect()
}

pub fn read_cod(path: &Path) -> CodFile {
    let xml = std::fs::read_to_string(path).unwrap();
    parse_cod(&xml)
}

pub fn parse_cod(xml: &str) -> CodFile {
    let mut reader = Reader::from_str(xml);
    let mut cod = CodFile::default();
    let mut stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                let attrs = attributes(&e);
                match name.as_str() {
                    "cockatrice_deck" => cod.version = attrs["version"].clone(),
                    "bannerCard" => cod.banner = Some((attrs["providerId"].clone(), String::new())),
                    "zone" => cod.zones.push((attrs["name"].clone(), Vec::new())),
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                let attrs = attributes(&e);
                match name.as_str() {
                    "zone" => cod.zones.push((attrs["name"].clone(), Vec::new())),
                    "card" => cod.zones.last_mut().unwrap().1.push(attrs),
                    _ => {}
                }
            }
            Event::Text(t) => {
                let text = t.unescape().unwrap().into_owned();
                match stack.last().map(String::as_str) {
                    Some("deckname") => cod.deckname = text,
                    Some("bannerCard") => cod.banner.as_mut().unwrap().1 = text,
                    Some("comments") => cod.comments = text,
                    Some("tag") => cod.tags.push(text),
                    _ => {}
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    cod
}
