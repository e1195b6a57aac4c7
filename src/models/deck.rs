use crate::config::TOOL_TAG;
use crate::models::CardRecord;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DeckModel: provider-neutral decklist
// ---------------------------------------------------------------------------

/// A decklist parsed from one provider response.
///
/// Zones keep the order the provider listed the cards in. The model is not
/// mutated for export; see [`DeckModel::export_view`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckModel {
    pub name: String,
    pub description: String,
    /// Game format label such as `commander`; empty when unspecified.
    pub format: String,
    pub mainboard: Vec<CardRecord>,
    pub sideboard: Vec<CardRecord>,
    pub maybeboard: Vec<CardRecord>,
    pub tokens: Vec<CardRecord>,
    pub commanders: Vec<CardRecord>,
    pub companions: Vec<CardRecord>,
    /// Free-text deck labels (Moxfield hubs, Archidekt deck tags).
    pub themes: Vec<String>,
}

impl DeckModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Total number of cards across every zone.
    pub fn card_count(&self) -> u32 {
        [
            &self.mainboard,
            &self.sideboard,
            &self.maybeboard,
            &self.tokens,
            &self.commanders,
            &self.companions,
        ]
        .into_iter()
        .flatten()
        .map(|c| c.quantity)
        .sum()
    }

    /// Build the export-ready view of this deck.
    ///
    /// The side zone is the sideboard followed by every commander. It is
    /// computed fresh on each call, so exporting the same deck twice never
    /// duplicates commanders.
    pub fn export_view(&self) -> ExportDeck<'_> {
        let side = self.sideboard.iter().chain(self.commanders.iter()).collect();
        ExportDeck { deck: self, side }
    }
}

// ---------------------------------------------------------------------------
// ExportDeck: what the serializer writes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ExportDeck<'a> {
    pub deck: &'a DeckModel,
    pub side: Vec<&'a CardRecord>,
}

impl<'a> ExportDeck<'a> {
    pub fn main(&self) -> &'a [CardRecord] {
        &self.deck.mainboard
    }

    /// Name of the first commander, shown by the client as the deck thumbnail.
    pub fn banner_card(&self) -> Option<&'a str> {
        self.deck.commanders.first().map(|c| c.name.as_str())
    }

    /// Tool tag, then the capitalized format (if any), then every theme.
    pub fn tags(&self) -> Vec<String> {
        let mut tags = vec![TOOL_TAG.to_string()];
        if !self.deck.format.is_empty() {
            tags.push(capitalize(&self.deck.format));
        }
        tags.extend(self.deck.themes.iter().cloned());
        tags
    }
}

/// Uppercase the first character and lowercase the rest (`EDH` -> `Edh`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

/// Named partition of a [`DeckModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Mainboard,
    Sideboard,
    Maybeboard,
    Tokens,
    Commanders,
    Companions,
}

impl DeckModel {
    pub fn zone(&self, zone: Zone) -> &[CardRecord] {
        match zone {
            Zone::Mainboard => &self.mainboard,
            Zone::Sideboard => &self.sideboard,
            Zone::Maybeboard => &self.maybeboard,
            Zone::Tokens => &self.tokens,
            Zone::Commanders => &self.commanders,
            Zone::Companions => &self.companions,
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut Vec<CardRecord> {
        match zone {
            Zone::Mainboard => &mut self.mainboard,
            Zone::Sideboard => &mut self.sideboard,
            Zone::Maybeboard => &mut self.maybeboard,
            Zone::Tokens => &mut self.tokens,
            Zone::Commanders => &mut self.commanders,
            Zone::Companions => &mut self.companions,
        }
    }
}
