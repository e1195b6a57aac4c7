use serde::{Deserialize, Serialize};

/// Separator between the faces of a multi-face card name (`Fire // Ice`).
pub const FACE_SEPARATOR: &str = " // ";

// ---------------------------------------------------------------------------
// CardRecord: one stack of identical cards
// ---------------------------------------------------------------------------

/// A stack of identical cards inside a deck zone.
///
/// Optional printing details use the empty string when the provider did not
/// supply them; the serializer omits empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub set_code: String,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub uuid: String,
}

impl CardRecord {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            set_code: String::new(),
            collector_number: String::new(),
            uuid: String::new(),
        }
    }

    /// Set code, stored uppercase.
    pub fn with_set_code(mut self, set_code: &str) -> Self {
        self.set_code = set_code.to_uppercase();
        self
    }

    pub fn with_collector_number(mut self, collector_number: impl Into<String>) -> Self {
        self.collector_number = collector_number.into();
        self
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
    }
}

/// Whether a card layout prints two playable names on one card, in which
/// case the combined `A // B` name is kept.
pub fn keeps_combined_name(layout: &str) -> bool {
    matches!(layout, "split" | "adventure")
}

/// Name to emit for a card listed under `name` with the given layout.
///
/// Non-split layouts (transform, modal, flip...) only keep the front face.
pub fn face_name<'a>(name: &'a str, layout: &str) -> &'a str {
    if keeps_combined_name(layout) {
        name
    } else {
        name.split(FACE_SEPARATOR).next().unwrap_or(name)
    }
}
