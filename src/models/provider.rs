use crate::error::{Deck2TriceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported deck-building sites.
///
/// Moxfield lists each zone as a map keyed by card name; Archidekt lists
/// cards once and places them through user-defined categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Moxfield,
    Archidekt,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Moxfield, Provider::Archidekt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Moxfield => "moxfield",
            Provider::Archidekt => "archidekt",
        }
    }
}

impl FromStr for Provider {
    type Err = Deck2TriceError;

    fn from_str(s: &str) -> Result<Self> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Deck2TriceError::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
