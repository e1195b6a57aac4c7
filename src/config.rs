//! Constants, default locations, and the persisted `~/.deck2trice.yml` file.

use crate::error::{Deck2TriceError, Result};
use crate::models::Provider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MOXFIELD_API_BASE: &str = "https://api.moxfield.com/v2";
pub const ARCHIDEKT_API_BASE: &str = "https://archidekt.com/api";

/// Tag written into every exported deck so the client can tell where it came from.
pub const TOOL_TAG: &str = "deck2trice";

/// Extension of Cockatrice deck files.
pub const DECK_EXTENSION: &str = "cod";

/// Used when a deck name normalizes to nothing.
pub const FALLBACK_FILENAME: &str = "Untitled Deck";

pub const CONFIG_FILE_NAME: &str = ".deck2trice.yml";

pub const USER_AGENTS: [&str; 11] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/93.0.4577.82 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_4_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Mobile/15E148 Safari/604.1",
    "Mozilla/4.0 (compatible; MSIE 9.0; Windows NT 6.1)",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0.4280.141 Safari/537.36 Edg/87.0.664.75",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.102 Safari/537.36 Edge/18.18363",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:53.0) Gecko/20100101 Firefox/53.0",
    "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.0; Trident/5.0; Trident/5.0)",
    "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.2; Trident/6.0; MDDCJS)",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/51.0.2704.79 Safari/537.36 Edge/14.14393",
    "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1)",
];

/// Archidekt `deckFormat` codes. Unknown codes map to an empty format.
pub fn archidekt_format(code: i64) -> &'static str {
    match code {
        1 => "standard",
        2 => "modern",
        3 => "commander",
        4 => "legacy",
        5 => "vintage",
        6 => "pauper",
        _ => "",
    }
}

pub fn user_decks_url(provider: Provider, username: &str) -> String {
    match provider {
        Provider::Moxfield => format!(
            "{}/users/{}/decks?pageNumber=1&pageSize=99999",
            MOXFIELD_API_BASE, username
        ),
        Provider::Archidekt => format!(
            "{}/decks/v3/?ownerUsername={}&pageSize=99999",
            ARCHIDEKT_API_BASE, username
        ),
    }
}

pub fn decklist_url(provider: Provider, deck_id: &str) -> String {
    match provider {
        Provider::Moxfield => format!("{}/decks/all/{}", MOXFIELD_API_BASE, deck_id),
        Provider::Archidekt => format!("{}/decks/{}/", ARCHIDEKT_API_BASE, deck_id),
    }
}

/// Cockatrice's deck folder (e.g. `~/.local/share/Cockatrice/Cockatrice/decks` on Linux).
pub fn default_deck_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("Cockatrice").join("Cockatrice").join("decks")
    } else {
        PathBuf::from("decks")
    }
}

pub fn config_path() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        home.join(CONFIG_FILE_NAME)
    } else {
        PathBuf::from(CONFIG_FILE_NAME)
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Settings persisted between runs of the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub username: String,
    /// Provider tag, `moxfield` or `archidekt`.
    pub source: String,
    /// Fetch every deck of the user instead of `decks`.
    pub fetch_all: bool,
    /// Output directory; empty means [`default_deck_dir`].
    pub deckpath: String,
    /// Explicit deck ids to fetch when `fetch_all` is off.
    pub decks: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            source: Provider::Moxfield.as_str().to_string(),
            fetch_all: true,
            deckpath: String::new(),
            decks: Vec::new(),
        }
    }
}

impl Config {
    /// Load the config at `path`, or the defaults if the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Deck2TriceError::filesystem(parent, e))?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|e| Deck2TriceError::filesystem(path, e))
    }

    pub fn provider(&self) -> Result<Provider> {
        self.source.parse()
    }

    pub fn deck_dir(&self) -> PathBuf {
        if self.deckpath.is_empty() {
            default_deck_dir()
        } else {
            PathBuf::from(&self.deckpath)
        }
    }
}
