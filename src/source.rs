//! Where raw deck JSON comes from.
//!
//! [`DeckSource`] is the seam between the converter and the network:
//! [`HttpDeckSource`] talks to the provider APIs, tests and offline callers
//! plug in their own. [`load_deck_file`] reads a saved response from disk.

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use flate2::read::GzDecoder;
use log::debug;
use rand::seq::SliceRandom;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::config::{self, USER_AGENTS};
use crate::error::{Deck2TriceError, Result};
use crate::models::{DeckModel, Provider};
use crate::parsers;

/// Fetches raw deck JSON for one provider account.
pub trait DeckSource {
    fn provider(&self) -> Provider;

    /// Ids of every deck the configured user owns.
    fn user_deck_ids(&mut self) -> Result<Vec<String>>;

    /// Raw JSON of one deck.
    fn decklist(&mut self, deck_id: &str) -> Result<Value>;

    fn parse_deck(&self, raw: &Value) -> Result<DeckModel> {
        parsers::parse(raw, self.provider())
    }
}

// ---------------------------------------------------------------------------
// HttpDeckSource
// ---------------------------------------------------------------------------

/// [`DeckSource`] backed by the provider's public JSON API.
///
/// Every request picks a random browser user agent; the providers reject
/// the default reqwest one.
pub struct HttpDeckSource {
    pub provider: Provider,
    pub username: String,
    timeout: Duration,
    client: Option<Client>,
}

impl HttpDeckSource {
    pub fn new(provider: Provider, username: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider,
            username: username.into(),
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        let client = match self.client.take() {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?,
        };
        Ok(&*self.client.insert(client))
    }

    fn get_json(&mut self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let resp = self
            .client()?
            .get(url)
            .header(USER_AGENT, random_user_agent())
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    /// Drop the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

impl DeckSource for HttpDeckSource {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn user_deck_ids(&mut self) -> Result<Vec<String>> {
        if self.username.is_empty() {
            return Err(Deck2TriceError::InvalidArgument(format!(
                "a {} username is required to list decks",
                self.provider
            )));
        }
        let url = config::user_decks_url(self.provider, &self.username);
        let listing = self.get_json(&url)?;
        parsers::user_deck_ids(&listing, self.provider)
    }

    fn decklist(&mut self, deck_id: &str) -> Result<Value> {
        let url = config::decklist_url(self.provider, deck_id);
        self.get_json(&url)
    }
}

pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

// ---------------------------------------------------------------------------
// Saved responses
// ---------------------------------------------------------------------------

/// Load a saved deck response (handles `.gz` transparently).
pub fn load_deck_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| Deck2TriceError::filesystem(path, e))?;
    let mut contents = String::new();

    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let mut reader = BufReader::new(GzDecoder::new(BufReader::new(file)));
        reader.read_to_string(&mut contents)?;
    } else {
        BufReader::new(file).read_to_string(&mut contents)?;
    }

    Ok(serde_json::from_str(&contents)?)
}
