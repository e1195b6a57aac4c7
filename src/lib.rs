//! Convert Moxfield and Archidekt decklists into Cockatrice deck files.
//!
//! Provider responses are parsed into a provider-neutral [`DeckModel`], which
//! is then written as a `.cod` XML file named after the deck.
//!
//! # Quick start
//!
//! ```no_run
//! use deck2trice::{Deck2Trice, Provider};
//!
//! let mut converter = Deck2Trice::builder()
//!     .provider(Provider::Moxfield)
//!     .username("facet")
//!     .deck_dir("decks")
//!     .build()
//!     .unwrap();
//!
//! let report = converter.sync().unwrap();
//! println!("wrote {} decks", report.written.len());
//! ```
//!
//! Already fetched JSON converts without any network access:
//!
//! ```no_run
//! # let raw = serde_json::json!({"name": "Burn", "mainboard": {}});
//! let deck = deck2trice::parse(&raw, deck2trice::Provider::Moxfield).unwrap();
//! let path = deck2trice::export(&deck, "decks").unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod parsers;
pub mod source;
pub mod xml;

#[cfg(feature = "async")]
pub use async_client::AsyncDeck2Trice;
pub use config::Config;
pub use error::{Deck2TriceError, Result};
pub use models::{CardRecord, DeckModel, ExportDeck, Provider, Zone};
pub use normalize::normalize_name;
pub use parsers::parse;
pub use source::{load_deck_file, DeckSource, HttpDeckSource};
pub use xml::export;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Deck2TriceBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Deck2Trice`] converter.
pub struct Deck2TriceBuilder {
    provider: Provider,
    username: String,
    deck_dir: Option<PathBuf>,
    deck_ids: Vec<String>,
    timeout: Duration,
    dry_run: bool,
    source: Option<Box<dyn DeckSource + Send>>,
}

impl Default for Deck2TriceBuilder {
    fn default() -> Self {
        Self {
            provider: Provider::Moxfield,
            username: String::new(),
            deck_dir: None,
            deck_ids: Vec::new(),
            timeout: Duration::from_secs(30),
            dry_run: false,
            source: None,
        }
    }
}

impl Deck2TriceBuilder {
    /// Start from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::default()
            .provider(config.provider()?)
            .username(&config.username)
            .deck_dir(config.deck_dir());
        if !config.fetch_all {
            builder = builder.deck_ids(config.decks.iter().cloned());
        }
        Ok(builder)
    }

    /// Which site to fetch from. Defaults to Moxfield.
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Output directory. Defaults to Cockatrice's deck folder.
    pub fn deck_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.deck_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Only sync these decks instead of every deck of the user.
    pub fn deck_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deck_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch and parse, but never write files.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Use a custom [`DeckSource`] instead of the provider's HTTP API. The
    /// source decides the provider.
    pub fn source<S: DeckSource + Send + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn build(self) -> Result<Deck2Trice> {
        let source = match self.source {
            Some(source) => source,
            None => Box::new(HttpDeckSource::new(
                self.provider,
                self.username,
                self.timeout,
            )),
        };
        Ok(Deck2Trice {
            source,
            deck_dir: self.deck_dir.unwrap_or_else(config::default_deck_dir),
            deck_ids: self.deck_ids,
            dry_run: self.dry_run,
        })
    }
}

// ---------------------------------------------------------------------------
// SyncReport
// ---------------------------------------------------------------------------

/// Outcome of a batch conversion. One failing deck never stops the others.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Files written, in deck order. Empty on a dry run.
    pub written: Vec<PathBuf>,
    /// Decks that parsed successfully.
    pub parsed: usize,
    /// Deck label (id or name) and the error that stopped it.
    pub failed: Vec<(String, Deck2TriceError)>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Deck2Trice
// ---------------------------------------------------------------------------

/// Fetches a user's decks from one provider and writes them as `.cod` files.
///
/// Created via [`Deck2Trice::builder()`].
pub struct Deck2Trice {
    source: Box<dyn DeckSource + Send>,
    deck_dir: PathBuf,
    deck_ids: Vec<String>,
    dry_run: bool,
}

impl Deck2Trice {
    pub fn builder() -> Deck2TriceBuilder {
        Deck2TriceBuilder::default()
    }

    pub fn provider(&self) -> Provider {
        self.source.provider()
    }

    pub fn deck_dir(&self) -> &Path {
        &self.deck_dir
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn source(&self) -> &dyn DeckSource {
        self.source.as_ref()
    }

    pub fn source_mut(&mut self) -> &mut dyn DeckSource {
        self.source.as_mut()
    }

    pub fn parse(&self, raw: &Value) -> Result<DeckModel> {
        self.source.parse_deck(raw)
    }

    /// Parse one raw deck and write it to the deck directory.
    ///
    /// On a dry run nothing is written and the path the deck would be
    /// written to is returned.
    pub fn convert(&self, raw: &Value) -> Result<PathBuf> {
        let deck = self.parse(raw)?;
        if self.dry_run {
            return Ok(xml::deck_path(&deck, &self.deck_dir));
        }
        export(&deck, &self.deck_dir)
    }

    /// Convert every raw deck, collecting failures instead of stopping.
    ///
    /// Failures are labelled with the deck's `name` when it has one.
    pub fn convert_all(&self, raws: &[Value]) -> SyncReport {
        let mut report = SyncReport::default();
        for (i, raw) in raws.iter().enumerate() {
            let label = parsers::str_field(raw, "name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("deck #{}", i + 1));
            self.convert_into(&mut report, label, raw);
        }
        report
    }

    /// Deck ids to sync: the configured list, or every deck of the user.
    pub fn deck_ids(&mut self) -> Result<Vec<String>> {
        if !self.deck_ids.is_empty() {
            info!("Using {} configured deck(s)", self.deck_ids.len());
            return Ok(self.deck_ids.clone());
        }
        let ids = self.source.user_deck_ids()?;
        info!("Found {} deck(s) on {}", ids.len(), self.provider());
        Ok(ids)
    }

    /// Fetch and convert every deck returned by [`deck_ids`](Self::deck_ids).
    ///
    /// Only a failure to list the decks is returned as an error; fetch, parse
    /// and write failures are recorded per deck in the report.
    pub fn sync(&mut self) -> Result<SyncReport> {
        let ids = self.deck_ids()?;
        let mut report = SyncReport::default();
        for id in ids {
            info!("Grabbing decklist <{}>", id);
            match self.source.decklist(&id) {
                Ok(raw) => self.convert_into(&mut report, id, &raw),
                Err(e) => {
                    warn!("Failed to fetch deck {}: {}", id, e);
                    report.failed.push((id, e));
                }
            }
        }
        info!(
            "{} deck(s) converted, {} failed",
            report.parsed,
            report.failed.len()
        );
        Ok(report)
    }

    fn convert_into(&self, report: &mut SyncReport, label: String, raw: &Value) {
        let result = self.parse(raw).and_then(|deck| {
            report.parsed += 1;
            if self.dry_run {
                return Ok(None);
            }
            export(&deck, &self.deck_dir).map(Some)
        });
        match result {
            Ok(Some(path)) => report.written.push(path),
            Ok(None) => {}
            Err(e) => {
                warn!("Failed to convert {}: {}", label, e);
                report.failed.push((label, e));
            }
        }
    }
}

impl fmt::Display for Deck2Trice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deck2Trice(provider={}, deck_dir={}, dry_run={})",
            self.provider(),
            self.deck_dir.display(),
            self.dry_run
        )
    }
}
