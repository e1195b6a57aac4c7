//! Async wrapper around [`Deck2Trice`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every operation on the blocking thread pool via
//! [`tokio::task::spawn_blocking`]; the provider client and file writes are
//! blocking.
//!
//! # Example
//!
//! ```no_run
//! use deck2trice::{AsyncDeck2Trice, Deck2Trice, Provider};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let builder = Deck2Trice::builder()
//!         .provider(Provider::Archidekt)
//!         .username("facet");
//!     let converter = AsyncDeck2Trice::build(builder).await.unwrap();
//!
//!     let report = converter.sync().await.unwrap();
//!     println!("wrote {} decks", report.written.len());
//! }
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::{Deck2TriceError, Result};
use crate::{Deck2Trice, Deck2TriceBuilder, SyncReport};

/// Async wrapper around [`Deck2Trice`].
///
/// The converter sits behind a [`Mutex`] since syncing needs `&mut` access
/// to the deck source.
#[derive(Clone)]
pub struct AsyncDeck2Trice {
    inner: Arc<Mutex<Deck2Trice>>,
}

impl AsyncDeck2Trice {
    /// Build the converter on the blocking thread pool.
    pub async fn build(builder: Deck2TriceBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || {
            let converter = builder.build()?;
            Ok(AsyncDeck2Trice {
                inner: Arc::new(Mutex::new(converter)),
            })
        })
        .await
        .map_err(|e| Deck2TriceError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Run a sync operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Deck2Trice) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let converter = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = converter
                .lock()
                .map_err(|_| Deck2TriceError::InvalidArgument("converter lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| Deck2TriceError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn sync(&self) -> Result<SyncReport> {
        self.run(|c| c.sync()).await
    }

    pub async fn convert(&self, raw: Value) -> Result<PathBuf> {
        self.run(move |c| c.convert(&raw)).await
    }

    pub async fn convert_all(&self, raws: Vec<Value>) -> Result<SyncReport> {
        self.run(move |c| Ok(c.convert_all(&raws))).await
    }
}
