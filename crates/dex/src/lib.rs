//! Catalog ingestion and detail aggregation.
//!
//! The pipeline runs in tiers: [`fetch_catalog`] lists every entity, then
//! [`aggregate`] resolves each entry into a [`CompositeDetail`] by fetching
//! its base detail and species metadata and then, concurrently, its evolution
//! chain ([`resolve_chain`]) and weakness set ([`resolve_weaknesses`]).
//! [`refresh`] drives the whole thing into a [`Sink`].
//!
//! Nothing here retries. A unit that fails is logged and left out; only the
//! catalog fetch is fatal.

pub mod aggregate;
mod catalog;
pub mod error;
mod evolution;
pub mod models;
mod refresh;
pub mod sink;
pub mod stats;
pub mod text;
mod weakness;

#[cfg(test)]
mod testing;

pub use crate::aggregate::{AggregateEvent, aggregate, aggregate_all, resolve_entry};
pub use crate::catalog::{catalog_url, fetch_catalog};
pub use crate::evolution::{extract_chain, resolve_artworks, resolve_chain};
pub use crate::models::{CatalogEntry, CompositeDetail, EvolutionNode, EvolutionStage};
pub use crate::refresh::{RefreshSummary, refresh};
pub use crate::sink::{MemorySink, Sink, SinkHandle};
pub use crate::weakness::resolve_weaknesses;
use pokevault_client::Url;

/// Entities resolved at the same time when the caller doesn't say otherwise.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;
pub const DEFAULT_LANGUAGE: &str = "en";

/// Settings shared by every tier of the pipeline.
#[derive(Debug, Clone)]
pub struct Context {
    api_base: Url,
    max_concurrency: usize,
    language: String,
}

impl Context {
    /// `api_base` is the API root, e.g. `https://pokeapi.co/api/v2/`. A
    /// missing trailing slash is added so that relative paths join under it.
    pub fn new(mut api_base: Url) -> Self {
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }
        Self { api_base, max_concurrency: DEFAULT_MAX_CONCURRENCY, language: DEFAULT_LANGUAGE.to_string() }
    }

    /// Zero is treated as one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Language code preferred for flavor text and genus.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub(crate) fn pokemon_url(&self, name: &str) -> String {
        format!("{}pokemon/{name}", self.api_base)
    }
}
