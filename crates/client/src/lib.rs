//! Client library for the Unionpedia concept encyclopedia.
//!
//! Fetches and parses concept pages, producing structured concept records
//! and their outgoing/incoming relation links. Fetched documents and derived
//! results are held in bounded time-expiring caches owned by one
//! [`Unionpedia`] instance; see [`resolver`] for the lookup protocol.

pub mod extract;
pub mod fetch;
pub mod resolver;

pub use extract::{Concept, Document, Relation};
pub use fetch::{FetchClient, FetchConfig, PageFetcher};
pub use resolver::Unionpedia;

pub use unionpedia_core::{CacheConfig, Error, UnionpediaConfig};
