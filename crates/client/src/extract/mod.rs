//! Parsed-page representation and field extraction.
//!
//! A fetched page becomes a [`Document`]: the raw source plus one derived
//! flag, whether the page carries a recognizable title block. The extractors
//! in [`fields`] are pure selector-driven mappings from a document to
//! titles, descriptions, and relation lists. They degrade to empty values
//! when a marker is missing; page existence is the resolver's concern.

pub mod fields;

pub use fields::{concept_description, concept_title, relations, tab_hrefs};

use scraper::{Html, Selector};

/// A concept record: canonical URL, title, and short description.
///
/// `Default` yields the empty record cached as the absence sentinel; it is
/// never returned for an existing concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Concept {
    /// Canonical page URL under the configured base
    pub href: String,
    /// Concept title
    pub title: String,
    /// Short description shown under the page title
    pub description: String,
}

/// A directed edge to another concept, as listed on a concept page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Relation {
    /// Target concept title
    pub title: String,
    /// Resolved target URL
    pub href: String,
    /// One-line description of the relation
    pub description: String,
}

/// One fetched page: the raw source plus the derived existence flag.
///
/// `scraper`'s parsed tree is not `Send`, so cached documents keep the
/// source text and the extractors re-parse on use. Results are themselves
/// cached, so each page is extracted at most once per result store.
#[derive(Debug, Clone)]
pub struct Document {
    html: String,
    exists: bool,
}

impl Document {
    /// Wrap a fetched page, deriving existence from the title block.
    pub fn new(html: String) -> Self {
        let exists = {
            let parsed = Html::parse_document(&html);
            let selector = Selector::parse(".page-title").expect("invalid selector");
            parsed.select(&selector).next().is_some()
        };

        Self { html, exists }
    }

    /// Whether the page carries a recognizable title block.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Raw page source.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub(crate) fn parse(&self) -> Html {
        Html::parse_document(&self.html)
    }
}
