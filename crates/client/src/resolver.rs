//! Concept resolution with layered caching.
//!
//! [`Unionpedia`] coordinates the page fetcher and four bounded stores: one
//! for fetched documents and one per derived result (concept object,
//! outgoing relations, incoming relations). The primary document's
//! existence flag is the single source of truth for whether a concept
//! exists; the result stores defer to it on every hit, not only on misses.
//! Unknown concepts are memoized by caching an empty sentinel, so repeat
//! lookups skip the network until the entry expires.
//!
//! ### Two-phase incoming fetch
//! The incoming-relations page is only reachable through the tab navigation
//! on the concept's own page, so the primary page is always loaded (from
//! cache or network) before the incoming page. Concurrent misses for one
//! concept are not deduplicated; each caller may fetch and the last write
//! wins in each store.

use std::sync::Arc;

use url::Url;

use unionpedia_core::{Error, TtlCache, UnionpediaConfig};

use crate::extract::{self, Concept, Document, Relation};
use crate::fetch::{FetchClient, FetchConfig, PageFetcher};

/// Replaces spaces in concept names when forming page URLs.
const WORD_SEPARATOR: &str = "_";

/// Key suffix separating a concept's incoming document from its primary one.
const INCOMING_SUFFIX: &str = "/incoming";

/// Client for a Unionpedia-style concept encyclopedia.
///
/// Owns its four cache stores; instances share nothing.
pub struct Unionpedia {
    base: String,
    fetcher: Arc<dyn PageFetcher>,
    objects: TtlCache<Concept>,
    outgoing: TtlCache<Vec<Relation>>,
    incoming: TtlCache<Vec<Relation>>,
    documents: TtlCache<Arc<Document>>,
}

impl Unionpedia {
    /// Build a client over the real HTTP fetcher.
    pub fn new(config: UnionpediaConfig) -> Result<Self, Error> {
        let fetch_config = FetchConfig {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        };
        let fetcher = Arc::new(FetchClient::new(fetch_config)?);

        Self::with_fetcher(config, fetcher)
    }

    /// Build a client over any page source.
    ///
    /// The seam used by [`Unionpedia::new`] and by tests that script
    /// responses instead of hitting the network.
    pub fn with_fetcher(config: UnionpediaConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self, Error> {
        let base = normalize_base_url(&config.base_url)?;

        Ok(Self {
            base,
            fetcher,
            objects: TtlCache::new(config.object_cache.unwrap_or(config.cache)),
            outgoing: TtlCache::new(config.outgoing_cache.unwrap_or(config.cache)),
            incoming: TtlCache::new(config.incoming_cache.unwrap_or(config.cache)),
            documents: TtlCache::new(config.html_cache.unwrap_or(config.cache)),
        })
    }

    /// Base URL all page and relation hrefs are rooted at. Always ends
    /// with a separator.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Structured record for `concept`: canonical URL, title, description.
    pub async fn concept_object(&self, concept: &str) -> Result<Concept, Error> {
        let concept = validated(concept)?;

        if let Some(object) = self.objects.get(concept) {
            self.check_known(concept)?;
            tracing::debug!("object cache hit for {}", concept);
            return Ok(object);
        }

        let document = self.primary_document(concept).await?;
        if !document.exists() {
            self.objects.put(concept.to_string(), Concept::default());
            return Err(Error::UnknownConcept(concept.to_string()));
        }

        let href = extract::tab_hrefs(&document)
            .into_iter()
            .next()
            .map(|href| href.replacen("./", &self.base, 1))
            .ok_or_else(|| Error::UnknownConcept(concept.to_string()))?;

        let object = Concept {
            href,
            title: extract::concept_title(&document),
            description: extract::concept_description(&document),
        };

        self.objects.put(concept.to_string(), object.clone());
        Ok(object)
    }

    /// Relations listed on the concept's own page, in page order.
    pub async fn outgoing_relations(&self, concept: &str) -> Result<Vec<Relation>, Error> {
        let concept = validated(concept)?;

        if let Some(relations) = self.outgoing.get(concept) {
            self.check_known(concept)?;
            tracing::debug!("outgoing cache hit for {}", concept);
            return Ok(relations);
        }

        let document = self.primary_document(concept).await?;
        if !document.exists() {
            self.outgoing.put(concept.to_string(), Vec::new());
            return Err(Error::UnknownConcept(concept.to_string()));
        }

        let relations = extract::relations(&document, &self.base);
        self.outgoing.put(concept.to_string(), relations.clone());
        Ok(relations)
    }

    /// Relations pointing at the concept, from its incoming-relations tab,
    /// in page order.
    pub async fn incoming_relations(&self, concept: &str) -> Result<Vec<Relation>, Error> {
        let concept = validated(concept)?;

        if let Some(relations) = self.incoming.get(concept) {
            self.check_known(concept)?;
            tracing::debug!("incoming cache hit for {}", concept);
            return Ok(relations);
        }

        let document = match self.incoming_document(concept).await {
            Ok(document) => document,
            Err(err) => {
                // Memoized as empty so repeat lookups skip the network
                // until the entry expires, even when the failure was a
                // transport error rather than a confirmed absence.
                tracing::warn!("caching empty incoming relations for {}: {}", concept, err);
                self.incoming.put(concept.to_string(), Vec::new());
                return Err(err);
            }
        };

        if !document.exists() {
            self.incoming.put(concept.to_string(), Vec::new());
            return Err(Error::UnknownConcept(concept.to_string()));
        }

        let relations = extract::relations(&document, &self.base);
        self.incoming.put(concept.to_string(), relations.clone());
        Ok(relations)
    }

    /// Primary (outgoing) document for `concept`: the cached copy if live,
    /// otherwise one fetch of the concept page.
    async fn primary_document(&self, concept: &str) -> Result<Arc<Document>, Error> {
        if let Some(document) = self.documents.get(concept) {
            return Ok(document);
        }

        let url = self.page_url(concept);
        let html = self.fetcher.fetch(&url).await?;

        let document = Arc::new(Document::new(html));
        self.documents.put(concept.to_string(), Arc::clone(&document));
        Ok(document)
    }

    /// Incoming document for `concept`, via the two-phase protocol: load
    /// the primary page first (cache or network), read the incoming page's
    /// URL from its tab navigation, then fetch that. The ordering is
    /// inherent to the site; only the primary page names the incoming URL.
    async fn incoming_document(&self, concept: &str) -> Result<Arc<Document>, Error> {
        let incoming_key = format!("{}{}", concept, INCOMING_SUFFIX);
        if let Some(document) = self.documents.get(&incoming_key) {
            return Ok(document);
        }

        let primary = self.primary_document(concept).await?;
        let tabs = extract::tab_hrefs(&primary);
        let Some(href) = tabs.get(1) else {
            // No incoming-relations tab: the page does not exist or lacks
            // the navigation this protocol depends on.
            return Err(Error::UnknownConcept(concept.to_string()));
        };

        let url = href.replacen("./", &self.base, 1);
        let html = self.fetcher.fetch(&url).await?;

        let document = Arc::new(Document::new(html));
        self.documents.put(incoming_key, Arc::clone(&document));
        Ok(document)
    }

    /// A cached result is only trusted if the primary document does not
    /// record the concept as missing.
    fn check_known(&self, concept: &str) -> Result<(), Error> {
        match self.documents.get(concept) {
            Some(document) if !document.exists() => Err(Error::UnknownConcept(concept.to_string())),
            _ => Ok(()),
        }
    }

    fn page_url(&self, concept: &str) -> String {
        format!("{}{}", self.base, concept.replace(' ', WORD_SEPARATOR))
    }
}

/// Emptiness is checked on the raw value, before trimming; whitespace-only
/// names therefore pass and resolve against the site root.
fn validated(concept: &str) -> Result<&str, Error> {
    if concept.is_empty() {
        return Err(Error::InvalidInput("concept is empty".into()));
    }

    Ok(concept.trim())
}

/// Parse and normalize the configured base URL to end with a separator.
fn normalize_base_url(raw: &str) -> Result<String, Error> {
    let parsed = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(Error::InvalidUrl(format!("unsupported scheme: {}", scheme))),
    }

    let normalized = parsed.as_str();
    if normalized.ends_with('/') {
        Ok(normalized.to_string())
    } else {
        Ok(format!("{}/", normalized))
    }
}
