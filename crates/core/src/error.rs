//! Unified error types for the unionpedia client.

/// Unified error types surfaced by the public API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Invalid concept argument (e.g. the empty string).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The requested concept has no page on the origin, or its page lacks
    /// the structural markers this client depends on.
    #[error("UNKNOWN_CONCEPT: {0}")]
    UnknownConcept(String),

    /// Transport-level failure while fetching a document.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// The configured base URL is unusable.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),
}
