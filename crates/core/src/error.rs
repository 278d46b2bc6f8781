//! Load failure taxonomy.

use thiserror::Error;

/// Terminal failure kinds a model load can end in.
///
/// Each is reported once and never retried; the viewer decides what to
/// render on failure (nothing).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The fetch failed outright or returned a non-success status.
    #[error("asset unreachable at {url}: {reason}")]
    NetworkUnreachable { url: String, reason: String },

    /// The response body is not the expected binary/text format, e.g. an
    /// HTML error page served where a model was expected.
    #[error("unexpected response body for {url}: {detail}")]
    MalformedResponse { url: String, detail: String },

    /// The format parser rejected well-formed-looking bytes.
    #[error("failed to parse {url}: {detail}")]
    ParseFailure { url: String, detail: String },
}

impl LoadError {
    /// Short tag for log lines and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NetworkUnreachable { .. } => "network-unreachable",
            LoadError::MalformedResponse { .. } => "malformed-response",
            LoadError::ParseFailure { .. } => "parse-failure",
        }
    }
}
