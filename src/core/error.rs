//! Runtime error type for metadata resolution.

use thiserror::Error;

/// Errors raised while resolving metadata.
///
/// Configuration errors are fatal to the current resolution call and are
/// meant to surface to the developer; they are never retried. Field-level
/// lookup failures never reach this type; the resolver degrades those to
/// literal values.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("improperly configured: {0}")]
    ImproperlyConfigured(String),

    #[error("keywords must be a list of strings, got {0}")]
    InvalidKeywords(String),
}

impl MetaError {
    pub(crate) fn missing_protocol() -> Self {
        Self::ImproperlyConfigured(
            "`site.protocol` must be set (or a request context installed) \
             to build absolute URLs"
                .into(),
        )
    }

    pub(crate) fn missing_domain() -> Self {
        Self::ImproperlyConfigured(
            "`site.domain` must be set (or a request context installed) \
             to build absolute URLs"
                .into(),
        )
    }
}
