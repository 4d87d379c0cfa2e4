//! URL absolutizer.
//!
//! Joins relative paths with a protocol/domain, or with the ambient
//! request context when one is in scope. Paths are percent-encoded at
//! the output boundary; already-absolute URLs pass through unchanged.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::config::MetaConfig;
use crate::core::error::MetaError;
use crate::core::request;

/// Characters escaped in path output. `%` is left alone so inputs that
/// are already percent-encoded are not encoded twice.
const PATH_ESCAPE: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Whether the URL already carries a scheme.
#[inline]
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Percent-encode a path for URL output (non-ASCII always encoded).
fn encode_path(path: &str) -> Cow<'_, str> {
    utf8_percent_encode(path, PATH_ESCAPE).into()
}

/// Build a fully qualified URL for `url`, or `None` for empty input.
///
/// The ambient request context takes precedence; otherwise the configured
/// `site.protocol`/`site.domain` are required and a missing one is a
/// configuration error, fatal to the call.
pub fn absolutize(config: &MetaConfig, url: Option<&str>) -> Result<Option<String>, MetaError> {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return Ok(None);
    };

    if let Some(req) = request::current() {
        if is_absolute(url) {
            return Ok(Some(url.to_string()));
        }
        return Ok(Some(req.build_absolute_uri(&encode_path(url))));
    }

    absolutize_with(
        url,
        config.site.protocol.as_deref(),
        config.site.domain.as_deref(),
    )
    .map(Some)
}

/// Branch logic for absolutizing against an explicit protocol/domain.
///
/// - already absolute → unchanged
/// - `//host/path` → `protocol://host/path`
/// - `/path` → `protocol://domain/path`
/// - `path` → `protocol://domain/path`
pub fn absolutize_with(
    url: &str,
    protocol: Option<&str>,
    domain: Option<&str>,
) -> Result<String, MetaError> {
    if is_absolute(url) {
        return Ok(url.to_string());
    }

    let protocol = protocol.ok_or_else(MetaError::missing_protocol)?;
    let encoded = encode_path(url);

    if url.starts_with("//") {
        return Ok(format!("{protocol}:{encoded}"));
    }

    let domain = domain.ok_or_else(MetaError::missing_domain)?;
    if url.starts_with('/') {
        Ok(format!("{protocol}://{domain}{encoded}"))
    } else {
        Ok(format!("{protocol}://{domain}/{encoded}"))
    }
}

/// Whether resolved URLs are being built over https.
///
/// The ambient request decides when in scope, the configured protocol
/// otherwise.
pub fn secure_active(config: &MetaConfig) -> bool {
    match request::current() {
        Some(req) => req.is_secure(),
        None => config.site.is_secure(),
    }
}

/// Upgrade a `http://` URL to `https://`; other inputs pass through.
pub fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}
