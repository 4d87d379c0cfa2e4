//! `[site]` configuration.
//!
//! Site-wide identity used when no request context is available:
//! protocol and domain feed the URL absolutizer, name and type feed
//! `og:site_name` and the default object type.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Protocol used to build absolute URLs ("http" or "https").
    pub protocol: Option<String>,

    /// Host name used to build absolute URLs (e.g., "example.com").
    pub domain: Option<String>,

    /// Site name, exported as `og:site_name`.
    pub name: Option<String>,

    /// Default object type for pages without one.
    #[serde(rename = "type")]
    pub object_type: Option<String>,

    /// Render a `<title>` tag as part of the head block.
    pub use_title_tag: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            protocol: None,
            domain: None,
            name: None,
            object_type: None,
            use_title_tag: false,
        }
    }
}

impl SiteConfig {
    pub const PROTOCOL: FieldPath = FieldPath::new("site.protocol");
    pub const DOMAIN: FieldPath = FieldPath::new("site.domain");

    /// Whether the configured protocol is `https`.
    pub fn is_secure(&self) -> bool {
        self.protocol.as_deref() == Some("https")
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(protocol) = &self.protocol
            && !matches!(protocol.as_str(), "http" | "https")
        {
            diag.error_with_hint(
                Self::PROTOCOL,
                format!("protocol '{protocol}' not supported, must be http or https"),
                "set protocol = \"https\"",
            );
        }

        if let Some(domain) = &self.domain {
            if domain.contains("://") {
                diag.error_with_hint(
                    Self::DOMAIN,
                    format!("'{domain}' must be a bare host name, without a scheme"),
                    "use format like example.com",
                );
            } else if url::Url::parse(&format!("https://{domain}"))
                .map(|u| u.host_str().is_none())
                .unwrap_or(true)
            {
                diag.error_with_hint(
                    Self::DOMAIN,
                    format!("'{domain}' is not a valid host name"),
                    "use format like example.com",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_site_passes() {
        let site = SiteConfig {
            protocol: Some("https".into()),
            domain: Some("example.com".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_invalid_protocol() {
        let site = SiteConfig {
            protocol: Some("ftp".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_domain_with_scheme_rejected() {
        let site = SiteConfig {
            domain: Some("https://example.com".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_is_secure() {
        let mut site = SiteConfig::default();
        assert!(!site.is_secure());
        site.protocol = Some("http".into());
        assert!(!site.is_secure());
        site.protocol = Some("https".into());
        assert!(site.is_secure());
    }
}
