//! `[image]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Fallback image used when a page or entity provides none.
    pub default: Option<String>,

    /// Prefix for image paths that are not rooted and not absolute
    /// (e.g., "cover.png" becomes "/static/cover.png").
    pub base_url: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            default: None,
            base_url: "/static/".into(),
        }
    }
}

impl ImageConfig {
    pub const BASE_URL: FieldPath = FieldPath::new("image.base_url");

    /// Join a non-rooted image path onto the base URL.
    pub fn join(&self, path: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let rooted = self.base_url.starts_with('/');
        let absolute = self.base_url.starts_with("http://") || self.base_url.starts_with("https://");
        if !rooted && !absolute {
            diag.error_with_hint(
                Self::BASE_URL,
                format!("'{}' must be rooted or an absolute URL", self.base_url),
                "use format like \"/static/\" or \"https://cdn.example.com/\"",
            );
        }
        if !self.base_url.ends_with('/') {
            diag.warn(Self::BASE_URL, "base_url should end with '/'");
        }
    }
}
