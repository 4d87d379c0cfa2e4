//! `[schemaorg]` configuration: Schema.org / JSON-LD properties.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Common Schema.org types; the vocabulary is open-ended, so unknown
/// types only warn.
pub const OBJECT_TYPES: [&str; 12] = [
    "Article",
    "Blog",
    "WebPage",
    "WebSite",
    "Event",
    "Product",
    "Place",
    "Person",
    "Book",
    "LocalBusiness",
    "Organization",
    "Review",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaorgConfig {
    /// Emit `itemprop` meta tags and the JSON-LD script in rendered heads.
    pub enabled: bool,

    /// Default `@type` injected into schemas that resolve without one.
    #[serde(rename = "type")]
    pub object_type: String,
}

impl Default for SchemaorgConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            object_type: "Article".into(),
        }
    }
}

impl SchemaorgConfig {
    pub const TYPE: FieldPath = FieldPath::new("schemaorg.type");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !OBJECT_TYPES.contains(&self.object_type.as_str()) {
            diag.warn(
                Self::TYPE,
                format!("'{}' is not a common Schema.org type", self.object_type),
            );
        }
    }
}
