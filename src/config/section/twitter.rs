//! `[twitter]` configuration: Twitter Card properties.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Card types Twitter documents; anything else still renders but warns.
pub const CARD_TYPES: [&str; 6] = [
    "summary",
    "summary_large_image",
    "product",
    "photo",
    "player",
    "app",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    /// Emit `twitter:*` properties in rendered heads.
    pub enabled: bool,

    /// Default `twitter:card`.
    pub card: String,

    /// Site handle (`twitter:site`), e.g. "@example".
    pub site: Option<String>,

    /// Default author handle (`twitter:creator`).
    pub author: Option<String>,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            card: "summary".into(),
            site: None,
            author: None,
        }
    }
}

impl TwitterConfig {
    pub const CARD: FieldPath = FieldPath::new("twitter.card");
    pub const SITE: FieldPath = FieldPath::new("twitter.site");
    pub const AUTHOR: FieldPath = FieldPath::new("twitter.author");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !CARD_TYPES.contains(&self.card.as_str()) {
            diag.warn(
                Self::CARD,
                format!("'{}' is not a recognized card type", self.card),
            );
        }
        for (field, handle) in [(Self::SITE, &self.site), (Self::AUTHOR, &self.author)] {
            if let Some(handle) = handle
                && !handle.starts_with('@')
            {
                diag.warn(field, format!("'{handle}' should start with '@'"));
            }
        }
    }
}
