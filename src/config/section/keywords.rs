//! `[keywords]` configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordsConfig {
    /// Keywords appended to every page's keyword list.
    pub include: Vec<String>,

    /// Keywords used when a page provides none.
    pub default: Vec<String>,
}
