//! `[og]` configuration: Open Graph and Facebook properties.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OgConfig {
    /// Emit `og:*` properties in rendered heads.
    pub enabled: bool,

    /// Also emit `fb:*` properties and the `fb:` namespace.
    pub facebook: bool,

    /// Default `og:type`.
    #[serde(rename = "type")]
    pub object_type: String,

    /// Facebook application id (`fb:app_id`).
    pub app_id: Option<String>,

    /// Facebook profile id (`fb:profile_id`).
    pub profile_id: Option<String>,

    /// Publisher Facebook URL (`article:publisher`).
    pub publisher: Option<String>,

    /// Author Facebook URL (`article:author`).
    pub author_url: Option<String>,

    /// Facebook page ids (`fb:pages`).
    pub pages: Option<String>,

    /// Extra OG namespaces added to the head `prefix` attribute.
    pub namespaces: Vec<String>,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            facebook: false,
            object_type: "Article".into(),
            app_id: None,
            profile_id: None,
            publisher: None,
            author_url: None,
            pages: None,
            namespaces: Vec::new(),
        }
    }
}
