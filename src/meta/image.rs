//! Image metadata with secure-URL normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::MetaConfig;
use crate::core::MetaError;
use crate::core::url::{absolutize, is_absolute, secure_active, upgrade_to_https};
use crate::schema::JsonMap;

/// An image (or other media) referenced from page metadata.
///
/// Paths that are neither rooted nor absolute are joined onto the
/// configured `image.base_url` during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageObject {
    pub url: String,

    /// Explicit secure URL; computed from `url` when the resolved
    /// protocol is secure and none is supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageObject {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_secure_url(mut self, secure_url: impl Into<String>) -> Self {
        self.secure_url = Some(secure_url.into());
        self
    }

    /// Absolutize `url`, then fill or normalize `secure_url`.
    ///
    /// An explicitly supplied `secure_url` is absolutized but never
    /// recomputed from `url`. Without one, a secure resolved protocol
    /// mirrors `url` into `secure_url`, upgrading `http://` to
    /// `https://` when needed.
    pub fn normalized(&self, config: &MetaConfig) -> Result<Self, MetaError> {
        if self.url.is_empty() {
            return Ok(self.clone());
        }

        let path = if self.url.starts_with('/') || is_absolute(&self.url) {
            self.url.clone()
        } else {
            config.image.join(&self.url)
        };
        let url = absolutize(config, Some(&path))?.unwrap_or_default();

        let secure_url = match &self.secure_url {
            Some(explicit) => absolutize(config, Some(explicit))?,
            None if secure_active(config) => Some(upgrade_to_https(&url)),
            None => None,
        };

        Ok(Self {
            url,
            secure_url,
            width: self.width,
            height: self.height,
            alt: self.alt.clone(),
        })
    }

    /// JSON fragment for structured-data export.
    pub fn to_schema_value(&self) -> Value {
        let mut map = JsonMap::new();
        map.insert("@type".into(), Value::String("ImageObject".into()));
        map.insert("url".into(), Value::String(self.url.clone()));
        if let Some(width) = self.width {
            map.insert("width".into(), Value::from(width));
        }
        if let Some(height) = self.height {
            map.insert("height".into(), Value::from(height));
        }
        if let Some(alt) = &self.alt {
            map.insert("caption".into(), Value::String(alt.clone()));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn https_config() -> MetaConfig {
        let mut config = MetaConfig::default();
        config.site.protocol = Some("https".into());
        config.site.domain = Some("foo.com".into());
        config
    }

    fn http_config() -> MetaConfig {
        let mut config = https_config();
        config.site.protocol = Some("http".into());
        config
    }

    #[test]
    fn test_rooted_path_absolutized() {
        let image = ImageObject::new("/img/image.gif")
            .normalized(&https_config())
            .unwrap();
        assert_eq!(image.url, "https://foo.com/img/image.gif");
    }

    #[test]
    fn test_relative_path_joined_onto_base_url() {
        let image = ImageObject::new("img/image.gif")
            .normalized(&https_config())
            .unwrap();
        assert_eq!(image.url, "https://foo.com/static/img/image.gif");
    }

    #[test]
    fn test_custom_base_url() {
        let mut config = https_config();
        config.image.base_url = "/thumb/".into();
        let image = ImageObject::new("img/image.gif").normalized(&config).unwrap();
        assert_eq!(image.url, "https://foo.com/thumb/img/image.gif");
    }

    #[test]
    fn test_absolute_url_untouched() {
        let image = ImageObject::new("http://meta.example.com/image.gif")
            .normalized(&https_config())
            .unwrap();
        assert_eq!(image.url, "http://meta.example.com/image.gif");
    }

    #[test]
    fn test_secure_url_mirrors_url_under_https() {
        let image = ImageObject::new("/img/image.gif")
            .normalized(&https_config())
            .unwrap();
        assert_eq!(image.secure_url.as_deref(), Some("https://foo.com/img/image.gif"));
    }

    #[test]
    fn test_secure_url_upgrades_http_prefix() {
        let image = ImageObject::new("http://meta.example.com/image.gif")
            .normalized(&https_config())
            .unwrap();
        assert_eq!(image.url, "http://meta.example.com/image.gif");
        assert_eq!(
            image.secure_url.as_deref(),
            Some("https://meta.example.com/image.gif")
        );
    }

    #[test]
    fn test_no_secure_url_under_http() {
        let image = ImageObject::new("/img/image.gif")
            .normalized(&http_config())
            .unwrap();
        assert_eq!(image.url, "http://foo.com/img/image.gif");
        assert_eq!(image.secure_url, None);
    }

    #[test]
    fn test_explicit_secure_url_preserved() {
        let image = ImageObject::new("/img/image.gif")
            .with_secure_url("/secure/image.gif")
            .normalized(&https_config())
            .unwrap();
        // normalized, not recomputed from url
        assert_eq!(
            image.secure_url.as_deref(),
            Some("https://foo.com/secure/image.gif")
        );
    }

    #[test]
    fn test_empty_url_is_noop() {
        let image = ImageObject::default().normalized(&https_config()).unwrap();
        assert_eq!(image, ImageObject::default());
    }

    #[test]
    fn test_missing_protocol_errors() {
        let err = ImageObject::new("/img/image.gif")
            .normalized(&MetaConfig::default())
            .unwrap_err();
        assert!(matches!(err, MetaError::ImproperlyConfigured(_)));
    }

    #[test]
    fn test_schema_value() {
        let image = ImageObject::new("https://foo.com/a.png")
            .with_size(800, 600)
            .with_alt("A landscape");
        let value = image.to_schema_value();
        assert_eq!(value["@type"], "ImageObject");
        assert_eq!(value["url"], "https://foo.com/a.png");
        assert_eq!(value["width"], 800);
        assert_eq!(value["caption"], "A landscape");
    }
}
