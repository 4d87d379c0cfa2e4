//! The resolved metadata object.
//!
//! A [`Meta`] holds the final values for one page: generic and
//! per-channel titles/descriptions, deduplicated keywords, the
//! absolutized URL and image, Open Graph / Twitter / Schema.org
//! properties, and the resolved schema tree for JSON-LD export.
//! Instances come out of [`MetaEntity::as_meta`] or
//! [`MetaView::as_meta`] and are consumed by the template layer,
//! usually through [`crate::tags::render_head`].

mod entity;
mod image;
mod view;

pub use entity::{MetaEntity, default_spec};
pub use image::ImageObject;
pub use view::MetaView;

use serde::Serialize;
use serde_json::Value;

use crate::config::MetaConfig;
use crate::core::MetaError;
use crate::core::url::absolutize;
use crate::resolve::FieldValue;
use crate::schema::{JsonMap, as_json_ld};

/// Resolved metadata for one page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Meta {
    pub title: Option<String>,
    pub og_title: Option<String>,
    pub twitter_title: Option<String>,
    pub schemaorg_title: Option<String>,

    pub description: Option<String>,
    pub og_description: Option<String>,
    pub twitter_description: Option<String>,
    pub schemaorg_description: Option<String>,

    /// Deduplicated, first-seen order.
    pub keywords: Vec<String>,

    /// Always absolutized.
    pub url: Option<String>,
    pub image: Option<ImageObject>,

    pub object_type: Option<String>,
    pub site_name: Option<String>,
    pub locale: Option<String>,

    pub og_type: Option<String>,
    pub og_profile_id: Option<String>,
    pub og_publisher: Option<String>,
    pub og_author_url: Option<String>,
    pub facebook_app_id: Option<String>,
    pub fb_pages: Option<String>,

    pub twitter_card: Option<String>,
    pub twitter_site: Option<String>,
    pub twitter_creator: Option<String>,

    pub schemaorg_type: Option<String>,

    /// ISO 8601 strings (`article:published_time` and friends).
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub expiration_time: Option<String>,

    /// `article:tag` values.
    pub tags: Vec<String>,

    /// Extra OG namespaces for the head `prefix` attribute.
    pub custom_namespace: Vec<String>,

    /// Additional `<meta name="..">` props (name → content).
    pub extra_props: JsonMap,

    /// Additional custom props as (attribute, name, content).
    pub extra_custom_props: Vec<(String, String, String)>,

    pub use_og: bool,
    pub use_twitter: bool,
    pub use_facebook: bool,
    pub use_schemaorg: bool,
    pub use_title_tag: bool,

    /// Resolved structured-data tree.
    pub schema: Option<JsonMap>,
}

impl Meta {
    /// A `Meta` preloaded with the config's site-wide defaults; page
    /// values assigned afterwards override them.
    pub fn with_config(config: &MetaConfig) -> Self {
        let mut meta = Self {
            site_name: config.site.name.clone(),
            object_type: config.site.object_type.clone(),
            og_type: Some(config.og.object_type.clone()),
            og_profile_id: config.og.profile_id.clone(),
            og_publisher: config.og.publisher.clone(),
            og_author_url: config.og.author_url.clone(),
            facebook_app_id: config.og.app_id.clone(),
            fb_pages: config.og.pages.clone(),
            twitter_card: Some(config.twitter.card.clone()),
            twitter_site: config.twitter.site.clone(),
            twitter_creator: config.twitter.author.clone(),
            schemaorg_type: Some(config.schemaorg.object_type.clone()),
            custom_namespace: config.og.namespaces.clone(),
            use_og: config.og.enabled,
            use_twitter: config.twitter.enabled,
            use_facebook: config.og.enabled && config.og.facebook,
            use_schemaorg: config.schemaorg.enabled,
            use_title_tag: config.site.use_title_tag,
            ..Self::default()
        };
        meta.set_keywords(config, Vec::new());
        meta
    }

    /// Replace the keyword list: empty input falls back to the
    /// configured defaults, the configured include list is appended,
    /// and duplicates beyond the first occurrence are dropped.
    pub fn set_keywords(&mut self, config: &MetaConfig, keywords: Vec<String>) {
        let base = if keywords.is_empty() {
            config.keywords.default.clone()
        } else {
            keywords
        };
        self.keywords = dedup_keywords(
            base.into_iter()
                .chain(config.keywords.include.iter().cloned()),
        );
    }

    /// Set the page URL, absolutizing it first.
    pub fn set_url(&mut self, config: &MetaConfig, url: Option<&str>) -> Result<(), MetaError> {
        self.url = absolutize(config, url)?;
        Ok(())
    }

    /// Set the page image, normalizing URL and secure URL.
    pub fn set_image(
        &mut self,
        config: &MetaConfig,
        image: ImageObject,
    ) -> Result<(), MetaError> {
        self.image = Some(image.normalized(config)?);
        Ok(())
    }

    /// Assign one resolved field by its metadata key.
    ///
    /// Unknown keys land in `extra_props`.
    pub fn assign(
        &mut self,
        config: &MetaConfig,
        field: &str,
        value: FieldValue,
    ) -> Result<(), MetaError> {
        match field {
            "title" => self.title = value.as_text(),
            "og_title" => self.og_title = value.as_text(),
            "twitter_title" => self.twitter_title = value.as_text(),
            "schemaorg_title" => self.schemaorg_title = value.as_text(),
            "description" => self.description = value.as_text(),
            "og_description" => self.og_description = value.as_text(),
            "twitter_description" => self.twitter_description = value.as_text(),
            "schemaorg_description" => self.schemaorg_description = value.as_text(),
            "keywords" => {
                let keywords = string_list(&value)
                    .ok_or_else(|| MetaError::InvalidKeywords(describe(&value)))?;
                self.set_keywords(config, keywords);
            }
            "url" => self.set_url(config, value.as_text().as_deref())?,
            "image" => match value {
                FieldValue::Image(image) => self.set_image(config, image)?,
                other => {
                    if let Some(path) = other.as_text() {
                        self.set_image(config, ImageObject::new(path))?;
                    }
                }
            },
            "object_type" => self.object_type = value.as_text(),
            "site_name" => self.site_name = value.as_text(),
            "locale" => self.locale = value.as_text(),
            "og_type" => self.og_type = value.as_text(),
            "og_app_id" => self.facebook_app_id = value.as_text(),
            "og_profile_id" => self.og_profile_id = value.as_text(),
            "og_publisher" => self.og_publisher = value.as_text(),
            "og_author_url" => self.og_author_url = value.as_text(),
            "fb_pages" => self.fb_pages = value.as_text(),
            "twitter_card" => self.twitter_card = value.as_text(),
            "twitter_site" => self.twitter_site = value.as_text(),
            "twitter_creator" => self.twitter_creator = value.as_text(),
            "schemaorg_type" => self.schemaorg_type = value.as_text(),
            "published_time" => self.published_time = value.as_text(),
            "modified_time" => self.modified_time = value.as_text(),
            "expiration_time" => self.expiration_time = value.as_text(),
            "tag" => {
                self.tags = string_list(&value)
                    .or_else(|| value.as_text().map(|t| vec![t]))
                    .unwrap_or_default();
            }
            "custom_namespace" => {
                self.custom_namespace = string_list(&value)
                    .or_else(|| value.as_text().map(|ns| vec![ns]))
                    .unwrap_or_default();
            }
            other => {
                self.extra_props
                    .insert(other.to_string(), to_json(config, value)?);
            }
        }
        Ok(())
    }

    /// Fill missing per-channel titles/descriptions from the generic ones.
    pub fn apply_fallbacks(&mut self) {
        for channel in [
            &mut self.og_title,
            &mut self.twitter_title,
            &mut self.schemaorg_title,
        ] {
            if channel.is_none() {
                channel.clone_from(&self.title);
            }
        }
        for channel in [
            &mut self.og_description,
            &mut self.twitter_description,
            &mut self.schemaorg_description,
        ] {
            if channel.is_none() {
                channel.clone_from(&self.description);
            }
        }
    }

    /// Serialize the resolved schema as a JSON-LD document.
    pub fn as_json_ld(&self) -> Option<String> {
        self.schema.as_ref().map(as_json_ld)
    }
}

/// First-seen-order deduplication.
fn dedup_keywords(keywords: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for keyword in keywords {
        if !seen.contains(&keyword) {
            seen.push(keyword);
        }
    }
    seen
}

/// Extract a list of strings, or `None` for anything else.
fn string_list(value: &FieldValue) -> Option<Vec<String>> {
    let items: Vec<&Value> = match value {
        FieldValue::Value(Value::Array(items)) => items.iter().collect(),
        FieldValue::List(items) => {
            return items
                .iter()
                .map(|item| item.as_text())
                .collect::<Option<Vec<_>>>();
        }
        _ => return None,
    };
    items
        .into_iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn describe(value: &FieldValue) -> String {
    match value {
        FieldValue::Value(v) => match v {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "a mixed array",
            Value::Object(_) => "an object",
        }
        .to_string(),
        FieldValue::Date(_) => "a date".to_string(),
        FieldValue::List(_) => "a mixed list".to_string(),
        FieldValue::Map(_) => "a map".to_string(),
        FieldValue::Image(_) => "an image".to_string(),
        FieldValue::Entity(_) => "an entity".to_string(),
    }
}

/// Convert a resolved value into plain JSON for `extra_props`.
fn to_json(config: &MetaConfig, value: FieldValue) -> Result<Value, MetaError> {
    match value {
        FieldValue::Value(v) => Ok(v),
        FieldValue::Date(d) => Ok(Value::String(d.to_rfc3339())),
        FieldValue::List(items) => items
            .into_iter()
            .map(|item| to_json(config, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        FieldValue::Map(entries) => {
            let mut map = JsonMap::new();
            for (key, item) in entries {
                map.insert(key, to_json(config, item)?);
            }
            Ok(Value::Object(map))
        }
        FieldValue::Image(image) => Ok(image.normalized(config)?.to_schema_value()),
        FieldValue::Entity(entity) => {
            tracing::debug!(entity = %entity.entity_key(), "entity in extra props, substituting null");
            Ok(Value::Null)
        }
    }
}
