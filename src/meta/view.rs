//! View-level metadata contract.
//!
//! Handlers that are not backed by a single entity override the small
//! getters below and call `as_meta` when building their template
//! context. Everything not overridden falls back to the site config.

use crate::config::{MetaConfig, cfg};
use crate::core::{MetaError, RequestContext, request};
use crate::meta::{ImageObject, Meta};
use crate::schema::JsonMap;

pub trait MetaView {
    fn title(&self) -> Option<String> {
        None
    }

    fn description(&self) -> Option<String> {
        None
    }

    fn keywords(&self) -> Vec<String> {
        Vec::new()
    }

    /// Page URL; relative values are absolutized.
    fn url(&self) -> Option<String> {
        None
    }

    /// Page image; falls back to the configured default image.
    fn image(&self) -> Option<ImageObject> {
        None
    }

    fn object_type(&self) -> Option<String> {
        None
    }

    fn site_name(&self) -> Option<String> {
        None
    }

    fn locale(&self) -> Option<String> {
        None
    }

    /// Additional `<meta name="..">` props (name → content).
    fn extra_props(&self) -> JsonMap {
        JsonMap::new()
    }

    /// Additional custom props as (attribute, name, content).
    fn extra_custom_props(&self) -> Vec<(String, String, String)> {
        Vec::new()
    }

    /// Pre-built structured-data tree, if the view carries one.
    fn schema(&self) -> Option<JsonMap> {
        None
    }

    /// Resolve against the global config, without a request context.
    fn as_meta(&self) -> Result<Meta, MetaError>
    where
        Self: Sized,
    {
        self.as_meta_with(&cfg(), None)
    }

    /// Resolve with an explicit config and optional request context.
    fn as_meta_with(
        &self,
        config: &MetaConfig,
        request: Option<RequestContext>,
    ) -> Result<Meta, MetaError>
    where
        Self: Sized,
    {
        let _scope = request.map(request::scoped);

        let mut meta = Meta::with_config(config);
        meta.title = self.title();
        meta.description = self.description();
        meta.set_keywords(config, self.keywords());

        if let Some(url) = self.url() {
            meta.set_url(config, Some(&url))?;
        }

        let image = self
            .image()
            .or_else(|| config.image.default.clone().map(ImageObject::new));
        if let Some(image) = image {
            meta.set_image(config, image)?;
        }

        if let Some(object_type) = self.object_type() {
            meta.object_type = Some(object_type);
        }
        if let Some(site_name) = self.site_name() {
            meta.site_name = Some(site_name);
        }
        if let Some(locale) = self.locale() {
            meta.locale = Some(locale);
        }

        meta.extra_props = self.extra_props();
        meta.extra_custom_props = self.extra_custom_props();
        meta.schema = self.schema();
        meta.apply_fallbacks();

        Ok(meta)
    }
}
