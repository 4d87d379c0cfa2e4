//! Model-level metadata contract.
//!
//! An entity (a blog post, a product, an author) declares how its
//! metadata and structured data are obtained, and gets `as_meta` /
//! `as_schema` for free. The declarative spec is merged over a default
//! spec derived from the site config, so entities only name what they
//! override.

use crate::config::{MetaConfig, cfg};
use crate::core::{MetaError, RequestContext, request};
use crate::meta::Meta;
use crate::resolve::{MetaSource, MetadataSpec, Selector, resolve};
use crate::schema::{EntityKey, JsonMap, SchemaCache, as_json_ld, build_schema};

/// An object that can resolve itself into a [`Meta`] and a schema
/// fragment.
pub trait MetaEntity: MetaSource {
    /// Declarative metadata mapping; merged over [`default_spec`].
    fn metadata(&self) -> MetadataSpec;

    /// Declarative structured-data mapping. Empty means the entity
    /// produces no schema.
    fn schema_spec(&self) -> MetadataSpec {
        MetadataSpec::new()
    }

    /// Stable identity used by the visited cache: entity type plus
    /// primary identity.
    fn entity_key(&self) -> EntityKey;

    /// Resolve against the global config, without a request context.
    fn as_meta(&self) -> Result<Meta, MetaError>
    where
        Self: Sized,
    {
        self.as_meta_with(&cfg(), None)
    }

    /// Resolve with an explicit config and optional request context.
    ///
    /// The request context is installed for the duration of this call
    /// only; the absolutizer prefers it over the configured
    /// protocol/domain.
    fn as_meta_with(
        &self,
        config: &MetaConfig,
        request: Option<RequestContext>,
    ) -> Result<Meta, MetaError>
    where
        Self: Sized,
    {
        let _scope = request.map(request::scoped);

        let spec = default_spec(config).merged(&self.metadata());
        let mut meta = Meta::with_config(config);
        for (field, selector) in spec.iter() {
            if let Some(value) = resolve(field, selector, self) {
                meta.assign(config, field, value)?;
            }
        }
        meta.apply_fallbacks();

        if !self.schema_spec().is_empty() {
            let mut cache = SchemaCache::new();
            meta.schema = Some(build_schema(config, self, &mut cache)?);
        }

        Ok(meta)
    }

    /// Resolve only the schema, with a fresh cache.
    fn as_schema(&self, config: &MetaConfig) -> Result<JsonMap, MetaError>
    where
        Self: Sized,
    {
        let mut cache = SchemaCache::new();
        self.as_schema_with(config, &mut cache)
    }

    /// Resolve the schema against a caller-provided cache.
    ///
    /// Threading one cache through many calls reuses fragments across
    /// resolutions; see [`SchemaCache`] for the staleness trade-off.
    fn as_schema_with(
        &self,
        config: &MetaConfig,
        cache: &mut SchemaCache,
    ) -> Result<JsonMap, MetaError>
    where
        Self: Sized,
    {
        build_schema(config, self, cache)
    }

    /// Resolve the schema and serialize it as a JSON-LD document.
    fn as_json_ld(&self, config: &MetaConfig) -> Result<String, MetaError>
    where
        Self: Sized,
    {
        Ok(as_json_ld(&self.as_schema(config)?))
    }
}

/// The base metadata spec derived from the site config.
///
/// Entities override or extend these fields through
/// [`MetaEntity::metadata`]; fields whose config value is unset stay
/// falsy and are omitted from the output.
pub fn default_spec(config: &MetaConfig) -> MetadataSpec {
    fn opt(value: &Option<String>) -> Selector {
        match value {
            Some(v) => Selector::literal(v.clone()),
            None => Selector::Skip,
        }
    }

    let object_type = config
        .site
        .object_type
        .clone()
        .unwrap_or_else(|| "Article".into());

    let custom_namespace = if config.og.namespaces.is_empty() {
        Selector::Skip
    } else {
        Selector::literal(config.og.namespaces.clone())
    };

    MetadataSpec::new()
        .field("title", Selector::Skip)
        .field("og_title", Selector::Skip)
        .field("twitter_title", Selector::Skip)
        .field("schemaorg_title", Selector::Skip)
        .field("description", Selector::Skip)
        .field("og_description", Selector::Skip)
        .field("twitter_description", Selector::Skip)
        .field("schemaorg_description", Selector::Skip)
        .field("keywords", Selector::Skip)
        .field("image", opt(&config.image.default))
        .field("object_type", Selector::literal(object_type))
        .field("og_type", Selector::literal(config.og.object_type.clone()))
        .field("og_app_id", opt(&config.og.app_id))
        .field("og_profile_id", opt(&config.og.profile_id))
        .field("og_publisher", opt(&config.og.publisher))
        .field("og_author_url", opt(&config.og.author_url))
        .field("fb_pages", opt(&config.og.pages))
        .field("twitter_card", Selector::literal(config.twitter.card.clone()))
        .field("twitter_site", opt(&config.twitter.site))
        .field("twitter_creator", opt(&config.twitter.author))
        .field(
            "schemaorg_type",
            Selector::literal(config.schemaorg.object_type.clone()),
        )
        .field("published_time", Selector::Skip)
        .field("modified_time", Selector::Skip)
        .field("expiration_time", Selector::Skip)
        .field("tag", Selector::Skip)
        .field("url", Selector::Skip)
        .field("locale", Selector::Skip)
        .field("custom_namespace", custom_namespace)
        .field("site_name", opt(&config.site.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::FieldValue;
    use crate::utils::date::DateTimeUtc;

    struct Post {
        slug: String,
        headline: String,
        summary: String,
        tags: Vec<String>,
        published: DateTimeUtc,
        title_selector: Selector,
    }

    impl Post {
        fn new() -> Self {
            Self {
                slug: "hello-world".into(),
                headline: "Hello, world".into(),
                summary: "A first post".into(),
                tags: vec!["rust".into(), "rust".into(), "web".into()],
                published: DateTimeUtc::from_ymd(2024, 6, 15),
                title_selector: Selector::field("headline"),
            }
        }
    }

    impl MetaSource for Post {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "headline" => Some(self.headline.as_str().into()),
                "summary" => Some(self.summary.as_str().into()),
                "tags" => Some(self.tags.clone().into()),
                "published" => Some(self.published.into()),
                "absolute_url" => Some(format!("/posts/{}/", self.slug).into()),
                _ => None,
            }
        }
    }

    impl MetaEntity for Post {
        fn metadata(&self) -> MetadataSpec {
            MetadataSpec::new()
                .field("title", self.title_selector.clone())
                .field("description", Selector::field("summary"))
                .field("keywords", Selector::field("tags"))
                .field("tag", Selector::field("tags"))
                .field("url", Selector::field("absolute_url"))
                .field("published_time", Selector::field("published"))
        }

        fn schema_spec(&self) -> MetadataSpec {
            MetadataSpec::new()
                .field("@type", Selector::literal("Article"))
                .field("headline", Selector::field("headline"))
                .field("datePublished", Selector::field("published"))
        }

        fn entity_key(&self) -> EntityKey {
            EntityKey::new("tests.Post", &self.slug)
        }
    }

    fn config() -> MetaConfig {
        let mut config = MetaConfig::default();
        config.site.protocol = Some("https".into());
        config.site.domain = Some("foo.com".into());
        config.site.name = Some("Example".into());
        config.image.default = Some("/static/default.png".into());
        config
    }

    #[test]
    fn test_as_meta_resolves_declared_fields() {
        let meta = Post::new().as_meta_with(&config(), None).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello, world"));
        assert_eq!(meta.description.as_deref(), Some("A first post"));
        assert_eq!(meta.url.as_deref(), Some("https://foo.com/posts/hello-world/"));
        // keywords are deduplicated, raw article tags are not
        assert_eq!(meta.keywords, vec!["rust", "web"]);
        assert_eq!(meta.tags, vec!["rust", "rust", "web"]);
        assert_eq!(
            meta.published_time.as_deref(),
            Some("2024-06-15T00:00:00Z")
        );
        // config defaults survive the merge
        assert_eq!(meta.site_name.as_deref(), Some("Example"));
        assert_eq!(
            meta.image.as_ref().map(|i| i.url.as_str()),
            Some("https://foo.com/static/default.png")
        );
    }

    #[test]
    fn test_channel_fallbacks_applied() {
        let meta = Post::new().as_meta_with(&config(), None).unwrap();
        assert_eq!(meta.og_title.as_deref(), Some("Hello, world"));
        assert_eq!(meta.og_description.as_deref(), Some("A first post"));
        assert_eq!(meta.twitter_description.as_deref(), Some("A first post"));
    }

    #[test]
    fn test_missing_attribute_falls_back_to_literal() {
        let mut post = Post::new();
        post.title_selector = Selector::field("no_such_attribute");
        let meta = post.as_meta_with(&config(), None).unwrap();
        assert_eq!(meta.title.as_deref(), Some("no_such_attribute"));
    }

    #[test]
    fn test_schema_attached() {
        let meta = Post::new().as_meta_with(&config(), None).unwrap();
        let schema = meta.schema.unwrap();
        assert_eq!(schema.get("@type").unwrap(), "Article");
        assert_eq!(schema.get("headline").unwrap(), "Hello, world");
    }

    #[test]
    fn test_request_context_used_for_urls() {
        let request = RequestContext::new("http", "testserver");
        let meta = Post::new()
            .as_meta_with(&MetaConfig::default(), Some(request))
            .unwrap();
        assert_eq!(
            meta.url.as_deref(),
            Some("http://testserver/posts/hello-world/")
        );
        // scope is cleared once resolution completes
        assert!(request::current().is_none());
    }

    #[test]
    fn test_as_json_ld_document() {
        let json_ld = Post::new().as_json_ld(&config()).unwrap();
        assert!(json_ld.starts_with(r#"{"@context":"https://schema.org""#));
        assert!(json_ld.contains(r#""@type":"Article""#));
    }
}
