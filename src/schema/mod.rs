//! Structured-data (JSON-LD) schema assembly.
//!
//! Resolves an entity's declarative schema spec into a JSON tree,
//! depth-first. Linked entities embed their own resolved schema; a
//! visited cache keyed by entity identity guarantees at-most-one
//! computation per entity per top-level call and breaks reference
//! cycles with an in-progress sentinel. A cyclic back-reference
//! resolves to `null` rather than a re-entrant computation: the
//! fragment for the entity currently on the stack is not available
//! yet, and deeper recursion would never terminate.

mod cache;

pub use cache::{CacheState, EntityKey, SchemaCache};

use serde_json::Value;
use std::sync::Arc;

use crate::config::MetaConfig;
use crate::core::MetaError;
use crate::meta::MetaEntity;
use crate::resolve::{FieldValue, MetaSource, resolve};

/// A JSON object map preserving insertion order.
pub type JsonMap = serde_json::Map<String, Value>;

/// The fixed `@context` added by [`as_json_ld`].
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

/// Resolve `entity`'s schema into a JSON object.
///
/// The entity itself is marked in-progress before descending, so a
/// graph that cycles back to the root also terminates. Resolving the
/// same entity against a warm cache returns the identical fragment.
pub fn build_schema(
    config: &MetaConfig,
    entity: &dyn MetaEntity,
    cache: &mut SchemaCache,
) -> Result<JsonMap, MetaError> {
    let key = entity.entity_key();
    match cache.begin(&key) {
        CacheState::Done(Value::Object(map)) => {
            tracing::debug!(entity = %key, "schema cache hit");
            return Ok(map);
        }
        CacheState::Done(_) | CacheState::InProgress => {
            // A non-object fragment cannot occur for a root call; an
            // in-progress root means the caller re-entered mid-assembly.
            return Ok(JsonMap::new());
        }
        CacheState::Fresh => {}
    }

    let map = assemble(config, entity, cache)?;
    cache.finish(key, Value::Object(map.clone()));
    Ok(map)
}

/// Walk the entity's schema spec, transforming each resolved value.
fn assemble(
    config: &MetaConfig,
    entity: &dyn MetaEntity,
    cache: &mut SchemaCache,
) -> Result<JsonMap, MetaError> {
    let spec = entity.schema_spec();
    let source: &dyn MetaSource = entity;
    let mut out = JsonMap::new();

    for (field, selector) in spec.iter() {
        if let Some(value) = resolve(field, selector, source) {
            out.insert(field.to_string(), transform(config, value, cache)?);
        }
    }

    if !out.contains_key("@type") {
        out.insert(
            "@type".to_string(),
            Value::String(config.schemaorg.object_type.clone()),
        );
    }

    Ok(out)
}

/// Depth-first leaf transform.
fn transform(
    config: &MetaConfig,
    value: FieldValue,
    cache: &mut SchemaCache,
) -> Result<Value, MetaError> {
    match value {
        FieldValue::Value(v) => Ok(v),
        FieldValue::Date(d) => Ok(Value::String(d.to_rfc3339())),
        FieldValue::List(items) => items
            .into_iter()
            .map(|item| transform(config, item, cache))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        FieldValue::Map(entries) => {
            let mut map = JsonMap::new();
            for (key, item) in entries {
                map.insert(key, transform(config, item, cache)?);
            }
            Ok(Value::Object(map))
        }
        FieldValue::Image(image) => Ok(image.normalized(config)?.to_schema_value()),
        FieldValue::Entity(linked) => embed(config, linked, cache),
    }
}

/// Substitute a linked entity with its resolved schema fragment.
fn embed(
    config: &MetaConfig,
    entity: Arc<dyn MetaEntity>,
    cache: &mut SchemaCache,
) -> Result<Value, MetaError> {
    let key = entity.entity_key();
    match cache.begin(&key) {
        CacheState::Done(value) => {
            tracing::debug!(entity = %key, "schema cache hit");
            Ok(value)
        }
        CacheState::InProgress => {
            tracing::debug!(entity = %key, "cycle detected, substituting null");
            Ok(Value::Null)
        }
        CacheState::Fresh => {
            let fragment = assemble(config, entity.as_ref(), cache)?;
            let value = Value::Object(fragment);
            cache.finish(key, value.clone());
            Ok(value)
        }
    }
}

/// Serialize a resolved schema as a JSON-LD document with the fixed
/// `@context` first. Key order otherwise follows the schema spec.
pub fn as_json_ld(schema: &JsonMap) -> String {
    let mut document = JsonMap::new();
    document.insert(
        "@context".to_string(),
        Value::String(SCHEMA_ORG_CONTEXT.to_string()),
    );
    for (key, value) in schema {
        if key != "@context" {
            document.insert(key.clone(), value.clone());
        }
    }
    serde_json::to_string(&Value::Object(document))
        .expect("JSON value serialization cannot fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{MetaSource, MetadataSpec, Selector};
    use crate::utils::date::DateTimeUtc;
    use serde_json::json;
    use std::sync::Arc;

    /// Two entities embedding each other through `related`.
    #[derive(Clone)]
    struct Page {
        id: u64,
        headline: String,
        related: Option<Arc<Page>>,
        published: Option<DateTimeUtc>,
    }

    impl MetaSource for Page {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "headline" => Some(self.headline.as_str().into()),
                "related" => self
                    .related
                    .clone()
                    .map(|p| FieldValue::Entity(p as Arc<dyn MetaEntity>)),
                "published" => self.published.map(FieldValue::Date),
                _ => None,
            }
        }
    }

    impl MetaEntity for Page {
        fn metadata(&self) -> MetadataSpec {
            MetadataSpec::new().field("title", Selector::field("headline"))
        }

        fn schema_spec(&self) -> MetadataSpec {
            MetadataSpec::new()
                .field("@type", Selector::literal("WebPage"))
                .field("headline", Selector::field("headline"))
                .field("datePublished", Selector::field("published"))
                .field("relatedLink", Selector::field("related"))
        }

        fn entity_key(&self) -> EntityKey {
            EntityKey::new("tests.Page", self.id)
        }
    }

    fn page(id: u64, headline: &str) -> Page {
        Page {
            id,
            headline: headline.into(),
            related: None,
            published: None,
        }
    }

    #[test]
    fn test_simple_schema() {
        let mut entity = page(1, "Hello");
        entity.published = DateTimeUtc::parse("2024-06-15");

        let mut cache = SchemaCache::new();
        let schema = build_schema(&MetaConfig::default(), &entity, &mut cache).unwrap();

        assert_eq!(schema.get("@type"), Some(&json!("WebPage")));
        assert_eq!(schema.get("headline"), Some(&json!("Hello")));
        assert_eq!(
            schema.get("datePublished"),
            Some(&json!("2024-06-15T00:00:00Z"))
        );
        // unresolved fields are absent, not null
        assert!(!schema.contains_key("relatedLink"));
    }

    #[test]
    fn test_default_type_injected() {
        struct Untyped;

        impl MetaSource for Untyped {
            fn field(&self, _name: &str) -> Option<FieldValue> {
                None
            }
        }

        impl MetaEntity for Untyped {
            fn metadata(&self) -> MetadataSpec {
                MetadataSpec::new()
            }

            fn schema_spec(&self) -> MetadataSpec {
                MetadataSpec::new().field("name", Selector::literal("untyped"))
            }

            fn entity_key(&self) -> EntityKey {
                EntityKey::new("tests.Untyped", 1)
            }
        }

        let mut config = MetaConfig::default();
        config.schemaorg.object_type = "WebSite".into();

        let mut cache = SchemaCache::new();
        let schema = build_schema(&config, &Untyped, &mut cache).unwrap();
        assert_eq!(schema.get("@type"), Some(&json!("WebSite")));
    }

    #[test]
    fn test_linked_entity_embedded() {
        let mut entity = page(1, "A");
        entity.related = Some(Arc::new(page(2, "B")));

        let mut cache = SchemaCache::new();
        let schema = build_schema(&MetaConfig::default(), &entity, &mut cache).unwrap();

        let related = schema.get("relatedLink").unwrap();
        assert_eq!(related.get("headline"), Some(&json!("B")));
        assert_eq!(related.get("@type"), Some(&json!("WebPage")));
    }

    #[test]
    fn test_mutual_recursion_terminates() {
        // A references B, B references A. Arc cycles can't be built
        // directly, so B holds a structural copy of A that shares its
        // entity key, which is identical from the cache's point of view.
        let a_copy = Arc::new(page(1, "A"));
        let mut b = page(2, "B");
        b.related = Some(a_copy);
        let mut a = page(1, "A");
        a.related = Some(Arc::new(b));

        let mut cache = SchemaCache::new();
        let schema = build_schema(&MetaConfig::default(), &a, &mut cache).unwrap();

        // the back-reference to A inside B's fragment is null
        let b_fragment = schema.get("relatedLink").unwrap();
        assert_eq!(b_fragment.get("headline"), Some(&json!("B")));
        assert_eq!(b_fragment.get("relatedLink"), Some(&Value::Null));
    }

    #[test]
    fn test_shared_entity_computed_once() {
        let shared = Arc::new(page(3, "Shared"));
        let mut a = page(1, "A");
        a.related = Some(Arc::clone(&shared));
        let mut b = page(2, "B");
        b.related = Some(shared);

        let mut cache = SchemaCache::new();
        let schema_a = build_schema(&MetaConfig::default(), &a, &mut cache).unwrap();
        let schema_b = build_schema(&MetaConfig::default(), &b, &mut cache).unwrap();

        // Shared's fragment is identical in both, computed once
        assert_eq!(schema_a.get("relatedLink"), schema_b.get("relatedLink"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_cache_transparency() {
        let mut entity = page(1, "A");
        entity.related = Some(Arc::new(page(2, "B")));

        let mut cache = SchemaCache::new();
        let cold = build_schema(&MetaConfig::default(), &entity, &mut cache).unwrap();
        let warm = build_schema(&MetaConfig::default(), &entity, &mut cache).unwrap();
        assert_eq!(cold, warm);

        // a fresh cache also yields the same value
        let mut fresh = SchemaCache::new();
        let refreshed = build_schema(&MetaConfig::default(), &entity, &mut fresh).unwrap();
        assert_eq!(cold, refreshed);
    }

    #[test]
    fn test_as_json_ld_prepends_context() {
        let mut entity = page(1, "Hello");
        entity.published = DateTimeUtc::parse("2024-06-15T14:30:45Z");

        let mut cache = SchemaCache::new();
        let schema = build_schema(&MetaConfig::default(), &entity, &mut cache).unwrap();
        let json_ld = as_json_ld(&schema);

        assert!(json_ld.starts_with(r#"{"@context":"https://schema.org""#));
        assert!(json_ld.contains(r#""headline":"Hello""#));
        assert!(json_ld.contains(r#""datePublished":"2024-06-15T14:30:45Z""#));
    }

    #[test]
    fn test_map_and_list_transform() {
        struct Mixed;

        impl MetaSource for Mixed {
            fn field(&self, name: &str) -> Option<FieldValue> {
                match name {
                    "authors" => Some(FieldValue::List(vec![
                        FieldValue::Map(vec![
                            ("@type".into(), "Person".into()),
                            ("name".into(), "Ada".into()),
                        ]),
                        FieldValue::Map(vec![
                            ("@type".into(), "Person".into()),
                            ("name".into(), "Grace".into()),
                        ]),
                    ])),
                    _ => None,
                }
            }
        }

        impl MetaEntity for Mixed {
            fn metadata(&self) -> MetadataSpec {
                MetadataSpec::new()
            }

            fn schema_spec(&self) -> MetadataSpec {
                MetadataSpec::new()
                    .field("@type", Selector::literal("Article"))
                    .field("author", Selector::field("authors"))
            }

            fn entity_key(&self) -> EntityKey {
                EntityKey::new("tests.Mixed", 1)
            }
        }

        let mut cache = SchemaCache::new();
        let schema = build_schema(&MetaConfig::default(), &Mixed, &mut cache).unwrap();
        assert_eq!(
            schema.get("author"),
            Some(&json!([
                {"@type": "Person", "name": "Ada"},
                {"@type": "Person", "name": "Grace"}
            ]))
        );
    }
}
