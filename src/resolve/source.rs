//! Value sources for metadata resolution.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::meta::{ImageObject, MetaEntity};
use crate::utils::date::DateTimeUtc;

/// An object whose named fields can be probed during resolution.
///
/// This is the typed counterpart of attribute lookup on a model or view:
/// `field` returns `None` for names the object does not know, which makes
/// the resolver fall back to the selector's literal value.
pub trait MetaSource {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A resolved field value, tagged for the assembler's leaf dispatch.
#[derive(Clone)]
pub enum FieldValue {
    /// Plain JSON data, used as-is.
    Value(Value),
    /// Date/time, exported as an ISO 8601 string.
    Date(DateTimeUtc),
    /// Ordered list; elements are transformed recursively.
    List(Vec<FieldValue>),
    /// Key/value map; keys and order are preserved.
    Map(Vec<(String, FieldValue)>),
    /// Image with URL metadata, normalized against the site config.
    Image(ImageObject),
    /// A linked entity whose own schema is resolved and embedded.
    Entity(Arc<dyn MetaEntity>),
}

impl FieldValue {
    /// String content for scalar values; `None` for structured ones.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Value(Value::String(s)) => Some(s.clone()),
            Self::Value(Value::Number(n)) => Some(n.to_string()),
            Self::Value(Value::Bool(b)) => Some(b.to_string()),
            Self::Date(d) => Some(d.to_rfc3339()),
            _ => None,
        }
    }

    pub fn entity(entity: impl MetaEntity + 'static) -> Self {
        Self::Entity(Arc::new(entity))
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Self::List(l) => f.debug_tuple("List").field(l).finish(),
            Self::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Self::Image(i) => f.debug_tuple("Image").field(i).finish(),
            Self::Entity(e) => f.debug_tuple("Entity").field(&e.entity_key()).finish(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Value(Value::String(s.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Value(Value::String(s))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Value(Value::Bool(b))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Value(Value::from(n))
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<DateTimeUtc> for FieldValue {
    fn from(d: DateTimeUtc) -> Self {
        Self::Date(d)
    }
}

impl From<ImageObject> for FieldValue {
    fn from(i: ImageObject) -> Self {
        Self::Image(i)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::Value(Value::Array(items.into_iter().map(Value::String).collect()))
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        Self::List(items)
    }
}
