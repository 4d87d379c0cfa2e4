//! Declarative selectors and the field→selector mapping.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::source::{FieldValue, MetaSource};

/// Closure selector: computes a value from the owner and the field name.
pub type SelectorFn = Arc<dyn Fn(&dyn MetaSource, &str) -> Option<FieldValue> + Send + Sync>;

/// How a metadata field obtains its value.
#[derive(Clone, Default)]
pub enum Selector {
    /// Field omitted from the output.
    #[default]
    Skip,
    /// Literal value used as-is. Falsy literals behave as `Skip`.
    Literal(Value),
    /// Probe the owner for a named field; a missing field degrades to
    /// the name itself as a literal string.
    Field(String),
    /// Computed from the owner and the field name.
    Call(SelectorFn),
}

impl Selector {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn call(
        f: impl Fn(&dyn MetaSource, &str) -> Option<FieldValue> + Send + Sync + 'static,
    ) -> Self {
        Self::Call(Arc::new(f))
    }

    /// Falsy selectors produce no output entry.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Skip => true,
            Self::Literal(v) => is_falsy_value(v),
            _ => false,
        }
    }
}

pub(crate) fn is_falsy_value(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "Skip"),
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Call(_) => write!(f, "Call(..)"),
        }
    }
}

/// Ordered mapping from field name to selector.
///
/// Keys are unique; inserting an existing key replaces its selector in
/// place, so a per-entity spec can override defaults without reordering
/// the output.
#[derive(Clone, Default)]
pub struct MetadataSpec {
    fields: Vec<(String, Selector)>,
}

impl MetadataSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn field(mut self, name: impl Into<String>, selector: Selector) -> Self {
        self.insert(name, selector);
        self
    }

    /// Insert a selector, replacing any existing one for the same key.
    pub fn insert(&mut self, name: impl Into<String>, selector: Selector) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = selector,
            None => self.fields.push((name, selector)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Selector> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Overlay `other` on top of `self`: existing keys are replaced,
    /// new keys appended.
    pub fn merged(&self, other: &MetadataSpec) -> MetadataSpec {
        let mut merged = self.clone();
        for (name, selector) in &other.fields {
            merged.insert(name.clone(), selector.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.fields.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for MetadataSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(n, s)| (n, s)))
            .finish()
    }
}
