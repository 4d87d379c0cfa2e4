//! Declarative metadata resolution.
//!
//! A [`MetadataSpec`] maps field names to [`Selector`]s; [`resolve`] turns
//! one field into a concrete value by probing the owning [`MetaSource`].
//! Lookup failures never propagate: a selector naming a field the owner
//! does not have degrades to the selector's own name as a literal value,
//! matching the forgiving semantics expected from per-model metadata
//! declarations.

mod selector;
mod source;

pub use selector::{MetadataSpec, Selector, SelectorFn};
pub use source::{FieldValue, MetaSource};

use serde_json::Value;

/// Resolve one field against its selector and owning object.
///
/// Returns `None` when the field should be omitted from the output.
pub fn resolve(field: &str, selector: &Selector, owner: &dyn MetaSource) -> Option<FieldValue> {
    if selector.is_falsy() {
        return None;
    }
    match selector {
        Selector::Skip => None,
        Selector::Literal(value) => Some(FieldValue::Value(value.clone())),
        Selector::Field(name) => Some(owner.field(name).unwrap_or_else(|| {
            tracing::debug!(field, source = %name, "field not found, selector used as literal");
            FieldValue::Value(Value::String(name.clone()))
        })),
        Selector::Call(f) => f(owner, field),
    }
}
