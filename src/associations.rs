//! input type associations
//!
//! which input types each object type consumes through field arguments.

use crate::schema::SchemaType;
use std::collections::BTreeMap;

/// object type name to the input type its arguments consume
///
/// at most one input type is kept per object type: when several fields take
/// different input types, the last one in schema order wins. the namespace
/// renderer emits a single input interface per namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAssociations {
    inner: BTreeMap<String, String>,
}

impl TypeAssociations {
    /// scan every object type's field arguments once
    pub fn build<'a>(types: impl IntoIterator<Item = &'a SchemaType>) -> Self {
        let mut inner = BTreeMap::new();
        for ty in types.into_iter().filter(|ty| ty.is_object()) {
            for field in &ty.fields {
                for arg in field.arguments.iter().filter(|arg| arg.shape.is_input()) {
                    inner.insert(ty.name.clone(), arg.shape.name.clone());
                }
            }
        }
        Self { inner }
    }

    /// associated input type, if any
    pub fn get(&self, object_type: &str) -> Option<&str> {
        self.inner.get(object_type).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// input type name to its definition
#[derive(Debug, Clone, Default)]
pub struct InputTypeCatalog<'a> {
    inner: BTreeMap<&'a str, &'a SchemaType>,
}

impl<'a> InputTypeCatalog<'a> {
    pub fn build(types: impl IntoIterator<Item = &'a SchemaType>) -> Self {
        let inner = types
            .into_iter()
            .filter(|ty| ty.is_input())
            .map(|ty| (ty.name.as_str(), ty))
            .collect();
        Self { inner }
    }

    pub fn get(&self, name: &str) -> Option<&'a SchemaType> {
        self.inner.get(name).copied()
    }
}
