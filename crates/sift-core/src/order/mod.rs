
use crate::{
    mapping::{self, MappingError},
    model::Model,
};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use sift_schema::node::{TypeKind, TypeNode};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// Direction
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// OrderEntry
///
/// One client-submitted sort entry: an external dotted key plus direction.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderEntry {
    pub key: String,
    pub dir: Direction,
}

///
/// OrderSpec
///
/// Persistence-facing sort entry: `key` is the internal name of the first
/// path segment; `path` (if present) addresses into the nested stored value.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    pub key: String,
    pub path: Option<Vec<String>>,
    pub dir: Direction,
}

///
/// OrderValidateError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum OrderValidateError {
    #[error("'{key}' is not a sortable key")]
    UnknownKey { key: String },
}

///
/// OrderError
///
/// Contract violation while processing an already-validated order list;
/// unreachable after [`OrderSchema::validate`] and therefore loud.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum OrderError {
    #[error("order key '{key}' does not map to a schema field: {source}")]
    UnmappedKey {
        key: String,
        #[source]
        source: MappingError,
    },
}

///
/// OrderSchema
///
/// Validation schema for the `order` query parameter: the enumeration of
/// legal sortable dotted paths, in walk order. Compiled once per route
/// registration.
///

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderSchema {
    keys: Vec<String>,
}

impl OrderSchema {
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|legal| legal == key)
    }

    /// Check a decoded `order` query parameter against this schema.
    pub fn validate(&self, entries: &[OrderEntry]) -> Result<(), OrderValidateError> {
        for entry in entries {
            if !self.contains(&entry.key) {
                return Err(OrderValidateError::UnknownKey {
                    key: entry.key.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Compile the order validation schema for one model.
///
/// Any public, non-derived scalar leaf (or nested leaf under objects)
/// contributes its dotted path. Unions are excluded entirely: ordering by a
/// statically-ambiguous value is not offered, unlike filtering. Arrays and
/// maps have no single orderable value and contribute nothing.
#[must_use]
pub fn create_order(model: &Model) -> OrderSchema {
    let mut schema = OrderSchema::default();

    for (name, node) in model.keys() {
        if !node.is_queryable() {
            continue;
        }

        let external = node.flags.mapped.as_deref().unwrap_or(name);
        descend(external, node, &mut schema.keys);
    }

    debug!(model = model.name(), keys = schema.keys.len(), "compiled order schema");

    schema
}

fn descend(path: &str, node: &TypeNode, keys: &mut Vec<String>) {
    if !node.is_queryable() {
        return;
    }

    match &node.kind {
        TypeKind::Primitive(_) | TypeKind::Value(_) => keys.push(path.to_string()),

        TypeKind::Object { keys: sub_keys } => {
            for (key, child) in sub_keys {
                descend(&format!("{path}.{key}"), child, keys);
            }
        }

        TypeKind::OneOf { .. } | TypeKind::Array { .. } | TypeKind::ObjValues { .. } => {}
    }
}

/// Translate a validated order list into persistence-facing specs,
/// unmapping each entry's first path segment.
pub fn process_order(model: &Model, entries: &[OrderEntry]) -> Result<Vec<OrderSpec>, OrderError> {
    entries
        .iter()
        .map(|entry| {
            let (first, rest) = match entry.key.split_once('.') {
                Some((first, rest)) => (first, Some(rest)),
                None => (entry.key.as_str(), None),
            };

            let internal = mapping::unmap_key(first, model.keys()).map_err(|source| {
                OrderError::UnmappedKey {
                    key: first.to_string(),
                    source,
                }
            })?;

            Ok(OrderSpec {
                key: internal.to_string(),
                path: rest.map(|rest| rest.split('.').map(ToString::to_string).collect()),
                dir: entry.dir,
            })
        })
        .collect()
}
