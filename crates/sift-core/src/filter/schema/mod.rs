
use crate::model::Model;
use serde::Serialize;
use sift_schema::node::{Literal, Primitive, TypeKind, TypeNode};
use tracing::debug;

///
/// FilterShape
///
/// One legal client-submitted shape for a filterable path. The alternatives
/// list compiled for a path is the discriminated union of these.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum FilterShape {
    /// Scalar equality against the given primitive kind.
    Eq(Primitive),
    /// `{exists: bool}` presence check; offered for every optional node.
    Exists,
    /// `{ilike: string}` case-insensitive substring match.
    Ilike,
    /// Membership: an array of scalars of the given primitive kind.
    In(Primitive),
    /// `{like: string}` substring match.
    Like,
    /// `{gt|gte|lt|lte: operand}` range operators over the given kind.
    Range(Primitive),
    /// Equality against a fixed enumeration literal.
    Value(Literal),
}

///
/// FilterSchema
///
/// Validation schema for the `filter` query parameter: one entry per
/// filterable dotted path, in walk order, each entry an order-stable
/// alternatives list. Compiled once per route registration and shared
/// read-only across requests.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSchema {
    entries: Vec<(String, Vec<FilterShape>)>,
}

impl FilterSchema {
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[FilterShape]> {
        self.entries
            .iter()
            .find(|(entry_path, _)| entry_path == path)
            .map(|(_, shapes)| shapes.as_slice())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a shape to a path's alternatives, deduplicating identical
    /// shapes (union alternatives may compile to the same legal form).
    fn push(&mut self, path: &str, shape: FilterShape) {
        if let Some((_, shapes)) = self
            .entries
            .iter_mut()
            .find(|(entry_path, _)| entry_path == path)
        {
            if !shapes.contains(&shape) {
                shapes.push(shape);
            }
            return;
        }

        self.entries.push((path.to_string(), vec![shape]));
    }
}

/// Compile the filter validation schema for one model.
///
/// `prefix` is the route prefix; fields addressed by its `:param` segments
/// are already bound by the route and excluded from filtering.
#[must_use]
pub fn create_filter(prefix: &str, model: &Model) -> FilterSchema {
    let params = path_params(prefix);
    let mut schema = FilterSchema::default();

    for (name, node) in model.keys() {
        if !node.is_queryable() {
            continue;
        }

        let external = node.flags.mapped.as_deref().unwrap_or(name);
        if params.contains(&external) {
            continue;
        }

        descend(external, node, &mut schema);
    }

    debug!(
        model = model.name(),
        paths = schema.len(),
        "compiled filter schema"
    );

    schema
}

fn path_params(prefix: &str) -> Vec<&str> {
    prefix
        .split('/')
        .filter_map(|segment| segment.strip_prefix(':'))
        .collect()
}

/// Recursive walk accumulating alternatives bottom-up.
///
/// Union alternatives land at the *same* path: the client cannot know which
/// member is stored, so every member's shapes must be accepted there.
fn descend(path: &str, node: &TypeNode, schema: &mut FilterSchema) {
    if !node.is_queryable() {
        return;
    }

    match &node.kind {
        TypeKind::Primitive(primitive) => {
            schema.push(path, FilterShape::Eq(*primitive));
            schema.push(path, FilterShape::In(*primitive));

            if primitive.supports_like() {
                schema.push(path, FilterShape::Like);
                schema.push(path, FilterShape::Ilike);
            }
            if primitive.supports_range() && !node.is_id_like() {
                schema.push(path, FilterShape::Range(*primitive));
            }
        }

        TypeKind::Value(literal) => {
            schema.push(path, FilterShape::Value(literal.clone()));
        }

        // Objects are never filtered by identity; only their sub-paths are.
        // Nested segments address structure inside the stored value and are
        // never independently name-mapped.
        TypeKind::Object { keys } => {
            for (key, child) in keys {
                descend(&format!("{path}.{key}"), child, schema);
            }
        }

        TypeKind::OneOf { alternatives } => {
            for alternative in alternatives {
                descend(path, alternative, schema);
            }
        }

        // Arrays are not filterable as a whole; traversal continues only
        // into structured element types.
        TypeKind::Array { items } => {
            if matches!(items.kind, TypeKind::Object { .. } | TypeKind::OneOf { .. }) {
                descend(path, items, schema);
            }
        }

        // Map keys are not statically enumerable, so no paths compile here.
        TypeKind::ObjValues { .. } => {}
    }

    if node.flags.optional {
        schema.push(path, FilterShape::Exists);
    }
}
