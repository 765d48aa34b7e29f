
use crate::node::{TypeKind, TypeNode};
use thiserror::Error as ThisError;

///
/// PathError
///
/// Schema inconsistency discovered while resolving a dotted path against a
/// type tree. This is a programming error in the route/model definition,
/// not a client error, and is propagated as fatal.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("path segment '{segment}' does not exist in the type tree (path '{path}')")]
    UnknownSegment { segment: String, path: String },

    #[error("path segment '{segment}' descends into a non-traversable node (path '{path}')")]
    NotTraversable { segment: String, path: String },
}

/// Decide whether the terminal type of `path` within `node` is statically
/// unambiguous.
///
/// Rules:
/// - a `oneOf` anywhere on the path makes the terminal type unknown;
/// - a `value` literal leaf is treated as unknown (it exists for equality
///   against a fixed constant, not for typed comparison);
/// - `array` and `objValues` are transparent: the remaining path selects
///   within each element/value;
/// - an exhausted path at any other node is known;
/// - a segment that does not resolve inside an `object`, or that descends
///   into a primitive, is a [`PathError`].
pub fn type_is_known_for_path(path: &[&str], node: &TypeNode) -> Result<bool, PathError> {
    resolve(path, node, path)
}

fn resolve(remaining: &[&str], node: &TypeNode, full: &[&str]) -> Result<bool, PathError> {
    match &node.kind {
        TypeKind::Value(_) | TypeKind::OneOf { .. } => Ok(false),

        // The path selects within each element of the collection.
        TypeKind::Array { items } => resolve(remaining, items, full),
        TypeKind::ObjValues { values } => resolve(remaining, values, full),

        TypeKind::Primitive(_) => match remaining.split_first() {
            None => Ok(true),
            Some((segment, _)) => Err(PathError::NotTraversable {
                segment: (*segment).to_string(),
                path: full.join("."),
            }),
        },

        TypeKind::Object { .. } => match remaining.split_first() {
            None => Ok(true),
            Some((segment, tail)) => {
                let child = node.key(segment).ok_or_else(|| PathError::UnknownSegment {
                    segment: (*segment).to_string(),
                    path: full.join("."),
                })?;

                resolve(tail, child, full)
            }
        },
    }
}
