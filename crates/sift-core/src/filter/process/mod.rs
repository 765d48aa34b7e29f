
use crate::{
    filter::ast::{Cast, CompiledFilter, Node, Value},
    mapping::{self, MappingError},
    model::Model,
};
use serde_json::{Map, Value as JsonValue};
use sift_schema::path::{PathError, type_is_known_for_path};
use thiserror::Error as ThisError;
use tracing::trace;

///
/// FilterError
///
/// Contract violations discovered while compiling an already-validated
/// filter. These should be unreachable once the request layer validates
/// against the compiled [`FilterSchema`](crate::filter::schema::FilterSchema);
/// they stay loud so a bug in the validation schema surfaces in testing
/// instead of producing a silently wrong query.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    #[error("filter key '{key}' does not map to a schema field: {source}")]
    UnmappedKey {
        key: String,
        #[source]
        source: MappingError,
    },

    #[error("unknown filter operator '{op}' for key '{key}'")]
    UnknownOperator { key: String, op: String },

    #[error("operator '{op}' for key '{key}' has an unsupported operand")]
    UnsupportedOperand { key: String, op: String },

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Compile a validated filter object into the query AST, keyed by internal
/// field name.
///
/// Null-valued entries mean "no constraint" and are dropped. Comparisons
/// targeting a nested path are wrapped in an `of` node; when the path's
/// static type is ambiguous and the comparison implies a runtime type, an
/// `oftype` guard is conjoined ahead of it.
pub fn process_filter(
    model: &Model,
    filter: &Map<String, JsonValue>,
) -> Result<CompiledFilter, FilterError> {
    let mut compiled = CompiledFilter::new();

    for (key, raw) in filter {
        if raw.is_null() {
            continue;
        }

        let (first, rest) = split_key(key);

        let internal =
            mapping::unmap_key(first, model.keys()).map_err(|source| FilterError::UnmappedKey {
                key: first.to_string(),
                source,
            })?;

        let mut oracle_path = Vec::with_capacity(rest.len() + 1);
        oracle_path.push(internal);
        oracle_path.extend(rest.iter().copied());
        let type_known = type_is_known_for_path(&oracle_path, model.root())?;

        let Some((node, casts)) = compile_value(key, raw)? else {
            continue;
        };

        let node = if rest.is_empty() {
            node
        } else {
            nest(&rest, type_known, node, &casts)
        };

        trace!(model = model.name(), key = key.as_str(), internal, "compiled filter key");

        merge(&mut compiled, internal, node);
    }

    Ok(compiled)
}

fn split_key(key: &str) -> (&str, Vec<&str>) {
    match key.split_once('.') {
        Some((first, rest)) => (first, rest.split('.').collect()),
        None => (key, Vec::new()),
    }
}

/// Wrap a compiled node for a nested target path.
///
/// The stored value is opaque at this depth; if the static type is unknown
/// (a `oneOf` or literal on the path) and the comparison implies a runtime
/// type, the persistence layer must not trust an untyped comparison, so an
/// `oftype` assertion per implied type is conjoined before the value node.
fn nest(rest: &[&str], type_known: bool, node: Node, casts: &[Cast]) -> Node {
    let path: Vec<String> = rest.iter().map(ToString::to_string).collect();
    let of = Node::of(path.clone(), casts.first().copied(), node);

    if type_known || casts.is_empty() {
        return of;
    }

    let mut members: Vec<Node> = casts
        .iter()
        .map(|cast| Node::oftype(path.clone(), *cast))
        .collect();
    members.push(of);

    Node::and(members)
}

/// Two dotted keys may share a top-level field ("obj.a" and "obj.b");
/// their nodes are conjoined under the internal key.
fn merge(compiled: &mut CompiledFilter, internal: &str, node: Node) {
    match compiled.get(internal).cloned() {
        None => compiled.insert(internal, node),
        Some(Node::And(mut members)) => {
            members.push(node);
            compiled.insert(internal, Node::And(members));
        }
        Some(previous) => compiled.insert(internal, Node::and(vec![previous, node])),
    }
}

/// Compile the client-side filter value for one key.
///
/// Returns the node plus the list of distinct runtime types the comparison
/// implies (used for `oftype` guards). `None` for an empty operator object,
/// which constrains nothing.
fn compile_value(key: &str, raw: &JsonValue) -> Result<Option<(Node, Vec<Cast>)>, FilterError> {
    match raw {
        // Membership is untyped: the list is matched element-wise by the
        // persistence layer without a cast.
        JsonValue::Array(items) => {
            let values = items
                .iter()
                .map(|item| {
                    Value::from_json(item).ok_or_else(|| FilterError::UnsupportedOperand {
                        key: key.to_string(),
                        op: "in".to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some((Node::In(values), Vec::new())))
        }

        JsonValue::Object(operators) => {
            let mut nodes = Vec::new();
            let mut casts: Vec<Cast> = Vec::new();

            for (op, operand) in operators {
                let (node, cast) = compile_operator(key, op, operand)?;
                nodes.push(node);

                if let Some(cast) = cast {
                    if !casts.contains(&cast) {
                        casts.push(cast);
                    }
                }
            }

            match nodes.len() {
                0 => Ok(None),
                1 => {
                    let node = nodes.remove(0);
                    Ok(Some((node, casts)))
                }
                _ => Ok(Some((Node::and(nodes), casts))),
            }
        }

        // Scalar literal: implicit equality. The implied runtime type comes
        // from the literal itself.
        scalar => {
            let value =
                Value::from_json(scalar).ok_or_else(|| FilterError::UnsupportedOperand {
                    key: key.to_string(),
                    op: "eq".to_string(),
                })?;
            let cast = value.cast();

            Ok(Some((Node::Eq(value), vec![cast])))
        }
    }
}

fn compile_operator(
    key: &str,
    op: &str,
    operand: &JsonValue,
) -> Result<(Node, Option<Cast>), FilterError> {
    let unsupported = || FilterError::UnsupportedOperand {
        key: key.to_string(),
        op: op.to_string(),
    };

    match op {
        "exists" => {
            let present = operand.as_bool().ok_or_else(unsupported)?;
            Ok((Node::Exists(present), None))
        }

        "like" | "ilike" => {
            let pattern = operand.as_str().ok_or_else(unsupported)?.to_string();
            let node = if op == "like" {
                Node::Like(pattern)
            } else {
                Node::Ilike(pattern)
            };
            Ok((node, Some(Cast::String)))
        }

        "gt" | "gte" | "lt" | "lte" => {
            let value = Value::from_json(operand).ok_or_else(unsupported)?;
            let node = match op {
                "gt" => Node::Gt(value),
                "gte" => Node::Gte(value),
                "lt" => Node::Lt(value),
                _ => Node::Lte(value),
            };
            Ok((node, Some(Cast::Number)))
        }

        _ => Err(FilterError::UnknownOperator {
            key: key.to_string(),
            op: op.to_string(),
        }),
    }
}
