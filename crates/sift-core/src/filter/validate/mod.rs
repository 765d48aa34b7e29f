#[cfg(test)]
mod tests;

use crate::filter::schema::{FilterSchema, FilterShape};
use serde_json::{Map, Value as JsonValue};
use sift_schema::node::{Literal, Primitive};
use thiserror::Error as ThisError;

///
/// ValidateError
///
/// Precise rejection of a decoded filter object against a compiled
/// [`FilterSchema`]. The request layer maps these to 400-class responses
/// before the filter processor ever runs.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("'{path}' is not a filterable path")]
    UnknownPath { path: String },

    #[error("filter value for '{path}' matches no legal shape")]
    NoAlternative { path: String },

    #[error("unknown filter operator '{op}' for '{path}'")]
    UnknownOperator { path: String, op: String },

    #[error("operator '{op}' is not allowed for '{path}'")]
    OperatorNotAllowed { path: String, op: String },

    #[error("operator '{op}' for '{path}' has a mistyped operand")]
    BadOperand { path: String, op: String },
}

impl FilterSchema {
    /// Check a decoded `filter` query parameter against this schema.
    ///
    /// Null entries are legal no-ops (dropped later by the processor).
    pub fn validate(&self, filter: &Map<String, JsonValue>) -> Result<(), ValidateError> {
        for (path, value) in filter {
            if value.is_null() {
                continue;
            }

            let shapes = self
                .get(path)
                .ok_or_else(|| ValidateError::UnknownPath { path: path.clone() })?;

            match value {
                JsonValue::Array(items) => validate_membership(path, shapes, items)?,
                JsonValue::Object(operators) => validate_operators(path, shapes, operators)?,
                scalar => validate_scalar(path, shapes, scalar)?,
            }
        }

        Ok(())
    }
}

fn validate_scalar(
    path: &str,
    shapes: &[FilterShape],
    value: &JsonValue,
) -> Result<(), ValidateError> {
    let legal = shapes.iter().any(|shape| match shape {
        FilterShape::Eq(primitive) => matches_primitive(*primitive, value),
        FilterShape::Value(literal) => matches_literal(literal, value),
        _ => false,
    });

    if legal {
        Ok(())
    } else {
        Err(ValidateError::NoAlternative {
            path: path.to_string(),
        })
    }
}

fn validate_membership(
    path: &str,
    shapes: &[FilterShape],
    items: &[JsonValue],
) -> Result<(), ValidateError> {
    let legal = shapes.iter().any(|shape| match shape {
        FilterShape::In(primitive) => items
            .iter()
            .all(|item| matches_primitive(*primitive, item)),
        _ => false,
    });

    if legal {
        Ok(())
    } else {
        Err(ValidateError::NoAlternative {
            path: path.to_string(),
        })
    }
}

fn validate_operators(
    path: &str,
    shapes: &[FilterShape],
    operators: &Map<String, JsonValue>,
) -> Result<(), ValidateError> {
    for (op, operand) in operators {
        match op.as_str() {
            "exists" => {
                require_shape(path, op, shapes, |shape| {
                    matches!(shape, FilterShape::Exists)
                })?;
                require_operand(path, op, operand.is_boolean())?;
            }

            "like" => {
                require_shape(path, op, shapes, |shape| matches!(shape, FilterShape::Like))?;
                require_operand(path, op, operand.is_string())?;
            }

            "ilike" => {
                require_shape(path, op, shapes, |shape| {
                    matches!(shape, FilterShape::Ilike)
                })?;
                require_operand(path, op, operand.is_string())?;
            }

            "gt" | "gte" | "lt" | "lte" => {
                let mut operand_ok = false;
                let mut shape_ok = false;

                for shape in shapes {
                    if let FilterShape::Range(primitive) = shape {
                        shape_ok = true;
                        if matches_primitive(*primitive, operand) {
                            operand_ok = true;
                        }
                    }
                }

                if !shape_ok {
                    return Err(ValidateError::OperatorNotAllowed {
                        path: path.to_string(),
                        op: op.clone(),
                    });
                }
                require_operand(path, op, operand_ok)?;
            }

            _ => {
                return Err(ValidateError::UnknownOperator {
                    path: path.to_string(),
                    op: op.clone(),
                });
            }
        }
    }

    Ok(())
}

fn require_shape(
    path: &str,
    op: &str,
    shapes: &[FilterShape],
    predicate: impl Fn(&FilterShape) -> bool,
) -> Result<(), ValidateError> {
    if shapes.iter().any(predicate) {
        Ok(())
    } else {
        Err(ValidateError::OperatorNotAllowed {
            path: path.to_string(),
            op: op.to_string(),
        })
    }
}

fn require_operand(path: &str, op: &str, ok: bool) -> Result<(), ValidateError> {
    if ok {
        Ok(())
    } else {
        Err(ValidateError::BadOperand {
            path: path.to_string(),
            op: op.to_string(),
        })
    }
}

/// Operand acceptance per primitive kind. Time operands may be an epoch
/// number or a formatted timestamp string; identifiers may be a string or
/// an integer.
fn matches_primitive(primitive: Primitive, value: &JsonValue) -> bool {
    match primitive {
        Primitive::Text => value.is_string(),
        Primitive::Id => value.is_string() || value.is_i64() || value.is_u64(),
        Primitive::Int => value.is_i64() || value.is_u64(),
        Primitive::Float => value.is_number(),
        Primitive::Time => value.is_number() || value.is_string(),
        Primitive::Bool => value.is_boolean(),
    }
}

fn matches_literal(literal: &Literal, value: &JsonValue) -> bool {
    match literal {
        Literal::Text(expected) => value.as_str() == Some(expected),
        Literal::Int(expected) => value.as_i64() == Some(*expected),
        Literal::Float(expected) => value.as_f64() == Some(*expected),
        Literal::Bool(expected) => value.as_bool() == Some(*expected),
    }
}
