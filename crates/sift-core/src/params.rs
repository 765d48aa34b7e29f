use crate::order::OrderEntry;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error as ThisError;

///
/// ParamError
///
/// Decode failure of a JSON-encoded query-string parameter. The request
/// layer maps these to a 400 response before any validation runs.
///

#[derive(Debug, ThisError)]
pub enum ParamError {
    #[error("invalid '{param}' query parameter: {source}")]
    Invalid {
        param: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{param}' query parameter must be a JSON object")]
    NotAnObject { param: &'static str },
}

/// Decode the `filter` query parameter: a JSON object whose keys are dotted
/// external paths.
pub fn parse_filter_param(raw: &str) -> Result<Map<String, JsonValue>, ParamError> {
    let value: JsonValue = serde_json::from_str(raw).map_err(|source| ParamError::Invalid {
        param: "filter",
        source,
    })?;

    match value {
        JsonValue::Object(map) => Ok(map),
        _ => Err(ParamError::NotAnObject { param: "filter" }),
    }
}

/// Decode the `order` query parameter: a JSON array of `{key, dir}` pairs.
pub fn parse_order_param(raw: &str) -> Result<Vec<OrderEntry>, ParamError> {
    serde_json::from_str(raw).map_err(|source| ParamError::Invalid {
        param: "order",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{ParamError, parse_filter_param, parse_order_param};
    use crate::order::Direction;
    use serde_json::json;

    #[test]
    fn filter_param_decodes_to_an_object() {
        let map = parse_filter_param(r#"{"someNumber": [140, 142]}"#).expect("valid json");
        assert_eq!(map.get("someNumber"), Some(&json!([140, 142])));
    }

    #[test]
    fn filter_param_rejects_non_objects() {
        assert!(matches!(
            parse_filter_param("[1, 2]"),
            Err(ParamError::NotAnObject { param: "filter" })
        ));
    }

    #[test]
    fn filter_param_rejects_malformed_json() {
        assert!(matches!(
            parse_filter_param("{not json"),
            Err(ParamError::Invalid {
                param: "filter",
                ..
            })
        ));
    }

    #[test]
    fn order_param_decodes_entries() {
        let entries =
            parse_order_param(r#"[{"key": "createdAt", "dir": "DESC"}]"#).expect("valid json");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "createdAt");
        assert_eq!(entries[0].dir, Direction::Desc);
    }

    #[test]
    fn order_param_rejects_unknown_direction() {
        assert!(parse_order_param(r#"[{"key": "x", "dir": "SIDEWAYS"}]"#).is_err());
    }
}
