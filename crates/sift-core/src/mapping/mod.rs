
use serde_json::{Map, Value as JsonValue};
use sift_schema::node::TypeNode;
use thiserror::Error as ThisError;

///
/// MappingError
///
/// Rejection of an external key during external-name → internal-key
/// translation. Callers surface this as a client-visible 400-class error
/// naming the offending key; nothing is ever dropped or renamed silently.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MappingError {
    #[error("unknown key '{key}'")]
    UnknownKey { key: String },

    #[error("key '{key}' must not be supplied by clients")]
    ForbiddenKey { key: String },
}

/// Resolve one external key to its internal counterpart.
///
/// An external alias (`mapped` flag) always wins. A bare internal name only
/// passes through when that field has no alias: aliases are exclusive, so a
/// client addressing an aliased field by its internal name gets
/// [`MappingError::UnknownKey`].
fn resolve<'a>(
    key: &str,
    keys: &'a [(String, TypeNode)],
    ignore_keys: &[&str],
) -> Result<&'a str, MappingError> {
    if let Some((internal, _)) = keys
        .iter()
        .find(|(_, node)| node.flags.mapped.as_deref() == Some(key))
    {
        if ignore_keys.contains(&internal.as_str()) {
            return Err(MappingError::ForbiddenKey {
                key: key.to_string(),
            });
        }

        return Ok(internal);
    }

    match keys.iter().find(|(internal, _)| internal == key) {
        Some((internal, node)) if node.flags.mapped.is_none() => {
            if ignore_keys.contains(&internal.as_str()) {
                return Err(MappingError::ForbiddenKey {
                    key: key.to_string(),
                });
            }

            Ok(internal)
        }
        _ => Err(MappingError::UnknownKey {
            key: key.to_string(),
        }),
    }
}

/// Translate an external-keyed object into an internal-keyed one.
///
/// `ignore_keys` lists internal keys that are server-injected; a client
/// supplying one (under either spelling) is rejected with
/// [`MappingError::ForbiddenKey`].
pub fn reverse_map(
    input: &Map<String, JsonValue>,
    keys: &[(String, TypeNode)],
    ignore_keys: &[&str],
) -> Result<Map<String, JsonValue>, MappingError> {
    let mut out = Map::new();

    for (external, value) in input {
        let internal = resolve(external, keys, ignore_keys)?;
        out.insert(internal.to_string(), value.clone());
    }

    Ok(out)
}

/// Single-key form of [`reverse_map`], used for order keys and the first
/// segment of dotted filter paths (which are always scalar keys, never
/// container objects).
pub fn unmap_key<'a>(key: &str, keys: &'a [(String, TypeNode)]) -> Result<&'a str, MappingError> {
    resolve(key, keys, &[])
}
