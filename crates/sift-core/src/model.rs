use sift_schema::node::{TypeKind, TypeNode};
use thiserror::Error as ThisError;

///
/// ModelError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ModelError {
    #[error("model '{name}' must have an object root type")]
    RootNotObject { name: String },
}

///
/// Model
///
/// One record schema: a name plus its root type tree. The root is always an
/// object; its keys are the internal top-level field names every compiler
/// and the processor operate on. Defined once per model, immutable for the
/// process lifetime, safe to share across concurrent requests.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    name: String,
    root: TypeNode,
}

impl Model {
    pub fn new(name: impl Into<String>, root: TypeNode) -> Result<Self, ModelError> {
        let name = name.into();

        if !matches!(root.kind, TypeKind::Object { .. }) {
            return Err(ModelError::RootNotObject { name });
        }

        Ok(Self { name, root })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn root(&self) -> &TypeNode {
        &self.root
    }

    /// Ordered top-level fields, internal names.
    #[must_use]
    pub fn keys(&self) -> &[(String, TypeNode)] {
        self.root.object_keys().map_or(&[], |keys| keys)
    }

    /// Look up a top-level field by internal name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TypeNode> {
        self.root.key(name)
    }
}
