
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Primitive
///
/// Scalar field kinds. `Id` is the opaque-identifier kind: equality and
/// membership only, never substring or range operators.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Float,
    Id,
    Int,
    Text,
    Time,
}

impl Primitive {
    /// Text kinds accept `like`/`ilike` substring operators.
    #[must_use]
    pub const fn supports_like(self) -> bool {
        matches!(self, Self::Text)
    }

    /// Kinds with a meaningful total order accept `gt`/`gte`/`lt`/`lte`.
    /// Identifier kinds never do, regardless of representation.
    #[must_use]
    pub const fn supports_range(self) -> bool {
        matches!(self, Self::Float | Self::Int | Self::Time)
    }
}

///
/// Semantic
///
/// Classification tag attached to a primitive node. An `Id` tag marks a
/// surrogate-key field: equality-only, range operators suppressed.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Semantic {
    Id,
}

///
/// Literal
///
/// Scalar constant carried by `value` enumeration leaves and field defaults.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Float(f64),
    Int(i64),
    Text(String),
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

///
/// NodeFlags
///
/// Per-node metadata. `public` defaults to true: a field is externally
/// visible unless declared otherwise. `mapped` is the exclusive external
/// alias; when set, the internal key is not addressable by clients.
///

#[derive(Clone, Debug, PartialEq)]
pub struct NodeFlags {
    pub public: bool,
    pub optional: bool,
    pub derived: bool,
    pub read_only: bool,
    pub auto: bool,
    pub mapped: Option<String>,
    pub semantic: Option<Semantic>,
    pub default_value: Option<Literal>,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            public: true,
            optional: false,
            derived: false,
            read_only: false,
            auto: false,
            mapped: None,
            semantic: None,
            default_value: None,
        }
    }
}

///
/// TypeKind
///
/// Closed sum of node shapes. Object keys are an ordered slice so schema
/// walks (and therefore compiled alternative lists and order-key
/// enumerations) are order-stable.
///

#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    Primitive(Primitive),
    Object { keys: Vec<(String, TypeNode)> },
    Array { items: Box<TypeNode> },
    OneOf { alternatives: Vec<TypeNode> },
    Value(Literal),
    ObjValues { values: Box<TypeNode> },
}

///
/// TypeNode
///
/// One field's recursive type descriptor: a shape plus flags. Nodes are
/// built once per model and immutable for the process lifetime.
///

#[derive(Clone, Debug, PartialEq)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub flags: NodeFlags,
}

impl TypeNode {
    #[must_use]
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            flags: NodeFlags::default(),
        }
    }

    ///
    /// CONSTRUCTORS
    ///

    #[must_use]
    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(TypeKind::Primitive(primitive))
    }

    #[must_use]
    pub fn text() -> Self {
        Self::primitive(Primitive::Text)
    }

    #[must_use]
    pub fn int() -> Self {
        Self::primitive(Primitive::Int)
    }

    #[must_use]
    pub fn float() -> Self {
        Self::primitive(Primitive::Float)
    }

    #[must_use]
    pub fn time() -> Self {
        Self::primitive(Primitive::Time)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::primitive(Primitive::Bool)
    }

    #[must_use]
    pub fn id() -> Self {
        Self::primitive(Primitive::Id)
    }

    #[must_use]
    pub fn object(keys: impl IntoIterator<Item = (impl Into<String>, Self)>) -> Self {
        Self::new(TypeKind::Object {
            keys: keys
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        })
    }

    #[must_use]
    pub fn array(items: Self) -> Self {
        Self::new(TypeKind::Array {
            items: Box::new(items),
        })
    }

    #[must_use]
    pub fn one_of(alternatives: impl IntoIterator<Item = Self>) -> Self {
        Self::new(TypeKind::OneOf {
            alternatives: alternatives.into_iter().collect(),
        })
    }

    #[must_use]
    pub fn value(literal: impl Into<Literal>) -> Self {
        Self::new(TypeKind::Value(literal.into()))
    }

    #[must_use]
    pub fn obj_values(values: Self) -> Self {
        Self::new(TypeKind::ObjValues {
            values: Box::new(values),
        })
    }

    ///
    /// FLAG BUILDERS
    ///

    #[must_use]
    pub fn private(mut self) -> Self {
        self.flags.public = false;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.flags.optional = true;
        self
    }

    #[must_use]
    pub fn derived(mut self) -> Self {
        self.flags.derived = true;
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.flags.read_only = true;
        self
    }

    #[must_use]
    pub fn auto(mut self) -> Self {
        self.flags.auto = true;
        self
    }

    #[must_use]
    pub fn mapped(mut self, alias: impl Into<String>) -> Self {
        self.flags.mapped = Some(alias.into());
        self
    }

    #[must_use]
    pub fn semantic(mut self, semantic: Semantic) -> Self {
        self.flags.semantic = Some(semantic);
        self
    }

    #[must_use]
    pub fn default_value(mut self, literal: impl Into<Literal>) -> Self {
        self.flags.default_value = Some(literal.into());
        self
    }

    ///
    /// ACCESSORS
    ///

    /// Whether schema compilation exposes this node at all.
    /// Derived and non-public fields never reach filter/order/body schemas.
    #[must_use]
    pub const fn is_queryable(&self) -> bool {
        self.flags.public && !self.flags.derived
    }

    /// Whether the primitive under this node carries identifier semantics,
    /// either via its kind or via an explicit semantic tag.
    #[must_use]
    pub const fn is_id_like(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(Primitive::Id))
            || matches!(self.flags.semantic, Some(Semantic::Id))
    }

    /// Ordered sub-fields of an object node.
    #[must_use]
    pub fn object_keys(&self) -> Option<&[(String, Self)]> {
        match &self.kind {
            TypeKind::Object { keys } => Some(keys),
            _ => None,
        }
    }

    /// Look up an object sub-field by internal name.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&Self> {
        self.object_keys()?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }
}
