use serde::Serialize;
use sift_schema::node::Literal;
use std::collections::BTreeMap;

///
/// Query AST
///
/// Backend-agnostic, tagged representation of a compiled filter. This layer
/// carries no schema knowledge; type legality was decided by the compiled
/// filter schema and the path type oracle before these nodes are built.
/// The wire form is the `{op, val}` shape the persistence layer consumes.
///

///
/// Cast
///
/// Runtime type a comparison operand implies. Used both to tag `of`
/// comparisons into opaque nested values and as the asserted type of an
/// `oftype` guard.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum Cast {
    Boolean,
    Number,
    String,
}

///
/// Value
///
/// Scalar operand. Converted from client JSON; containers and null are
/// never operands (membership lists carry a `Vec<Value>` instead).
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Float(f64),
    Int(i64),
    Text(String),
}

impl Value {
    /// Convert a scalar JSON value; `None` for null and containers.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            _ => None,
        }
    }

    /// The runtime type this operand implies.
    #[must_use]
    pub const fn cast(&self) -> Cast {
        match self {
            Self::Bool(_) => Cast::Boolean,
            Self::Float(_) | Self::Int(_) => Cast::Number,
            Self::Text(_) => Cast::String,
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Bool(b) => Self::Bool(b),
            Literal::Float(f) => Self::Float(f),
            Literal::Int(i) => Self::Int(i),
            Literal::Text(s) => Self::Text(s),
        }
    }
}

///
/// OfNode
///
/// Addresses a value nested inside an opaque stored column. `path` is the
/// dotted path minus its first (top-level) segment; `cast` tags the expected
/// runtime type of the comparison when one is implied.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OfNode {
    pub path: Vec<String>,
    pub cast: Option<Cast>,
    pub value: Box<Node>,
}

///
/// OfTypeNode
///
/// Runtime type assertion for a nested path whose static type is ambiguous.
/// Scopes the sibling comparison to records whose runtime value at `path`
/// has the asserted type, so an untyped comparison never silently matches
/// the wrong shape.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OfTypeNode {
    pub path: Vec<String>,
    pub value: Cast,
}

///
/// Node
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", content = "val", rename_all = "lowercase")]
#[remain::sorted]
pub enum Node {
    And(Vec<Node>),
    Eq(Value),
    Exists(bool),
    Gt(Value),
    Gte(Value),
    Ilike(String),
    In(Vec<Value>),
    Like(String),
    Lt(Value),
    Lte(Value),
    Of(OfNode),
    OfType(OfTypeNode),
}

impl Node {
    #[must_use]
    pub fn and(nodes: Vec<Self>) -> Self {
        Self::And(nodes)
    }

    #[must_use]
    pub fn of(path: Vec<String>, cast: Option<Cast>, value: Self) -> Self {
        Self::Of(OfNode {
            path,
            cast,
            value: Box::new(value),
        })
    }

    #[must_use]
    pub const fn oftype(path: Vec<String>, cast: Cast) -> Self {
        Self::OfType(OfTypeNode { path, value: cast })
    }
}

///
/// CompiledFilter
///
/// The processor's output: one AST node per constrained internal field,
/// ready to hand to the persistence layer's `load`/`count`.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompiledFilter(BTreeMap<String, Node>);

impl CompiledFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        self.0.insert(key.into(), node);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.0.iter().map(|(key, node)| (key.as_str(), node))
    }
}
