//! Schema layer for sift: the recursive type-descriptor model consumed by the
//! filter/order compilers, plus the path type oracle used at request time.

pub mod node;
pub mod path;

///
/// Prelude
///
/// Domain vocabulary only; no errors or helpers beyond the oracle.
///

pub mod prelude {
    pub use crate::{
        node::{Literal, NodeFlags, Primitive, Semantic, TypeKind, TypeNode},
        path::type_is_known_for_path,
    };
}
