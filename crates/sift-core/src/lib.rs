//! Core runtime for sift: name mapping, filter/order schema compilation,
//! runtime validation of decoded query parameters, and compilation of
//! validated filters into the backend-agnostic query AST.
//!
//! Everything here is pure and synchronous. Schema compilation runs once per
//! route registration and its output is immutable; filter/order processing
//! runs once per request on request-scoped data.

pub mod error;
pub mod filter;
pub mod mapping;
pub mod model;
pub mod order;
pub mod params;

#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Domain vocabulary only.
///

pub mod prelude {
    pub use crate::{
        filter::{
            ast::{Cast, CompiledFilter, Node, Value},
            process::process_filter,
            schema::{FilterSchema, create_filter},
        },
        mapping::{reverse_map, unmap_key},
        model::Model,
        order::{Direction, OrderEntry, OrderSchema, OrderSpec, create_order, process_order},
    };
    pub use sift_schema::prelude::*;
}
