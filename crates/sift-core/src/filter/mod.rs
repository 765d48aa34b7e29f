//! Filter surface: schema compilation (route-registration time), runtime
//! validation of decoded filter objects, and compilation of validated
//! filters into the query AST (request time).

pub mod ast;
pub mod process;
pub mod schema;
pub mod validate;
