//! Shared model fixture for compiler and processor tests.

use crate::model::Model;
use sift_schema::node::{Semantic, TypeNode};

/// Kitchen-sink article model:
/// - `id`: server-assigned int with identifier semantics
/// - `name`: text, externally addressed as `title`
/// - `number`: int, externally addressed as `someNumber`
/// - `optionalVal`: optional text
/// - `object`: nested object with a plain int (`a`) and a text/int union
///   (`nestedOneOf`)
/// - `tags`: bare array of text (not filterable)
/// - `choice`: optional top-level union
/// - `meta`: optional homogeneous map
/// - `state`: enumeration of literal values
/// - `createdAt`: time
/// - `secret` / `computed`: never exposed
pub(crate) fn article_model() -> Model {
    Model::new(
        "article",
        TypeNode::object([
            ("id", TypeNode::int().semantic(Semantic::Id).auto().read_only()),
            ("name", TypeNode::text().mapped("title")),
            ("number", TypeNode::int().mapped("someNumber")),
            ("optionalVal", TypeNode::text().optional()),
            (
                "object",
                TypeNode::object([
                    ("a", TypeNode::int()),
                    (
                        "nestedOneOf",
                        TypeNode::one_of([TypeNode::text(), TypeNode::int()]),
                    ),
                ]),
            ),
            ("tags", TypeNode::array(TypeNode::text())),
            (
                "choice",
                TypeNode::one_of([TypeNode::text(), TypeNode::boolean()]).optional(),
            ),
            ("meta", TypeNode::obj_values(TypeNode::int()).optional()),
            (
                "state",
                TypeNode::one_of([TypeNode::value("published"), TypeNode::value("draft")]),
            ),
            ("createdAt", TypeNode::time()),
            ("secret", TypeNode::text().private()),
            ("computed", TypeNode::text().derived()),
        ]),
    )
    .expect("article fixture has an object root")
}
