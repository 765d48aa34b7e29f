use super::ValidateError;
use crate::{filter::schema::create_filter, test_fixtures::article_model};
use serde_json::{Map, Value as JsonValue, json};

fn obj(value: JsonValue) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn scalar_equality_of_the_right_kind_passes() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(schema.validate(&obj(json!({"title": "abc"}))), Ok(()));
    assert_eq!(schema.validate(&obj(json!({"someNumber": 140}))), Ok(()));
}

#[test]
fn scalar_of_the_wrong_kind_is_rejected() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"someNumber": "abc"}))),
        Err(ValidateError::NoAlternative {
            path: "someNumber".to_string()
        })
    );
}

#[test]
fn unknown_paths_are_rejected() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"nope": 1}))),
        Err(ValidateError::UnknownPath {
            path: "nope".to_string()
        })
    );
}

#[test]
fn null_entries_are_inert() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(schema.validate(&obj(json!({"optionalVal": null}))), Ok(()));
}

#[test]
fn membership_requires_homogeneous_elements() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"someNumber": [140, 142]}))),
        Ok(())
    );
    assert_eq!(
        schema.validate(&obj(json!({"someNumber": [140, "x"]}))),
        Err(ValidateError::NoAlternative {
            path: "someNumber".to_string()
        })
    );
}

#[test]
fn union_paths_accept_any_member_shape() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"object.nestedOneOf": "text"}))),
        Ok(())
    );
    assert_eq!(
        schema.validate(&obj(json!({"object.nestedOneOf": 11}))),
        Ok(())
    );
    assert_eq!(
        schema.validate(&obj(json!({"object.nestedOneOf": {"gt": 11, "lt": 111}}))),
        Ok(())
    );
}

#[test]
fn exists_requires_an_optional_path_and_a_bool() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"optionalVal": {"exists": true}}))),
        Ok(())
    );
    assert_eq!(
        schema.validate(&obj(json!({"someNumber": {"exists": true}}))),
        Err(ValidateError::OperatorNotAllowed {
            path: "someNumber".to_string(),
            op: "exists".to_string()
        })
    );
    assert_eq!(
        schema.validate(&obj(json!({"optionalVal": {"exists": "yes"}}))),
        Err(ValidateError::BadOperand {
            path: "optionalVal".to_string(),
            op: "exists".to_string()
        })
    );
}

#[test]
fn substring_operators_need_a_text_path() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"title": {"like": "ab%"}}))),
        Ok(())
    );
    assert_eq!(
        schema.validate(&obj(json!({"someNumber": {"ilike": "ab%"}}))),
        Err(ValidateError::OperatorNotAllowed {
            path: "someNumber".to_string(),
            op: "ilike".to_string()
        })
    );
}

#[test]
fn ranges_are_refused_for_id_semantic_fields() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(schema.validate(&obj(json!({"id": 7}))), Ok(()));
    assert_eq!(
        schema.validate(&obj(json!({"id": {"gt": 7}}))),
        Err(ValidateError::OperatorNotAllowed {
            path: "id".to_string(),
            op: "gt".to_string()
        })
    );
}

#[test]
fn range_operands_must_match_the_kind() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"someNumber": {"gte": 5}}))),
        Ok(())
    );
    assert_eq!(
        schema.validate(&obj(json!({"someNumber": {"gte": "5"}}))),
        Err(ValidateError::BadOperand {
            path: "someNumber".to_string(),
            op: "gte".to_string()
        })
    );
    // Time ranges accept formatted timestamps as well as epoch numbers.
    assert_eq!(
        schema.validate(&obj(json!({"createdAt": {"lt": "2024-01-01T00:00:00Z"}}))),
        Ok(())
    );
}

#[test]
fn unknown_operators_are_rejected() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"someNumber": {"between": [1, 2]}}))),
        Err(ValidateError::UnknownOperator {
            path: "someNumber".to_string(),
            op: "between".to_string()
        })
    );
}

#[test]
fn enumeration_paths_accept_only_their_literals() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(schema.validate(&obj(json!({"state": "published"}))), Ok(()));
    assert_eq!(
        schema.validate(&obj(json!({"state": "archived"}))),
        Err(ValidateError::NoAlternative {
            path: "state".to_string()
        })
    );
}

#[test]
fn presence_check_on_a_map_field() {
    let schema = create_filter("/articles", &article_model());

    assert_eq!(
        schema.validate(&obj(json!({"meta": {"exists": false}}))),
        Ok(())
    );
    assert_eq!(
        schema.validate(&obj(json!({"meta": 5}))),
        Err(ValidateError::NoAlternative {
            path: "meta".to_string()
        })
    );
}
