use quarry::{Error, compile_path, compile_str, prelude::*};

fn model_err(source: &str) -> ModelError {
    match compile_str(source, "bad") {
        Err(Error::Model(err)) => err,
        other => panic!("expected a model error, got {other:?}"),
    }
}

fn schema_err(source: &str) -> SchemaError {
    match compile_str(source, "bad") {
        Err(Error::Schema(err)) => err,
        other => panic!("expected a schema error, got {other:?}"),
    }
}

#[test]
fn derived_from_non_entity() {
    let err = model_err(
        r#"type Post @entity { tags: [Tag!] @derivedFrom(field: "post") }
           type Tag @variant { label: String }"#,
    );

    assert!(matches!(err, ModelError::InvalidDerivedFrom { ref field, .. } if field == "tags"));
}

#[test]
fn two_derived_fields_for_one_foreign_key() {
    let err = model_err(
        r#"type Post @entity { author: Author }
           type Author @entity {
             posts: [Post!] @derivedFrom(field: "author")
             writings: [Post!] @derivedFrom(field: "author")
           }"#,
    );

    assert!(matches!(err, ModelError::InvalidDerivedFrom { ref ty, ref field, .. }
        if ty == "Author" && field == "writings"));
    assert!(err.to_string().contains("Author.posts"));
}

#[test]
fn entity_and_variant() {
    let err = model_err("type Post @entity @variant { title: String }");

    assert!(matches!(err, ModelError::InvalidVariant { .. }));
}

#[test]
fn union_with_undeclared_member() {
    let err = model_err(
        "union Shape = Circle | Hexagon
         type Circle @variant { r: Int }",
    );

    assert!(matches!(err, ModelError::UndefinedType { ref name, .. } if name == "Hexagon"));
}

#[test]
fn nested_lists_are_unsupported() {
    let err = model_err("type Grid @entity { cells: [[Int!]!] }");

    assert!(matches!(err, ModelError::UnsupportedType { ref field, .. } if field == "cells"));
}

#[test]
fn unknown_directive_reports_position() {
    let err = schema_err("type Post @entity {\n  title: String @indexed\n}");

    assert!(matches!(err, SchemaError::UnknownDirective { .. }));
    let position = err.position().unwrap();
    assert_eq!(position.line(), 2);
    assert!(err.to_string().starts_with("bad:2:"));
}

#[test]
fn directive_in_wrong_place() {
    let err = schema_err("type Post @entity { title: String @entity }");

    assert!(matches!(err, SchemaError::DirectiveLocation { .. }));
}

#[test]
fn duplicate_type_across_definitions() {
    let err = schema_err("type Post @entity { a: Int }\ntype Post @entity { b: Int }");

    assert!(matches!(err, SchemaError::DuplicateType { ref name, .. } if name == "Post"));
}

#[test]
fn missing_path() {
    let err = compile_path("does/not/exist.graphql").unwrap_err();

    assert!(matches!(err, Error::Schema(SchemaError::NotFound { .. })));
}

#[test]
fn lookups_name_the_missing_item() {
    let model = compile_str("type Post @entity { title: String }", "ok").unwrap();

    assert_eq!(
        model.lookup_entity("Comment").unwrap_err().to_string(),
        "entity 'Comment' not found"
    );
    assert!(matches!(
        model.lookup_field("Post", "body"),
        Err(ModelError::FieldNotFound { .. })
    ));
}
