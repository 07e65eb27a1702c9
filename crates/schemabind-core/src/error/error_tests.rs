#![allow(non_snake_case)]

use super::*;

#[test]
fn GenerateError___name_collision___displays_both_members() {
    let err = GenerateError::NameCollision {
        type_name: "improbable.Position".into(),
        first: "foo_bar".into(),
        second: "foo__bar".into(),
        converted: "FooBar".into(),
    };

    let display = err.to_string();

    assert_eq!(
        display,
        "improbable.Position: `foo_bar` and `foo__bar` both convert to `FooBar`"
    );
}

#[test]
fn GenerateError___missing_type___identifies_member() {
    let err = GenerateError::MissingType {
        type_name: "game.Door".into(),
        member: "command open request".into(),
        missing: "game.OpenRequest".into(),
    };

    let display = err.to_string();

    assert!(display.starts_with("game.Door:"));
    assert!(display.contains("command open request"));
    assert!(display.contains("game.OpenRequest"));
}

#[test]
fn GenerateError___unorderable_types___lists_types() {
    let err = GenerateError::UnorderableTypes {
        type_name: "game.Tree".into(),
        types: vec!["game.Tree.A".into(), "game.Tree.B".into()],
    };

    assert!(err.to_string().contains("game.Tree.A, game.Tree.B"));
}

#[test]
fn GenerateError___failed___counts_failures() {
    let err = GenerateError::Failed(vec![
        GenerateError::UnknownType("a.A".into()),
        GenerateError::UnknownType("b.B".into()),
    ]);

    assert_eq!(err.to_string(), "generation failed for 2 type(s)");
}

#[test]
fn GenerateError___type_name___none_for_aggregate() {
    let err = GenerateError::Failed(Vec::new());

    assert!(err.type_name().is_none());
}

#[test]
fn BundleError___from_json_error___converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let err: BundleError = json_err.into();

    assert!(matches!(err, BundleError::Json(_)));
    assert!(err.to_string().starts_with("JSON error"));
}

#[test]
fn BundleError___duplicate_component_id___displays_both_types() {
    let err = BundleError::DuplicateComponentId {
        id: 42,
        first: "a.A".into(),
        second: "b.B".into(),
    };

    assert_eq!(
        err.to_string(),
        "component id 42 is used by both a.A and b.B"
    );
}
