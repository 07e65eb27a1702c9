#![allow(non_snake_case)]

use super::*;

fn int32() -> ValueType {
    ValueType::Primitive(PrimitiveType::Int32)
}

fn nested_bundle() -> Bundle {
    let outer = TypeDescription::component("game.Tree", 7)
        .with_field(FieldDescription::new(
            "root",
            1,
            FieldKind::Singular {
                value: ValueType::Type("game.Tree.Node".into()),
            },
        ))
        .with_nested_type("game.Tree.Node")
        .with_nested_enum("game.Tree.Kind");
    let node = TypeDescription::record("game.Tree.Node")
        .with_field(FieldDescription::new("weight", 1, FieldKind::Singular { value: int32() }))
        .with_nested_type("game.Tree.Node.Leaf");
    let leaf = TypeDescription::record("game.Tree.Node.Leaf");

    Bundle::new(BundleDefinition {
        types: vec![outer, node, leaf],
        enums: vec![
            EnumDefinition {
                qualified_name: "game.Tree.Kind".into(),
                values: vec![EnumValue {
                    name: "OAK".into(),
                    value: 0,
                }],
            },
            EnumDefinition {
                qualified_name: "game.Season".into(),
                values: vec![],
            },
        ],
        source_references: HashMap::new(),
    })
    .unwrap()
}

#[test]
fn Bundle___new___indexes_types_and_enums() {
    let bundle = nested_bundle();

    assert!(bundle.type_description("game.Tree").is_some());
    assert!(bundle.type_description("game.Tree.Node.Leaf").is_some());
    assert!(bundle.enum_definition("game.Tree.Kind").is_some());
    assert!(bundle.type_description("game.Missing").is_none());
}

#[test]
fn Bundle___top_level_type_of___walks_outer_chain() {
    let bundle = nested_bundle();

    assert_eq!(bundle.top_level_type_of("game.Tree.Node.Leaf"), "game.Tree");
    assert_eq!(bundle.top_level_type_of("game.Tree.Kind"), "game.Tree");
    assert_eq!(bundle.top_level_type_of("game.Tree"), "game.Tree");
}

#[test]
fn Bundle___namespace_of___excludes_enclosing_types() {
    let bundle = nested_bundle();

    assert_eq!(bundle.namespace_of("game.Tree.Node.Leaf"), vec!["game"]);
    assert_eq!(bundle.namespace_of("game.Season"), vec!["game"]);
}

#[test]
fn Bundle___top_level_iterators___skip_nested_definitions() {
    let bundle = nested_bundle();

    let types: Vec<&str> = bundle.top_level_types().map(|t| t.qualified_name.as_str()).collect();
    let enums: Vec<&str> = bundle.top_level_enums().map(|e| e.qualified_name.as_str()).collect();

    assert_eq!(types, vec!["game.Tree"]);
    assert_eq!(enums, vec!["game.Season"]);
}

#[test]
fn Bundle___new___rejects_duplicate_names() {
    let result = Bundle::new(BundleDefinition {
        types: vec![TypeDescription::record("a.A"), TypeDescription::record("a.A")],
        ..Default::default()
    });

    assert!(matches!(result, Err(BundleError::DuplicateName(name)) if name == "a.A"));
}

#[test]
fn Bundle___new___rejects_enum_named_like_type() {
    let result = Bundle::new(BundleDefinition {
        types: vec![TypeDescription::record("a.A")],
        enums: vec![EnumDefinition {
            qualified_name: "a.A".into(),
            values: vec![],
        }],
        ..Default::default()
    });

    assert!(matches!(result, Err(BundleError::DuplicateName(_))));
}

#[test]
fn Bundle___new___rejects_unknown_nested_type() {
    let result = Bundle::new(BundleDefinition {
        types: vec![TypeDescription::record("a.A").with_nested_type("a.A.Gone")],
        ..Default::default()
    });

    assert!(matches!(result, Err(BundleError::UnknownNested { .. })));
}

#[test]
fn Bundle___new___rejects_type_nested_twice() {
    let result = Bundle::new(BundleDefinition {
        types: vec![
            TypeDescription::record("a.A").with_nested_type("a.Shared"),
            TypeDescription::record("a.B").with_nested_type("a.Shared"),
            TypeDescription::record("a.Shared"),
        ],
        ..Default::default()
    });

    assert!(matches!(result, Err(BundleError::NestedTwice { .. })));
}

#[test]
fn Bundle___new___rejects_duplicate_component_ids() {
    let result = Bundle::new(BundleDefinition {
        types: vec![
            TypeDescription::component("a.A", 5),
            TypeDescription::component("a.B", 5),
        ],
        ..Default::default()
    });

    assert!(matches!(
        result,
        Err(BundleError::DuplicateComponentId { id: 5, .. })
    ));
}

#[test]
fn Bundle___from_json___parses_fields_and_component() {
    let json = r#"{
        "types": [
            {
                "qualifiedName": "improbable.Position",
                "fields": [
                    { "name": "x", "fieldId": 1, "multiplicity": "singular",
                      "value": { "kind": "primitive", "name": "int32" } },
                    { "name": "tags", "fieldId": 2, "multiplicity": "map",
                      "key": { "kind": "primitive", "name": "string" },
                      "value": { "kind": "enum", "name": "improbable.Tag" } }
                ],
                "component": {
                    "id": 42,
                    "events": [ { "name": "moved", "index": 1, "payload": "improbable.Moved" } ]
                }
            },
            { "qualifiedName": "improbable.Moved" }
        ],
        "enums": [ { "qualifiedName": "improbable.Tag", "values": [ { "name": "A", "value": 0 } ] } ],
        "sourceReferences": {
            "improbable.Position": { "filePath": "improbable/position.schema", "line": 3, "column": 1 }
        }
    }"#;

    let bundle = Bundle::from_json(json).unwrap();
    let position = bundle.type_description("improbable.Position").unwrap();

    assert_eq!(position.component_id(), Some(42));
    assert_eq!(position.events().len(), 1);
    assert_eq!(position.fields[0].kind, FieldKind::Singular { value: int32() });
    assert_eq!(position.fields[1].multiplicity(), Multiplicity::Map);
    assert_eq!(
        bundle.source_reference("improbable.Position").map(|s| s.line),
        Some(3)
    );
}

#[test]
fn TypeDescription___record___has_no_component_metadata() {
    let ty = TypeDescription::record("a.Plain").with_event(EventDefinition {
        name: "ignored".into(),
        index: 1,
        payload: "a.Plain".into(),
    });

    assert!(!ty.is_component());
    assert!(ty.component_id().is_none());
    assert!(ty.events().is_empty());
    assert!(ty.commands().is_empty());
}

#[test]
fn FieldKind___value_types___lists_key_before_value() {
    let kind = FieldKind::Map {
        key: ValueType::Primitive(PrimitiveType::String),
        value: int32(),
    };

    let types = kind.value_types();

    assert_eq!(types.len(), 2);
    assert_eq!(types[0], &ValueType::Primitive(PrimitiveType::String));
}

#[test]
fn PrimitiveType___schema_suffix___strings_travel_as_bytes() {
    assert_eq!(PrimitiveType::String.schema_suffix(), "Bytes");
    assert_eq!(PrimitiveType::Sfixed64.schema_suffix(), "Sfixed64");
    assert!(!PrimitiveType::String.is_trivial());
    assert!(PrimitiveType::EntityId.is_trivial());
}
