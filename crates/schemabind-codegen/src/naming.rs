//! Naming convention utilities for code generation.
//!
//! This module converts schema identifiers into the names used by generated code
//! and derives emitted class names and file paths from qualified names.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_pascal_case`] | `PascalCase` |
//! | `game.Tree.Node` | [`class_name`] | `Tree_Node` |
//! | `game.Tree.Node` | [`qualified_class_name`] | `::game::Tree_Node` |
//! | `game.Tree` | [`header_path`] | `game/Tree.h` |

use schemabind_core::{Bundle, GenerateError, GenerateResult, TypeDescription};
use std::collections::HashMap;

/// Convert a snake_case identifier to PascalCase.
///
/// # Examples
///
/// ```
/// use schemabind_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("x"), "X");
/// assert_eq!(to_pascal_case("hello"), "Hello");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Fail if two identifiers of `type_name` convert to the same generated name.
///
/// `names` yields `(original, converted)` pairs; the first collision in input
/// order is reported.
pub fn detect_collisions<'a>(
    type_name: &str,
    names: impl IntoIterator<Item = (&'a str, String)>,
) -> GenerateResult<()> {
    let mut seen: HashMap<String, &'a str> = HashMap::new();

    for (original, converted) in names {
        if let Some(first) = seen.get(&converted) {
            return Err(GenerateError::NameCollision {
                type_name: type_name.to_string(),
                first: first.to_string(),
                second: original.to_string(),
                converted,
            });
        }
        seen.insert(converted, original);
    }

    Ok(())
}

/// Check every generated member name of a type for collisions.
///
/// Covers field accessors, the Update accessors of fields against event lists
/// (`Get<Field>` vs `Get<Event>List`), event adders and command classes.
pub fn check_member_names(ty: &TypeDescription) -> GenerateResult<()> {
    let type_name = &ty.qualified_name;

    detect_collisions(
        type_name,
        ty.fields.iter().map(|f| (f.name.as_str(), to_pascal_case(&f.name))),
    )?;

    if !ty.is_component() {
        return Ok(());
    }

    detect_collisions(
        type_name,
        ty.fields
            .iter()
            .map(|f| (f.name.as_str(), to_pascal_case(&f.name)))
            .chain(
                ty.events()
                    .iter()
                    .map(|e| (e.name.as_str(), format!("{}List", to_pascal_case(&e.name)))),
            ),
    )?;

    detect_collisions(
        type_name,
        ty.events()
            .iter()
            .map(|e| (e.name.as_str(), to_pascal_case(&e.name))),
    )?;

    detect_collisions(
        type_name,
        ty.commands()
            .iter()
            .map(|c| (c.name.as_str(), to_pascal_case(&c.name))),
    )
}

/// Emitted class or enum name: the local names from the top-level type down,
/// joined with `_` so nested definitions can be hoisted to namespace scope.
pub fn class_name(bundle: &Bundle, qualified_name: &str) -> String {
    let mut segments = vec![local_name(qualified_name)];
    let mut current = qualified_name;
    while let Some(outer) = bundle.outer_type(current) {
        segments.push(local_name(outer));
        current = outer;
    }
    segments.reverse();
    segments.join("_")
}

/// Fully qualified emitted name, e.g. `::improbable::Position_Inner`.
pub fn qualified_class_name(bundle: &Bundle, qualified_name: &str) -> String {
    let mut result = String::new();
    for segment in bundle.namespace_of(qualified_name) {
        result.push_str("::");
        result.push_str(&segment);
    }
    result.push_str("::");
    result.push_str(&class_name(bundle, qualified_name));
    result
}

/// Declaration unit path of a top-level type or enum.
pub fn header_path(qualified_name: &str) -> String {
    format!("{}.h", qualified_name.replace('.', "/"))
}

/// Definition unit path of a top-level type.
pub fn source_path(qualified_name: &str) -> String {
    format!("{}.cpp", qualified_name.replace('.', "/"))
}

/// Relative prefix that climbs from a top-level type's unit to the output root.
pub fn relative_root(qualified_name: &str) -> String {
    "../".repeat(qualified_name.matches('.').count())
}

fn local_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(qualified_name)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use schemabind_core::{
        BundleDefinition, CommandDefinition, EventDefinition, FieldDescription, FieldKind,
        PrimitiveType, ValueType,
    };

    fn int_field(name: &str, id: u32) -> FieldDescription {
        FieldDescription::new(
            name,
            id,
            FieldKind::Singular {
                value: ValueType::Primitive(PrimitiveType::Int32),
            },
        )
    }

    #[test]
    fn to_pascal_case___converts_snake_case() {
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("display_name"), "DisplayName");
    }

    #[test]
    fn to_pascal_case___handles_simple_words() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn to_pascal_case___collapses_consecutive_underscores() {
        assert_eq!(to_pascal_case("foo__bar"), "FooBar");
        assert_eq!(to_pascal_case("foo_bar"), "FooBar");
    }

    #[test]
    fn to_pascal_case___keeps_digits() {
        assert_eq!(to_pascal_case("vec3_position"), "Vec3Position");
        assert_eq!(to_pascal_case("field_2"), "Field2");
    }

    #[test]
    fn detect_collisions___distinct_names___ok() {
        let names = vec![("a_b", "AB".to_string()), ("ab", "Ab".to_string())];

        assert!(detect_collisions("t.T", names).is_ok());
    }

    #[test]
    fn detect_collisions___duplicate___reports_first_pair() {
        let names = vec![
            ("foo_bar", "FooBar".to_string()),
            ("foo__bar", "FooBar".to_string()),
        ];

        let err = detect_collisions("t.T", names).unwrap_err();

        assert_eq!(
            err,
            GenerateError::NameCollision {
                type_name: "t.T".into(),
                first: "foo_bar".into(),
                second: "foo__bar".into(),
                converted: "FooBar".into(),
            }
        );
    }

    #[test]
    fn check_member_names___field_collision___is_error() {
        let ty = TypeDescription::record("t.T")
            .with_field(int_field("max_hp", 1))
            .with_field(int_field("max__hp", 2));

        assert!(matches!(
            check_member_names(&ty),
            Err(GenerateError::NameCollision { .. })
        ));
    }

    #[test]
    fn check_member_names___field_shadows_event_list___is_error() {
        let ty = TypeDescription::component("t.T", 1)
            .with_field(int_field("hit_list", 1))
            .with_event(EventDefinition {
                name: "hit".into(),
                index: 1,
                payload: "t.Hit".into(),
            });

        let err = check_member_names(&ty).unwrap_err();

        assert!(matches!(err, GenerateError::NameCollision { converted, .. } if converted == "HitList"));
    }

    #[test]
    fn check_member_names___command_collision___is_error() {
        let command = |name: &str, index| CommandDefinition {
            name: name.into(),
            index,
            request: "t.Req".into(),
            response: "t.Resp".into(),
        };
        let ty = TypeDescription::component("t.T", 1)
            .with_command(command("open_door", 1))
            .with_command(command("open__door", 2));

        assert!(check_member_names(&ty).is_err());
    }

    #[test]
    fn check_member_names___record_ignores_component_members() {
        let ty = TypeDescription::record("t.T").with_field(int_field("hit_list", 1));

        assert!(check_member_names(&ty).is_ok());
    }

    #[test]
    fn class_name___nested___joins_outer_names() {
        let bundle = Bundle::new(BundleDefinition {
            types: vec![
                TypeDescription::record("game.Tree").with_nested_type("game.Tree.Node"),
                TypeDescription::record("game.Tree.Node").with_nested_type("game.Tree.Node.Leaf"),
                TypeDescription::record("game.Tree.Node.Leaf"),
            ],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(class_name(&bundle, "game.Tree"), "Tree");
        assert_eq!(class_name(&bundle, "game.Tree.Node.Leaf"), "Tree_Node_Leaf");
        assert_eq!(
            qualified_class_name(&bundle, "game.Tree.Node.Leaf"),
            "::game::Tree_Node_Leaf"
        );
    }

    #[test]
    fn qualified_class_name___no_namespace___is_global() {
        let bundle = Bundle::new(BundleDefinition {
            types: vec![TypeDescription::record("Root")],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(qualified_class_name(&bundle, "Root"), "::Root");
    }

    #[test]
    fn header_path___maps_namespaces_to_directories() {
        assert_eq!(header_path("improbable.restricted.Worker"), "improbable/restricted/Worker.h");
        assert_eq!(source_path("improbable.Position"), "improbable/Position.cpp");
    }

    #[test]
    fn relative_root___climbs_one_level_per_namespace() {
        assert_eq!(relative_root("Root"), "");
        assert_eq!(relative_root("improbable.Position"), "../");
        assert_eq!(relative_root("improbable.restricted.Worker"), "../../");
    }
}
