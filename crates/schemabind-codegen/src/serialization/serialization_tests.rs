#![allow(non_snake_case)]

use super::*;
use schemabind_core::{Bundle, BundleDefinition, ContainerNames, EnumDefinition, TypeDescription};
use test_case::test_case;

fn bundle() -> Bundle {
    Bundle::new(BundleDefinition {
        types: vec![TypeDescription::record("t.Inner")],
        enums: vec![EnumDefinition {
            qualified_name: "t.Color".into(),
            values: Vec::new(),
        }],
        ..Default::default()
    })
    .unwrap()
}

fn int32() -> ValueType {
    ValueType::Primitive(PrimitiveType::Int32)
}

fn inner() -> ValueType {
    ValueType::Type("t.Inner".into())
}

fn field(name: &str, id: u32, kind: FieldKind) -> FieldDescription {
    FieldDescription::new(name, id, kind)
}

macro_rules! codec {
    ($codec:ident) => {
        let bundle = bundle();
        let containers = ContainerNames::default();
        let $codec = FieldCodec::new(TypeMapper::new(&bundle, &containers));
    };
}

#[test_case(PrimitiveType::Bool, "Schema_GetBoolCount(Obj, 1)" ; "bool")]
#[test_case(PrimitiveType::Sint64, "Schema_GetSint64Count(Obj, 1)" ; "sint64")]
#[test_case(PrimitiveType::String, "Schema_GetBytesCount(Obj, 1)" ; "string travels as bytes")]
#[test_case(PrimitiveType::Bytes, "Schema_GetBytesCount(Obj, 1)" ; "bytes")]
#[test_case(PrimitiveType::EntityId, "Schema_GetEntityIdCount(Obj, 1)" ; "entity id")]
fn FieldCodec___count_expr___uses_accessor_family(primitive: PrimitiveType, expected: &str) {
    codec!(codec);

    assert_eq!(
        codec.count_expr(&ValueType::Primitive(primitive), "Obj", 1),
        expected
    );
}

#[test]
fn FieldCodec___add_statement___enum_casts_to_uint32() {
    codec!(codec);

    assert_eq!(
        codec.add_statement(&ValueType::Enum("t.Color".into()), "Obj", 4, "_Color"),
        "Schema_AddEnum(Obj, 4, static_cast<uint32>(_Color));"
    );
}

#[test]
fn FieldCodec___add_statement___record_recurses_into_nested_object() {
    codec!(codec);

    assert_eq!(
        codec.add_statement(&inner(), "Obj", 2, "_Inner"),
        "_Inner.Serialize(Schema_AddObject(Obj, 2));"
    );
}

#[test]
fn FieldCodec___read___string_uses_helpers() {
    codec!(codec);
    let string = ValueType::Primitive(PrimitiveType::String);

    assert_eq!(
        codec.read(&string, "Obj", 1, None).expr,
        "::improbable::utils::GetStringFromSchema(Obj, 1)"
    );
    assert_eq!(
        codec.read(&string, "Obj", 1, Some("i")).expr,
        "::improbable::utils::IndexStringFromSchema(Obj, 1, i)"
    );
}

#[test]
fn FieldCodec___read___enum_casts_back() {
    codec!(codec);

    let read = codec.read(&ValueType::Enum("t.Color".into()), "Obj", 3, Some("i"));

    assert_eq!(read.expr, "static_cast<::t::Color>(Schema_IndexEnum(Obj, 3, i))");
    assert!(!read.fallible);
}

#[test]
fn FieldCodec___read___record_is_fallible() {
    codec!(codec);

    let read = codec.read(&inner(), "Obj", 3, None);

    assert_eq!(read.expr, "::t::Inner::Deserialize(Schema_GetObject(Obj, 3))");
    assert!(read.fallible);
}

#[test]
fn FieldCodec___serialize_field___singular_always_written() {
    codec!(codec);
    let x = field("x", 1, FieldKind::Singular { value: int32() });

    assert_eq!(
        codec.serialize_field(&x, "Obj", "_X"),
        "// serializing field X = 1\nSchema_AddInt32(Obj, 1, _X);"
    );
}

#[test]
fn FieldCodec___serialize_field___option_written_only_when_set() {
    codec!(codec);
    let name = field(
        "name",
        2,
        FieldKind::Option {
            value: ValueType::Primitive(PrimitiveType::String),
        },
    );

    assert_eq!(
        codec.serialize_field(&name, "Obj", "_Name"),
        "// serializing field Name = 2\n\
         if (_Name.IsSet())\n\
         {\n\
         \t::improbable::utils::AddStringToSchema(Obj, 2, (*_Name));\n\
         }"
    );
}

#[test]
fn FieldCodec___serialize_field___list_appends_each_element() {
    codec!(codec);
    let items = field("items", 3, FieldKind::List { value: inner() });

    assert_eq!(
        codec.serialize_field(&items, "Obj", "_Items"),
        "// serializing field Items = 3\n\
         for (const auto& Element : _Items)\n\
         {\n\
         \tElement.Serialize(Schema_AddObject(Obj, 3));\n\
         }"
    );
}

#[test]
fn FieldCodec___serialize_field___map_writes_pair_objects() {
    codec!(codec);
    let scores = field(
        "scores",
        4,
        FieldKind::Map {
            key: ValueType::Primitive(PrimitiveType::String),
            value: int32(),
        },
    );

    let code = codec.serialize_field(&scores, "Obj", "_Scores");

    assert!(code.contains("for (const auto& Pair : _Scores)"));
    assert!(code.contains("Schema_Object* PairObject = Schema_AddObject(Obj, 4);"));
    assert!(code.contains("::improbable::utils::AddStringToSchema(PairObject, 1, Pair.Key);"));
    assert!(code.contains("Schema_AddInt32(PairObject, 2, Pair.Value);"));
}

#[test]
fn FieldCodec___read_field___singular_requires_exactly_one_value() {
    codec!(codec);
    let x = field("x", 1, FieldKind::Singular { value: int32() });

    assert_eq!(
        codec.read_field(&x, "Obj", "Data._X"),
        "if (Schema_GetInt32Count(Obj, 1) != 1)\n\
         {\n\
         \treturn {};\n\
         }\n\
         Data._X = Schema_GetInt32(Obj, 1);"
    );
}

#[test]
fn FieldCodec___read_field___nested_record_failure_propagates() {
    codec!(codec);
    let nested = field("inner", 3, FieldKind::Singular { value: inner() });

    assert_eq!(
        codec.read_field(&nested, "Obj", "Data._Inner"),
        "if (Schema_GetObjectCount(Obj, 3) != 1)\n\
         {\n\
         \treturn {};\n\
         }\n\
         {\n\
         \tauto NestedValue = ::t::Inner::Deserialize(Schema_GetObject(Obj, 3));\n\
         \tif (!NestedValue.IsSet())\n\
         \t{\n\
         \t\treturn {};\n\
         \t}\n\
         \tData._Inner = *NestedValue;\n\
         }"
    );
}

#[test]
fn FieldCodec___read_field___option_rejects_more_than_one_value() {
    codec!(codec);
    let maybe = field("maybe", 5, FieldKind::Option { value: int32() });

    assert_eq!(
        codec.read_field(&maybe, "Obj", "Data._Maybe"),
        "{\n\
         \tconst uint32 Count = Schema_GetInt32Count(Obj, 5);\n\
         \tif (Count > 1)\n\
         \t{\n\
         \t\treturn {};\n\
         \t}\n\
         \tif (Count == 1)\n\
         \t{\n\
         \t\tData._Maybe = Schema_GetInt32(Obj, 5);\n\
         \t}\n\
         }"
    );
}

#[test]
fn FieldCodec___read_field___list_indexes_in_wire_order() {
    codec!(codec);
    let values = field("values", 6, FieldKind::List { value: int32() });

    assert_eq!(
        codec.read_field(&values, "Obj", "Data._Values"),
        "{\n\
         \tconst uint32 Count = Schema_GetInt32Count(Obj, 6);\n\
         \tfor (uint32 i = 0; i < Count; ++i)\n\
         \t{\n\
         \t\tData._Values.Add(Schema_IndexInt32(Obj, 6, i));\n\
         \t}\n\
         }"
    );
}

#[test]
fn FieldCodec___read_field___map_rebuilds_from_pairs_last_wins() {
    codec!(codec);
    let lookup = field(
        "lookup",
        7,
        FieldKind::Map {
            key: int32(),
            value: inner(),
        },
    );

    let code = codec.read_field(&lookup, "Obj", "Data._Lookup");

    assert!(code.contains("const uint32 Count = Schema_GetObjectCount(Obj, 7);"));
    assert!(code.contains("Schema_Object* PairObject = Schema_IndexObject(Obj, 7, i);"));
    assert!(code.contains(
        "if (Schema_GetInt32Count(PairObject, 1) != 1 || Schema_GetObjectCount(PairObject, 2) != 1)"
    ));
    assert!(code.contains("int32 MapKey{};"));
    assert!(code.contains("::t::Inner MapValue{};"));
    assert!(code.contains("::t::Inner::Deserialize(Schema_GetObject(PairObject, 2))"));
    assert!(code.contains("// Duplicate keys: the last pair wins."));
    assert!(code.contains("Data._Lookup.Add(MapKey, MapValue);"));
}

#[test]
fn FieldCodec___deserialize_field___prefixes_comment() {
    codec!(codec);
    let x = field("max_hp", 9, FieldKind::Singular { value: int32() });

    let code = codec.deserialize_field(&x, "Obj", "Data._MaxHp");

    assert!(code.starts_with("// deserializing field MaxHp = 9\n"));
}

#[test]
fn FieldCodec___clearing_check___by_multiplicity() {
    codec!(codec);

    let singular = field("a", 1, FieldKind::Singular { value: int32() });
    let option = field("b", 2, FieldKind::Option { value: int32() });
    let list = field("c", 3, FieldKind::List { value: int32() });

    assert_eq!(codec.clearing_check(&singular, "(*_A)"), None);
    assert_eq!(
        codec.clearing_check(&option, "(*_B)").as_deref(),
        Some("!(*_B).IsSet()")
    );
    assert_eq!(
        codec.clearing_check(&list, "(*_C)").as_deref(),
        Some("(*_C).Num() == 0")
    );
}

#[test]
fn FieldCodec___field_equals___maps_use_helper() {
    codec!(codec);
    let map = field(
        "m",
        1,
        FieldKind::Map {
            key: int32(),
            value: int32(),
        },
    );
    let list = field("l", 2, FieldKind::List { value: int32() });

    assert_eq!(
        codec.field_equals(&map, "_M", "Other._M"),
        "::improbable::MapEquals(_M, Other._M)"
    );
    assert_eq!(codec.field_equals(&list, "_L", "Other._L"), "_L == Other._L");
    assert_eq!(
        codec.slot_equals(&map, "_M", "Other._M"),
        "(_M.IsSet() == Other._M.IsSet() && (!_M.IsSet() || ::improbable::MapEquals(*_M, *Other._M)))"
    );
}

#[test]
fn FieldCodec___field_count_expr___map_counts_pairs() {
    codec!(codec);
    let map = field(
        "m",
        8,
        FieldKind::Map {
            key: ValueType::Primitive(PrimitiveType::String),
            value: int32(),
        },
    );
    let list = field("l", 9, FieldKind::List { value: int32() });

    assert_eq!(codec.field_count_expr(&map, "Obj"), "Schema_GetObjectCount(Obj, 8)");
    assert_eq!(codec.field_count_expr(&list, "Obj"), "Schema_GetInt32Count(Obj, 9)");
}
