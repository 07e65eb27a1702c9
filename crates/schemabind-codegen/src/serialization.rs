//! Per-field serialization code generation.
//!
//! Emits the paired write and read statements of a field against the schema
//! object API. Every fragment is returned without a trailing newline and without
//! leading indentation; callers nest fragments with [`crate::text::indent`].
//!
//! Generated readers live inside functions returning `TSchemaOption<...>`. A
//! malformed payload makes them `return {};`, and a nested record that fails to
//! deserialize propagates the failure outward the same way.

use crate::cpp_types::TypeMapper;
use crate::naming::to_pascal_case;
use crate::text::block;
use schemabind_core::{
    FieldDescription, FieldId, FieldKind, MAP_KEY_FIELD_ID, MAP_VALUE_FIELD_ID, PrimitiveType,
    ValueType,
};

/// An expression reading one value, and whether it yields an option to unwrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Read {
    pub expr: String,
    pub fallible: bool,
}

/// Code generator for field reads and writes.
#[derive(Debug, Clone, Copy)]
pub struct FieldCodec<'a> {
    mapper: TypeMapper<'a>,
}

impl<'a> FieldCodec<'a> {
    pub fn new(mapper: TypeMapper<'a>) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> TypeMapper<'a> {
        self.mapper
    }

    /// Number of values stored under `id`.
    pub fn count_expr(&self, value: &ValueType, object: &str, id: FieldId) -> String {
        match value {
            ValueType::Primitive(p) => format!("Schema_Get{}Count({object}, {id})", p.schema_suffix()),
            ValueType::Enum(_) => format!("Schema_GetEnumCount({object}, {id})"),
            ValueType::Type(_) => format!("Schema_GetObjectCount({object}, {id})"),
        }
    }

    /// Number of wire values of `field`; map entries are counted as pair objects.
    pub fn field_count_expr(&self, field: &FieldDescription, object: &str) -> String {
        match &field.kind {
            FieldKind::Map { .. } => {
                format!("Schema_GetObjectCount({object}, {})", field.field_id)
            }
            kind => self.count_expr(kind.value_type(), object, field.field_id),
        }
    }

    /// Append one value to `id`.
    pub fn add_statement(&self, value: &ValueType, object: &str, id: FieldId, expr: &str) -> String {
        match value {
            ValueType::Primitive(PrimitiveType::String) => {
                format!("::improbable::utils::AddStringToSchema({object}, {id}, {expr});")
            }
            ValueType::Primitive(PrimitiveType::Bytes) => {
                format!("::improbable::utils::AddBytesToSchema({object}, {id}, {expr});")
            }
            ValueType::Primitive(p) => {
                format!("Schema_Add{}({object}, {id}, {expr});", p.schema_suffix())
            }
            ValueType::Enum(_) => {
                format!("Schema_AddEnum({object}, {id}, static_cast<uint32>({expr}));")
            }
            ValueType::Type(_) => format!("{expr}.Serialize(Schema_AddObject({object}, {id}));"),
        }
    }

    /// Read the only value stored under `id`, or the `index`-th when given.
    pub fn read(&self, value: &ValueType, object: &str, id: FieldId, index: Option<&str>) -> Read {
        let expr = match (value, index) {
            (ValueType::Primitive(PrimitiveType::String), None) => {
                format!("::improbable::utils::GetStringFromSchema({object}, {id})")
            }
            (ValueType::Primitive(PrimitiveType::String), Some(i)) => {
                format!("::improbable::utils::IndexStringFromSchema({object}, {id}, {i})")
            }
            (ValueType::Primitive(PrimitiveType::Bytes), None) => {
                format!("::improbable::utils::GetBytesFromSchema({object}, {id})")
            }
            (ValueType::Primitive(PrimitiveType::Bytes), Some(i)) => {
                format!("::improbable::utils::IndexBytesFromSchema({object}, {id}, {i})")
            }
            (ValueType::Primitive(p), None) => {
                format!("Schema_Get{}({object}, {id})", p.schema_suffix())
            }
            (ValueType::Primitive(p), Some(i)) => {
                format!("Schema_Index{}({object}, {id}, {i})", p.schema_suffix())
            }
            (ValueType::Enum(_), None) => format!(
                "static_cast<{}>(Schema_GetEnum({object}, {id}))",
                self.mapper.value_type(value)
            ),
            (ValueType::Enum(_), Some(i)) => format!(
                "static_cast<{}>(Schema_IndexEnum({object}, {id}, {i}))",
                self.mapper.value_type(value)
            ),
            (ValueType::Type(_), None) => format!(
                "{}::Deserialize(Schema_GetObject({object}, {id}))",
                self.mapper.value_type(value)
            ),
            (ValueType::Type(_), Some(i)) => format!(
                "{}::Deserialize(Schema_IndexObject({object}, {id}, {i}))",
                self.mapper.value_type(value)
            ),
        };

        Read {
            expr,
            fallible: matches!(value, ValueType::Type(_)),
        }
    }

    /// Hand a read value to `sink`, unwrapping and propagating nested failures.
    pub fn store(&self, read: Read, sink: impl Fn(&str) -> String) -> String {
        if !read.fallible {
            return sink(&read.expr);
        }

        let mut body = format!("auto NestedValue = {};\n", read.expr);
        body.push_str(&block("if (!NestedValue.IsSet())", "return {};"));
        body.push('\n');
        body.push_str(&sink("*NestedValue"));
        block("", &body)
    }

    /// Write every value of `field`, taking the native value from `expr`.
    pub fn serialize_field(&self, field: &FieldDescription, object: &str, expr: &str) -> String {
        let id = field.field_id;
        let mut code = format!(
            "// serializing field {} = {id}\n",
            to_pascal_case(&field.name)
        );

        let body = match &field.kind {
            FieldKind::Singular { value } => self.add_statement(value, object, id, expr),
            FieldKind::Option { value } => block(
                &format!("if ({expr}.IsSet())"),
                &self.add_statement(value, object, id, &format!("(*{expr})")),
            ),
            FieldKind::List { value } => block(
                &format!("for (const auto& Element : {expr})"),
                &self.add_statement(value, object, id, "Element"),
            ),
            FieldKind::Map { key, value } => {
                let mut pair = format!("Schema_Object* PairObject = Schema_AddObject({object}, {id});\n");
                pair.push_str(&self.add_statement(key, "PairObject", MAP_KEY_FIELD_ID, "Pair.Key"));
                pair.push('\n');
                pair.push_str(&self.add_statement(
                    value,
                    "PairObject",
                    MAP_VALUE_FIELD_ID,
                    "Pair.Value",
                ));
                block(&format!("for (const auto& Pair : {expr})"), &pair)
            }
        };

        code.push_str(&body);
        code
    }

    /// Read `field` from `object` into the default-initialised lvalue `target`.
    ///
    /// Singular fields require exactly one value; options accept zero or one.
    pub fn read_field(&self, field: &FieldDescription, object: &str, target: &str) -> String {
        let id = field.field_id;

        match &field.kind {
            FieldKind::Singular { value } => {
                let mut code = block(
                    &format!("if ({} != 1)", self.count_expr(value, object, id)),
                    "return {};",
                );
                code.push('\n');
                code.push_str(&self.store(self.read(value, object, id, None), |e| {
                    format!("{target} = {e};")
                }));
                code
            }
            FieldKind::Option { value } => {
                let mut body = format!("const uint32 Count = {};\n", self.count_expr(value, object, id));
                body.push_str(&block("if (Count > 1)", "return {};"));
                body.push('\n');
                body.push_str(&block(
                    "if (Count == 1)",
                    &self.store(self.read(value, object, id, None), |e| {
                        format!("{target} = {e};")
                    }),
                ));
                block("", &body)
            }
            FieldKind::List { value } => {
                let mut body = format!("const uint32 Count = {};\n", self.count_expr(value, object, id));
                body.push_str(&block(
                    "for (uint32 i = 0; i < Count; ++i)",
                    &self.store(self.read(value, object, id, Some("i")), |e| {
                        format!("{target}.Add({e});")
                    }),
                ));
                block("", &body)
            }
            FieldKind::Map { key, value } => {
                let key_type = self.mapper.value_type(key);
                let value_type = self.mapper.value_type(value);

                let mut pair = format!("Schema_Object* PairObject = Schema_IndexObject({object}, {id}, i);\n");
                pair.push_str(&block(
                    &format!(
                        "if ({} != 1 || {} != 1)",
                        self.count_expr(key, "PairObject", MAP_KEY_FIELD_ID),
                        self.count_expr(value, "PairObject", MAP_VALUE_FIELD_ID)
                    ),
                    "return {};",
                ));
                pair.push_str(&format!("\n{key_type} MapKey{{}};\n"));
                pair.push_str(&self.store(
                    self.read(key, "PairObject", MAP_KEY_FIELD_ID, None),
                    |e| format!("MapKey = {e};"),
                ));
                pair.push_str(&format!("\n{value_type} MapValue{{}};\n"));
                pair.push_str(&self.store(
                    self.read(value, "PairObject", MAP_VALUE_FIELD_ID, None),
                    |e| format!("MapValue = {e};"),
                ));
                pair.push_str("\n// Duplicate keys: the last pair wins.\n");
                pair.push_str(&format!("{target}.Add(MapKey, MapValue);"));

                let mut body = format!(
                    "const uint32 Count = Schema_GetObjectCount({object}, {id});\n"
                );
                body.push_str(&block("for (uint32 i = 0; i < Count; ++i)", &pair));
                block("", &body)
            }
        }
    }

    /// Full-value deserialization of `field` into `target`.
    pub fn deserialize_field(&self, field: &FieldDescription, object: &str, target: &str) -> String {
        format!(
            "// deserializing field {} = {}\n{}",
            to_pascal_case(&field.name),
            field.field_id,
            self.read_field(field, object, target)
        )
    }

    /// Whether a present Update slot should be sent as a cleared marker.
    ///
    /// `None` for singular fields, which cannot be cleared.
    pub fn clearing_check(&self, field: &FieldDescription, expr: &str) -> Option<String> {
        match field.kind {
            FieldKind::Singular { .. } => None,
            FieldKind::Option { .. } => Some(format!("!{expr}.IsSet()")),
            FieldKind::List { .. } | FieldKind::Map { .. } => Some(format!("{expr}.Num() == 0")),
        }
    }

    /// Equality of two native values of `field`.
    pub fn field_equals(&self, field: &FieldDescription, lhs: &str, rhs: &str) -> String {
        match field.kind {
            FieldKind::Map { .. } => format!("::improbable::MapEquals({lhs}, {rhs})"),
            _ => format!("{lhs} == {rhs}"),
        }
    }

    /// Equality of two Update slots (option-wrapped native values) of `field`.
    pub fn slot_equals(&self, field: &FieldDescription, lhs: &str, rhs: &str) -> String {
        match field.kind {
            FieldKind::Map { .. } => format!(
                "({lhs}.IsSet() == {rhs}.IsSet() && (!{lhs}.IsSet() || {}))",
                self.field_equals(field, &format!("*{lhs}"), &format!("*{rhs}"))
            ),
            _ => format!("{lhs} == {rhs}"),
        }
    }
}

#[cfg(test)]
#[path = "serialization/serialization_tests.rs"]
mod serialization_tests;
