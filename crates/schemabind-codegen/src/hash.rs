//! Structural hash emission.
//!
//! `Result` starts at [`HASH_SEED`] and every field is mixed in declaration
//! order with `Result = (Result * HASH_MULTIPLIER) + hash(field)`. Option
//! fields contribute 0 when unset, list elements are mixed one by one and map
//! entries are summed so that the hash does not depend on iteration order.

use crate::emitter::{Emitter, FieldNames};
use crate::text::block;
use schemabind_core::{
    EnumDefinition, FieldDescription, FieldKind, HASH_MULTIPLIER, HASH_SEED, PrimitiveType,
    TypeDescription, ValueType,
};

/// Hash expression of a single value.
pub fn value_hash(value: &ValueType, expr: &str) -> String {
    match value {
        ValueType::Primitive(PrimitiveType::Bytes) => {
            format!("::improbable::utils::GetBytesHash({expr})")
        }
        _ => format!("GetTypeHash({expr})"),
    }
}

/// Statement(s) mixing one field, read through `expr`, into `Result`.
pub fn field_hash(field: &FieldDescription, expr: &str) -> String {
    let mix = |hash: String| format!("Result = (Result * {HASH_MULTIPLIER}) + {hash};");

    match &field.kind {
        FieldKind::Singular { value } => mix(value_hash(value, expr)),
        FieldKind::Option { value } => mix(format!(
            "({expr}.IsSet() ? {} : 0)",
            value_hash(value, &format!("*{expr}"))
        )),
        FieldKind::List { value } => block(
            &format!("for (const auto& Element : {expr})"),
            &mix(value_hash(value, "Element")),
        ),
        FieldKind::Map { key, value } => {
            let entry = format!(
                "MapHash += ({} * {HASH_MULTIPLIER}) + {};",
                value_hash(key, "Pair.Key"),
                value_hash(value, "Pair.Value")
            );
            let mut body = "uint32 MapHash = 0;\n".to_string();
            body.push_str(&block(&format!("for (const auto& Pair : {expr})"), &entry));
            body.push('\n');
            body.push_str(&mix("MapHash".to_string()));
            block("", &body)
        }
    }
}

impl Emitter<'_> {
    /// Out-of-line hash declaration placed after the class definitions.
    pub fn declare_hash(&self, ty: &TypeDescription) -> String {
        format!("uint32 GetTypeHash(const {}& Value);", self.class_name(ty))
    }

    /// Hash definition for the definition unit.
    pub fn define_hash(&self, ty: &TypeDescription) -> String {
        let mut body = format!("uint32 Result = {HASH_SEED};\n");
        for field in &ty.fields {
            let names = FieldNames::of(&field.name);
            body.push_str(&field_hash(field, &format!("Value.Get{}()", names.accessor)));
            body.push('\n');
        }
        body.push_str("return Result;");

        block(
            &format!("uint32 GetTypeHash(const {}& Value)", self.class_name(ty)),
            &body,
        )
    }

    /// Inline hash of an enum: its underlying ordinal.
    pub fn enum_hash(&self, def: &EnumDefinition) -> String {
        block(
            &format!(
                "inline uint32 GetTypeHash({} Value)",
                crate::naming::class_name(self.bundle, &def.qualified_name)
            ),
            "return static_cast<uint32>(Value);",
        )
    }
}
