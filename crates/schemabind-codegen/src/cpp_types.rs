//! Native type mappings for generated C++ code.
//!
//! Maps each field's logical value type and multiplicity to the native type
//! signature used for members, accessors and Update slots.
//!
//! # Type Mappings
//!
//! | Schema | Native (default containers) | Passed as |
//! |--------|-----------------------------|-----------|
//! | `int32`, `sint32`, `sfixed32` | `int32` | value |
//! | `uint32`, `fixed32` | `uint32` | value |
//! | `string` | `FString` | `const FString&` |
//! | `bytes` | `TArray<uint8>` | `const TArray<uint8>&` |
//! | `EntityId` | `Worker_EntityId` | value |
//! | enum | `::ns::Outer_Enum` | value |
//! | record | `::ns::Outer_Record` | `const&` |
//! | `option<T>` | `::improbable::TSchemaOption<T>` | `const&` |
//! | `list<T>` | `TArray<T>` | `const&` |
//! | `map<K, V>` | `TMap<K, V>` | `const&` |

use crate::naming::qualified_class_name;
use schemabind_core::{
    Bundle, ContainerNames, FieldDescription, FieldKind, PrimitiveType, ValueType,
};

/// A native type signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppType {
    /// The spelled type, e.g. `TArray<int32>`.
    pub name: String,
    /// Whether the type is cheap to copy and is passed by value.
    pub is_trivial: bool,
}

impl CppType {
    /// A scalar passed by value.
    pub fn value(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_trivial: true,
        }
    }

    /// A non-trivial type passed by const reference.
    pub fn reference(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_trivial: false,
        }
    }

    /// Parameter and const-getter spelling: by value when trivial, else `const T&`.
    pub fn param(&self) -> String {
        if self.is_trivial {
            self.name.clone()
        } else {
            format!("const {}&", self.name)
        }
    }
}

impl std::fmt::Display for CppType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Field type mapper bound to a bundle and a set of container names.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    bundle: &'a Bundle,
    containers: &'a ContainerNames,
}

impl<'a> TypeMapper<'a> {
    pub fn new(bundle: &'a Bundle, containers: &'a ContainerNames) -> Self {
        Self { bundle, containers }
    }

    pub fn bundle(&self) -> &'a Bundle {
        self.bundle
    }

    /// Native type of a single value.
    pub fn value_type(&self, ty: &ValueType) -> CppType {
        match ty {
            ValueType::Primitive(primitive) => self.primitive(*primitive),
            ValueType::Enum(name) => CppType::value(&qualified_class_name(self.bundle, name)),
            ValueType::Type(name) => CppType::reference(&qualified_class_name(self.bundle, name)),
        }
    }

    /// Native type of a field member (`nativeType`).
    pub fn native_type(&self, field: &FieldDescription) -> CppType {
        match &field.kind {
            FieldKind::Singular { value } => self.value_type(value),
            FieldKind::Option { value } => self.option_of(&self.value_type(value)),
            FieldKind::List { value } => self.list_of(&self.value_type(value)),
            FieldKind::Map { key, value } => {
                self.map_of(&self.value_type(key), &self.value_type(value))
            }
        }
    }

    /// Parameter type of the field's setter and constructor argument (`accessorParamType`).
    pub fn accessor_param_type(&self, field: &FieldDescription) -> String {
        self.native_type(field).param()
    }

    /// Type of the field's slot in a component Update: always option-shaped.
    pub fn update_slot_type(&self, field: &FieldDescription) -> CppType {
        self.option_of(&self.native_type(field))
    }

    pub fn option_of(&self, inner: &CppType) -> CppType {
        CppType::reference(&format!("{}<{}>", self.containers.option, inner))
    }

    pub fn list_of(&self, inner: &CppType) -> CppType {
        CppType::reference(&format!("{}<{}>", self.containers.list, inner))
    }

    pub fn map_of(&self, key: &CppType, value: &CppType) -> CppType {
        CppType::reference(&format!("{}<{}, {}>", self.containers.map, key, value))
    }

    /// Emitted, fully qualified name of a record, component or enum.
    pub fn class_name(&self, qualified_name: &str) -> String {
        qualified_class_name(self.bundle, qualified_name)
    }

    fn primitive(&self, primitive: PrimitiveType) -> CppType {
        match primitive {
            PrimitiveType::Bool => CppType::value("bool"),
            PrimitiveType::Uint32 | PrimitiveType::Fixed32 => CppType::value("uint32"),
            PrimitiveType::Uint64 | PrimitiveType::Fixed64 => CppType::value("uint64"),
            PrimitiveType::Int32 | PrimitiveType::Sint32 | PrimitiveType::Sfixed32 => {
                CppType::value("int32")
            }
            PrimitiveType::Int64 | PrimitiveType::Sint64 | PrimitiveType::Sfixed64 => {
                CppType::value("int64")
            }
            PrimitiveType::Float => CppType::value("float"),
            PrimitiveType::Double => CppType::value("double"),
            PrimitiveType::String => CppType::reference(&self.containers.string),
            PrimitiveType::Bytes => CppType::reference(&self.containers.bytes),
            PrimitiveType::EntityId => CppType::value("Worker_EntityId"),
        }
    }
}
