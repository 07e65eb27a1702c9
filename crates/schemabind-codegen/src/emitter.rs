//! Shared state of the per-type emitters.

use crate::cpp_types::{CppType, TypeMapper};
use crate::naming::{class_name, to_pascal_case};
use crate::serialization::FieldCodec;
use schemabind_core::{Bundle, FieldDescription, GeneratorConfig, TypeDescription};

/// Emits declarations and definitions for the types of one bundle.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    pub(crate) bundle: &'a Bundle,
    pub(crate) config: &'a GeneratorConfig,
    pub(crate) codec: FieldCodec<'a>,
}

impl<'a> Emitter<'a> {
    pub fn new(bundle: &'a Bundle, config: &'a GeneratorConfig) -> Self {
        Self {
            bundle,
            config,
            codec: FieldCodec::new(TypeMapper::new(bundle, &config.containers)),
        }
    }

    pub fn mapper(&self) -> TypeMapper<'a> {
        self.codec.mapper()
    }

    /// Emitted (hoisted, unqualified) class name of a type.
    pub fn class_name(&self, ty: &TypeDescription) -> String {
        class_name(self.bundle, &ty.qualified_name)
    }

    pub(crate) fn native(&self, field: &FieldDescription) -> CppType {
        self.mapper().native_type(field)
    }

    /// `TSchemaOption<T>` spelled with the configured container.
    pub(crate) fn option_of(&self, name: &str) -> String {
        self.mapper().option_of(&CppType::reference(name)).name
    }

    /// `// Generated from <file>(<line>,<column>)` when enabled and known.
    pub(crate) fn provenance(&self, qualified_name: &str) -> Option<String> {
        if !self.config.provenance_comments {
            return None;
        }
        self.bundle
            .source_reference(qualified_name)
            .map(|source| {
                format!(
                    "// Generated from {}({},{})",
                    source.file_path, source.line, source.column
                )
            })
    }
}

/// Member, getter and constructor names of a field.
pub(crate) struct FieldNames {
    /// `X` in `GetX` / `SetX`.
    pub accessor: String,
    /// `_X`
    pub member: String,
    /// `InX`
    pub argument: String,
}

impl FieldNames {
    pub fn of(name: &str) -> Self {
        let accessor = to_pascal_case(name);
        Self {
            member: format!("_{accessor}"),
            argument: format!("In{accessor}"),
            accessor,
        }
    }
}
