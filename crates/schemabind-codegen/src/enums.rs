//! Enum emission.

use crate::emitter::Emitter;
use crate::naming::class_name;
use crate::text::block;
use schemabind_core::EnumDefinition;

impl Emitter<'_> {
    /// `enum class` definition followed by its inline hash.
    pub fn define_enum(&self, def: &EnumDefinition) -> String {
        let mut code = String::new();
        if let Some(provenance) = self.provenance(&def.qualified_name) {
            code.push_str(&provenance);
            code.push('\n');
        }

        let values: Vec<String> = def
            .values
            .iter()
            .map(|v| format!("{} = {},", v.name, v.value))
            .collect();
        code.push_str(&block(
            &format!(
                "enum class {} : uint32",
                class_name(self.bundle, &def.qualified_name)
            ),
            &values.join("\n"),
        ));
        code.push_str(";\n\n");
        code.push_str(&self.enum_hash(def));
        code
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use crate::emitter::Emitter;
    use schemabind_core::{
        Bundle, BundleDefinition, EnumDefinition, EnumValue, GeneratorConfig, SourceReference,
    };
    use std::collections::HashMap;

    fn color() -> EnumDefinition {
        EnumDefinition {
            qualified_name: "t.Color".into(),
            values: vec![
                EnumValue {
                    name: "RED".into(),
                    value: 0,
                },
                EnumValue {
                    name: "GREEN".into(),
                    value: 4,
                },
            ],
        }
    }

    #[test]
    fn define_enum___lists_values_with_ordinals() {
        let bundle = Bundle::new(BundleDefinition {
            enums: vec![color()],
            ..Default::default()
        })
        .unwrap();
        let config = GeneratorConfig::default();

        let code = Emitter::new(&bundle, &config).define_enum(&bundle.enums()[0]);

        assert!(code.starts_with("enum class Color : uint32\n{\n\tRED = 0,\n\tGREEN = 4,\n};\n\n"));
        assert!(code.ends_with("return static_cast<uint32>(Value);\n}"));
    }

    #[test]
    fn define_enum___with_source___has_provenance_comment() {
        let mut sources = HashMap::new();
        sources.insert(
            "t.Color".to_string(),
            SourceReference {
                file_path: "t/color.schema".into(),
                line: 4,
                column: 2,
            },
        );
        let bundle = Bundle::new(BundleDefinition {
            enums: vec![color()],
            source_references: sources,
            ..Default::default()
        })
        .unwrap();
        let config = GeneratorConfig::default();

        let code = Emitter::new(&bundle, &config).define_enum(&bundle.enums()[0]);

        assert!(code.starts_with("// Generated from t/color.schema(4,2)\nenum class Color"));
    }

    #[test]
    fn define_enum___provenance_disabled___omits_comment() {
        let mut sources = HashMap::new();
        sources.insert(
            "t.Color".to_string(),
            SourceReference {
                file_path: "t/color.schema".into(),
                line: 4,
                column: 2,
            },
        );
        let bundle = Bundle::new(BundleDefinition {
            enums: vec![color()],
            source_references: sources,
            ..Default::default()
        })
        .unwrap();
        let config = GeneratorConfig {
            provenance_comments: false,
            ..Default::default()
        };

        let code = Emitter::new(&bundle, &config).define_enum(&bundle.enums()[0]);

        assert!(!code.contains("Generated from"));
    }
}
