//! Record class emission.
//!
//! Every type becomes a class deriving from `::improbable::SpatialType` (or
//! `SpatialComponent` for components) with value-initialised members, a
//! field-wise constructor, equality, getters, chaining setters and the
//! `Serialize`/`Deserialize` pair built from [`crate::serialization`].

use crate::emitter::{Emitter, FieldNames};
use crate::naming::class_name;
use crate::text::{block, indent};
use schemabind_core::TypeDescription;

impl Emitter<'_> {
    /// Class definition for the declaration unit.
    pub fn declare_record(&self, ty: &TypeDescription) -> String {
        let name = self.class_name(ty);
        let base = if ty.is_component() {
            "::improbable::SpatialComponent"
        } else {
            "::improbable::SpatialType"
        };

        let mut public = String::new();

        if let Some(id) = ty.component_id() {
            public.push_str(&format!("static const Worker_ComponentId ComponentId = {id};\n\n"));
        }

        let nested: Vec<String> = ty
            .nested_types
            .iter()
            .chain(&ty.nested_enums)
            .map(|qualified| {
                format!(
                    "using {} = {};",
                    local_name(qualified),
                    class_name(self.bundle, qualified)
                )
            })
            .collect();
        if !nested.is_empty() {
            public.push_str(&nested.join("\n"));
            public.push_str("\n\n");
        }

        public.push_str("// Creates a new instance with default values for each field.\n");
        public.push_str(&format!("{name}() = default;\n"));
        if !ty.fields.is_empty() {
            public.push_str("// Creates a new instance with specified arguments for each field.\n");
            public.push_str(&format!("{name}({});\n", self.constructor_params(ty)));
        }
        public.push_str(&format!("~{name}() = default;\n\n"));
        public.push_str(&format!("{name}(const {name}&) = default;\n"));
        public.push_str(&format!("{name}({name}&&) = default;\n"));
        public.push_str(&format!("{name}& operator=(const {name}&) = default;\n"));
        public.push_str(&format!("{name}& operator=({name}&&) = default;\n\n"));
        public.push_str(&format!("static {name} Create();\n\n"));
        public.push_str(&format!("bool operator==(const {name}& Value) const;\n"));
        public.push_str(&format!("bool operator!=(const {name}& Value) const;\n"));

        for field in &ty.fields {
            let names = FieldNames::of(&field.name);
            let native = self.native(field);
            public.push_str(&format!(
                "\n// Field {} = {}\n",
                names.accessor, field.field_id
            ));
            public.push_str(&format!("{} Get{}() const;\n", native.param(), names.accessor));
            public.push_str(&format!("{native}& Get{}();\n", names.accessor));
            public.push_str(&format!(
                "{name}& Set{}({} Value);\n",
                names.accessor,
                native.param()
            ));
        }

        public.push_str("\nvoid Serialize(Schema_Object* SchemaObject) const override;\n");
        public.push_str(&format!(
            "static {} Deserialize(Schema_Object* SchemaObject);",
            self.option_of(&name)
        ));

        if ty.is_component() {
            public.push_str("\n\n");
            public.push_str(&self.declare_component_members(ty));
        }

        let mut body = format!("public:\n{}", indent(1, &public));
        if !ty.fields.is_empty() {
            let members: Vec<String> = ty
                .fields
                .iter()
                .map(|field| {
                    format!("{} {}{{}};", self.native(field), FieldNames::of(&field.name).member)
                })
                .collect();
            body.push_str("\n\nprivate:\n");
            body.push_str(&indent(1, &members.join("\n")));
        }

        let mut code = String::new();
        if let Some(provenance) = self.provenance(&ty.qualified_name) {
            code.push_str(&provenance);
            code.push('\n');
        }
        code.push_str(&format!("class {name} : public {base}\n{{\n{body}\n}};"));
        code
    }

    /// Out-of-line member definitions for the definition unit.
    pub fn define_record(&self, ty: &TypeDescription) -> String {
        let name = self.class_name(ty);
        let mut parts = Vec::new();

        if !ty.fields.is_empty() {
            let initializers: Vec<String> = ty
                .fields
                .iter()
                .map(|field| {
                    let names = FieldNames::of(&field.name);
                    format!("{}{{ {} }}", names.member, names.argument)
                })
                .collect();
            parts.push(block(
                &format!(
                    "{name}::{name}({})\n: {}",
                    self.constructor_params(ty),
                    initializers.join(", ")
                ),
                "",
            ));
        }

        parts.push(block(&format!("{name} {name}::Create()"), &format!("return {name}{{}};")));

        let comparisons: Vec<String> = ty
            .fields
            .iter()
            .map(|field| {
                let member = FieldNames::of(&field.name).member;
                self.codec
                    .field_equals(field, &member, &format!("Value.{member}"))
            })
            .collect();
        let equality = if comparisons.is_empty() {
            "true".to_string()
        } else {
            comparisons.join(" && ")
        };
        parts.push(block(
            &format!("bool {name}::operator==(const {name}& Value) const"),
            &format!("return {equality};"),
        ));
        parts.push(block(
            &format!("bool {name}::operator!=(const {name}& Value) const"),
            "return !operator==(Value);",
        ));

        for field in &ty.fields {
            let names = FieldNames::of(&field.name);
            let native = self.native(field);
            parts.push(block(
                &format!("{} {name}::Get{}() const", native.param(), names.accessor),
                &format!("return {};", names.member),
            ));
            parts.push(block(
                &format!("{native}& {name}::Get{}()", names.accessor),
                &format!("return {};", names.member),
            ));
            parts.push(block(
                &format!(
                    "{name}& {name}::Set{}({} Value)",
                    names.accessor,
                    native.param()
                ),
                &format!("{} = Value;\nreturn *this;", names.member),
            ));
        }

        let serialize: Vec<String> = ty
            .fields
            .iter()
            .map(|field| {
                self.codec
                    .serialize_field(field, "SchemaObject", &FieldNames::of(&field.name).member)
            })
            .collect();
        parts.push(block(
            &format!("void {name}::Serialize(Schema_Object* SchemaObject) const"),
            &serialize.join("\n"),
        ));

        let mut deserialize = format!("{name} Data;\n");
        for field in &ty.fields {
            let target = format!("Data.{}", FieldNames::of(&field.name).member);
            deserialize.push_str(&self.codec.deserialize_field(field, "SchemaObject", &target));
            deserialize.push('\n');
        }
        deserialize.push_str("return Data;");
        parts.push(block(
            &format!(
                "{} {name}::Deserialize(Schema_Object* SchemaObject)",
                self.option_of(&name)
            ),
            &deserialize,
        ));

        if ty.is_component() {
            parts.push(self.define_component(ty));
        }

        parts.push(self.define_hash(ty));

        parts.join("\n\n")
    }

    pub(crate) fn constructor_params(&self, ty: &TypeDescription) -> String {
        ty.fields
            .iter()
            .map(|field| {
                format!(
                    "{} {}",
                    self.native(field).param(),
                    FieldNames::of(&field.name).argument
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn local_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(qualified_name)
}
