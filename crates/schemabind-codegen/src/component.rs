//! Component emission: the Update delta, Commands and lifecycle op aliases.
//!
//! An Update holds one `TSchemaOption` slot per field. An unset slot is
//! untouched; a set slot holding the field's empty value (empty list or map,
//! unset option) is explicitly cleared and travels as a cleared-field marker.

use crate::emitter::{Emitter, FieldNames};
use crate::naming::to_pascal_case;
use crate::text::{block, indent};
use schemabind_core::{
    CommandDefinition, EventDefinition, FieldDescription, FieldKind, Multiplicity,
    TypeDescription, ValueType,
};

/// An event's accumulated payloads, viewed as a list field keyed by the event index.
fn event_field(event: &EventDefinition) -> FieldDescription {
    FieldDescription::new(
        event.name.clone(),
        event.index,
        FieldKind::List {
            value: ValueType::Type(event.payload.clone()),
        },
    )
}

impl Emitter<'_> {
    /// Public members appended to a component's class body.
    pub fn declare_component_members(&self, ty: &TypeDescription) -> String {
        let name = self.class_name(ty);
        let mut code = String::new();

        code.push_str("Worker_ComponentId GetComponentId() const override;\n");
        code.push_str("void Serialize(Schema_ComponentData* SchemaData) const override;\n");
        code.push_str(&format!(
            "static {} Deserialize(Schema_ComponentData* SchemaData);\n\n",
            self.option_of(&name)
        ));

        code.push_str(&self.declare_update(ty));

        if !ty.commands().is_empty() {
            code.push_str("\n\n");
            code.push_str(&self.declare_commands(ty));
        }

        code.push_str("\n\n");
        code.push_str(&self.op_aliases(ty));
        code
    }

    /// `using` declarations binding the generic lifecycle ops to this component.
    pub fn op_aliases(&self, ty: &TypeDescription) -> String {
        let name = self.class_name(ty);
        [
            format!("using AddComponentOp = ::improbable::AddComponentOp<{name}>;"),
            format!("using RemoveComponentOp = ::improbable::RemoveComponentOp<{name}>;"),
            "using ComponentUpdateOp = ::improbable::ComponentUpdateOp<Update>;".to_string(),
            format!("using AuthorityChangeOp = ::improbable::AuthorityChangeOp<{name}>;"),
        ]
        .join("\n")
    }

    fn declare_update(&self, ty: &TypeDescription) -> String {
        let name = self.class_name(ty);
        let mut public = String::new();

        public.push_str("Update() = default;\n");
        public.push_str("~Update() = default;\n\n");
        public.push_str("Update(const Update&) = default;\n");
        public.push_str("Update(Update&&) = default;\n");
        public.push_str("Update& operator=(const Update&) = default;\n");
        public.push_str("Update& operator=(Update&&) = default;\n\n");
        public.push_str("// Creates an update with every field present, copied from a full value.\n");
        public.push_str(&format!("static Update FromInitialData(const {name}& Data);\n\n"));
        public.push_str("// Reconstructs a full value; unset if any field is missing.\n");
        public.push_str(&format!("{} ToInitialData() const;\n\n", self.option_of(&name)));
        public.push_str("// Overwrites the fields present in this update.\n");
        public.push_str(&format!("{name}& ApplyTo({name}& Data) const;\n\n"));
        public.push_str("Worker_ComponentId GetComponentId() const override;\n\n");
        public.push_str("bool operator==(const Update& Value) const;\n");
        public.push_str("bool operator!=(const Update& Value) const;\n");

        for field in &ty.fields {
            let names = FieldNames::of(&field.name);
            let slot = self.mapper().update_slot_type(field);
            public.push_str(&format!("\n// Field {} = {}\n", names.accessor, field.field_id));
            public.push_str(&format!("const {slot}& Get{}() const;\n", names.accessor));
            public.push_str(&format!("{slot}& Get{}();\n", names.accessor));
            public.push_str(&format!(
                "Update& Set{}({} Value);\n",
                names.accessor,
                self.native(field).param()
            ));
        }

        for event in ty.events() {
            let accessor = to_pascal_case(&event.name);
            let list = self.native(&event_field(event));
            let payload = self.mapper().value_type(&ValueType::Type(event.payload.clone()));
            public.push_str(&format!("\n// Event {accessor} = {}\n", event.index));
            public.push_str(&format!("const {list}& Get{accessor}List() const;\n"));
            public.push_str(&format!("{list}& Get{accessor}List();\n"));
            public.push_str(&format!("Update& Add{accessor}({} Value);\n", payload.param()));
        }

        public.push_str("\nvoid Serialize(Schema_ComponentUpdate* SchemaUpdate) const override;\n");
        public.push_str(&format!(
            "static {} Deserialize(Schema_ComponentUpdate* SchemaUpdate);",
            self.option_of("Update")
        ));

        let mut members: Vec<String> = ty
            .fields
            .iter()
            .map(|field| {
                format!(
                    "{} {};",
                    self.mapper().update_slot_type(field),
                    FieldNames::of(&field.name).member
                )
            })
            .collect();
        members.extend(ty.events().iter().map(|event| {
            format!(
                "{} _{}List;",
                self.native(&event_field(event)),
                to_pascal_case(&event.name)
            )
        }));

        let mut body = format!("public:\n{}", indent(1, &public));
        if !members.is_empty() {
            body.push_str("\n\nprivate:\n");
            body.push_str(&indent(1, &members.join("\n")));
        }

        format!("class Update : public ::improbable::SpatialComponentUpdate\n{{\n{body}\n}};")
    }

    fn declare_commands(&self, ty: &TypeDescription) -> String {
        let commands: Vec<String> = ty
            .commands()
            .iter()
            .map(|command| self.declare_command(command))
            .collect();

        format!(
            "class Commands\n{{\npublic:\n{}\n}};",
            indent(1, &commands.join("\n\n"))
        )
    }

    /// One command class. Request wraps the request type and Response the response type.
    pub fn declare_command(&self, command: &CommandDefinition) -> String {
        let mut public = format!(
            "static const Schema_FieldId CommandIndex = {};\n\n",
            command.index
        );
        public.push_str(&self.payload_wrapper("Request", &command.request));
        public.push_str("\n\n");
        public.push_str(&self.payload_wrapper("Response", &command.response));
        public.push_str("\n\nusing RequestOp = ::improbable::CommandRequestOp<Request>;\n");
        public.push_str("using ResponseOp = ::improbable::CommandResponseOp<Response>;");

        format!(
            "class {}\n{{\npublic:\n{}\n}};",
            to_pascal_case(&command.name),
            indent(1, &public)
        )
    }

    fn payload_wrapper(&self, wrapper: &str, payload: &str) -> String {
        let payload_type = self.mapper().class_name(payload);
        let mut body = format!("using Type = {payload_type};\n\n");

        match self.bundle.type_description(payload) {
            Some(record) if !record.fields.is_empty() => {
                let arguments: Vec<String> = record
                    .fields
                    .iter()
                    .map(|field| FieldNames::of(&field.name).argument)
                    .collect();
                body.push_str(&format!(
                    "{wrapper}({})\n\t: Data({}) {{}}\n",
                    self.constructor_params(record),
                    arguments.join(", ")
                ));
            }
            _ => body.push_str(&format!("{wrapper}() = default;\n")),
        }
        body.push_str(&format!("{wrapper}(Type InData)\n\t: Data{{ InData }} {{}}\n\n"));
        body.push_str("Type Data;");

        format!("struct {wrapper}\n{{\n{}\n}};", indent(1, &body))
    }

    /// Out-of-line definitions of the component members and its Update.
    pub fn define_component(&self, ty: &TypeDescription) -> String {
        let name = self.class_name(ty);
        let mut parts = Vec::new();

        parts.push(block(
            &format!("Worker_ComponentId {name}::GetComponentId() const"),
            "return ComponentId;",
        ));
        parts.push(block(
            &format!("void {name}::Serialize(Schema_ComponentData* SchemaData) const"),
            "Serialize(Schema_GetComponentDataFields(SchemaData));",
        ));
        parts.push(block(
            &format!(
                "{} {name}::Deserialize(Schema_ComponentData* SchemaData)",
                self.option_of(&name)
            ),
            "return Deserialize(Schema_GetComponentDataFields(SchemaData));",
        ));

        parts.push(self.define_update_conversions(ty));
        parts.push(self.define_update_accessors(ty));
        parts.push(self.define_update_serialize(ty));
        parts.push(self.define_update_deserialize(ty));

        parts.retain(|part| !part.is_empty());
        parts.join("\n\n")
    }

    fn define_update_conversions(&self, ty: &TypeDescription) -> String {
        let name = self.class_name(ty);
        let update = format!("{name}::Update");
        let mut parts = Vec::new();

        let mut from = "Update Result;\n".to_string();
        for field in &ty.fields {
            let names = FieldNames::of(&field.name);
            from.push_str(&format!("Result.{} = Data.Get{}();\n", names.member, names.accessor));
        }
        from.push_str("return Result;");
        parts.push(block(
            &format!("{update} {update}::FromInitialData(const {name}& Data)"),
            &from,
        ));

        let mut to = String::new();
        if !ty.fields.is_empty() {
            let unset: Vec<String> = ty
                .fields
                .iter()
                .map(|field| format!("!{}.IsSet()", FieldNames::of(&field.name).member))
                .collect();
            to.push_str(&block(&format!("if ({})", unset.join(" || ")), "return {};"));
            to.push('\n');
        }
        let values: Vec<String> = ty
            .fields
            .iter()
            .map(|field| format!("*{}", FieldNames::of(&field.name).member))
            .collect();
        to.push_str(&format!("return {name}({});", values.join(", ")));
        parts.push(block(
            &format!("{} {update}::ToInitialData() const", self.option_of(&name)),
            &to,
        ));

        let mut apply = String::new();
        for field in &ty.fields {
            let names = FieldNames::of(&field.name);
            apply.push_str(&block(
                &format!("if ({}.IsSet())", names.member),
                &format!("Data.Set{}(*{});", names.accessor, names.member),
            ));
            apply.push('\n');
        }
        apply.push_str("return Data;");
        parts.push(block(
            &format!("{name}& {update}::ApplyTo({name}& Data) const"),
            &apply,
        ));

        parts.push(block(
            &format!("Worker_ComponentId {update}::GetComponentId() const"),
            "return ComponentId;",
        ));

        let comparisons: Vec<String> = ty
            .fields
            .iter()
            .map(|field| {
                let member = FieldNames::of(&field.name).member;
                self.codec
                    .slot_equals(field, &member, &format!("Value.{member}"))
            })
            .chain(ty.events().iter().map(|event| {
                let member = format!("_{}List", to_pascal_case(&event.name));
                format!("{member} == Value.{member}")
            }))
            .collect();
        let equality = if comparisons.is_empty() {
            "true".to_string()
        } else {
            comparisons.join(" && ")
        };
        parts.push(block(
            &format!("bool {update}::operator==(const Update& Value) const"),
            &format!("return {equality};"),
        ));
        parts.push(block(
            &format!("bool {update}::operator!=(const Update& Value) const"),
            "return !operator==(Value);",
        ));

        parts.join("\n\n")
    }

    fn define_update_accessors(&self, ty: &TypeDescription) -> String {
        let update = format!("{}::Update", self.class_name(ty));
        let mut parts = Vec::new();

        for field in &ty.fields {
            let names = FieldNames::of(&field.name);
            let slot = self.mapper().update_slot_type(field);
            parts.push(block(
                &format!("const {slot}& {update}::Get{}() const", names.accessor),
                &format!("return {};", names.member),
            ));
            parts.push(block(
                &format!("{slot}& {update}::Get{}()", names.accessor),
                &format!("return {};", names.member),
            ));
            parts.push(block(
                &format!(
                    "{update}& {update}::Set{}({} Value)",
                    names.accessor,
                    self.native(field).param()
                ),
                &format!("{} = Value;\nreturn *this;", names.member),
            ));
        }

        for event in ty.events() {
            let accessor = to_pascal_case(&event.name);
            let list = self.native(&event_field(event));
            let payload = self.mapper().value_type(&ValueType::Type(event.payload.clone()));
            parts.push(block(
                &format!("const {list}& {update}::Get{accessor}List() const"),
                &format!("return _{accessor}List;"),
            ));
            parts.push(block(
                &format!("{list}& {update}::Get{accessor}List()"),
                &format!("return _{accessor}List;"),
            ));
            parts.push(block(
                &format!("{update}& {update}::Add{accessor}({} Value)", payload.param()),
                &format!("_{accessor}List.Add(Value);\nreturn *this;"),
            ));
        }

        parts.join("\n\n")
    }

    fn define_update_serialize(&self, ty: &TypeDescription) -> String {
        let update = format!("{}::Update", self.class_name(ty));
        let mut body = Vec::new();

        if !ty.fields.is_empty() {
            body.push(
                "Schema_Object* FieldsObject = Schema_GetComponentUpdateFields(SchemaUpdate);"
                    .to_string(),
            );
        }

        for field in &ty.fields {
            let member = FieldNames::of(&field.name).member;
            let value = format!("(*{member})");
            let write = self.codec.serialize_field(field, "FieldsObject", &value);

            let present = match self.codec.clearing_check(field, &value) {
                None => write,
                Some(check) => {
                    let mut branches = block(
                        &format!("if ({check})"),
                        &format!(
                            "Schema_AddComponentUpdateClearedField(SchemaUpdate, {});",
                            field.field_id
                        ),
                    );
                    branches.push('\n');
                    branches.push_str(&block("else", &write));
                    branches
                }
            };
            body.push(block(&format!("if ({member}.IsSet())"), &present));
        }

        if !ty.events().is_empty() {
            body.push(
                "Schema_Object* EventsObject = Schema_GetComponentUpdateEvents(SchemaUpdate);"
                    .to_string(),
            );
            for event in ty.events() {
                body.push(self.codec.serialize_field(
                    &event_field(event),
                    "EventsObject",
                    &format!("_{}List", to_pascal_case(&event.name)),
                ));
            }
        }

        block(
            &format!("void {update}::Serialize(Schema_ComponentUpdate* SchemaUpdate) const"),
            &body.join("\n"),
        )
    }

    fn define_update_deserialize(&self, ty: &TypeDescription) -> String {
        let update = format!("{}::Update", self.class_name(ty));
        let mut body = vec!["Update Data;".to_string()];

        if !ty.fields.is_empty() {
            body.push(
                "Schema_Object* FieldsObject = Schema_GetComponentUpdateFields(SchemaUpdate);"
                    .to_string(),
            );
        }

        let clearable = ty
            .fields
            .iter()
            .any(|field| field.multiplicity() != Multiplicity::Singular);
        if clearable {
            body.push("TSet<Schema_FieldId> FieldsToClearSet;".to_string());
            body.push(block(
                "",
                "const uint32 ClearedCount = Schema_GetComponentUpdateClearedFieldCount(SchemaUpdate);\n\
                 TArray<Schema_FieldId> FieldsToClear;\n\
                 FieldsToClear.SetNum(ClearedCount);\n\
                 Schema_GetComponentUpdateClearedFieldList(SchemaUpdate, FieldsToClear.GetData());\n\
                 for (const Schema_FieldId FieldId : FieldsToClear)\n\
                 {\n\
                 \tFieldsToClearSet.Add(FieldId);\n\
                 }",
            ));
        }

        for field in &ty.fields {
            let names = FieldNames::of(&field.name);
            let native = self.native(field);

            let mut present = format!("{native} FieldValue{{}};\n");
            present.push_str(&self.codec.read_field(field, "FieldsObject", "FieldValue"));
            present.push_str(&format!("\nData.{} = FieldValue;", names.member));

            let mut code = format!(
                "// deserializing field {} = {}\n",
                names.accessor, field.field_id
            );
            code.push_str(&block(
                &format!("if ({} > 0)", self.codec.field_count_expr(field, "FieldsObject")),
                &present,
            ));
            if field.multiplicity() != Multiplicity::Singular {
                code.push('\n');
                code.push_str(&block(
                    &format!("else if (FieldsToClearSet.Contains({}))", field.field_id),
                    &format!("Data.{} = {native}{{}};", names.member),
                ));
            }
            body.push(code);
        }

        if !ty.events().is_empty() {
            body.push(
                "Schema_Object* EventsObject = Schema_GetComponentUpdateEvents(SchemaUpdate);"
                    .to_string(),
            );
            for event in ty.events() {
                let accessor = to_pascal_case(&event.name);
                body.push(format!(
                    "// deserializing event {accessor} = {}\n{}",
                    event.index,
                    self.codec.read_field(
                        &event_field(event),
                        "EventsObject",
                        &format!("Data._{accessor}List")
                    )
                ));
            }
        }

        body.push("return Data;".to_string());

        block(
            &format!(
                "{} {update}::Deserialize(Schema_ComponentUpdate* SchemaUpdate)",
                self.option_of(&update)
            ),
            &body.join("\n"),
        )
    }
}
