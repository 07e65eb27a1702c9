//! Schema bundle model
//!
//! The bundle is the read-only registry produced by the schema loading stage.
//! Types are stored in an arena addressed by index so that nested and mutually
//! referential types never embed each other structurally; every reference in a
//! field, event or command is a qualified name resolved through the bundle.
//!
//! # Input format
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "qualifiedName": "improbable.Position",
//!       "fields": [
//!         { "name": "x", "fieldId": 1, "multiplicity": "singular",
//!           "value": { "kind": "primitive", "name": "int32" } }
//!       ],
//!       "component": { "id": 42 }
//!     }
//!   ],
//!   "enums": [],
//!   "sourceReferences": {
//!     "improbable.Position": { "filePath": "improbable/position.schema", "line": 3, "column": 1 }
//!   }
//! }
//! ```

use crate::error::BundleError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Integer id of a field within its declaring type.
pub type FieldId = u32;

/// Numeric identifier of a component.
pub type ComponentId = u32;

/// Scalar value types understood by the schema object API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveType {
    Bool,
    Uint32,
    Uint64,
    Int32,
    Int64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Float,
    Double,
    String,
    Bytes,
    EntityId,
}

impl PrimitiveType {
    /// Suffix of the schema accessor family (`Schema_Add<Suffix>`, `Schema_Get<Suffix>Count`, ...).
    ///
    /// Strings travel as bytes on the wire.
    pub fn schema_suffix(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "Bool",
            PrimitiveType::Uint32 => "Uint32",
            PrimitiveType::Uint64 => "Uint64",
            PrimitiveType::Int32 => "Int32",
            PrimitiveType::Int64 => "Int64",
            PrimitiveType::Sint32 => "Sint32",
            PrimitiveType::Sint64 => "Sint64",
            PrimitiveType::Fixed32 => "Fixed32",
            PrimitiveType::Fixed64 => "Fixed64",
            PrimitiveType::Sfixed32 => "Sfixed32",
            PrimitiveType::Sfixed64 => "Sfixed64",
            PrimitiveType::Float => "Float",
            PrimitiveType::Double => "Double",
            PrimitiveType::String | PrimitiveType::Bytes => "Bytes",
            PrimitiveType::EntityId => "EntityId",
        }
    }

    /// Whether values of this type are cheap to pass by value.
    pub fn is_trivial(self) -> bool {
        !matches!(self, PrimitiveType::String | PrimitiveType::Bytes)
    }
}

/// A reference to the type of a value held by a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum ValueType {
    /// A scalar.
    Primitive(PrimitiveType),
    /// An enum, by qualified name.
    Enum(String),
    /// A record or component type, by qualified name.
    Type(String),
}

impl ValueType {
    /// Qualified name of the referenced enum or type, if any.
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            ValueType::Primitive(_) => None,
            ValueType::Enum(name) | ValueType::Type(name) => Some(name),
        }
    }
}

/// Multiplicity of a field without its value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    Singular,
    Option,
    List,
    Map,
}

/// Multiplicity kind of a field together with its value type(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "multiplicity", rename_all = "camelCase")]
pub enum FieldKind {
    Singular { value: ValueType },
    Option { value: ValueType },
    List { value: ValueType },
    Map { key: ValueType, value: ValueType },
}

impl FieldKind {
    pub fn multiplicity(&self) -> Multiplicity {
        match self {
            FieldKind::Singular { .. } => Multiplicity::Singular,
            FieldKind::Option { .. } => Multiplicity::Option,
            FieldKind::List { .. } => Multiplicity::List,
            FieldKind::Map { .. } => Multiplicity::Map,
        }
    }

    /// The element type for singular, option and list fields; the value type for maps.
    pub fn value_type(&self) -> &ValueType {
        match self {
            FieldKind::Singular { value }
            | FieldKind::Option { value }
            | FieldKind::List { value }
            | FieldKind::Map { value, .. } => value,
        }
    }

    /// Every value type this field mentions, key first for maps.
    pub fn value_types(&self) -> Vec<&ValueType> {
        match self {
            FieldKind::Map { key, value } => vec![key, value],
            other => vec![other.value_type()],
        }
    }
}

/// A field of a [`TypeDescription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
    /// Identifier in snake case.
    pub name: String,
    /// Positive id, unique within the declaring type.
    pub field_id: FieldId,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescription {
    pub fn new(name: impl Into<String>, field_id: FieldId, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            field_id,
            kind,
        }
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.kind.multiplicity()
    }
}

/// A named value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: u32,
}

/// An enum definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDefinition {
    pub qualified_name: String,
    pub values: Vec<EnumValue>,
}

impl EnumDefinition {
    /// The local (last segment) name.
    pub fn name(&self) -> &str {
        local_name(&self.qualified_name)
    }
}

/// An event declared by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub name: String,
    pub index: u32,
    /// Qualified name of the payload type.
    pub payload: String,
}

/// A command declared by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub index: u32,
    /// Qualified name of the request type.
    pub request: String,
    /// Qualified name of the response type.
    pub response: String,
}

/// Component metadata. Present on a [`TypeDescription`] iff it is a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub id: ComponentId,
    #[serde(default)]
    pub events: Vec<EventDefinition>,
    #[serde(default)]
    pub commands: Vec<CommandDefinition>,
}

/// A logical record or component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescription {
    pub qualified_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescription>,
    /// Qualified names of the directly nested types, in declaration order.
    #[serde(default)]
    pub nested_types: Vec<String>,
    /// Qualified names of the directly nested enums, in declaration order.
    #[serde(default)]
    pub nested_enums: Vec<String>,
    #[serde(default)]
    pub component: Option<ComponentDefinition>,
}

impl TypeDescription {
    /// Create a plain record with no fields.
    pub fn record(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            fields: Vec::new(),
            nested_types: Vec::new(),
            nested_enums: Vec::new(),
            component: None,
        }
    }

    /// Create a component with no fields, events or commands.
    pub fn component(qualified_name: impl Into<String>, id: ComponentId) -> Self {
        Self {
            component: Some(ComponentDefinition {
                id,
                events: Vec::new(),
                commands: Vec::new(),
            }),
            ..Self::record(qualified_name)
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescription) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_nested_type(mut self, qualified_name: impl Into<String>) -> Self {
        self.nested_types.push(qualified_name.into());
        self
    }

    #[must_use]
    pub fn with_nested_enum(mut self, qualified_name: impl Into<String>) -> Self {
        self.nested_enums.push(qualified_name.into());
        self
    }

    /// Add an event. No-op on plain records.
    #[must_use]
    pub fn with_event(mut self, event: EventDefinition) -> Self {
        if let Some(component) = self.component.as_mut() {
            component.events.push(event);
        }
        self
    }

    /// Add a command. No-op on plain records.
    #[must_use]
    pub fn with_command(mut self, command: CommandDefinition) -> Self {
        if let Some(component) = self.component.as_mut() {
            component.commands.push(command);
        }
        self
    }

    /// The local (last segment) name.
    pub fn name(&self) -> &str {
        local_name(&self.qualified_name)
    }

    pub fn is_component(&self) -> bool {
        self.component.is_some()
    }

    pub fn component_id(&self) -> Option<ComponentId> {
        self.component.as_ref().map(|c| c.id)
    }

    pub fn events(&self) -> &[EventDefinition] {
        self.component
            .as_ref()
            .map(|c| c.events.as_slice())
            .unwrap_or_default()
    }

    pub fn commands(&self) -> &[CommandDefinition] {
        self.component
            .as_ref()
            .map(|c| c.commands.as_slice())
            .unwrap_or_default()
    }

    pub fn field(&self, field_id: FieldId) -> Option<&FieldDescription> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }
}

/// Location of a definition in the schema sources, used for provenance comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    pub file_path: String,
    pub line: u32,
    pub column: u32,
}

/// Serialized form of a bundle, as produced by the schema loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDefinition {
    #[serde(default)]
    pub types: Vec<TypeDescription>,
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,
    #[serde(default)]
    pub source_references: HashMap<String, SourceReference>,
}

/// Immutable registry of every type, component and enum of a generation run.
#[derive(Debug, Clone)]
pub struct Bundle {
    types: Vec<TypeDescription>,
    enums: Vec<EnumDefinition>,
    type_index: HashMap<String, usize>,
    enum_index: HashMap<String, usize>,
    outers: HashMap<String, String>,
    sources: HashMap<String, SourceReference>,
}

impl Bundle {
    /// Index a bundle definition, validating its structure.
    pub fn new(definition: BundleDefinition) -> Result<Self, BundleError> {
        let BundleDefinition {
            types,
            enums,
            source_references,
        } = definition;

        let mut type_index = HashMap::with_capacity(types.len());
        let mut enum_index = HashMap::with_capacity(enums.len());

        for (index, ty) in types.iter().enumerate() {
            if type_index.insert(ty.qualified_name.clone(), index).is_some() {
                return Err(BundleError::DuplicateName(ty.qualified_name.clone()));
            }
        }
        for (index, def) in enums.iter().enumerate() {
            if type_index.contains_key(&def.qualified_name)
                || enum_index.insert(def.qualified_name.clone(), index).is_some()
            {
                return Err(BundleError::DuplicateName(def.qualified_name.clone()));
            }
        }

        let mut outers: HashMap<String, String> = HashMap::new();
        let mut component_ids: HashMap<ComponentId, &str> = HashMap::new();

        for ty in &types {
            let nested = ty
                .nested_types
                .iter()
                .map(|name| (name, type_index.contains_key(name)))
                .chain(
                    ty.nested_enums
                        .iter()
                        .map(|name| (name, enum_index.contains_key(name))),
                );

            for (name, known) in nested {
                if !known {
                    return Err(BundleError::UnknownNested {
                        outer: ty.qualified_name.clone(),
                        nested: name.clone(),
                    });
                }
                if let Some(previous) = outers.insert(name.clone(), ty.qualified_name.clone()) {
                    return Err(BundleError::NestedTwice {
                        nested: name.clone(),
                        first: previous,
                        second: ty.qualified_name.clone(),
                    });
                }
            }

            if let Some(id) = ty.component_id() {
                if let Some(previous) = component_ids.insert(id, &ty.qualified_name) {
                    return Err(BundleError::DuplicateComponentId {
                        id,
                        first: previous.to_string(),
                        second: ty.qualified_name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            types,
            enums,
            type_index,
            enum_index,
            outers,
            sources: source_references,
        })
    }

    /// Parse and index a bundle from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let definition: BundleDefinition = serde_json::from_str(json)?;
        Self::new(definition)
    }

    pub fn type_description(&self, qualified_name: &str) -> Option<&TypeDescription> {
        self.type_index
            .get(qualified_name)
            .map(|&index| &self.types[index])
    }

    pub fn enum_definition(&self, qualified_name: &str) -> Option<&EnumDefinition> {
        self.enum_index
            .get(qualified_name)
            .map(|&index| &self.enums[index])
    }

    pub fn source_reference(&self, qualified_name: &str) -> Option<&SourceReference> {
        self.sources.get(qualified_name)
    }

    /// All types and components, in bundle order.
    pub fn types(&self) -> &[TypeDescription] {
        &self.types
    }

    /// All enums, in bundle order.
    pub fn enums(&self) -> &[EnumDefinition] {
        &self.enums
    }

    /// Qualified name of the type declaring `qualified_name`, if it is nested.
    pub fn outer_type(&self, qualified_name: &str) -> Option<&str> {
        self.outers.get(qualified_name).map(String::as_str)
    }

    pub fn is_nested(&self, qualified_name: &str) -> bool {
        self.outers.contains_key(qualified_name)
    }

    /// The outermost type enclosing `qualified_name` (itself when top-level).
    pub fn top_level_type_of<'a>(&'a self, qualified_name: &'a str) -> &'a str {
        let mut current = qualified_name;
        while let Some(outer) = self.outer_type(current) {
            current = outer;
        }
        current
    }

    /// Namespace segments of a type or enum: those of its top-level type minus the local name.
    pub fn namespace_of(&self, qualified_name: &str) -> Vec<String> {
        let top = self.top_level_type_of(qualified_name);
        let mut segments: Vec<String> = top.split('.').map(str::to_string).collect();
        segments.pop();
        segments
    }

    /// Types that are not nested in another type, in bundle order.
    pub fn top_level_types(&self) -> impl Iterator<Item = &TypeDescription> {
        self.types
            .iter()
            .filter(|ty| !self.is_nested(&ty.qualified_name))
    }

    /// Enums that are not nested in a type, in bundle order.
    pub fn top_level_enums(&self) -> impl Iterator<Item = &EnumDefinition> {
        self.enums
            .iter()
            .filter(|def| !self.is_nested(&def.qualified_name))
    }
}

fn local_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(qualified_name)
}

#[cfg(test)]
#[path = "bundle/bundle_tests.rs"]
mod bundle_tests;
