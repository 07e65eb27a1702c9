//! In-memory schema objects
//!
//! Models the binary schema object API the generated bindings are written
//! against: values are appended per field id, counted, fetched by index and
//! read back as the last value added. Component updates additionally carry an
//! events object and the list of explicitly cleared field ids.

use schemabind_core::{ComponentId, FieldId};
use std::collections::{BTreeMap, BTreeSet};

/// A single wire value.
///
/// Strings travel as [`SchemaValue::Bytes`]. The signed, zig-zag and fixed
/// integer encodings share the in-memory form of their width.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaValue {
    Bool(bool),
    Uint32(u32),
    Uint64(u64),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    EntityId(i64),
    Enum(u32),
    Object(SchemaObject),
}

impl SchemaValue {
    /// Name of the accessor family, for diagnostics.
    pub fn family(&self) -> &'static str {
        match self {
            SchemaValue::Bool(_) => "bool",
            SchemaValue::Uint32(_) => "uint32",
            SchemaValue::Uint64(_) => "uint64",
            SchemaValue::Int32(_) => "int32",
            SchemaValue::Int64(_) => "int64",
            SchemaValue::Float(_) => "float",
            SchemaValue::Double(_) => "double",
            SchemaValue::Bytes(_) => "bytes",
            SchemaValue::EntityId(_) => "entity id",
            SchemaValue::Enum(_) => "enum",
            SchemaValue::Object(_) => "object",
        }
    }
}

/// Field id keyed bag of wire values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaObject {
    fields: BTreeMap<FieldId, Vec<SchemaValue>>,
}

impl SchemaObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to a field.
    pub fn add(&mut self, field_id: FieldId, value: SchemaValue) {
        self.fields.entry(field_id).or_default().push(value);
    }

    /// Append a child object to a field.
    pub fn add_object(&mut self, field_id: FieldId, object: SchemaObject) {
        self.add(field_id, SchemaValue::Object(object));
    }

    /// Number of values held by a field.
    pub fn count(&self, field_id: FieldId) -> u32 {
        self.fields
            .get(&field_id)
            .map_or(0, |values| values.len() as u32)
    }

    /// The last value added to a field.
    pub fn get(&self, field_id: FieldId) -> Option<&SchemaValue> {
        self.fields.get(&field_id).and_then(|values| values.last())
    }

    /// The value at `index` within a field.
    pub fn index(&self, field_id: FieldId, index: u32) -> Option<&SchemaValue> {
        self.fields
            .get(&field_id)
            .and_then(|values| values.get(index as usize))
    }

    /// Ids of every field holding at least one value, ascending.
    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Initial state of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentData {
    pub component_id: ComponentId,
    fields: SchemaObject,
}

impl ComponentData {
    pub fn new(component_id: ComponentId) -> Self {
        Self {
            component_id,
            fields: SchemaObject::new(),
        }
    }

    pub fn fields(&self) -> &SchemaObject {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut SchemaObject {
        &mut self.fields
    }
}

/// A component delta: changed fields, events and cleared field ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentUpdate {
    pub component_id: ComponentId,
    fields: SchemaObject,
    events: SchemaObject,
    cleared: BTreeSet<FieldId>,
}

impl ComponentUpdate {
    pub fn new(component_id: ComponentId) -> Self {
        Self {
            component_id,
            fields: SchemaObject::new(),
            events: SchemaObject::new(),
            cleared: BTreeSet::new(),
        }
    }

    pub fn fields(&self) -> &SchemaObject {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut SchemaObject {
        &mut self.fields
    }

    /// Event payloads, keyed by event index.
    pub fn events(&self) -> &SchemaObject {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut SchemaObject {
        &mut self.events
    }

    /// Mark a field as explicitly cleared.
    pub fn add_cleared_field(&mut self, field_id: FieldId) {
        self.cleared.insert(field_id);
    }

    pub fn is_cleared(&self, field_id: FieldId) -> bool {
        self.cleared.contains(&field_id)
    }

    /// Cleared field ids, ascending.
    pub fn cleared_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.cleared.iter().copied()
    }

    /// No changed fields, no events and nothing cleared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.events.is_empty() && self.cleared.is_empty()
    }
}
