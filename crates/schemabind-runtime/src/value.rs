//! Dynamically typed records
//!
//! A [`Record`] mirrors an instance of a generated class: its fields appear in
//! declaration order, each holding a [`FieldValue`] shaped by the field's
//! multiplicity. Equality follows the generated `operator==`, with maps
//! compared independently of entry order.

use crate::error::{DecodeError, UpdateError};
use schemabind_core::{Bundle, FieldId, FieldKind, Multiplicity, PrimitiveType, ValueType};

/// Deepest by-value nesting followed when building or decoding records.
pub(crate) const MAX_DEPTH: usize = 64;

/// A single value held by a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Uint32(u32),
    Uint64(u64),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    EntityId(i64),
    Enum(u32),
    Record(Record),
}

impl Value {
    /// The value-initialised form of a value type.
    pub fn default_for(bundle: &Bundle, value: &ValueType) -> Result<Value, DecodeError> {
        default_value(bundle, value, 0)
    }
}

/// The contents of a field, by multiplicity.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Singular(Value),
    Option(Option<Value>),
    List(Vec<Value>),
    /// Entries in insertion order. A key listed twice counts once, with its
    /// last value, as when decoding duplicate pairs.
    Map(Vec<(Value, Value)>),
}

impl FieldValue {
    /// The empty value of a clearable multiplicity; singular fields have none.
    pub fn empty(multiplicity: Multiplicity) -> Option<FieldValue> {
        match multiplicity {
            Multiplicity::Singular => None,
            Multiplicity::Option => Some(FieldValue::Option(None)),
            Multiplicity::List => Some(FieldValue::List(Vec::new())),
            Multiplicity::Map => Some(FieldValue::Map(Vec::new())),
        }
    }

    pub fn multiplicity(&self) -> Multiplicity {
        match self {
            FieldValue::Singular(_) => Multiplicity::Singular,
            FieldValue::Option(_) => Multiplicity::Option,
            FieldValue::List(_) => Multiplicity::List,
            FieldValue::Map(_) => Multiplicity::Map,
        }
    }

    /// Whether an update slot holding this value is written as a cleared field.
    pub fn is_cleared(&self) -> bool {
        match self {
            FieldValue::Singular(_) => false,
            FieldValue::Option(value) => value.is_none(),
            FieldValue::List(values) => values.is_empty(),
            FieldValue::Map(entries) => entries.is_empty(),
        }
    }

    /// Insert a map entry, replacing the value of an existing key.
    ///
    /// Returns false on non-map values.
    pub fn insert(&mut self, key: Value, value: Value) -> bool {
        match self {
            FieldValue::Map(entries) => {
                insert_entry(entries, key, value);
                true
            }
            _ => false,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other)
    }
}

/// Field equality as emitted: element-wise for lists, by key for maps.
pub fn values_equal(lhs: &FieldValue, rhs: &FieldValue) -> bool {
    match (lhs, rhs) {
        (FieldValue::Singular(a), FieldValue::Singular(b)) => a == b,
        (FieldValue::Option(a), FieldValue::Option(b)) => a == b,
        (FieldValue::List(a), FieldValue::List(b)) => a == b,
        (FieldValue::Map(a), FieldValue::Map(b)) => {
            let (a, b) = (distinct_entries(a), distinct_entries(b));
            a.len() == b.len()
                && a.iter().all(|(key, value)| {
                    b.iter()
                        .find(|(other, _)| other == key)
                        .is_some_and(|(_, other)| other == value)
                })
        }
        _ => false,
    }
}

/// Map entries with one pair per key, the last pair of a key winning.
pub(crate) fn distinct_entries(entries: &[(Value, Value)]) -> Vec<(&Value, &Value)> {
    let mut distinct: Vec<(&Value, &Value)> = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match distinct.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => distinct.push((key, value)),
        }
    }
    distinct
}

pub(crate) fn insert_entry(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    match entries.iter_mut().find(|(existing, _)| *existing == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

/// A named field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub field_id: FieldId,
    pub value: FieldValue,
}

/// An instance of a record or component type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub type_name: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl Record {
    /// A record with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field_id: FieldId, value: FieldValue) -> Self {
        self.fields.push(Field {
            name: name.into(),
            field_id,
            value,
        });
        self
    }

    /// A record of `type_name` with every field value-initialised.
    pub fn default_for(bundle: &Bundle, type_name: &str) -> Result<Record, DecodeError> {
        default_record(bundle, type_name, 0)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    pub fn field(&self, field_id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|field| field.field_id == field_id)
    }

    /// Replace the value of a field with one of the same multiplicity.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), UpdateError> {
        let type_name = &self.type_name;
        let Some(field) = self.fields.iter_mut().find(|field| field.name == name) else {
            return Err(UpdateError::UnknownField {
                type_name: type_name.clone(),
                field: name.to_string(),
            });
        };
        check_multiplicity(type_name, name, field.value.multiplicity(), &value)?;
        field.value = value;
        Ok(())
    }
}

pub(crate) fn check_multiplicity(
    type_name: &str,
    field: &str,
    expected: Multiplicity,
    value: &FieldValue,
) -> Result<(), UpdateError> {
    let found = value.multiplicity();
    if found == expected {
        Ok(())
    } else {
        Err(UpdateError::WrongMultiplicity {
            type_name: type_name.to_string(),
            field: field.to_string(),
            expected,
            found,
        })
    }
}

pub(crate) fn default_record(bundle: &Bundle, type_name: &str, depth: usize) -> Result<Record, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::RecursionLimit(type_name.to_string()));
    }
    let ty = bundle
        .type_description(type_name)
        .ok_or_else(|| DecodeError::UnknownType(type_name.to_string()))?;

    let mut record = Record::new(type_name);
    for field in &ty.fields {
        let value = match &field.kind {
            FieldKind::Singular { value } => FieldValue::Singular(default_value(bundle, value, depth)?),
            FieldKind::Option { .. } => FieldValue::Option(None),
            FieldKind::List { .. } => FieldValue::List(Vec::new()),
            FieldKind::Map { .. } => FieldValue::Map(Vec::new()),
        };
        record = record.with_field(field.name.clone(), field.field_id, value);
    }
    Ok(record)
}

fn default_value(bundle: &Bundle, value: &ValueType, depth: usize) -> Result<Value, DecodeError> {
    Ok(match value {
        ValueType::Primitive(primitive) => match primitive {
            PrimitiveType::Bool => Value::Bool(false),
            PrimitiveType::Uint32 | PrimitiveType::Fixed32 => Value::Uint32(0),
            PrimitiveType::Uint64 | PrimitiveType::Fixed64 => Value::Uint64(0),
            PrimitiveType::Int32 | PrimitiveType::Sint32 | PrimitiveType::Sfixed32 => Value::Int32(0),
            PrimitiveType::Int64 | PrimitiveType::Sint64 | PrimitiveType::Sfixed64 => Value::Int64(0),
            PrimitiveType::Float => Value::Float(0.0),
            PrimitiveType::Double => Value::Double(0.0),
            PrimitiveType::String => Value::String(String::new()),
            PrimitiveType::Bytes => Value::Bytes(Vec::new()),
            PrimitiveType::EntityId => Value::EntityId(0),
        },
        ValueType::Enum(name) => {
            bundle
                .enum_definition(name)
                .ok_or_else(|| DecodeError::UnknownType(name.clone()))?;
            Value::Enum(0)
        }
        ValueType::Type(name) => Value::Record(default_record(bundle, name, depth + 1)?),
    })
}
