//! Record and component encoding
//!
//! Writes and reads [`Record`]s through a [`SchemaObject`] exactly as the
//! generated `Serialize`/`Deserialize` pair does:
//!
//! | Multiplicity | Write | Read |
//! |--------------|-------|------|
//! | Singular | one value | count must be 1 |
//! | Option | zero or one value | count must be at most 1 |
//! | List | one value per element, in order | every indexed value |
//! | Map | one pair object per entry (key = 1, value = 2) | every pair; last duplicate key wins |
//!
//! Any malformed field fails the whole record, and a failing nested record
//! fails its enclosing record.

use crate::error::DecodeError;
use crate::schema_object::{ComponentData, SchemaObject, SchemaValue};
use crate::value::{FieldValue, MAX_DEPTH, Record, Value, insert_entry};
use schemabind_core::{
    Bundle, ComponentId, FieldDescription, FieldId, FieldKind, MAP_KEY_FIELD_ID, MAP_VALUE_FIELD_ID,
    PrimitiveType, TypeDescription, ValueType,
};

/// Write every field of a record into `object`.
pub fn encode_record(record: &Record, object: &mut SchemaObject) {
    for field in &record.fields {
        encode_field(object, field.field_id, &field.value);
    }
}

/// Read a record of `type_name` from `object`.
pub fn decode_record(bundle: &Bundle, type_name: &str, object: &SchemaObject) -> Result<Record, DecodeError> {
    decode_record_at(bundle, type_name, object, 0)
}

/// Initial component data for a component record.
pub fn encode_component(bundle: &Bundle, record: &Record) -> Result<ComponentData, DecodeError> {
    let (_, component_id) = component_type(bundle, &record.type_name)?;
    let mut data = ComponentData::new(component_id);
    encode_record(record, data.fields_mut());
    Ok(data)
}

/// Read a component record of `type_name` from its initial data.
pub fn decode_component(bundle: &Bundle, type_name: &str, data: &ComponentData) -> Result<Record, DecodeError> {
    component_type(bundle, type_name)?;
    decode_record(bundle, type_name, data.fields())
}

pub(crate) fn component_type<'a>(
    bundle: &'a Bundle,
    type_name: &str,
) -> Result<(&'a TypeDescription, ComponentId), DecodeError> {
    let ty = bundle
        .type_description(type_name)
        .ok_or_else(|| DecodeError::UnknownType(type_name.to_string()))?;
    let id = ty
        .component_id()
        .ok_or_else(|| DecodeError::NotAComponent(type_name.to_string()))?;
    Ok((ty, id))
}

pub(crate) fn encode_field(object: &mut SchemaObject, field_id: FieldId, value: &FieldValue) {
    match value {
        FieldValue::Singular(value) => add_value(object, field_id, value),
        FieldValue::Option(value) => {
            if let Some(value) = value {
                add_value(object, field_id, value);
            }
        }
        FieldValue::List(values) => {
            for value in values {
                add_value(object, field_id, value);
            }
        }
        FieldValue::Map(entries) => {
            for (key, value) in entries {
                let mut pair = SchemaObject::new();
                add_value(&mut pair, MAP_KEY_FIELD_ID, key);
                add_value(&mut pair, MAP_VALUE_FIELD_ID, value);
                object.add_object(field_id, pair);
            }
        }
    }
}

fn add_value(object: &mut SchemaObject, field_id: FieldId, value: &Value) {
    let wire = match value {
        Value::Bool(v) => SchemaValue::Bool(*v),
        Value::Uint32(v) => SchemaValue::Uint32(*v),
        Value::Uint64(v) => SchemaValue::Uint64(*v),
        Value::Int32(v) => SchemaValue::Int32(*v),
        Value::Int64(v) => SchemaValue::Int64(*v),
        Value::Float(v) => SchemaValue::Float(*v),
        Value::Double(v) => SchemaValue::Double(*v),
        Value::String(v) => SchemaValue::Bytes(v.as_bytes().to_vec()),
        Value::Bytes(v) => SchemaValue::Bytes(v.clone()),
        Value::EntityId(v) => SchemaValue::EntityId(*v),
        Value::Enum(v) => SchemaValue::Enum(*v),
        Value::Record(record) => {
            let mut child = SchemaObject::new();
            encode_record(record, &mut child);
            SchemaValue::Object(child)
        }
    };
    object.add(field_id, wire);
}

pub(crate) fn decode_record_at(
    bundle: &Bundle,
    type_name: &str,
    object: &SchemaObject,
    depth: usize,
) -> Result<Record, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::RecursionLimit(type_name.to_string()));
    }
    let ty = bundle
        .type_description(type_name)
        .ok_or_else(|| DecodeError::UnknownType(type_name.to_string()))?;

    let mut record = Record::new(type_name);
    for field in &ty.fields {
        let value = decode_field(bundle, ty, field, object, depth)?;
        record = record.with_field(field.name.clone(), field.field_id, value);
    }
    Ok(record)
}

/// Read one field of `ty` from `object`.
pub(crate) fn decode_field(
    bundle: &Bundle,
    ty: &TypeDescription,
    field: &FieldDescription,
    object: &SchemaObject,
    depth: usize,
) -> Result<FieldValue, DecodeError> {
    let reader = Reader {
        bundle,
        type_name: &ty.qualified_name,
        field_id: field.field_id,
        depth,
    };
    let count = object.count(field.field_id);

    match &field.kind {
        FieldKind::Singular { value } => {
            if count != 1 {
                return Err(reader.unexpected_count(count, "exactly 1"));
            }
            Ok(FieldValue::Singular(reader.read(value, object.get(field.field_id))?))
        }
        FieldKind::Option { value } => match count {
            0 => Ok(FieldValue::Option(None)),
            1 => Ok(FieldValue::Option(Some(reader.read(value, object.get(field.field_id))?))),
            _ => Err(reader.unexpected_count(count, "at most 1")),
        },
        FieldKind::List { value } => (0..count)
            .map(|i| reader.read(value, object.index(field.field_id, i)))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::List),
        FieldKind::Map { key, value } => {
            let mut entries = Vec::new();
            for i in 0..count {
                let pair = match object.index(field.field_id, i) {
                    Some(SchemaValue::Object(pair)) => pair,
                    other => return Err(reader.mismatch("map entry object", other)),
                };
                if pair.count(MAP_KEY_FIELD_ID) != 1 {
                    return Err(reader.missing("key"));
                }
                if pair.count(MAP_VALUE_FIELD_ID) != 1 {
                    return Err(reader.missing("value"));
                }
                let map_key = reader.read(key, pair.get(MAP_KEY_FIELD_ID))?;
                let map_value = reader.read(value, pair.get(MAP_VALUE_FIELD_ID))?;
                insert_entry(&mut entries, map_key, map_value);
            }
            Ok(FieldValue::Map(entries))
        }
    }
}

struct Reader<'a> {
    bundle: &'a Bundle,
    type_name: &'a str,
    field_id: FieldId,
    depth: usize,
}

impl Reader<'_> {
    fn read(&self, value: &ValueType, wire: Option<&SchemaValue>) -> Result<Value, DecodeError> {
        match (value, wire) {
            (ValueType::Primitive(primitive), Some(wire)) => self.read_primitive(*primitive, wire),
            (ValueType::Enum(_), Some(SchemaValue::Enum(v))) => Ok(Value::Enum(*v)),
            (ValueType::Type(name), Some(SchemaValue::Object(object))) => {
                decode_record_at(self.bundle, name, object, self.depth + 1).map(Value::Record)
            }
            (ValueType::Enum(name) | ValueType::Type(name), other) => Err(self.mismatch(name, other)),
            (ValueType::Primitive(primitive), None) => Err(self.mismatch(&format!("{primitive:?}"), None)),
        }
    }

    fn read_primitive(&self, primitive: PrimitiveType, wire: &SchemaValue) -> Result<Value, DecodeError> {
        use PrimitiveType as P;

        Ok(match (primitive, wire) {
            (P::Bool, SchemaValue::Bool(v)) => Value::Bool(*v),
            (P::Uint32 | P::Fixed32, SchemaValue::Uint32(v)) => Value::Uint32(*v),
            (P::Uint64 | P::Fixed64, SchemaValue::Uint64(v)) => Value::Uint64(*v),
            (P::Int32 | P::Sint32 | P::Sfixed32, SchemaValue::Int32(v)) => Value::Int32(*v),
            (P::Int64 | P::Sint64 | P::Sfixed64, SchemaValue::Int64(v)) => Value::Int64(*v),
            (P::Float, SchemaValue::Float(v)) => Value::Float(*v),
            (P::Double, SchemaValue::Double(v)) => Value::Double(*v),
            (P::String, SchemaValue::Bytes(bytes)) => match String::from_utf8(bytes.clone()) {
                Ok(text) => Value::String(text),
                Err(_) => return Err(self.mismatch("utf-8 string", Some(wire))),
            },
            (P::Bytes, SchemaValue::Bytes(bytes)) => Value::Bytes(bytes.clone()),
            (P::EntityId, SchemaValue::EntityId(v)) => Value::EntityId(*v),
            (primitive, other) => return Err(self.mismatch(&format!("{primitive:?}"), Some(other))),
        })
    }

    fn mismatch(&self, expected: &str, found: Option<&SchemaValue>) -> DecodeError {
        DecodeError::TypeMismatch {
            type_name: self.type_name.to_string(),
            field_id: self.field_id,
            expected: expected.to_string(),
            found: found.map_or("nothing", SchemaValue::family),
        }
    }

    fn unexpected_count(&self, count: u32, expected: &'static str) -> DecodeError {
        DecodeError::UnexpectedCount {
            type_name: self.type_name.to_string(),
            field_id: self.field_id,
            count,
            expected,
        }
    }

    fn missing(&self, part: &'static str) -> DecodeError {
        DecodeError::MissingValue {
            type_name: self.type_name.to_string(),
            field_id: self.field_id,
            part,
        }
    }
}
