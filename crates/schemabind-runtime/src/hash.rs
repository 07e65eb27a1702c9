//! Structural hashing
//!
//! Mirrors the emitted `GetTypeHash`: start at [`HASH_SEED`] and mix every
//! field in declaration order. Unset options contribute 0, list elements are
//! mixed one by one and map entries are summed so the result does not depend
//! on entry order; a key held twice counts once, with its last value. Positive and negative zero hash alike since they compare
//! equal.

use crate::value::{FieldValue, Record, Value, distinct_entries};
use schemabind_core::{HASH_SEED, mix_hash};

/// Hash of a record.
pub fn type_hash(record: &Record) -> u32 {
    record
        .fields
        .iter()
        .fold(HASH_SEED, |result, field| mix_field(result, &field.value))
}

/// Hash of a single value.
pub fn value_hash(value: &Value) -> u32 {
    match value {
        Value::Bool(v) => u32::from(*v),
        Value::Uint32(v) | Value::Enum(v) => *v,
        Value::Int32(v) => *v as u32,
        Value::Uint64(v) => wide_hash(*v),
        Value::Int64(v) | Value::EntityId(v) => wide_hash(*v as u64),
        Value::Float(v) => {
            if *v == 0.0 {
                0
            } else {
                v.to_bits()
            }
        }
        Value::Double(v) => {
            if *v == 0.0 {
                0
            } else {
                wide_hash(v.to_bits())
            }
        }
        Value::String(v) => bytes_hash(v.as_bytes()),
        Value::Bytes(v) => bytes_hash(v),
        Value::Record(record) => type_hash(record),
    }
}

/// Hash of a byte sequence, as the generated `GetBytesHash` helper.
pub fn bytes_hash(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(HASH_SEED, |result, byte| mix_hash(result, u32::from(*byte)))
}

fn mix_field(result: u32, value: &FieldValue) -> u32 {
    match value {
        FieldValue::Singular(value) => mix_hash(result, value_hash(value)),
        FieldValue::Option(value) => mix_hash(result, value.as_ref().map_or(0, value_hash)),
        FieldValue::List(values) => values
            .iter()
            .fold(result, |result, value| mix_hash(result, value_hash(value))),
        FieldValue::Map(entries) => {
            let map_hash = distinct_entries(entries).into_iter().fold(0u32, |sum, (key, value)| {
                sum.wrapping_add(mix_hash(value_hash(key), value_hash(value)))
            });
            mix_hash(result, map_hash)
        }
    }
}

fn wide_hash(value: u64) -> u32 {
    (value as u32).wrapping_add(((value >> 32) as u32).wrapping_mul(23))
}
