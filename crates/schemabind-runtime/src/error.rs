//! Error types for the reference runtime

use schemabind_core::{FieldId, Multiplicity};
use thiserror::Error;

/// A payload or record that does not match its type description
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A map pair object lacks its key or value
    #[error("{type_name}: map entry of field {field_id} has no {part}")]
    MissingValue {
        type_name: String,
        field_id: FieldId,
        part: &'static str,
    },

    /// A field holds a number of values its multiplicity forbids
    #[error("{type_name}: field {field_id} holds {count} value(s), expected {expected}")]
    UnexpectedCount {
        type_name: String,
        field_id: FieldId,
        count: u32,
        expected: &'static str,
    },

    /// A wire value of the wrong family
    #[error("{type_name}: field {field_id} holds {found}, expected {expected}")]
    TypeMismatch {
        type_name: String,
        field_id: FieldId,
        expected: String,
        found: &'static str,
    },

    /// A type or enum absent from the bundle
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Component operation on a plain record type
    #[error("{0} is not a component")]
    NotAComponent(String),

    /// By-value nesting deeper than the runtime follows
    #[error("{0}: nesting exceeds {limit} levels", limit = crate::value::MAX_DEPTH)]
    RecursionLimit(String),
}

/// Misuse of a record or component update
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// `to_initial_data` on an update with an unset slot
    #[error("{type_name}: field `{field}` is not set")]
    MissingField { type_name: String, field: String },

    /// No field of that name
    #[error("{type_name} has no field `{field}`")]
    UnknownField { type_name: String, field: String },

    /// No event of that name
    #[error("{type_name} has no event `{event}`")]
    UnknownEvent { type_name: String, event: String },

    /// A singular field has no cleared state
    #[error("{type_name}: singular field `{field}` cannot be cleared")]
    NotClearable { type_name: String, field: String },

    /// A value shaped for another multiplicity than the field's
    #[error("{type_name}: field `{field}` is {expected:?}, got a {found:?} value")]
    WrongMultiplicity {
        type_name: String,
        field: String,
        expected: Multiplicity,
        found: Multiplicity,
    },

    /// Update or value applied to a record of another type
    #[error("expected {expected}, found {found}")]
    WrongType { expected: String, found: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
