//! schemabind-runtime - In-memory schema objects and reference evaluation
//!
//! This crate provides:
//! - [`SchemaObject`], [`ComponentData`] and [`ComponentUpdate`], an in-memory
//!   model of the binary schema object API the generated bindings target
//! - [`Record`], [`FieldValue`] and [`Value`] for dynamically typed records
//! - [`encode_record`] / [`decode_record`] and their component counterparts,
//!   following the same per-multiplicity wire contract as the generated code
//! - [`ComponentUpdateValue`] with unset, present and cleared field slots
//! - [`type_hash`] and [`values_equal`], matching the generated `GetTypeHash`
//!   and `operator==`

mod codec;
mod error;
mod hash;
mod schema_object;
mod update;
mod value;

pub use codec::{decode_component, decode_record, encode_component, encode_record};
pub use error::{DecodeError, UpdateError};
pub use hash::{bytes_hash, type_hash, value_hash};
pub use schema_object::{ComponentData, ComponentUpdate, SchemaObject, SchemaValue};
pub use update::ComponentUpdateValue;
pub use value::{Field, FieldValue, Record, Value, values_equal};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ComponentData, ComponentUpdate, ComponentUpdateValue, DecodeError, FieldValue, Record,
        SchemaObject, UpdateError, Value,
    };
}
