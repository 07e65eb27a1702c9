//! schemabind-core - Bundle model, errors and configuration
//!
//! This crate provides the foundational types shared by the schemabind generator
//! and its reference runtime:
//! - [`Bundle`] read-only registry of logical types, components and enums
//! - [`GenerateError`] and [`BundleError`] for error handling
//! - [`GeneratorConfig`] for generator configuration
//! - [`HASH_SEED`] / [`HASH_MULTIPLIER`] shared by emitted and reference hashing

mod bundle;
mod config;
mod error;

pub use bundle::{
    Bundle, BundleDefinition, CommandDefinition, ComponentDefinition, ComponentId, EnumDefinition,
    EnumValue, EventDefinition, FieldDescription, FieldId, FieldKind, Multiplicity, PrimitiveType,
    SourceReference, TypeDescription, ValueType,
};
pub use config::{ContainerNames, GeneratorConfig};
pub use error::{BundleError, GenerateError, GenerateResult};

/// Starting value of every structural hash.
pub const HASH_SEED: u32 = 1327;

/// Per-field multiplier of the structural hash (`result = result * M + hash(field)`).
pub const HASH_MULTIPLIER: u32 = 977;

/// Field id of the key inside a map pair object.
pub const MAP_KEY_FIELD_ID: FieldId = 1;

/// Field id of the value inside a map pair object.
pub const MAP_VALUE_FIELD_ID: FieldId = 2;

/// Mix one field hash into a running structural hash.
pub fn mix_hash(result: u32, field_hash: u32) -> u32 {
    result.wrapping_mul(HASH_MULTIPLIER).wrapping_add(field_hash)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Bundle, FieldDescription, FieldKind, GenerateError, GenerateResult, GeneratorConfig,
        Multiplicity, PrimitiveType, TypeDescription, ValueType,
    };
}
