//! Error types for bundle indexing and code generation

use crate::bundle::ComponentId;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors raised while indexing a bundle definition
#[derive(Error, Debug)]
pub enum BundleError {
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two definitions share a qualified name
    #[error("duplicate qualified name: {0}")]
    DuplicateName(String),

    /// A nested name does not resolve to a definition
    #[error("{outer} declares unknown nested definition {nested}")]
    UnknownNested { outer: String, nested: String },

    /// A definition is nested in more than one outer type
    #[error("{nested} is nested in both {first} and {second}")]
    NestedTwice {
        nested: String,
        first: String,
        second: String,
    },

    /// Two components share an id
    #[error("component id {id} is used by both {first} and {second}")]
    DuplicateComponentId {
        id: ComponentId,
        first: String,
        second: String,
    },
}

/// Errors raised while generating code for a type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Two members of a type convert to the same generated identifier
    #[error("{type_name}: `{first}` and `{second}` both convert to `{converted}`")]
    NameCollision {
        type_name: String,
        first: String,
        second: String,
        converted: String,
    },

    /// A member references a type or enum absent from the bundle
    #[error("{type_name}: {member} references {missing}, which is not in the bundle")]
    MissingType {
        type_name: String,
        member: String,
        missing: String,
    },

    /// Local types whose by-value references form a cycle
    #[error("{type_name}: no emittable order for {}; every cycle needs an indirect field", .types.join(", "))]
    UnorderableTypes {
        type_name: String,
        types: Vec<String>,
    },

    /// The requested type is not in the bundle
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// One or more types failed to generate
    #[error("generation failed for {} type(s)", .0.len())]
    Failed(Vec<GenerateError>),
}

impl GenerateError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            GenerateError::NameCollision { .. } => 1,
            GenerateError::MissingType { .. } => 2,
            GenerateError::UnorderableTypes { .. } => 3,
            GenerateError::UnknownType(_) => 4,
            GenerateError::Failed(_) => 5,
        }
    }

    /// Qualified name of the type the error is about, if it concerns a single type
    pub fn type_name(&self) -> Option<&str> {
        match self {
            GenerateError::NameCollision { type_name, .. }
            | GenerateError::MissingType { type_name, .. }
            | GenerateError::UnorderableTypes { type_name, .. } => Some(type_name),
            GenerateError::UnknownType(name) => Some(name),
            GenerateError::Failed(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
