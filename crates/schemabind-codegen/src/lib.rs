//! Code generation from schema bundles.
//!
//! This crate turns a [`Bundle`](schemabind_core::Bundle) of logical records,
//! components and enums into C++ units that define accessor classes and
//! serialize them against the SpatialOS schema object API.
//!
//! # Architecture
//!
//! Generation is a one-way pipeline per top-level type:
//!
//! ```text
//! Bundle
//!     ↓
//!  [Type Graph Resolver]      local types, includes, emission order
//!     ↓
//!  [Field Type Mapper]        native type of every field
//!     ↓
//!  [Field Codec]              per-field read/write code
//!     ↓
//!  ├─→ [Record/Component Emitter] → classes, Update, Commands
//!  ├─→ [Hash Emitter]             → GetTypeHash
//!     ↓
//!  [File Assembler] → <ns>/<Type>.h, <ns>/<Type>.cpp, helper units
//! ```
//!
//! Top-level types share nothing but the read-only bundle, so the assembler
//! generates them on parallel worker threads.
//!
//! # Usage
//!
//! ```rust
//! use schemabind_codegen::generate_files;
//! use schemabind_core::{Bundle, GeneratorConfig};
//!
//! let bundle = Bundle::from_json(r#"{
//!     "types": [{
//!         "qualifiedName": "improbable.Position",
//!         "fields": [
//!             { "name": "x", "fieldId": 1, "multiplicity": "singular",
//!               "value": { "kind": "primitive", "name": "int32" } }
//!         ],
//!         "component": { "id": 42 }
//!     }]
//! }"#).unwrap();
//!
//! let files = generate_files(&bundle, &GeneratorConfig::default()).unwrap();
//! assert!(files.iter().any(|f| f.path == "improbable/Position.h"));
//! ```
//!
//! # See Also
//!
//! - [`resolver`] for emission ordering and cycle handling
//! - [`serialization`] for the wire contract of each multiplicity
//! - [`component`] for the Update three-state contract

pub mod assembler;
pub mod component;
pub mod cpp_types;
pub mod emitter;
pub mod enums;
pub mod hash;
pub mod helpers;
pub mod naming;
pub mod record;
pub mod resolver;
pub mod serialization;
pub mod text;

pub use assembler::{GeneratedFile, GenerationReport, generate_enum, generate_files, generate_report, generate_type};
pub use cpp_types::{CppType, TypeMapper};
pub use emitter::Emitter;
pub use resolver::{ResolvedType, resolve};
pub use serialization::FieldCodec;
