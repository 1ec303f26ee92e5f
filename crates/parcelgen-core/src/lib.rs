//! parcelgen-core - Type taxonomy, property model and protocol emitters
//!
//! This crate turns a declarative property schema into an abstract description of a
//! generated class that implements two serialization protocols for the same object:
//!
//! - a positional binary protocol (`writeToParcel` / `readFromParcel`)
//! - a textual key/value protocol (`readFromJson` / `writeJSON`)
//!
//! The pipeline is pure: no file I/O, no shared state.
//!
//! ```text
//! SchemaDescription + GenerationOptions
//!     ↓
//!  [ClassSchema::build]   (taxonomy resolved once per property)
//!     ↓
//!  [Assembler]  ──→ binary / textual / accessor emitters
//!     ↓
//!  GeneratedArtifact (CompilationUnit IR, rendered by an external printer)
//! ```
//!
//! # Example
//!
//! ```
//! use parcelgen_core::{ChildState, GenerationOptions, SchemaDescription, generate};
//!
//! let description = SchemaDescription::new("User")
//!     .declare("String", "name")
//!     .declare("Integer", "age");
//! let mut options = GenerationOptions::default();
//! options.default_values.insert("age".into(), "0".into());
//!
//! let artifact = generate(&description, &options, ChildState::Missing).unwrap();
//!
//! assert_eq!(artifact.base.class.name, "_User");
//! assert!(artifact.child.is_some());
//! ```

mod assemble;
mod error;
mod model;
mod options;

pub mod emit;
pub mod ir;
pub mod jvm_types;
pub mod naming;
pub mod taxonomy;

pub use assemble::{Assembler, ChildState, generate};
pub use error::{GenError, GenResult};
pub use ir::{CompilationUnit, GeneratedArtifact};
pub use jvm_types::{ListShape, ScalarKind};
pub use model::{ClassSchema, Declaration, Property, SchemaDescription};
pub use options::{ConstructorSpec, FieldOrder, GenerationOptions};
pub use taxonomy::{PropertyCategory, classify, normalize_type_token};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Assembler, ChildState, ClassSchema, GenError, GenResult, GeneratedArtifact,
        GenerationOptions, PropertyCategory, SchemaDescription, generate,
    };
}
