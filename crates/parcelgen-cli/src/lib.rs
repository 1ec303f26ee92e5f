//! parcelgen-cli - Schema loading, Java rendering and output placement
//!
//! The `parcelgen` binary is a thin clap front end over these modules:
//!
//! ```text
//! .json / .yaml schema (+ optional generator config)
//!     ↓
//!  [schema::load]        → SchemaDescription + GenerationOptions
//!     ↓
//!  parcelgen_core::generate  → GeneratedArtifact
//!     ↓
//!  [java::render_unit]   → Java source text
//!     ↓
//!  [generate]            → stdout, a file, or <root>/<package path>/
//! ```

pub mod check;
pub mod config;
pub mod generate;
pub mod java;
pub mod logging;
pub mod schema;

pub use config::GeneratorConfig;
pub use generate::{ChildOutcome, Destination, Outcome};
pub use java::{SourceWriter, render_unit};
pub use schema::LoadedSchema;
