//! parcelgen-runtime - Executable model of the generated protocols
//!
//! Generated Java runs on a device; this crate runs the same statements on the
//! host. The binary and textual methods of a generated class are interpreted
//! straight from the [`parcelgen_core::ir`] statements, so encode/decode
//! properties can be checked without a JVM:
//!
//! - [`Parcel`]: positional byte container with Android's null conventions
//! - [`JsonObject`]: `org.json` lookup semantics over `serde_json`
//! - [`BinaryCodec`] / [`TextualCodec`]: statement interpreters behind the [`Codec`] trait
//!
//! # Example
//!
//! ```
//! use parcelgen_core::{ChildState, GenerationOptions, SchemaDescription, generate};
//! use parcelgen_runtime::{BinaryCodec, ClassRegistry, Codec, Instance, Value};
//!
//! let artifact = generate(
//!     &SchemaDescription::new("User").declare("String", "name"),
//!     &GenerationOptions::default(),
//!     ChildState::Missing,
//! )
//! .unwrap();
//! let registry = ClassRegistry::new().with(&artifact);
//! let codec = BinaryCodec::new(&registry);
//!
//! let user = Instance::new("User").with("name", Value::Str("Ann".into()));
//! let bytes = codec.encode(&user).unwrap();
//!
//! assert_eq!(codec.decode("User", &bytes).unwrap(), user);
//! ```

mod binary;
mod codec;
mod error;
mod json;
mod parcel;
mod registry;
mod textual;
mod value;

pub use binary::BinaryCodec;
pub use codec::Codec;
pub use error::{RuntimeError, RuntimeResult};
pub use json::JsonObject;
pub use parcel::Parcel;
pub use registry::ClassRegistry;
pub use textual::TextualCodec;
pub use value::{Instance, Value, parse_literal, zero_value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BinaryCodec, ClassRegistry, Codec, Instance, JsonObject, Parcel, RuntimeError,
        RuntimeResult, TextualCodec, Value,
    };
}
