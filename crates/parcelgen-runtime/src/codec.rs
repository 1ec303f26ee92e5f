//! Codec trait shared by the binary and textual protocol interpreters.

use crate::error::RuntimeResult;
use crate::value::Instance;

/// Encodes instances of generated classes and decodes them back.
pub trait Codec {
    /// Encoded form (`Vec<u8>` for parcels, a JSON value for text)
    type Encoded;

    /// Encode with the instance's own class methods.
    fn encode(&self, instance: &Instance) -> RuntimeResult<Self::Encoded>;

    /// Decode into a fresh instance of `class`.
    fn decode(&self, class: &str, encoded: &Self::Encoded) -> RuntimeResult<Instance>;

    /// Short codec name for logging
    fn name(&self) -> &'static str;
}
