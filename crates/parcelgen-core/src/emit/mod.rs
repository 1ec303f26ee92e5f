//! Statement emitters.
//!
//! Each emitter walks a [`ClassSchema`](crate::ClassSchema) in canonical order
//! and matches on the resolved [`PropertyCategory`](crate::PropertyCategory):
//!
//! - [`binary`]: symmetric `writeToParcel` / `readFromParcel` statements
//! - [`textual`]: guarded `readFromJson` and optional `writeJSON` statements
//! - [`accessor`]: storage fields and getter/setter pairs

pub mod accessor;
pub mod binary;
pub mod textual;
