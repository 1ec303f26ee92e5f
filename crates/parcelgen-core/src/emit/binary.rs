//! Binary protocol emitter.
//!
//! Write and read sequences are both projected from one [`plan`], so the Nth
//! write statement and the Nth read statement are the same [`Slot`].
//!
//! # Slot Order
//!
//! 1. Parent delegation, when the class has a parent
//! 2. One slot per non-transient property in canonical order, except that
//!    all native `boolean` members collapse into a single packed array slot at
//!    the position of the first one
//!
//! Packed boolean indices follow declaration order. Inserting a boolean between
//! existing ones shifts the index of every later boolean, so previously
//! persisted parcels no longer line up.

use crate::ir::{FieldRef, ReadStmt, Slot, Wire, WriteStmt};
use crate::model::{ClassSchema, Property};
use crate::taxonomy::PropertyCategory;

/// Compute the binary field sequence of a schema.
pub fn plan(schema: &ClassSchema) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(schema.len() + 1);

    if schema.parent().is_some() {
        slots.push(Slot::Parent);
    }

    let mut packed_done = false;
    for property in schema.properties().filter(|p| !p.transient) {
        if !property.category.is_packed_boolean() {
            slots.push(Slot::Field {
                wire: wire_for(property),
                field: property.field_ref(),
            });
            continue;
        }
        if packed_done {
            continue;
        }
        packed_done = true;

        let packed: Vec<FieldRef> = schema
            .properties()
            .filter(|p| !p.transient && p.category.is_packed_boolean())
            .map(Property::field_ref)
            .collect();
        slots.push(Slot::BooleanArray(packed));
    }

    slots
}

/// `writeToParcel` statements.
pub fn write(schema: &ClassSchema) -> Vec<WriteStmt> {
    plan(schema)
}

/// `readFromParcel` statements.
pub fn read(schema: &ClassSchema) -> Vec<ReadStmt> {
    plan(schema)
}

fn wire_for(property: &Property) -> Wire {
    match &property.category {
        PropertyCategory::NativeScalar { kind } => Wire::Native(*kind),
        PropertyCategory::BoxedScalar { kind } => Wire::Value(kind.boxed_name().to_string()),
        PropertyCategory::DateScalar => Wire::DateMillis,
        PropertyCategory::UriScalar => Wire::Uri,
        PropertyCategory::ListOfString { .. } => Wire::StringList,
        PropertyCategory::ListOfBoxed { .. } => Wire::Serializable(property.ty.clone()),
        PropertyCategory::ListOfReference { elem, .. } => Wire::TypedList(elem.clone()),
        PropertyCategory::SerializableReference { ty } => Wire::Serializable(ty.clone()),
        PropertyCategory::PlainReference { ty } => Wire::Parcelable(ty.clone()),
    }
}
