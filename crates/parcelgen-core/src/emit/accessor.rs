//! Storage fields and getter/setter pairs.
//!
//! | Member | Field | Getter | Setter |
//! |--------|-------|--------|--------|
//! | `name` | `mName` | `getName` | `setName` |
//! | `boolean isClosed` | `mIsClosed` | `isClosed` | `setIsClosed` |
//! | `Boolean isOpen` | `mIsOpen` | `getIsOpen` | `setIsOpen` |

use crate::ir::{Accessor, FieldDecl, Member};
use crate::model::{ClassSchema, Property};
use crate::naming::capitalize;

/// One storage field per property, in canonical order.
pub fn fields(schema: &ClassSchema) -> Vec<Member> {
    schema
        .properties()
        .map(|p| {
            Member::Field(FieldDecl {
                field: p.field_ref(),
                ty: p.ty.clone(),
                category: p.category.clone(),
                transient: p.transient,
            })
        })
        .collect()
}

/// Getter/setter pair per property, in canonical order.
pub fn accessors(schema: &ClassSchema) -> Vec<Member> {
    schema
        .properties()
        .flat_map(|p| {
            let accessor = |name: String| Accessor {
                name,
                ty: p.ty.clone(),
                field: p.field_ref(),
            };
            [
                Member::Getter(accessor(getter_name(p))),
                Member::Setter(accessor(setter_name(&p.name))),
            ]
        })
        .collect()
}

/// `get` + capitalized name, except native booleans whose name already starts
/// with `is` (`isClosed`, `island`), which keep it.
pub fn getter_name(property: &Property) -> String {
    if property.category.is_packed_boolean() && property.name.starts_with("is") {
        return property.name.clone();
    }
    format!("get{}", capitalize(&property.name))
}

pub fn setter_name(member: &str) -> String {
    format!("set{}", capitalize(member))
}

#[cfg(test)]
#[path = "accessor/accessor_tests.rs"]
mod accessor_tests;
