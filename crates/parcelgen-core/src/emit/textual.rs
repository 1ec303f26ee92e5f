//! Textual (JSON) protocol emitter.
//!
//! # Reader Guard Policy
//!
//! Native numeric and boolean members are read unguarded: the JSON access layer
//! already returns a zero value for a missing key. Every other member is wrapped
//! in a [`Stmt::Guard`] on "key present and non-null", because the access layer
//! returns the literal text `"null"` for a missing string key instead of
//! reporting absence.
//!
//! The guard's absent branch assigns, in order of precedence:
//!
//! 1. an empty collection of the declared shape, for list members
//! 2. the declared default literal
//! 3. `null`, for nullable members
//!
//! A native member with a declared default is guarded too, so the default wins
//! over the zero value. Required members skip the guard and are preceded by a
//! [`Stmt::Require`].
//!
//! # Writer
//!
//! The writer mirrors the reader. Nullable members are wrapped in a
//! [`Stmt::NullGuard`]; list members are emitted as a [`Stmt::Placeholder`]
//! and not written.

use crate::ir::{PutExpr, Stmt, TextExpr};
use crate::jvm_types::ListShape;
use crate::model::{ClassSchema, Property};
use crate::taxonomy::PropertyCategory;

/// `readFromJson` statements.
pub fn reader(schema: &ClassSchema) -> Vec<Stmt> {
    let mut stmts = Vec::with_capacity(schema.len());

    for property in schema.properties().filter(|p| !p.json_excluded) {
        let key = property.json_key.clone();

        if property.required {
            stmts.push(Stmt::Require { key });
            stmts.extend(decode(property));
        } else if needs_guard(property) {
            stmts.push(Stmt::Guard {
                key,
                then: decode(property),
                otherwise: absent(property),
            });
        } else {
            stmts.extend(decode(property));
        }
    }

    stmts
}

/// `writeJSON` statements.
pub fn writer(schema: &ClassSchema) -> Vec<Stmt> {
    schema
        .properties()
        .filter(|p| !p.json_excluded)
        .map(encode)
        .collect()
}

/// Whether the reader needs a presence guard for this member.
pub fn needs_guard(property: &Property) -> bool {
    property.default_value.is_some() || property.category.is_nullable()
}

/// Whether reading this member needs the `JSONArray` type in scope.
pub fn reads_json_array(property: &Property) -> bool {
    !property.json_excluded && matches!(property.category, PropertyCategory::ListOfBoxed { .. })
}

fn decode(property: &Property) -> Vec<Stmt> {
    let target = property.field_ref();
    let key = property.json_key.clone();

    let value = match &property.category {
        PropertyCategory::NativeScalar { kind } | PropertyCategory::BoxedScalar { kind } => {
            TextExpr::Opt { kind: *kind, key }
        }
        PropertyCategory::DateScalar => TextExpr::Timestamp { key },
        PropertyCategory::UriScalar => TextExpr::Uri { key },
        PropertyCategory::ListOfString { .. } => TextExpr::StringList { key },
        PropertyCategory::ListOfBoxed { elem, .. } => {
            return vec![
                Stmt::Assign {
                    target: target.clone(),
                    value: TextExpr::EmptyList {
                        shape: ListShape::ArrayList,
                        elem: elem.boxed_name().to_string(),
                    },
                },
                Stmt::Loop {
                    target,
                    key,
                    elem: *elem,
                },
            ];
        }
        PropertyCategory::ListOfReference { elem, .. } => TextExpr::ObjectList {
            key,
            elem: elem.clone(),
        },
        PropertyCategory::SerializableReference { ty } | PropertyCategory::PlainReference { ty } => {
            TextExpr::Object { ty: ty.clone(), key }
        }
    };

    vec![Stmt::Assign { target, value }]
}

fn absent(property: &Property) -> Vec<Stmt> {
    let value = if let (Some(shape), Some(elem)) = (
        property.category.list_shape(),
        property.category.list_element(),
    ) {
        TextExpr::EmptyList {
            shape,
            elem: elem.to_string(),
        }
    } else if let Some(literal) = &property.default_value {
        TextExpr::Literal(literal.clone())
    } else if property.category.is_nullable() {
        TextExpr::Null
    } else {
        return Vec::new();
    };

    vec![Stmt::Assign {
        target: property.field_ref(),
        value,
    }]
}

fn encode(property: &Property) -> Stmt {
    let target = property.field_ref();
    let key = property.json_key.clone();

    let value = match &property.category {
        PropertyCategory::NativeScalar { kind } if kind.has_zero_default() => {
            return Stmt::Put {
                key,
                value: PutExpr::Field(target),
            };
        }
        PropertyCategory::NativeScalar { .. } | PropertyCategory::BoxedScalar { .. } => {
            PutExpr::Field(target.clone())
        }
        PropertyCategory::DateScalar => PutExpr::EpochSeconds(target.clone()),
        PropertyCategory::UriScalar => PutExpr::UriString(target.clone()),
        PropertyCategory::ListOfString { .. }
        | PropertyCategory::ListOfBoxed { .. }
        | PropertyCategory::ListOfReference { .. } => {
            return Stmt::Placeholder { target };
        }
        PropertyCategory::SerializableReference { .. } | PropertyCategory::PlainReference { .. } => {
            PutExpr::Nested(target.clone())
        }
    };

    Stmt::NullGuard {
        target,
        then: vec![Stmt::Put { key, value }],
    }
}

#[cfg(test)]
#[path = "textual/textual_tests.rs"]
mod textual_tests;
