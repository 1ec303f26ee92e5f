//! Type taxonomy: classification of declared type tokens.
//!
//! Every declared property type resolves to exactly one [`PropertyCategory`],
//! once, when the schema is built. Both protocol emitters match on the category
//! exhaustively and never look at the raw token again.
//!
//! # Rules (in priority order)
//!
//! 1. Native scalar token (`int`, `boolean`, ...) → [`PropertyCategory::NativeScalar`]
//! 2. Boxed scalar token (`Integer`, `String`, ...) → [`PropertyCategory::BoxedScalar`]
//! 3. `Date` → [`PropertyCategory::DateScalar`], `Uri` → [`PropertyCategory::UriScalar`]
//! 4. `List<X>`, `ArrayList<X>` or `X[]` → one of the list categories
//! 5. Member of the serializables override set → [`PropertyCategory::SerializableReference`]
//! 6. Any other qualified name → [`PropertyCategory::PlainReference`]
//!
//! Anything else is a [`GenError::Classification`].

use crate::error::{GenError, GenResult};
use crate::jvm_types::{ListShape, ScalarKind};
use crate::naming::is_qualified_name;
use std::collections::BTreeSet;

/// Serialization strategy of a declared property type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    /// `int`, `long`, `boolean`, ...
    NativeScalar { kind: ScalarKind },

    /// `Integer`, `String`, ... (nullable)
    BoxedScalar { kind: ScalarKind },

    /// `java.util.Date`
    DateScalar,

    /// `android.net.Uri`
    UriScalar,

    /// `List<String>` / `ArrayList<String>`
    ListOfString { shape: ListShape },

    /// List of boxed scalars other than `String`
    ListOfBoxed { shape: ListShape, elem: ScalarKind },

    /// List of generated (or otherwise parcelable) types
    ListOfReference { shape: ListShape, elem: String },

    /// Type listed in the serializables override set
    SerializableReference { ty: String },

    /// Any other type, assumed to expose the same generated protocols
    PlainReference { ty: String },
}

impl PropertyCategory {
    /// Whether this category is one of the list categories.
    pub fn is_list(&self) -> bool {
        self.list_shape().is_some()
    }

    /// Collection shape of a list category.
    pub fn list_shape(&self) -> Option<ListShape> {
        match self {
            PropertyCategory::ListOfString { shape }
            | PropertyCategory::ListOfBoxed { shape, .. }
            | PropertyCategory::ListOfReference { shape, .. } => Some(*shape),
            _ => None,
        }
    }

    /// Element type name of a list category.
    pub fn list_element(&self) -> Option<&str> {
        match self {
            PropertyCategory::ListOfString { .. } => Some("String"),
            PropertyCategory::ListOfBoxed { elem, .. } => Some(elem.boxed_name()),
            PropertyCategory::ListOfReference { elem, .. } => Some(elem),
            _ => None,
        }
    }

    /// Native booleans are bit-packed into one array on the binary protocol.
    pub fn is_packed_boolean(&self) -> bool {
        matches!(
            self,
            PropertyCategory::NativeScalar {
                kind: ScalarKind::Boolean
            }
        )
    }

    /// Whether the category can hold null in the generated class.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, PropertyCategory::NativeScalar { kind } if kind.has_zero_default())
    }
}

/// Normalize the trailing-array sugar: `X[]` becomes `ArrayList<X>`.
///
/// Surrounding whitespace is trimmed; other tokens are returned unchanged.
pub fn normalize_type_token(token: &str) -> String {
    let token = token.trim();
    match token.strip_suffix("[]") {
        Some(elem) => ListShape::ArrayList.type_of(elem.trim()),
        None => token.to_string(),
    }
}

/// Classify a declared type token.
///
/// Pure: the same token and override set always produce the same category.
pub fn classify(token: &str, serializables: &BTreeSet<String>) -> GenResult<PropertyCategory> {
    let normalized = normalize_type_token(token);
    let token = normalized.as_str();

    if token.is_empty() {
        return Err(GenError::classification(token, "empty type"));
    }

    if let Some(kind) = ScalarKind::from_native(token) {
        return Ok(PropertyCategory::NativeScalar { kind });
    }
    if let Some(kind) = ScalarKind::from_boxed(token) {
        return Ok(PropertyCategory::BoxedScalar { kind });
    }
    match token {
        "Date" => return Ok(PropertyCategory::DateScalar),
        "Uri" => return Ok(PropertyCategory::UriScalar),
        _ => {}
    }

    if let Some((shape, elem)) = split_list(token)? {
        return classify_list(token, shape, elem);
    }

    if !is_qualified_name(token) {
        return Err(GenError::classification(token, "not a valid type name"));
    }

    if serializables.contains(token) {
        Ok(PropertyCategory::SerializableReference {
            ty: token.to_string(),
        })
    } else {
        Ok(PropertyCategory::PlainReference {
            ty: token.to_string(),
        })
    }
}

/// Split `List<X>` / `ArrayList<X>` into shape and element token.
fn split_list(token: &str) -> GenResult<Option<(ListShape, &str)>> {
    for shape in [ListShape::ArrayList, ListShape::List] {
        let Some(rest) = token
            .strip_prefix(shape.name())
            .and_then(|r| r.strip_prefix('<'))
        else {
            continue;
        };

        let elem = rest
            .strip_suffix('>')
            .ok_or_else(|| GenError::classification(token, "missing closing `>`"))?
            .trim();

        if elem.is_empty() {
            return Err(GenError::classification(token, "empty element type"));
        }
        return Ok(Some((shape, elem)));
    }

    Ok(None)
}

fn classify_list(token: &str, shape: ListShape, elem: &str) -> GenResult<PropertyCategory> {
    if elem.contains(['<', '>', '[', ']', ',']) {
        return Err(GenError::classification(
            token,
            format!("unsupported element type `{elem}`"),
        ));
    }
    if let Some(kind) = ScalarKind::from_native(elem) {
        return Err(GenError::classification(
            token,
            format!("native `{elem}` cannot be a list element, use `{}`", kind.boxed_name()),
        ));
    }
    if !is_qualified_name(elem) {
        return Err(GenError::classification(
            token,
            format!("`{elem}` is not a valid element type"),
        ));
    }

    Ok(match ScalarKind::from_boxed(elem) {
        Some(ScalarKind::String) => PropertyCategory::ListOfString { shape },
        Some(kind) => PropertyCategory::ListOfBoxed { shape, elem: kind },
        None => PropertyCategory::ListOfReference {
            shape,
            elem: elem.to_string(),
        },
    })
}
