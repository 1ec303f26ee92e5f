//! JVM scalar and collection vocabulary shared by the taxonomy and the emitters.
//!
//! # Scalar Tokens
//!
//! | Kind | Native token | Boxed token | Wire suffix |
//! |------|--------------|-------------|-------------|
//! | `String` | `string` | `String` | `String` |
//! | `Byte` | `byte` | `Byte` | `Byte` |
//! | `Double` | `double` | `Double` | `Double` |
//! | `Float` | `float` | `Float` | `Float` |
//! | `Int` | `int` | `Integer` | `Int` |
//! | `Long` | `long` | `Long` | `Long` |
//! | `Boolean` | `boolean` | `Boolean` | `Boolean` |
//!
//! The wire suffix names the typed Parcel/JSON accessor (`writeInt`, `optInt`, ...).

/// A scalar kind with a native and a boxed spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    String,
    Byte,
    Double,
    Float,
    Int,
    Long,
    Boolean,
}

impl ScalarKind {
    /// All kinds, in the order the native token set is declared.
    pub const ALL: [ScalarKind; 7] = [
        ScalarKind::String,
        ScalarKind::Byte,
        ScalarKind::Double,
        ScalarKind::Float,
        ScalarKind::Int,
        ScalarKind::Long,
        ScalarKind::Boolean,
    ];

    /// Look up a kind by its native token (`int`, `boolean`, ...).
    pub fn from_native(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.native_name() == token)
    }

    /// Look up a kind by its boxed token (`Integer`, `Boolean`, ...).
    pub fn from_boxed(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.boxed_name() == token)
    }

    pub fn native_name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Byte => "byte",
            ScalarKind::Double => "double",
            ScalarKind::Float => "float",
            ScalarKind::Int => "int",
            ScalarKind::Long => "long",
            ScalarKind::Boolean => "boolean",
        }
    }

    pub fn boxed_name(self) -> &'static str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::Byte => "Byte",
            ScalarKind::Double => "Double",
            ScalarKind::Float => "Float",
            ScalarKind::Int => "Integer",
            ScalarKind::Long => "Long",
            ScalarKind::Boolean => "Boolean",
        }
    }

    /// Suffix of the typed accessor methods for this kind.
    pub fn wire_suffix(self) -> &'static str {
        match self {
            ScalarKind::Int => "Int",
            other => other.boxed_name(),
        }
    }

    /// Numeric and boolean kinds have a safe zero value when a key is absent.
    pub fn has_zero_default(self) -> bool {
        !matches!(self, ScalarKind::String)
    }
}

/// Concrete collection shape named by a list type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListShape {
    /// `List<X>`
    List,
    /// `ArrayList<X>`, also the normalized form of `X[]`
    ArrayList,
}

impl ListShape {
    pub fn name(self) -> &'static str {
        match self {
            ListShape::List => "List",
            ListShape::ArrayList => "ArrayList",
        }
    }

    /// Fully-qualified import for the collection type.
    pub fn import(self) -> &'static str {
        match self {
            ListShape::List => "java.util.List",
            ListShape::ArrayList => "java.util.ArrayList",
        }
    }

    /// Spell the collection type for an element type.
    pub fn type_of(self, elem: &str) -> String {
        format!("{}<{}>", self.name(), elem)
    }
}
