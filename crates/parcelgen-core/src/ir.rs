//! Intermediate representation of generated compilation units.
//!
//! The emitters describe *what* to generate with these types; a printer decides
//! *how* it is rendered as source text, and the runtime crate can execute the
//! protocol statements directly.
//!
//! # Structure
//!
//! - [`CompilationUnit`]: package, sorted imports, header and one [`ClassDecl`]
//! - [`Member`]: field declarations, constructors, accessors and protocol methods
//! - [`Slot`] ([`WriteStmt`] / [`ReadStmt`]): binary protocol positions, one [`Wire`] per member
//! - [`Stmt`]: textual protocol statements ([`Stmt::Guard`], [`Stmt::Loop`], ...)

use crate::jvm_types::{ListShape, ScalarKind};
use crate::naming::storage_name;
use crate::taxonomy::PropertyCategory;

/// Reference to a member and its storage field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    /// Member name (`reviewCount`)
    pub member: String,

    /// Storage field name (`mReviewCount`)
    pub storage: String,
}

impl FieldRef {
    pub fn new(member: &str) -> Self {
        Self {
            member: member.to_string(),
            storage: storage_name(member),
        }
    }
}

// ============================================================================
// Binary protocol
// ============================================================================

/// Wire representation of one member's binary slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wire {
    /// Typed scalar accessor (`writeInt` / `readInt`)
    Native(ScalarKind),

    /// Generic tagged value channel, nullable; carries the boxed type for the read cast
    Value(String),

    /// Date as epoch milliseconds, `Long.MIN_VALUE` for null
    DateMillis,

    /// `Uri` through the parcelable channel
    Uri,

    /// Dedicated string list primitives
    StringList,

    /// Opaque serializable blob; carries the declared type for the read cast
    Serializable(String),

    /// Element-wise typed list using the element type's `CREATOR`
    TypedList(String),

    /// Polymorphic parcelable reference; carries the declared type
    Parcelable(String),
}

/// One position of the binary field sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Delegation to the parent class
    Parent,

    /// All packed booleans as one array, in index order
    BooleanArray(Vec<FieldRef>),

    /// One member through its wire representation
    Field { wire: Wire, field: FieldRef },
}

impl Slot {
    pub fn field(wire: Wire, member: &str) -> Self {
        Slot::Field {
            wire,
            field: FieldRef::new(member),
        }
    }
}

/// `writeToParcel` statement.
pub type WriteStmt = Slot;

/// `readFromParcel` statement. Reads mirror the write plan slot for slot.
pub type ReadStmt = Slot;

// ============================================================================
// Textual protocol
// ============================================================================

/// Decode expression of the textual reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextExpr {
    /// Typed optional get (`json.optInt(key)`)
    Opt { kind: ScalarKind, key: String },

    /// `JsonUtil.parseTimestamp(json, key)`
    Timestamp { key: String },

    /// `Uri.parse(json.getString(key))`
    Uri { key: String },

    /// `JsonUtil.getStringList(json.optJSONArray(key))`
    StringList { key: String },

    /// `JsonUtil.parseJsonList(json.optJSONArray(key), Elem.CREATOR)`
    ObjectList { key: String, elem: String },

    /// `Type.CREATOR.parse(json.getJSONObject(key))`
    Object { ty: String, key: String },

    /// Empty collection of the declared shape
    EmptyList { shape: ListShape, elem: String },

    /// Declared default literal
    Literal(String),

    Null,
}

/// Value emitted by the textual writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutExpr {
    /// The field value itself
    Field(FieldRef),

    /// `date.getTime() / 1000`
    EpochSeconds(FieldRef),

    /// `String.valueOf(uri)`
    UriString(FieldRef),

    /// `nested.writeJSON()`
    Nested(FieldRef),
}

/// Textual protocol statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Assign {
        target: FieldRef,
        value: TextExpr,
    },

    /// Runs `then` when the key is present and non-null, `otherwise` if not
    Guard {
        key: String,
        then: Vec<Stmt>,
        otherwise: Vec<Stmt>,
    },

    /// Fails decoding when the key is absent or null
    Require { key: String },

    /// Appends each array element, coerced to `elem`, to the target list
    Loop {
        target: FieldRef,
        key: String,
        elem: ScalarKind,
    },

    /// Runs `then` when the field is non-null
    NullGuard { target: FieldRef, then: Vec<Stmt> },

    Put { key: String, value: PutExpr },

    /// Known gap: the member is not written (list categories)
    Placeholder { target: FieldRef },
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    /// `/* package */`
    Package,
}

/// Storage field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub field: FieldRef,
    pub ty: String,
    pub category: PropertyCategory,
    pub transient: bool,
}

/// Getter or setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub name: String,
    pub ty: String,
    pub field: FieldRef,
}

/// Constructor delegation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delegate {
    This(Vec<String>),
    Super(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub visibility: Visibility,
    pub class: String,
    pub params: Vec<Param>,
    pub throws: Vec<String>,
    pub delegate: Delegate,
    /// Fields assigned from the parameter of the same member name
    pub assigns: Vec<FieldRef>,
}

/// Factory hook of the concrete class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub class: String,
    /// Also parses from the textual protocol (`DualCreator`)
    pub textual: bool,
}

/// A class member in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(FieldDecl),
    Constructor(Constructor),
    Getter(Accessor),
    Setter(Accessor),
    DescribeContents,
    WriteToParcel(Vec<WriteStmt>),
    ReadFromParcel(Vec<ReadStmt>),
    ReadFromJson(Vec<Stmt>),
    WriteJson(Vec<Stmt>),
    Creator(Creator),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub name: String,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub members: Vec<Member>,
}

impl ClassDecl {
    /// Storage field declarations, in order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn write_to_parcel(&self) -> Option<&[WriteStmt]> {
        self.members.iter().find_map(|m| match m {
            Member::WriteToParcel(stmts) => Some(stmts.as_slice()),
            _ => None,
        })
    }

    pub fn read_from_parcel(&self) -> Option<&[ReadStmt]> {
        self.members.iter().find_map(|m| match m {
            Member::ReadFromParcel(stmts) => Some(stmts.as_slice()),
            _ => None,
        })
    }

    pub fn read_from_json(&self) -> Option<&[Stmt]> {
        self.members.iter().find_map(|m| match m {
            Member::ReadFromJson(stmts) => Some(stmts.as_slice()),
            _ => None,
        })
    }

    pub fn write_json(&self) -> Option<&[Stmt]> {
        self.members.iter().find_map(|m| match m {
            Member::WriteJson(stmts) => Some(stmts.as_slice()),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Constructor> {
        self.members.iter().filter_map(|m| match m {
            Member::Constructor(c) => Some(c),
            _ => None,
        })
    }
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub package: String,
    /// Deduplicated and sorted
    pub imports: Vec<String>,
    /// Doc comment lines above the class
    pub header: Vec<String>,
    pub class: ClassDecl,
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Concrete class name
    pub name: String,

    /// Always regenerated, not to be edited
    pub base: CompilationUnit,

    /// Hand-editable subclass, only present when it did not exist yet
    pub child: Option<CompilationUnit>,
}
