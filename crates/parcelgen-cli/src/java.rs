//! Java source rendering of generated compilation units.
//!
//! Rendering is a pure function of the [`CompilationUnit`]: one [`SourceWriter`]
//! per unit owns the indentation stack, so identical units always render to
//! identical text. Indentation is one tab per level.

use parcelgen_core::ir::{
    Accessor, ClassDecl, Constructor, Creator, Delegate, FieldDecl, Member, PutExpr,
    ReadStmt, Slot, Stmt, TextExpr, Visibility, Wire, WriteStmt,
};
use parcelgen_core::{CompilationUnit, ListShape, ScalarKind};

/// Line-oriented source buffer with block indentation.
#[derive(Debug, Default)]
pub struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one indented line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push('\t');
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// `header {`, the body one level deeper, then `}`.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.block_with(header, "}", body);
    }

    /// Like [`block`](Self::block) with a custom closing line (`};`).
    pub fn block_with(
        &mut self,
        header: impl AsRef<str>,
        close: &str,
        body: impl FnOnce(&mut Self),
    ) {
        self.line(format!("{} {{", header.as_ref()));
        self.indented(body);
        self.line(close);
    }

    /// The body one level deeper, without braces.
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Render a compilation unit as a Java source file.
pub fn render_unit(unit: &CompilationUnit) -> String {
    let mut w = SourceWriter::new();

    w.line(format!("package {};", unit.package));
    w.blank();
    for import in &unit.imports {
        w.line(format!("import {import};"));
    }
    w.blank();

    if let Some((first, rest)) = unit.header.split_first() {
        w.line(format!("/** {first}"));
        for line in rest {
            w.line(format!(" *    {line}"));
        }
        w.line(" */");
    }

    render_class(&mut w, &unit.class);
    w.finish()
}

fn render_class(w: &mut SourceWriter, class: &ClassDecl) {
    let mut header = String::from(visibility(class.visibility));
    if class.is_abstract {
        header.push_str("abstract ");
    }
    header.push_str("class ");
    header.push_str(&class.name);
    if let Some(parent) = &class.extends {
        header.push_str(" extends ");
        header.push_str(parent);
    }
    if !class.implements.is_empty() {
        header.push_str(" implements ");
        header.push_str(&class.implements.join(", "));
    }

    w.block(header, |w| {
        let mut previous_field = false;
        for member in &class.members {
            let is_field = matches!(member, Member::Field(_));
            // fields are declared as one group
            if !(is_field && previous_field) {
                w.blank();
            }
            render_member(w, member);
            previous_field = is_field;
        }
    });
}

fn render_member(w: &mut SourceWriter, member: &Member) {
    match member {
        Member::Field(field) => render_field(w, field),
        Member::Constructor(constructor) => render_constructor(w, constructor),
        Member::Getter(getter) => render_getter(w, getter),
        Member::Setter(setter) => render_setter(w, setter),
        Member::DescribeContents => {
            w.block("public int describeContents()", |w| w.line("return 0;"));
        }
        Member::WriteToParcel(stmts) => {
            w.block("public void writeToParcel(Parcel parcel, int flags)", |w| {
                for stmt in stmts {
                    render_write(w, stmt);
                }
            });
        }
        Member::ReadFromParcel(stmts) => {
            w.block("public void readFromParcel(Parcel source)", |w| {
                let mut temps = Temps::default();
                for stmt in stmts {
                    render_read(w, stmt, &mut temps);
                }
            });
        }
        Member::ReadFromJson(stmts) => {
            w.block(
                "public void readFromJson(JSONObject json) throws JSONException",
                |w| {
                    let mut temps = Temps::default();
                    render_stmts(w, stmts, &mut temps);
                },
            );
        }
        Member::WriteJson(stmts) => {
            w.block("public JSONObject writeJSON() throws JSONException", |w| {
                w.line("JSONObject json = new JSONObject();");
                let mut temps = Temps::default();
                render_stmts(w, stmts, &mut temps);
                w.line("return json;");
            });
        }
        Member::Creator(creator) => render_creator(w, creator),
    }
}

fn visibility(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public ",
        Visibility::Protected => "protected ",
        Visibility::Package => "/* package */ ",
    }
}

/// Java spelling of a declared type token (`string` is a native token only here).
fn java_type(ty: &str) -> &str {
    if ty == ScalarKind::String.native_name() {
        ScalarKind::String.boxed_name()
    } else {
        ty
    }
}

/// Per-method counters for local variable names.
#[derive(Debug, Default)]
struct Temps {
    dates: usize,
    arrays: usize,
}

impl Temps {
    fn date(&mut self) -> String {
        let name = format!("date{}", self.dates);
        self.dates += 1;
        name
    }

    fn array(&mut self) -> String {
        let name = format!("array{}", self.arrays);
        self.arrays += 1;
        name
    }
}

// ============================================================================
// Declarations
// ============================================================================

fn render_field(w: &mut SourceWriter, field: &FieldDecl) {
    let transient = if field.transient { "transient " } else { "" };
    w.line(format!(
        "protected {transient}{} {};",
        java_type(&field.ty),
        field.field.storage
    ));
}

fn render_constructor(w: &mut SourceWriter, constructor: &Constructor) {
    let params = constructor
        .params
        .iter()
        .map(|p| format!("{} {}", java_type(&p.ty), p.name))
        .collect::<Vec<_>>()
        .join(", ");
    let mut header = format!(
        "{}{}({params})",
        visibility(constructor.visibility),
        constructor.class
    );
    if !constructor.throws.is_empty() {
        header.push_str(" throws ");
        header.push_str(&constructor.throws.join(", "));
    }

    w.block(header, |w| {
        match &constructor.delegate {
            Delegate::This(args) => w.line(format!("this({});", args.join(", "))),
            Delegate::Super(args) => w.line(format!("super({});", args.join(", "))),
        }
        for field in &constructor.assigns {
            w.line(format!("{} = {};", field.storage, field.member));
        }
    });
}

fn render_getter(w: &mut SourceWriter, getter: &Accessor) {
    w.block(
        format!("public {} {}()", java_type(&getter.ty), getter.name),
        |w| w.line(format!("return {};", getter.field.storage)),
    );
}

fn render_setter(w: &mut SourceWriter, setter: &Accessor) {
    w.block(
        format!(
            "public void {}({} {})",
            setter.name,
            java_type(&setter.ty),
            setter.field.member
        ),
        |w| {
            w.line(format!(
                "this.{} = {};",
                setter.field.storage, setter.field.member
            ))
        },
    );
}

fn render_creator(w: &mut SourceWriter, creator: &Creator) {
    let class = &creator.class;
    let factory = if creator.textual {
        "DualCreator"
    } else {
        "Parcelable.Creator"
    };

    w.block_with(
        format!("public static final {factory}<{class}> CREATOR = new {factory}<{class}>()"),
        "};",
        |w| {
            w.blank();
            w.block(format!("public {class}[] newArray(int size)"), |w| {
                w.line(format!("return new {class}[size];"));
            });
            w.blank();
            w.block(format!("public {class} createFromParcel(Parcel source)"), |w| {
                w.line(format!("{class} object = new {class}();"));
                w.line("object.readFromParcel(source);");
                w.line("return object;");
            });
            if creator.textual {
                w.blank();
                w.line("@Override");
                w.block(
                    format!("public {class} parse(JSONObject obj) throws JSONException"),
                    |w| {
                        w.line(format!("{class} newInstance = new {class}();"));
                        w.line("newInstance.readFromJson(obj);");
                        w.line("return newInstance;");
                    },
                );
            }
        },
    );
}

// ============================================================================
// Binary protocol
// ============================================================================

fn render_write(w: &mut SourceWriter, stmt: &WriteStmt) {
    let line = match stmt {
        Slot::Parent => "super.writeToParcel(parcel, flags);".to_string(),
        Slot::BooleanArray(fields) => {
            let joined = fields
                .iter()
                .map(|f| f.storage.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("parcel.writeBooleanArray(new boolean[] {{{joined}}});")
        }
        Slot::Field { wire, field } => {
            let m = &field.storage;
            match wire {
                Wire::Native(kind) => format!("parcel.write{}({m});", kind.wire_suffix()),
                Wire::Value(_) => format!("parcel.writeValue({m});"),
                Wire::DateMillis => {
                    format!("parcel.writeLong({m} == null ? Long.MIN_VALUE : {m}.getTime());")
                }
                Wire::Uri | Wire::Parcelable(_) => format!("parcel.writeParcelable({m}, 0);"),
                Wire::StringList => format!("parcel.writeStringList({m});"),
                Wire::Serializable(_) => format!("parcel.writeSerializable({m});"),
                Wire::TypedList(_) => format!("parcel.writeTypedList({m});"),
            }
        }
    };
    w.line(line);
}

fn render_read(w: &mut SourceWriter, stmt: &ReadStmt, temps: &mut Temps) {
    let (wire, m) = match stmt {
        Slot::Parent => {
            w.line("super.readFromParcel(source);");
            return;
        }
        Slot::BooleanArray(fields) => {
            w.line("boolean[] bools = source.createBooleanArray();");
            for (index, field) in fields.iter().enumerate() {
                w.line(format!("{} = bools[{index}];", field.storage));
            }
            return;
        }
        Slot::Field { wire, field } => (wire, &field.storage),
    };

    match wire {
        Wire::Native(kind) => w.line(format!("{m} = source.read{}();", kind.wire_suffix())),
        Wire::Value(ty) => w.line(format!(
            "{m} = ({ty}) source.readValue({ty}.class.getClassLoader());"
        )),
        Wire::DateMillis => {
            let temp = temps.date();
            w.line(format!("long {temp} = source.readLong();"));
            w.block(format!("if ({temp} != Long.MIN_VALUE)"), |w| {
                w.line(format!("{m} = new Date({temp});"))
            });
        }
        Wire::Uri => w.line(format!(
            "{m} = source.readParcelable(Uri.class.getClassLoader());"
        )),
        Wire::StringList => w.line(format!("{m} = source.createStringArrayList();")),
        Wire::Serializable(ty) => w.line(format!("{m} = ({ty}) source.readSerializable();")),
        Wire::TypedList(elem) => w.line(format!(
            "{m} = source.createTypedArrayList({elem}.CREATOR);"
        )),
        Wire::Parcelable(ty) => w.line(format!(
            "{m} = source.readParcelable({ty}.class.getClassLoader());"
        )),
    }
}

// ============================================================================
// Textual protocol
// ============================================================================

fn render_stmts(w: &mut SourceWriter, stmts: &[Stmt], temps: &mut Temps) {
    for stmt in stmts {
        render_stmt(w, stmt, temps);
    }
}

fn render_stmt(w: &mut SourceWriter, stmt: &Stmt, temps: &mut Temps) {
    match stmt {
        Stmt::Assign { target, value } => {
            w.line(format!("{} = {};", target.storage, text_expr(value)));
        }
        Stmt::Guard {
            key,
            then,
            otherwise,
        } => {
            w.line(format!("if (!json.isNull(\"{key}\")) {{"));
            w.indented(|w| render_stmts(w, then, temps));
            if !otherwise.is_empty() {
                w.line("} else {");
                w.indented(|w| render_stmts(w, otherwise, temps));
            }
            w.line("}");
        }
        Stmt::Require { key } => {
            w.block(format!("if (json.isNull(\"{key}\"))"), |w| {
                w.line(format!(
                    "throw new JSONException(\"JSONObject[\\\"{key}\\\"] not found.\");"
                ))
            });
        }
        Stmt::Loop { target, key, elem } => {
            let array = temps.array();
            w.line(format!("JSONArray {array} = json.optJSONArray(\"{key}\");"));
            w.block(format!("if ({array} != null)"), |w| {
                w.block(format!("for (int i = 0; i < {array}.length(); i++)"), |w| {
                    w.line(format!(
                        "{}.add(({}) {array}.get(i));",
                        target.storage,
                        elem.boxed_name()
                    ))
                });
            });
        }
        Stmt::NullGuard { target, then } => {
            w.block(format!("if ({} != null)", target.storage), |w| {
                render_stmts(w, then, temps)
            });
        }
        Stmt::Put { key, value } => {
            w.line(format!("json.put(\"{key}\", {});", put_expr(value)));
        }
        Stmt::Placeholder { target } => {
            w.line(format!("// list writing not supported: {}", target.storage));
        }
    }
}

fn text_expr(expr: &TextExpr) -> String {
    match expr {
        TextExpr::Opt { kind, key } => match kind {
            ScalarKind::Float => format!("(float) json.optDouble(\"{key}\")"),
            ScalarKind::Byte => format!("(byte) json.optInt(\"{key}\")"),
            kind => format!("json.opt{}(\"{key}\")", kind.wire_suffix()),
        },
        TextExpr::Timestamp { key } => format!("JsonUtil.parseTimestamp(json, \"{key}\")"),
        TextExpr::Uri { key } => format!("Uri.parse(json.getString(\"{key}\"))"),
        TextExpr::StringList { key } => {
            format!("JsonUtil.getStringList(json.optJSONArray(\"{key}\"))")
        }
        TextExpr::ObjectList { key, elem } => {
            format!("JsonUtil.parseJsonList(json.optJSONArray(\"{key}\"), {elem}.CREATOR)")
        }
        TextExpr::Object { ty, key } => format!("{ty}.CREATOR.parse(json.getJSONObject(\"{key}\"))"),
        TextExpr::EmptyList { shape, elem } => match shape {
            ListShape::ArrayList => format!("new ArrayList<{elem}>()"),
            ListShape::List => format!("java.util.Collections.<{elem}>emptyList()"),
        },
        TextExpr::Literal(literal) => literal.clone(),
        TextExpr::Null => "null".to_string(),
    }
}

fn put_expr(expr: &PutExpr) -> String {
    match expr {
        PutExpr::Field(field) => field.storage.clone(),
        PutExpr::EpochSeconds(field) => format!("{}.getTime() / 1000", field.storage),
        PutExpr::UriString(field) => format!("String.valueOf({})", field.storage),
        PutExpr::Nested(field) => format!("{}.writeJSON()", field.storage),
    }
}

#[cfg(test)]
#[path = "java/java_tests.rs"]
mod java_tests;
