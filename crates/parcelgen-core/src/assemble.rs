//! Class assembly: drives the emitters and builds the generated compilation units.
//!
//! The base unit `_Name` is regenerated on every run. The child unit `Name` is a
//! hand-editable subclass stub, assembled only when the caller reports that it
//! does not exist yet.

use crate::emit::{accessor, binary, textual};
use crate::error::GenResult;
use crate::ir::{
    ClassDecl, CompilationUnit, Constructor, Creator, Delegate, GeneratedArtifact, Member, Param,
    Visibility,
};
use crate::model::{ClassSchema, SchemaDescription};
use crate::options::GenerationOptions;
use crate::taxonomy::PropertyCategory;
use std::collections::BTreeSet;
use tracing::debug;

const PARCEL: &str = "android.os.Parcel";
const PARCELABLE: &str = "android.os.Parcelable";
const JSON_EXCEPTION: &str = "org.json.JSONException";
const JSON_OBJECT: &str = "org.json.JSONObject";
const JSON_ARRAY: &str = "org.json.JSONArray";

/// Whether the hand-editable child unit already exists at the output location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    Missing,
    Exists,
}

/// Builds the compilation units of one resolved schema.
pub struct Assembler<'a> {
    schema: &'a ClassSchema,
}

impl<'a> Assembler<'a> {
    pub fn new(schema: &'a ClassSchema) -> Self {
        Self { schema }
    }

    pub fn assemble(&self, child: ChildState) -> GeneratedArtifact {
        debug!(
            class = %self.schema.name(),
            properties = self.schema.len(),
            ?child,
            "assembling artifact"
        );

        GeneratedArtifact {
            name: self.schema.name().to_string(),
            base: self.base_unit(),
            child: (child == ChildState::Missing).then(|| self.child_unit()),
        }
    }

    /// The always-regenerated `_Name` unit.
    pub fn base_unit(&self) -> CompilationUnit {
        let schema = self.schema;
        let base_name = schema.base_name();

        let mut members = accessor::fields(schema);
        members.extend(self.base_constructors().into_iter().map(Member::Constructor));
        members.extend(accessor::accessors(schema));
        members.push(Member::DescribeContents);
        members.push(Member::WriteToParcel(binary::write(schema)));
        members.push(Member::ReadFromParcel(binary::read(schema)));
        if schema.emit_textual_reader() {
            members.push(Member::ReadFromJson(textual::reader(schema)));
        }
        if schema.emit_textual_writer() {
            members.push(Member::WriteJson(textual::writer(schema)));
        }

        let mut implements = vec!["Parcelable".to_string()];
        implements.extend(schema.implements().iter().cloned());

        CompilationUnit {
            package: schema.package().to_string(),
            imports: self.base_imports(),
            header: vec![
                format!("Automatically generated Parcelable implementation for {base_name}."),
                "DO NOT MODIFY THIS FILE MANUALLY! IT WILL BE OVERWRITTEN THE NEXT TIME".into(),
                format!("{base_name}'s PARCELABLE DESCRIPTION IS CHANGED."),
            ],
            class: ClassDecl {
                visibility: Visibility::Package,
                is_abstract: true,
                name: base_name,
                extends: Some(schema.parent().unwrap_or("Object").to_string()),
                implements,
                members,
            },
        }
    }

    /// The hand-editable `Name` unit.
    pub fn child_unit(&self) -> CompilationUnit {
        let schema = self.schema;
        let reader = schema.emit_textual_reader();

        let mut imports: BTreeSet<String> = BTreeSet::new();
        imports.insert(PARCEL.into());
        imports.extend(schema.imports().iter().cloned());
        if reader {
            imports.insert(JSON_EXCEPTION.into());
            imports.insert(JSON_OBJECT.into());
            imports.insert(format!("{}.JsonParser.DualCreator", schema.support_package()));
        } else {
            imports.insert(PARCELABLE.into());
        }

        let mut members: Vec<Member> = self
            .constructor_shapes()
            .into_iter()
            .map(|(params, throws)| {
                let args = params.iter().map(|p| p.name.clone()).collect();
                Member::Constructor(Constructor {
                    visibility: Visibility::Public,
                    class: schema.name().to_string(),
                    params,
                    throws,
                    delegate: Delegate::Super(args),
                    assigns: Vec::new(),
                })
            })
            .collect();
        members.push(Member::Creator(Creator {
            class: schema.name().to_string(),
            textual: reader,
        }));

        CompilationUnit {
            package: schema.package().to_string(),
            imports: imports.into_iter().collect(),
            header: Vec::new(),
            class: ClassDecl {
                visibility: Visibility::Public,
                is_abstract: false,
                name: schema.name().to_string(),
                extends: Some(schema.base_name()),
                implements: Vec::new(),
                members,
            },
        }
    }

    fn base_imports(&self) -> Vec<String> {
        let schema = self.schema;
        let mut imports: BTreeSet<String> = BTreeSet::new();
        imports.insert(PARCEL.into());
        imports.insert(PARCELABLE.into());

        for property in schema.properties() {
            match &property.category {
                PropertyCategory::DateScalar => {
                    imports.insert("java.util.Date".into());
                }
                PropertyCategory::UriScalar => {
                    imports.insert("android.net.Uri".into());
                }
                category => {
                    if let Some(shape) = category.list_shape() {
                        imports.insert(shape.import().into());
                    }
                }
            }
        }
        imports.extend(schema.imports().iter().cloned());

        if schema.emits_textual() {
            imports.insert(JSON_EXCEPTION.into());
            imports.insert(JSON_OBJECT.into());
        }
        if schema.emit_textual_reader() {
            if schema.any(|c| *c == PropertyCategory::DateScalar || c.is_list()) {
                imports.insert(format!("{}.JsonUtil", schema.support_package()));
            }
            if schema.properties().any(textual::reads_json_array) {
                // boxed-list reads accumulate into an ArrayList
                imports.insert(JSON_ARRAY.into());
                imports.insert("java.util.ArrayList".into());
            }
        }
        if schema.implements().iter().any(|c| c == "Serializable") {
            imports.insert("java.io.Serializable".into());
        }

        imports.into_iter().collect()
    }

    fn base_constructors(&self) -> Vec<Constructor> {
        let schema = self.schema;
        let class = schema.base_name();

        if schema.constructors().is_empty() {
            let params = schema
                .properties()
                .map(|p| Param {
                    ty: p.ty.clone(),
                    name: p.name.clone(),
                })
                .collect();
            let full = Constructor {
                visibility: Visibility::Protected,
                class: class.clone(),
                params,
                throws: Vec::new(),
                delegate: Delegate::This(Vec::new()),
                assigns: schema.properties().map(|p| p.field_ref()).collect(),
            };
            let empty = Constructor {
                visibility: Visibility::Protected,
                class,
                params: Vec::new(),
                throws: Vec::new(),
                delegate: Delegate::Super(Vec::new()),
                assigns: Vec::new(),
            };
            // an empty schema would declare the no-argument constructor twice
            return if schema.is_empty() {
                vec![empty]
            } else {
                vec![full, empty]
            };
        }

        self.constructor_shapes()
            .into_iter()
            .map(|(params, throws)| Constructor {
                visibility: Visibility::Protected,
                class: class.clone(),
                delegate: Delegate::Super(params.iter().map(|p| p.name.clone()).collect()),
                params,
                throws,
                assigns: Vec::new(),
            })
            .collect()
    }

    /// Parameter lists and exceptions of the constructors the child mirrors.
    ///
    /// User constructors when declared, else the no-argument constructor.
    fn constructor_shapes(&self) -> Vec<(Vec<Param>, Vec<String>)> {
        let constructors = self.schema.constructors();
        if constructors.is_empty() {
            return vec![(Vec::new(), Vec::new())];
        }

        constructors
            .iter()
            .map(|c| {
                let params = c
                    .args
                    .iter()
                    .map(|(ty, name)| Param {
                        ty: ty.clone(),
                        name: name.clone(),
                    })
                    .collect();
                (params, c.throws.clone())
            })
            .collect()
    }
}

/// Resolve a description and assemble its artifact.
pub fn generate(
    description: &SchemaDescription,
    options: &GenerationOptions,
    child: ChildState,
) -> GenResult<GeneratedArtifact> {
    let schema = ClassSchema::build(description, options)?;
    Ok(Assembler::new(&schema).assemble(child))
}

#[cfg(test)]
#[path = "assemble/assemble_tests.rs"]
mod assemble_tests;
