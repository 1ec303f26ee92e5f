#![allow(non_snake_case)]

use super::*;
use crate::ir::{FieldRef, Stmt};
use crate::options::ConstructorSpec;

fn business() -> SchemaDescription {
    SchemaDescription::new("Business")
        .declare("String", "name")
        .declare("int", "reviewCount")
        .declare("Date", "openedAt")
        .declare("Uri", "url")
        .declare("List<Review>", "reviews")
        .declare("boolean", "isClosed")
}

fn artifact(description: &SchemaDescription, options: &GenerationOptions) -> GeneratedArtifact {
    generate(description, options, ChildState::Missing).unwrap()
}

#[test]
fn generate___base_unit___is_abstract_prefixed_parcelable() {
    let artifact = artifact(&business(), &GenerationOptions::default());
    let class = &artifact.base.class;

    assert_eq!(artifact.name, "Business");
    assert_eq!(class.name, "_Business");
    assert!(class.is_abstract);
    assert_eq!(class.visibility, Visibility::Package);
    assert_eq!(class.extends.as_deref(), Some("Object"));
    assert_eq!(class.implements, vec!["Parcelable".to_string()]);
    assert_eq!(artifact.base.package, "org.pretz.parcelgen");
}

#[test]
fn generate___header___warns_against_manual_edits() {
    let artifact = artifact(&business(), &GenerationOptions::default());

    assert_eq!(
        artifact.base.header,
        vec![
            "Automatically generated Parcelable implementation for _Business.".to_string(),
            "DO NOT MODIFY THIS FILE MANUALLY! IT WILL BE OVERWRITTEN THE NEXT TIME".to_string(),
            "_Business's PARCELABLE DESCRIPTION IS CHANGED.".to_string(),
        ]
    );
}

#[test]
fn generate___imports___sorted_deduplicated_per_category() {
    let mut options = GenerationOptions::default();
    options.imports = vec!["com.example.Review".into(), "android.os.Parcel".into()];

    let artifact = artifact(&business(), &options);

    assert_eq!(
        artifact.base.imports,
        vec![
            "android.net.Uri",
            "android.os.Parcel",
            "android.os.Parcelable",
            "com.example.Review",
            "com.yelp.parcelgen.JsonUtil",
            "java.util.Date",
            "java.util.List",
            "org.json.JSONException",
            "org.json.JSONObject",
        ]
    );
}

#[test]
fn generate___imports___no_textual_protocol_drops_json() {
    let mut options = GenerationOptions::default();
    options.emit_textual_reader = false;

    let artifact = artifact(&business(), &options);

    assert!(!artifact.base.imports.iter().any(|i| i.starts_with("org.json")));
    assert!(!artifact.base.imports.iter().any(|i| i.ends_with("JsonUtil")));
}

#[test]
fn generate___imports___boxed_list_and_serializable_capability() {
    let mut options = GenerationOptions::default();
    options.implements = vec!["Serializable".into()];
    options.support_package = "com.example.support".into();
    let description = SchemaDescription::new("Stats").declare("List<Integer>", "scores");

    let artifact = artifact(&description, &options);

    assert_eq!(
        artifact.base.imports,
        vec![
            "android.os.Parcel",
            "android.os.Parcelable",
            "com.example.support.JsonUtil",
            "java.io.Serializable",
            "java.util.ArrayList",
            "java.util.List",
            "org.json.JSONArray",
            "org.json.JSONException",
            "org.json.JSONObject",
        ]
    );
    assert_eq!(
        artifact.base.class.implements,
        vec!["Parcelable".to_string(), "Serializable".to_string()]
    );
}

#[test]
fn generate___members___follow_emission_order() {
    let mut options = GenerationOptions::default();
    options.emit_textual_writer = true;

    let artifact = artifact(
        &SchemaDescription::new("User").declare("String", "name"),
        &options,
    );

    let kinds: Vec<&str> = artifact
        .base
        .class
        .members
        .iter()
        .map(|m| match m {
            Member::Field(_) => "field",
            Member::Constructor(_) => "constructor",
            Member::Getter(_) => "getter",
            Member::Setter(_) => "setter",
            Member::DescribeContents => "describeContents",
            Member::WriteToParcel(_) => "writeToParcel",
            Member::ReadFromParcel(_) => "readFromParcel",
            Member::ReadFromJson(_) => "readFromJson",
            Member::WriteJson(_) => "writeJSON",
            Member::Creator(_) => "creator",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "field",
            "constructor",
            "constructor",
            "getter",
            "setter",
            "describeContents",
            "writeToParcel",
            "readFromParcel",
            "readFromJson",
            "writeJSON",
        ]
    );
}

#[test]
fn generate___textual_toggles___control_methods() {
    let mut options = GenerationOptions::default();
    options.emit_textual_reader = false;

    let artifact = artifact(&business(), &options);

    assert!(artifact.base.class.read_from_json().is_none());
    assert!(artifact.base.class.write_json().is_none());
    assert!(artifact.base.class.write_to_parcel().is_some());
}

#[test]
fn generate___no_user_constructors___synthesizes_full_and_empty() {
    let artifact = artifact(
        &SchemaDescription::new("User")
            .declare("String", "name")
            .declare("int", "age"),
        &GenerationOptions::default(),
    );

    let constructors: Vec<&Constructor> = artifact.base.class.constructors().collect();

    assert_eq!(constructors.len(), 2);
    assert_eq!(
        constructors[0].params,
        vec![
            Param {
                ty: "String".into(),
                name: "name".into()
            },
            Param {
                ty: "int".into(),
                name: "age".into()
            },
        ]
    );
    assert_eq!(constructors[0].delegate, Delegate::This(Vec::new()));
    assert_eq!(
        constructors[0].assigns,
        vec![FieldRef::new("name"), FieldRef::new("age")]
    );
    assert!(constructors[1].params.is_empty());
    assert_eq!(constructors[1].delegate, Delegate::Super(Vec::new()));
}

#[test]
fn generate___empty_schema___single_no_argument_constructor() {
    let artifact = artifact(&SchemaDescription::new("Empty"), &GenerationOptions::default());

    assert_eq!(artifact.base.class.constructors().count(), 1);
    assert_eq!(artifact.base.class.write_to_parcel(), Some(&[][..]));
}

#[test]
fn generate___user_constructors___delegate_to_parent_with_throws() {
    let mut options = GenerationOptions::default();
    options.extends = Some("BaseModel".into());
    options.constructors = vec![
        ConstructorSpec::new(vec![("String".into(), "id".into())])
            .with_throws(vec!["JSONException".into()]),
    ];

    let artifact = artifact(&business(), &options);
    let base: Vec<&Constructor> = artifact.base.class.constructors().collect();

    assert_eq!(base.len(), 1);
    assert_eq!(base[0].visibility, Visibility::Protected);
    assert_eq!(base[0].delegate, Delegate::Super(vec!["id".into()]));
    assert_eq!(base[0].throws, vec!["JSONException".to_string()]);
    assert_eq!(artifact.base.class.extends.as_deref(), Some("BaseModel"));

    let child = artifact.child.unwrap();
    let child_ctor: Vec<&Constructor> = child.class.constructors().collect();
    assert_eq!(child_ctor[0].visibility, Visibility::Public);
    assert_eq!(child_ctor[0].class, "Business");
    assert_eq!(child_ctor[0].delegate, Delegate::Super(vec!["id".into()]));
}

#[test]
fn generate___child___dual_creator_when_reader_enabled() {
    let artifact = artifact(&business(), &GenerationOptions::default());
    let child = artifact.child.unwrap();

    assert_eq!(child.class.name, "Business");
    assert_eq!(child.class.extends.as_deref(), Some("_Business"));
    assert!(!child.class.is_abstract);
    assert!(child.header.is_empty());
    assert_eq!(
        child.imports,
        vec![
            "android.os.Parcel",
            "com.yelp.parcelgen.JsonParser.DualCreator",
            "org.json.JSONException",
            "org.json.JSONObject",
        ]
    );
    assert!(child.class.members.contains(&Member::Creator(Creator {
        class: "Business".into(),
        textual: true
    })));
}

#[test]
fn generate___child___plain_creator_without_reader() {
    let mut options = GenerationOptions::default();
    options.emit_textual_reader = false;

    let child = artifact(&business(), &options).child.unwrap();

    assert_eq!(
        child.imports,
        vec!["android.os.Parcel", "android.os.Parcelable"]
    );
    assert!(child.class.members.contains(&Member::Creator(Creator {
        class: "Business".into(),
        textual: false
    })));
}

#[test]
fn generate___existing_child___is_not_assembled() {
    let artifact = generate(&business(), &GenerationOptions::default(), ChildState::Exists).unwrap();

    assert!(artifact.child.is_none());
}

#[test]
fn generate___same_input___identical_artifact() {
    let options = GenerationOptions::default();

    assert_eq!(artifact(&business(), &options), artifact(&business(), &options));
}

#[test]
fn generate___classification_failure___no_artifact() {
    let description = SchemaDescription::new("Broken").declare("List<", "items");

    let result = generate(&description, &GenerationOptions::default(), ChildState::Missing);

    assert!(result.is_err());
}

#[test]
fn generate___required_member___reader_fails_on_absence() {
    let mut options = GenerationOptions::default();
    options.required.insert("location".into());

    let artifact = artifact(
        &SchemaDescription::new("Business").declare("Location", "location"),
        &options,
    );

    let reads = artifact.base.class.read_from_json().unwrap();
    assert_eq!(
        reads[0],
        Stmt::Require {
            key: "location".into()
        }
    );
}
