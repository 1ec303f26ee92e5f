#![allow(non_snake_case)]

use super::*;
use crate::ir::FieldRef;
use crate::model::SchemaDescription;
use crate::options::GenerationOptions;
use test_case::test_case;

fn property(ty: &str, name: &str) -> Property {
    let schema = ClassSchema::build(
        &SchemaDescription::new("Sample").declare(ty, name),
        &GenerationOptions::default(),
    )
    .unwrap();
    schema.properties().next().cloned().unwrap()
}

#[test_case("String", "name", "getName")]
#[test_case("boolean", "isClosed", "isClosed")]
#[test_case("Boolean", "isOpen", "getIsOpen")]
#[test_case("boolean", "island", "island")]
#[test_case("boolean", "is", "is")]
#[test_case("boolean", "closed", "getClosed")]
#[test_case("int", "isCount", "getIsCount")]
fn getter_name___follows_is_rule(ty: &str, name: &str, expected: &str) {
    assert_eq!(getter_name(&property(ty, name)), expected);
}

#[test]
fn setter_name___always_set_prefix() {
    assert_eq!(setter_name("isClosed"), "setIsClosed");
    assert_eq!(setter_name("url"), "setUrl");
}

#[test]
fn getter_name___is_idempotent_over_getter_names() {
    let first = getter_name(&property("boolean", "isClosed"));

    assert_eq!(getter_name(&property("boolean", &first)), first);
}

#[test]
fn fields___carry_transient_flag() {
    let mut options = GenerationOptions::default();
    options.transient.insert("cache".into());
    let schema = ClassSchema::build(
        &SchemaDescription::new("Business")
            .declare("String", "name")
            .declare("String", "cache"),
        &options,
    )
    .unwrap();

    let fields = fields(&schema);

    assert_eq!(
        fields,
        vec![
            Member::Field(FieldDecl {
                field: FieldRef::new("name"),
                ty: "String".into(),
                category: schema.property("name").unwrap().category.clone(),
                transient: false,
            }),
            Member::Field(FieldDecl {
                field: FieldRef::new("cache"),
                ty: "String".into(),
                category: schema.property("cache").unwrap().category.clone(),
                transient: true,
            }),
        ]
    );
}

#[test]
fn accessors___pair_per_property_in_order() {
    let schema = ClassSchema::build(
        &SchemaDescription::new("Business")
            .declare("int", "count")
            .declare("Review[]", "reviews"),
        &GenerationOptions::default(),
    )
    .unwrap();

    let names: Vec<String> = accessors(&schema)
        .into_iter()
        .map(|m| match m {
            Member::Getter(a) | Member::Setter(a) => format!("{}:{}", a.name, a.ty),
            other => panic!("unexpected {other:?}"),
        })
        .collect();

    assert_eq!(
        names,
        vec![
            "getReviews:ArrayList<Review>",
            "setReviews:ArrayList<Review>",
            "getCount:int",
            "setCount:int",
        ]
    );
}
