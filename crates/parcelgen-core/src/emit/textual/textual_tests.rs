#![allow(non_snake_case)]

use super::*;
use crate::ir::FieldRef;
use crate::jvm_types::ScalarKind;
use crate::model::SchemaDescription;
use crate::options::GenerationOptions;

fn build(description: SchemaDescription, options: &GenerationOptions) -> ClassSchema {
    ClassSchema::build(&description, options).unwrap()
}

fn assign(member: &str, value: TextExpr) -> Stmt {
    Stmt::Assign {
        target: FieldRef::new(member),
        value,
    }
}

#[test]
fn reader___name_and_age___guards_both_with_defaults() {
    let mut options = GenerationOptions::default();
    options.default_values.insert("age".into(), "0".into());
    let schema = build(
        SchemaDescription::new("User")
            .declare("String", "name")
            .declare("Integer", "age"),
        &options,
    );

    let stmts = reader(&schema);

    assert_eq!(
        stmts,
        vec![
            Stmt::Guard {
                key: "age".into(),
                then: vec![assign(
                    "age",
                    TextExpr::Opt {
                        kind: ScalarKind::Int,
                        key: "age".into()
                    }
                )],
                otherwise: vec![assign("age", TextExpr::Literal("0".into()))],
            },
            Stmt::Guard {
                key: "name".into(),
                then: vec![assign(
                    "name",
                    TextExpr::Opt {
                        kind: ScalarKind::String,
                        key: "name".into()
                    }
                )],
                otherwise: vec![assign("name", TextExpr::Null)],
            },
        ]
    );
}

#[test]
fn reader___native_numeric___reads_unguarded() {
    let schema = build(
        SchemaDescription::new("Business")
            .declare("int", "reviewCount")
            .declare("boolean", "isClosed"),
        &GenerationOptions::default(),
    );

    let stmts = reader(&schema);

    assert_eq!(
        stmts,
        vec![
            assign(
                "isClosed",
                TextExpr::Opt {
                    kind: ScalarKind::Boolean,
                    key: "is_closed".into()
                }
            ),
            assign(
                "reviewCount",
                TextExpr::Opt {
                    kind: ScalarKind::Int,
                    key: "review_count".into()
                }
            ),
        ]
    );
}

#[test]
fn reader___native_with_default___is_guarded() {
    let mut options = GenerationOptions::default();
    options.default_values.insert("rating".into(), "5".into());
    let schema = build(
        SchemaDescription::new("Business").declare("int", "rating"),
        &options,
    );

    let stmts = reader(&schema);

    assert!(matches!(
        &stmts[0],
        Stmt::Guard { otherwise, .. } if otherwise == &vec![assign("rating", TextExpr::Literal("5".into()))]
    ));
}

#[test]
fn reader___native_string___is_guarded() {
    let schema = build(
        SchemaDescription::new("Business").declare("string", "name"),
        &GenerationOptions::default(),
    );

    assert!(matches!(reader(&schema)[0], Stmt::Guard { .. }));
}

#[test]
fn reader___lists___absent_branch_is_empty_collection_of_declared_shape() {
    let mut options = GenerationOptions::default();
    // lists ignore an explicit default
    options.default_values.insert("tags".into(), "null".into());
    let schema = build(
        SchemaDescription::new("Business")
            .declare("List<String>", "tags")
            .declare("Review[]", "reviews"),
        &options,
    );

    let stmts = reader(&schema);

    assert_eq!(
        stmts,
        vec![
            Stmt::Guard {
                key: "reviews".into(),
                then: vec![assign(
                    "reviews",
                    TextExpr::ObjectList {
                        key: "reviews".into(),
                        elem: "Review".into()
                    }
                )],
                otherwise: vec![assign(
                    "reviews",
                    TextExpr::EmptyList {
                        shape: ListShape::ArrayList,
                        elem: "Review".into()
                    }
                )],
            },
            Stmt::Guard {
                key: "tags".into(),
                then: vec![assign(
                    "tags",
                    TextExpr::StringList {
                        key: "tags".into()
                    }
                )],
                otherwise: vec![assign(
                    "tags",
                    TextExpr::EmptyList {
                        shape: ListShape::List,
                        elem: "String".into()
                    }
                )],
            },
        ]
    );
}

#[test]
fn reader___boxed_list___accumulates_in_loop() {
    let schema = build(
        SchemaDescription::new("Business").declare("List<Integer>", "scores"),
        &GenerationOptions::default(),
    );

    let stmts = reader(&schema);

    let Stmt::Guard { then, .. } = &stmts[0] else {
        panic!("expected guard, got {:?}", stmts[0]);
    };
    assert_eq!(
        then,
        &vec![
            assign(
                "scores",
                TextExpr::EmptyList {
                    shape: ListShape::ArrayList,
                    elem: "Integer".into()
                }
            ),
            Stmt::Loop {
                target: FieldRef::new("scores"),
                key: "scores".into(),
                elem: ScalarKind::Int,
            },
        ]
    );
    assert!(reads_json_array(schema.property("scores").unwrap()));
}

#[test]
fn reader___date_uri_and_references___use_dedicated_decoders() {
    let mut options = GenerationOptions::default();
    options.serializables.insert("Hours".into());
    let schema = build(
        SchemaDescription::new("Business")
            .declare("Date", "openedAt")
            .declare("Uri", "url")
            .declare("Hours", "hours")
            .declare("Location", "location"),
        &options,
    );

    let decoded: Vec<TextExpr> = reader(&schema)
        .into_iter()
        .map(|s| match s {
            Stmt::Guard { mut then, .. } => match then.remove(0) {
                Stmt::Assign { value, .. } => value,
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        })
        .collect();

    assert_eq!(
        decoded,
        vec![
            TextExpr::Timestamp {
                key: "opened_at".into()
            },
            TextExpr::Object {
                ty: "Hours".into(),
                key: "hours".into()
            },
            TextExpr::Object {
                ty: "Location".into(),
                key: "location".into()
            },
            TextExpr::Uri { key: "url".into() },
        ]
    );
}

#[test]
fn reader___required___is_unguarded_after_require() {
    let mut options = GenerationOptions::default();
    options.required.insert("location".into());
    let schema = build(
        SchemaDescription::new("Business").declare("Location", "location"),
        &options,
    );

    let stmts = reader(&schema);

    assert_eq!(
        stmts,
        vec![
            Stmt::Require {
                key: "location".into()
            },
            assign(
                "location",
                TextExpr::Object {
                    ty: "Location".into(),
                    key: "location".into()
                }
            ),
        ]
    );
}

#[test]
fn reader___blacklisted___is_skipped() {
    let mut options = GenerationOptions::default();
    options.json_blacklist.insert("derived".into());
    let schema = build(
        SchemaDescription::new("Business")
            .declare("String", "derived")
            .declare("int", "count"),
        &options,
    );

    let stmts = reader(&schema);

    assert_eq!(stmts.len(), 1);
    assert!(matches!(&stmts[0], Stmt::Assign { target, .. } if target.member == "count"));
}

#[test]
fn reader___explicit_json_key___is_used_for_guard_and_decode() {
    let mut options = GenerationOptions::default();
    options.json_keys.insert("uri".into(), "url".into());
    let schema = build(
        SchemaDescription::new("Business").declare("Uri", "uri"),
        &options,
    );

    let stmts = reader(&schema);

    assert!(matches!(&stmts[0], Stmt::Guard { key, .. } if key == "url"));
}

#[test]
fn writer___categories___mirror_reader() {
    let schema = build(
        SchemaDescription::new("Business")
            .declare("int", "count")
            .declare("Integer", "age")
            .declare("Date", "openedAt")
            .declare("Uri", "url")
            .declare("List<String>", "tags")
            .declare("Location", "location"),
        &GenerationOptions::default(),
    );

    let stmts = writer(&schema);

    let null_guard = |member: &str, key: &str, value: PutExpr| Stmt::NullGuard {
        target: FieldRef::new(member),
        then: vec![Stmt::Put {
            key: key.into(),
            value,
        }],
    };
    assert_eq!(
        stmts,
        vec![
            null_guard(
                "openedAt",
                "opened_at",
                PutExpr::EpochSeconds(FieldRef::new("openedAt"))
            ),
            null_guard("age", "age", PutExpr::Field(FieldRef::new("age"))),
            Stmt::Placeholder {
                target: FieldRef::new("tags")
            },
            null_guard(
                "location",
                "location",
                PutExpr::Nested(FieldRef::new("location"))
            ),
            null_guard("url", "url", PutExpr::UriString(FieldRef::new("url"))),
            Stmt::Put {
                key: "count".into(),
                value: PutExpr::Field(FieldRef::new("count"))
            },
        ]
    );
}

#[test]
fn writer___blacklisted___is_skipped() {
    let mut options = GenerationOptions::default();
    options.json_blacklist.insert("derived".into());
    let schema = build(
        SchemaDescription::new("Business").declare("String", "derived"),
        &options,
    );

    assert!(writer(&schema).is_empty());
}

#[test]
fn reader_writer___transient___still_in_json() {
    let mut options = GenerationOptions::default();
    options.emit_textual_writer = true;
    options.transient.insert("cache".into());
    let schema = build(SchemaDescription::new("Business").declare("int", "cache"), &options);

    assert_eq!(
        reader(&schema),
        vec![assign(
            "cache",
            TextExpr::Opt {
                kind: ScalarKind::Int,
                key: "cache".into(),
            }
        )]
    );
    assert_eq!(writer(&schema).len(), 1);
}
