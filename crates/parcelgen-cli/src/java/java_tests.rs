#![allow(non_snake_case)]

use super::*;
use parcelgen_core::{ChildState, GeneratedArtifact, GenerationOptions, SchemaDescription, generate};

fn artifact(description: SchemaDescription, options: &GenerationOptions) -> GeneratedArtifact {
    generate(&description, options, ChildState::Missing).unwrap()
}

fn user() -> SchemaDescription {
    SchemaDescription::new("User")
        .declare("String", "name")
        .declare("int", "age")
}

fn lines(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

// SourceWriter

#[test]
fn SourceWriter___block___indents_with_tabs() {
    let mut w = SourceWriter::new();

    w.block("class A", |w| {
        w.block("void f()", |w| w.line("return;"));
    });

    assert_eq!(w.finish(), "class A {\n\tvoid f() {\n\t\treturn;\n\t}\n}\n");
}

#[test]
fn SourceWriter___empty_line___has_no_indentation() {
    let mut w = SourceWriter::new();

    w.indented(|w| {
        w.line("");
        w.blank();
    });

    assert_eq!(w.finish(), "\n\n");
}

#[test]
fn SourceWriter___block_with___custom_close() {
    let mut w = SourceWriter::new();

    w.block_with("Runnable r = new Runnable()", "};", |_| {});

    assert_eq!(w.finish(), "Runnable r = new Runnable() {\n};\n");
}

// Base unit

#[test]
fn render_unit___user___complete_base_class() {
    let rendered = render_unit(&artifact(user(), &GenerationOptions::default()).base);

    let expected = lines(&[
        "package org.pretz.parcelgen;",
        "",
        "import android.os.Parcel;",
        "import android.os.Parcelable;",
        "import org.json.JSONException;",
        "import org.json.JSONObject;",
        "",
        "/** Automatically generated Parcelable implementation for _User.",
        " *    DO NOT MODIFY THIS FILE MANUALLY! IT WILL BE OVERWRITTEN THE NEXT TIME",
        " *    _User's PARCELABLE DESCRIPTION IS CHANGED.",
        " */",
        "/* package */ abstract class _User extends Object implements Parcelable {",
        "",
        "\tprotected String mName;",
        "\tprotected int mAge;",
        "",
        "\tprotected _User(String name, int age) {",
        "\t\tthis();",
        "\t\tmName = name;",
        "\t\tmAge = age;",
        "\t}",
        "",
        "\tprotected _User() {",
        "\t\tsuper();",
        "\t}",
        "",
        "\tpublic String getName() {",
        "\t\treturn mName;",
        "\t}",
        "",
        "\tpublic void setName(String name) {",
        "\t\tthis.mName = name;",
        "\t}",
        "",
        "\tpublic int getAge() {",
        "\t\treturn mAge;",
        "\t}",
        "",
        "\tpublic void setAge(int age) {",
        "\t\tthis.mAge = age;",
        "\t}",
        "",
        "\tpublic int describeContents() {",
        "\t\treturn 0;",
        "\t}",
        "",
        "\tpublic void writeToParcel(Parcel parcel, int flags) {",
        "\t\tparcel.writeValue(mName);",
        "\t\tparcel.writeInt(mAge);",
        "\t}",
        "",
        "\tpublic void readFromParcel(Parcel source) {",
        "\t\tmName = (String) source.readValue(String.class.getClassLoader());",
        "\t\tmAge = source.readInt();",
        "\t}",
        "",
        "\tpublic void readFromJson(JSONObject json) throws JSONException {",
        "\t\tif (!json.isNull(\"name\")) {",
        "\t\t\tmName = json.optString(\"name\");",
        "\t\t} else {",
        "\t\t\tmName = null;",
        "\t\t}",
        "\t\tmAge = json.optInt(\"age\");",
        "\t}",
        "}",
    ]);
    assert_eq!(rendered, expected);
}

#[test]
fn render_unit___dates___numbered_temporaries_per_method() {
    let description = SchemaDescription::new("Event")
        .declare("Date", "startsAt")
        .declare("Date", "endsAt");

    let rendered = render_unit(&artifact(description, &GenerationOptions::default()).base);

    assert!(rendered.contains(
        "\t\tparcel.writeLong(mStartsAt == null ? Long.MIN_VALUE : mStartsAt.getTime());\n"
    ));
    assert!(rendered.contains("\t\tlong date0 = source.readLong();\n"));
    assert!(rendered.contains("\t\tif (date0 != Long.MIN_VALUE) {\n\t\t\tmStartsAt = new Date(date0);\n\t\t}\n"));
    assert!(rendered.contains("\t\tlong date1 = source.readLong();\n"));
    assert!(rendered.contains("\t\t\tmEndsAt = JsonUtil.parseTimestamp(json, \"ends_at\");\n"));
}

#[test]
fn render_unit___booleans___one_array_slot() {
    let description = SchemaDescription::new("Flags")
        .declare("boolean", "isClosed")
        .declare("boolean", "hasPhotos");

    let rendered = render_unit(&artifact(description, &GenerationOptions::default()).base);

    assert!(rendered.contains("\t\tparcel.writeBooleanArray(new boolean[] {mIsClosed, mHasPhotos});\n"));
    assert!(rendered.contains(
        "\t\tboolean[] bools = source.createBooleanArray();\n\t\tmIsClosed = bools[0];\n\t\tmHasPhotos = bools[1];\n"
    ));
    assert!(rendered.contains("\tpublic boolean isClosed() {\n"));
    assert!(rendered.contains("\tpublic boolean getHasPhotos() {\n"));
}

#[test]
fn render_unit___lists_and_references___use_creators() {
    let mut options = GenerationOptions::default();
    options.serializables.insert("Hours".into());
    let description = SchemaDescription::new("Business")
        .declare("List<String>", "tags")
        .declare("Review[]", "reviews")
        .declare("List<Integer>", "scores")
        .declare("Location", "location")
        .declare("Hours", "hours")
        .declare("Uri", "url");

    let rendered = render_unit(&artifact(description, &options).base);

    for line in [
        "\t\tparcel.writeStringList(mTags);\n",
        "\t\tparcel.writeTypedList(mReviews);\n",
        "\t\tparcel.writeSerializable(mScores);\n",
        "\t\tparcel.writeParcelable(mLocation, 0);\n",
        "\t\tparcel.writeParcelable(mUrl, 0);\n",
        "\t\tmTags = source.createStringArrayList();\n",
        "\t\tmReviews = source.createTypedArrayList(Review.CREATOR);\n",
        "\t\tmScores = (List<Integer>) source.readSerializable();\n",
        "\t\tmHours = (Hours) source.readSerializable();\n",
        "\t\tmLocation = source.readParcelable(Location.class.getClassLoader());\n",
        "\t\tmUrl = source.readParcelable(Uri.class.getClassLoader());\n",
        "\t\t\tmReviews = JsonUtil.parseJsonList(json.optJSONArray(\"reviews\"), Review.CREATOR);\n",
        "\t\t\tmReviews = new ArrayList<Review>();\n",
        "\t\t\tmTags = java.util.Collections.<String>emptyList();\n",
        "\t\t\tmLocation = Location.CREATOR.parse(json.getJSONObject(\"location\"));\n",
        "\t\t\tmUrl = Uri.parse(json.getString(\"url\"));\n",
    ] {
        assert!(rendered.contains(line), "missing {line:?} in\n{rendered}");
    }
}

#[test]
fn render_unit___boxed_list___loop_with_cast() {
    let description = SchemaDescription::new("Stats").declare("List<Integer>", "scores");

    let rendered = render_unit(&artifact(description, &GenerationOptions::default()).base);

    assert!(rendered.contains(
        "\t\t\tJSONArray array0 = json.optJSONArray(\"scores\");\n\
         \t\t\tif (array0 != null) {\n\
         \t\t\t\tfor (int i = 0; i < array0.length(); i++) {\n\
         \t\t\t\t\tmScores.add((Integer) array0.get(i));\n\
         \t\t\t\t}\n\
         \t\t\t}\n"
    ));
}

#[test]
fn render_unit___required___throws_on_absence() {
    let mut options = GenerationOptions::default();
    options.required.insert("location".into());
    let description = SchemaDescription::new("Business").declare("Location", "location");

    let rendered = render_unit(&artifact(description, &options).base);

    assert!(rendered.contains(
        "\t\tif (json.isNull(\"location\")) {\n\
         \t\t\tthrow new JSONException(\"JSONObject[\\\"location\\\"] not found.\");\n\
         \t\t}\n\
         \t\tmLocation = Location.CREATOR.parse(json.getJSONObject(\"location\"));\n"
    ));
}

#[test]
fn render_unit___writer___null_guards_and_list_placeholder() {
    let mut options = GenerationOptions::default();
    options.emit_textual_writer = true;
    let description = SchemaDescription::new("Business")
        .declare("int", "count")
        .declare("Date", "openedAt")
        .declare("List<String>", "tags")
        .declare("Location", "location");

    let rendered = render_unit(&artifact(description, &options).base);

    assert!(rendered.contains("\tpublic JSONObject writeJSON() throws JSONException {\n\t\tJSONObject json = new JSONObject();\n"));
    assert!(rendered.contains("\t\tif (mOpenedAt != null) {\n\t\t\tjson.put(\"opened_at\", mOpenedAt.getTime() / 1000);\n\t\t}\n"));
    assert!(rendered.contains("\t\t// list writing not supported: mTags\n"));
    assert!(rendered.contains("\t\t\tjson.put(\"location\", mLocation.writeJSON());\n"));
    assert!(rendered.contains("\t\tjson.put(\"count\", mCount);\n\t\treturn json;\n"));
}

#[test]
fn render_unit___transient_and_native_string___field_spelling() {
    let mut options = GenerationOptions::default();
    options.transient.insert("cache".into());
    let description = SchemaDescription::new("Thing")
        .declare("string", "cache")
        .declare("int", "count");

    let rendered = render_unit(&artifact(description, &options).base);

    assert!(rendered.contains("\tprotected transient String mCache;\n"));
    assert!(rendered.contains("\tpublic String getCache() {\n"));
    assert!(!rendered.contains("writeString(mCache)"));
}

#[test]
fn render_unit___parent_and_user_constructor___delegates() {
    let mut options = GenerationOptions::default();
    options.extends = Some("BaseModel".into());
    options.constructors = vec![
        parcelgen_core::ConstructorSpec::new(vec![("String".into(), "id".into())])
            .with_throws(vec!["JSONException".into()]),
    ];

    let artifact = artifact(user(), &options);
    let base = render_unit(&artifact.base);

    assert!(base.contains("/* package */ abstract class _User extends BaseModel implements Parcelable {\n"));
    assert!(base.contains("\tprotected _User(String id) throws JSONException {\n\t\tsuper(id);\n\t}\n"));
    assert!(base.contains("\t\tsuper.writeToParcel(parcel, flags);\n"));
    assert!(base.contains("\t\tsuper.readFromParcel(source);\n"));

    let child = render_unit(&artifact.child.unwrap());
    assert!(child.contains("\tpublic User(String id) throws JSONException {\n\t\tsuper(id);\n\t}\n"));
}

// Child unit

#[test]
fn render_unit___child___dual_creator() {
    let child = artifact(user(), &GenerationOptions::default()).child.unwrap();

    let expected = lines(&[
        "package org.pretz.parcelgen;",
        "",
        "import android.os.Parcel;",
        "import com.yelp.parcelgen.JsonParser.DualCreator;",
        "import org.json.JSONException;",
        "import org.json.JSONObject;",
        "",
        "public class User extends _User {",
        "",
        "\tpublic User() {",
        "\t\tsuper();",
        "\t}",
        "",
        "\tpublic static final DualCreator<User> CREATOR = new DualCreator<User>() {",
        "",
        "\t\tpublic User[] newArray(int size) {",
        "\t\t\treturn new User[size];",
        "\t\t}",
        "",
        "\t\tpublic User createFromParcel(Parcel source) {",
        "\t\t\tUser object = new User();",
        "\t\t\tobject.readFromParcel(source);",
        "\t\t\treturn object;",
        "\t\t}",
        "",
        "\t\t@Override",
        "\t\tpublic User parse(JSONObject obj) throws JSONException {",
        "\t\t\tUser newInstance = new User();",
        "\t\t\tnewInstance.readFromJson(obj);",
        "\t\t\treturn newInstance;",
        "\t\t}",
        "\t};",
        "}",
    ]);
    assert_eq!(render_unit(&child), expected);
}

#[test]
fn render_unit___child_without_reader___parcelable_creator() {
    let mut options = GenerationOptions::default();
    options.emit_textual_reader = false;

    let child = render_unit(&artifact(user(), &options).child.unwrap());

    assert!(child.contains(
        "\tpublic static final Parcelable.Creator<User> CREATOR = new Parcelable.Creator<User>() {\n"
    ));
    assert!(!child.contains("parse(JSONObject"));
}

#[test]
fn render_unit___same_unit___identical_text() {
    let options = GenerationOptions::default();

    assert_eq!(
        render_unit(&artifact(user(), &options).base),
        render_unit(&artifact(user(), &options).base)
    );
}
