#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(GenError::classification("List<", "x"), 1 ; "classification")]
#[test_case(
    GenError::DuplicateMember { name: "id".into(), existing: "ID".into() },
    2 ;
    "duplicate member"
)]
#[test_case(GenError::InvalidIdentifier("1abc".into()), 3 ; "invalid identifier")]
#[test_case(
    GenError::ConflictingOptions { member: "a".into(), reason: "b".into() },
    4 ;
    "conflicting options"
)]
#[test_case(GenError::UnsupportedSource("x.txt".into()), 5 ; "unsupported source")]
fn GenError___variant___maps_to_code(error: GenError, expected: u32) {
    assert_eq!(error.error_code(), expected);
}

#[test]
fn GenError___classification___displays_token_and_reason() {
    let err = GenError::classification("List<Foo", "missing closing `>`");

    assert_eq!(
        err.to_string(),
        "cannot classify type `List<Foo`: missing closing `>`"
    );
}

#[test]
fn GenError___duplicate_member___names_both_spellings() {
    let err = GenError::DuplicateMember {
        name: "userId".into(),
        existing: "userID".into(),
    };

    assert_eq!(
        err.to_string(),
        "duplicate member `userId` (collides with `userID`)"
    );
}
