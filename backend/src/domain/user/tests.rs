//! Tests for the domain user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn invalid_user_ids_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_through_string() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(String::from(id.clone()), VALID_ID);
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("has space", UserValidationError::UsernameInvalidCharacters)]
#[case("emoji_🐦", UserValidationError::UsernameInvalidCharacters)]
fn invalid_usernames_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
}

#[rstest]
fn overlong_username_is_rejected() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw).expect_err("too long"),
        UserValidationError::UsernameTooLong { max: USERNAME_MAX }
    );
}

#[rstest]
#[case("  ada_lovelace ", "ada_lovelace")]
#[case("grace.hopper-1", "grace.hopper-1")]
fn usernames_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(Username::new(raw).expect("valid").as_ref(), expected);
}

#[rstest]
fn user_serialises_camel_case() {
    let created_at = DateTime::parse_from_rfc3339("2024-01-27T02:27:51Z")
        .expect("valid timestamp")
        .with_timezone(&Utc);
    let user = User::new(
        UserId::new(VALID_ID).expect("valid id"),
        Username::new("ada").expect("valid username"),
        created_at,
    );

    let value = serde_json::to_value(&user).expect("serialisable");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "username": "ada",
            "createdAt": "2024-01-27T02:27:51Z",
        })
    );
}

#[rstest]
fn username_deserialisation_validates() {
    let result: Result<Username, _> = serde_json::from_value(json!("bad name"));
    assert!(result.is_err());
}
