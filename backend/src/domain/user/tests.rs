//! Tests for the user record model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn sam() -> NewUser {
    NewUser {
        name: "Sam Smith".to_owned(),
        email: "sam@example.com".to_owned(),
        age: 20,
    }
}

#[fixture]
fn stored() -> User {
    User::new(UserId::new("u1"), "Sam Smith", "sam@example.com", 20)
}

#[rstest]
fn valid_new_user_passes(sam: NewUser) {
    assert!(sam.validate().is_ok());
    assert_eq!(sam.stored_age(), Some(20));
}

#[rstest]
#[case("", "name")]
#[case("   ", "name")]
fn blank_name_is_rejected(sam: NewUser, #[case] name: &str, #[case] field: &str) {
    let user = NewUser {
        name: name.to_owned(),
        ..sam
    };
    let errors = user.validate().expect_err("blank name fails");
    assert_eq!(
        errors.get(field).map(|e| e.message.as_str()),
        Some("name is required")
    );
}

#[rstest]
#[case("")]
#[case("sam")]
#[case("sam@example")]
#[case("sam smith@example.com")]
fn malformed_email_is_rejected(sam: NewUser, #[case] email: &str) {
    let user = NewUser {
        email: email.to_owned(),
        ..sam
    };
    let errors = user.validate().expect_err("bad email fails");
    assert!(errors.get("email").is_some());
}

#[rstest]
#[case(-1)]
#[case(AGE_MAX + 1)]
fn out_of_range_age_is_rejected(sam: NewUser, #[case] age: i64) {
    let user = NewUser { age, ..sam };
    let errors = user.validate().expect_err("bad age fails");
    assert_eq!(
        errors.get("age").and_then(|e| e.value.clone()),
        Some(age.to_string())
    );
}

#[rstest]
fn zero_age_is_allowed(sam: NewUser) {
    let user = NewUser { age: 0, ..sam };
    assert!(user.validate().is_ok());
}

#[rstest]
fn every_failing_field_is_reported() {
    let user = NewUser {
        name: String::new(),
        email: "nope".to_owned(),
        age: -5,
    };
    let errors = user.validate().expect_err("all fields fail");
    assert_eq!(errors.len(), 3);
}

#[rstest]
fn empty_patch_is_valid() {
    let patch = UserPatch::default();
    assert!(patch.is_empty());
    assert!(patch.validate().is_ok());
}

#[rstest]
fn patch_validates_only_present_fields() {
    let patch = UserPatch {
        email: Some("bad".to_owned()),
        ..UserPatch::default()
    };
    let errors = patch.validate().expect_err("bad email fails");
    assert_eq!(errors.len(), 1);
    assert!(errors.get("email").is_some());
}

#[rstest]
fn patched_replaces_only_present_fields(stored: User) {
    let patch = UserPatch {
        age: Some(21),
        ..UserPatch::default()
    };
    let updated = stored.patched(&patch);

    assert_eq!(updated.age(), 21);
    assert_eq!(updated.name(), "Sam Smith");
    assert_eq!(updated.email(), "sam@example.com");
    assert_eq!(updated.id(), stored.id());
}

#[rstest]
fn user_serialises_flat(stored: User) {
    let value = serde_json::to_value(&stored).expect("user serialises");
    assert_eq!(
        value,
        json!({ "id": "u1", "name": "Sam Smith", "email": "sam@example.com", "age": 20 })
    );
}

#[rstest]
fn random_ids_are_uuids() {
    let id = UserId::random();
    assert!(id.to_uuid().is_some());
    assert!(UserId::new("not-a-uuid").to_uuid().is_none());
}
