//! Request parsing for user payloads.
//!
//! Bodies are read as loose JSON and coerced field by field so every problem
//! is reported at once under a `requestBody.<field>` path. A body that is
//! not JSON at all is an internal failure carrying the parser's message; a
//! missing JSON content type is a validation failure. Transport problems are
//! forwarded as unrecognised failures.
//!
//! List parameters are read from the raw query pairs so that no query string
//! is ever rejected.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::{Map, Value};

use crate::domain::{Error, FieldError, FieldErrors, NewUser, UserListParams, UserPatch};
use crate::inbound::http::error::Failure;

const BODY: &str = "requestBody";

fn field_path(field: &str) -> String {
    format!("{BODY}.{field}")
}

/// JSON extractor configuration used by every route.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let failure = match error {
        JsonPayloadError::Deserialize(err) | JsonPayloadError::Serialize(err) => {
            Failure::from(Error::internal(err.to_string()))
        }
        JsonPayloadError::ContentType => Failure::from(Error::validation(FieldErrors::single(
            BODY,
            "expected an application/json body",
        ))),
        other => Failure::Unrecognised(other.to_string()),
    };
    failure.into()
}

/// Collect list parameters from decoded query pairs.
///
/// The first occurrence of a repeated key wins and unknown keys are ignored.
///
/// # Examples
/// ```
/// use user_service::inbound::http::validation::list_params;
///
/// let params = list_params(vec![
///     ("page".to_owned(), "2".to_owned()),
///     ("page".to_owned(), "5".to_owned()),
///     ("minAge".to_owned(), "18".to_owned()),
/// ]);
/// assert_eq!(params.page.as_deref(), Some("2"));
/// assert_eq!(params.min_age.as_deref(), Some("18"));
/// ```
pub fn list_params(pairs: Vec<(String, String)>) -> UserListParams {
    let mut params = UserListParams::default();
    for (key, value) in pairs {
        let slot = match key.as_str() {
            "page" => &mut params.page,
            "limit" => &mut params.limit,
            "filter" => &mut params.filter,
            "sort" => &mut params.sort,
            "minAge" => &mut params.min_age,
            "maxAge" => &mut params.max_age,
            _ => continue,
        };
        slot.get_or_insert(value);
    }
    params
}

fn as_object(body: Value) -> Result<Map<String, Value>, FieldErrors> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(FieldErrors::single(BODY, "invalid object")),
    }
}

fn read_string(value: &Value, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        other => {
            errors.insert_error(
                field_path(field),
                FieldError::new("invalid string value").with_value(other.to_string()),
            );
            None
        }
    }
}

/// Accepts JSON integers, floats with no fractional part, and integer text.
fn read_integer(value: &Value, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    let parsed = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.is_finite())
                .and_then(|float| format!("{float:.0}").parse().ok())
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        errors.insert_error(
            field_path(field),
            FieldError::new("invalid integer number").with_value(value.to_string()),
        );
    }
    parsed
}

fn required<'a>(
    map: &'a Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<&'a Value> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.insert(field_path(field), format!("'{field}' is required"));
            None
        }
        Some(value) => Some(value),
    }
}

/// Coerce a create body. Unknown fields are ignored.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use user_service::inbound::http::validation::parse_new_user;
///
/// let user = parse_new_user(json!({"name": "Sam", "email": "sam@example.com", "age": "20"}))
///     .expect("coercible body");
/// assert_eq!(user.age, 20);
///
/// let errors = parse_new_user(json!({"name": 5})).expect_err("bad body");
/// assert_eq!(errors.len(), 3);
/// ```
pub fn parse_new_user(body: Value) -> Result<NewUser, FieldErrors> {
    let map = as_object(body)?;
    let mut errors = FieldErrors::new();
    let name = required(&map, "name", &mut errors).and_then(|v| read_string(v, "name", &mut errors));
    let email =
        required(&map, "email", &mut errors).and_then(|v| read_string(v, "email", &mut errors));
    let age = required(&map, "age", &mut errors).and_then(|v| read_integer(v, "age", &mut errors));

    match (name, email, age) {
        (Some(name), Some(email), Some(age)) if errors.is_empty() => {
            Ok(NewUser { name, email, age })
        }
        _ => Err(errors),
    }
}

/// Coerce a partial update body. Absent fields stay `None`; `null` is
/// rejected like any other wrongly typed value.
pub fn parse_user_patch(body: Value) -> Result<UserPatch, FieldErrors> {
    let map = as_object(body)?;
    let mut errors = FieldErrors::new();
    let patch = UserPatch {
        name: map.get("name").and_then(|v| read_string(v, "name", &mut errors)),
        email: map
            .get("email")
            .and_then(|v| read_string(v, "email", &mut errors)),
        age: map.get("age").and_then(|v| read_integer(v, "age", &mut errors)),
    };
    errors.into_result().map(|()| patch)
}
