//! Field-level checks turning raw JSON payloads into typed inputs.
//!
//! Every check runs even after an earlier failure, so a rejected payload
//! reports all offending fields in declaration order.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::post::domain::{NewPost, PostChanges};
use crate::user::domain::{NewUser, UserChanges};

const REQUIRED: &str = "is required";
const NON_EMPTY_TEXT: &str = "must be non-empty text";
const TEXT_OR_NULL: &str = "must be text or null";
const BOOLEAN: &str = "must be a boolean";
const POSITIVE_ID: &str = "must be a positive integer id";
const READ_ONLY: &str = "is read-only";

/// Pseudo-field reported when the payload itself is not a JSON object.
pub const PAYLOAD_FIELD: &str = "payload";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field violations found in one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errs = Self::default();
        errs.push(field, message);
        errs
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn errors(&self) -> &[FieldError] { &self.0 }

    /// Names of the offending fields, in report order.
    pub fn fields(&self) -> Vec<&str> { self.0.iter().map(|e| e.field.as_str()).collect() }

    fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_create_user(raw: &Value) -> Result<NewUser, ValidationErrors> {
    let map = as_object(raw)?;
    let mut errs = ValidationErrors::default();
    let email = required_text(map, "email", &mut errs);
    let name = required_text(map, "name", &mut errs);
    reject_read_only(map, &mut errs);
    match (email, name) {
        (Some(email), Some(name)) => errs.finish(NewUser { email, name }),
        _ => Err(errs),
    }
}

pub fn validate_update_user(raw: &Value) -> Result<UserChanges, ValidationErrors> {
    let map = as_object(raw)?;
    let mut errs = ValidationErrors::default();
    let changes = UserChanges {
        email: optional_text(map, "email", &mut errs),
        name: optional_text(map, "name", &mut errs),
    };
    reject_read_only(map, &mut errs);
    errs.finish(changes)
}

pub fn validate_create_post(raw: &Value) -> Result<NewPost, ValidationErrors> {
    let map = as_object(raw)?;
    let mut errs = ValidationErrors::default();
    let title = required_text(map, "title", &mut errs);
    let content = nullable_text(map, "content", &mut errs).flatten();
    let published = optional_bool(map, "published", &mut errs).unwrap_or(false);
    let author_id = required_id(map, "author_id", &mut errs);
    reject_read_only(map, &mut errs);
    match (title, author_id) {
        (Some(title), Some(author_id)) => errs.finish(NewPost { title, content, published, author_id }),
        _ => Err(errs),
    }
}

pub fn validate_update_post(raw: &Value) -> Result<PostChanges, ValidationErrors> {
    let map = as_object(raw)?;
    let mut errs = ValidationErrors::default();
    let changes = PostChanges {
        title: optional_text(map, "title", &mut errs),
        content: nullable_text(map, "content", &mut errs),
        published: optional_bool(map, "published", &mut errs),
        author_id: optional_id(map, "author_id", &mut errs),
    };
    reject_read_only(map, &mut errs);
    errs.finish(changes)
}

fn as_object(raw: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    raw.as_object()
        .ok_or_else(|| ValidationErrors::single(PAYLOAD_FIELD, "must be a JSON object"))
}

fn required_text(map: &Map<String, Value>, field: &str, errs: &mut ValidationErrors) -> Option<String> {
    if !map.contains_key(field) {
        errs.push(field, REQUIRED);
        return None;
    }
    optional_text(map, field, errs)
}

/// Absent is fine; present must be a string with non-whitespace content.
fn optional_text(map: &Map<String, Value>, field: &str, errs: &mut ValidationErrors) -> Option<String> {
    match map.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => {
            errs.push(field, NON_EMPTY_TEXT);
            None
        }
    }
}

/// `None` when absent, `Some(None)` for an explicit null.
fn nullable_text(map: &Map<String, Value>, field: &str, errs: &mut ValidationErrors) -> Option<Option<String>> {
    match map.get(field)? {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        _ => {
            errs.push(field, TEXT_OR_NULL);
            None
        }
    }
}

fn optional_bool(map: &Map<String, Value>, field: &str, errs: &mut ValidationErrors) -> Option<bool> {
    match map.get(field)? {
        Value::Bool(b) => Some(*b),
        _ => {
            errs.push(field, BOOLEAN);
            None
        }
    }
}

fn required_id(map: &Map<String, Value>, field: &str, errs: &mut ValidationErrors) -> Option<i32> {
    if !map.contains_key(field) {
        errs.push(field, REQUIRED);
        return None;
    }
    optional_id(map, field, errs)
}

fn optional_id(map: &Map<String, Value>, field: &str, errs: &mut ValidationErrors) -> Option<i32> {
    let value = map.get(field)?;
    match value.as_i64().and_then(|n| i32::try_from(n).ok()) {
        Some(id) if id > 0 => Some(id),
        _ => {
            errs.push(field, POSITIVE_ID);
            None
        }
    }
}

fn reject_read_only(map: &Map<String, Value>, errs: &mut ValidationErrors) {
    if map.contains_key("id") {
        errs.push("id", READ_ONLY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_user_accepts_required_fields() {
        let u = validate_create_user(&json!({"email": "a@x.com", "name": "A"})).unwrap();
        assert_eq!(u, NewUser { email: "a@x.com".into(), name: "A".into() });
    }

    #[test]
    fn create_user_reports_every_missing_field() {
        let errs = validate_create_user(&json!({})).unwrap_err();
        assert_eq!(errs.fields(), ["email", "name"]);
        assert!(errs.errors().iter().all(|e| e.message == REQUIRED));
    }

    #[test]
    fn create_user_rejects_empty_and_non_text_values() {
        let errs = validate_create_user(&json!({"email": "   ", "name": 42})).unwrap_err();
        assert_eq!(errs.fields(), ["email", "name"]);

        let errs = validate_create_user(&json!({"email": "a@x.com", "name": ""})).unwrap_err();
        assert_eq!(errs.fields(), ["name"]);
    }

    #[test]
    fn create_user_keeps_values_untrimmed() {
        let u = validate_create_user(&json!({"email": " a@x.com", "name": "A "})).unwrap();
        assert_eq!(u.email, " a@x.com");
        assert_eq!(u.name, "A ");
    }

    #[test]
    fn identifier_is_read_only() {
        let errs = validate_create_user(&json!({"id": 3, "email": "a@x.com", "name": "A"})).unwrap_err();
        assert_eq!(errs.fields(), ["id"]);
        let errs = validate_update_post(&json!({"id": 3})).unwrap_err();
        assert_eq!(errs.fields(), ["id"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert!(validate_create_user(&json!({"email": "a@x.com", "name": "A", "role": "admin"})).is_ok());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let errs = validate_update_user(&json!(["email"])).unwrap_err();
        assert_eq!(errs.fields(), [PAYLOAD_FIELD]);
    }

    #[test]
    fn update_user_allows_absent_fields() {
        let c = validate_update_user(&json!({})).unwrap();
        assert!(c.is_empty());
        let c = validate_update_user(&json!({"name": "B"})).unwrap();
        assert_eq!(c, UserChanges { email: None, name: Some("B".into()) });
    }

    #[test]
    fn update_user_rejects_present_but_invalid_fields() {
        let errs = validate_update_user(&json!({"email": null, "name": ""})).unwrap_err();
        assert_eq!(errs.fields(), ["email", "name"]);
    }

    #[test]
    fn create_post_defaults_optional_fields() {
        let p = validate_create_post(&json!({"title": "Hello", "author_id": 1})).unwrap();
        assert_eq!(p, NewPost { title: "Hello".into(), content: None, published: false, author_id: 1 });
    }

    #[test]
    fn create_post_reports_all_bad_fields() {
        let errs = validate_create_post(&json!({"content": 5, "published": "yes", "author_id": -2})).unwrap_err();
        assert_eq!(errs.fields(), ["title", "content", "published", "author_id"]);
    }

    #[test]
    fn author_id_must_fit_an_integer_id() {
        let errs = validate_create_post(&json!({"title": "t", "author_id": 1.5})).unwrap_err();
        assert_eq!(errs.fields(), ["author_id"]);
        let errs = validate_create_post(&json!({"title": "t", "author_id": 5_000_000_000_i64})).unwrap_err();
        assert_eq!(errs.fields(), ["author_id"]);
    }

    #[test]
    fn update_post_distinguishes_null_from_absent_content() {
        let c = validate_update_post(&json!({"content": null})).unwrap();
        assert_eq!(c.content, Some(None));
        let c = validate_update_post(&json!({"published": true})).unwrap();
        assert_eq!(c.content, None);
        assert_eq!(c.published, Some(true));
    }

    #[test]
    fn display_lists_fields_in_order() {
        let errs = validate_create_user(&json!({"name": ""})).unwrap_err();
        assert_eq!(errs.to_string(), "email is required; name must be non-empty text");
    }
}
