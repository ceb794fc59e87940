//! Sign-up form validation. Every failure is a non-retryable
//! [`ErrorCategory::Validation`] error naming the offending field.

use crate::error::{create_error, AppError, ErrorCategory, ErrorOptions};
use regex::Regex;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MIN_PASSWORD_LEN: usize = 8;
const MAX_AGE: i64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Age,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Email, Field::Age, Field::Password, Field::ConfirmPassword];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Age => "age",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub age: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Age => &self.age,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }
}

fn invalid(field: Field, code: &str, message: &str, extra: Value) -> AppError {
    let mut details = json!({ "field": field.as_str() });
    if let (Value::Object(d), Value::Object(e)) = (&mut details, extra) {
        d.extend(e);
    }
    create_error(
        ErrorCategory::Validation,
        message,
        ErrorOptions::new().code(code).retryable(false).details(details),
    )
}

fn required(field: Field, message: &str) -> AppError {
    invalid(field, "REQUIRED_FIELD", message, json!({ "constraint": "required" }))
}

/// Integer prefix of `s`: leading whitespace, an optional sign, then digits.
/// Anything after the digits is ignored, so `"4.5"` is 4 and `"12abc"` is 12.
/// `None` when no digit follows the sign or the value does not fit in `i64`.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Check one field. `form` supplies the other fields some rules compare against.
pub fn validate_field(field: Field, value: &str, form: &SignupForm) -> Option<AppError> {
    match field {
        Field::Email => {
            if value.is_empty() {
                return Some(required(field, "Email is required"));
            }
            if !EMAIL_RE.is_match(value) {
                return Some(invalid(
                    field,
                    "INVALID_FORMAT",
                    "Please enter a valid email address",
                    json!({ "pattern": "email" }),
                ));
            }
        }
        Field::Age => {
            if value.is_empty() {
                return Some(required(field, "Age is required"));
            }
            let in_range = leading_int(value)
                .map(|age| (0..=MAX_AGE).contains(&age))
                .unwrap_or(false);
            if !in_range {
                return Some(invalid(
                    field,
                    "INVALID_RANGE",
                    "Age must be a number between 0 and 150",
                    json!({ "min": 0, "max": MAX_AGE }),
                ));
            }
        }
        Field::Password => {
            if value.is_empty() {
                return Some(required(field, "Password is required"));
            }
            if value.chars().count() < MIN_PASSWORD_LEN {
                return Some(invalid(
                    field,
                    "MIN_LENGTH",
                    "Password must be at least 8 characters long",
                    json!({ "minLength": MIN_PASSWORD_LEN }),
                ));
            }
        }
        Field::ConfirmPassword => {
            if value != form.password {
                return Some(invalid(
                    field,
                    "MATCH_REQUIRED",
                    "Passwords do not match",
                    json!({ "matchField": Field::Password.as_str() }),
                ));
            }
        }
    }
    None
}

/// Check every field. An empty map means the form is valid.
pub fn validate_form(form: &SignupForm) -> BTreeMap<Field, AppError> {
    Field::ALL
        .into_iter()
        .filter_map(|f| validate_field(f, form.value(f), form).map(|e| (f, e)))
        .collect()
}
