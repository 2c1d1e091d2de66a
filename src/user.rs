//! The user record and input validation.
//!
//! [`UserPayload`] is the wire shape of a create/update body. Every field is
//! optional at the deserialization layer so that missing data surfaces as a
//! named violation instead of a parse error, and `age` is a plain signed
//! integer so an out-of-range negative reports as a range violation rather
//! than a type mismatch. [`UserPayload::validate`] runs every check and
//! reports all failures from one request together.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Violation};

/// Inclusive upper bound on `name` and `email`, in characters.
const TEXT_MAX: usize = 100;
/// Inclusive upper bound on `age`. Lower bound is 0.
const AGE_MAX: i64 = 150;

/// A stored user record. The id is service-assigned and immutable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
}

/// A create/update request body, exactly as received.
///
/// `null` and an absent key are deliberately indistinguishable: both mean
/// "not supplied" and fail the required-field check for `name` and `email`.
/// Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

/// Field values that passed validation, ready to be stored under an id.
#[derive(Debug)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
}

impl UserPayload {
    /// Checks every declared field constraint and aggregates the failures.
    ///
    /// - `name`: required, 1–100 characters
    /// - `email`: required, 1–100 characters
    /// - `age`: optional, 0–150 inclusive when present
    pub fn validate(self) -> Result<UserFields, ApiError> {
        let mut violations = Vec::new();

        let name = check_text("name", self.name, &mut violations);
        let email = check_text("email", self.email, &mut violations);

        if let Some(age) = self.age {
            if !(0..=AGE_MAX).contains(&age) {
                violations.push(Violation {
                    field: "age",
                    message: format!("must be between 0 and {AGE_MAX}"),
                });
            }
        }

        match (name, email) {
            (Some(name), Some(email)) if violations.is_empty() => {
                Ok(UserFields { name, email, age: self.age })
            }
            _ => Err(ApiError::Validation(violations)),
        }
    }
}

/// Required-string check: present and 1–100 characters. Pushes a violation and
/// yields `None` on failure.
fn check_text(
    field: &'static str,
    value: Option<String>,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match value {
        None => {
            violations.push(Violation { field, message: "field required".into() });
            None
        }
        Some(s) => {
            let len = s.chars().count();
            if !(1..=TEXT_MAX).contains(&len) {
                violations.push(Violation {
                    field,
                    message: format!("must be between 1 and {TEXT_MAX} characters"),
                });
                None
            } else {
                Some(s)
            }
        }
    }
}
