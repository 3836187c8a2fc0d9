//! 用户字段校验
//!
//! 每个字段一条规则函数，按 `RULES` 顺序执行，错误汇总到 `ValidationErrors`。

use std::borrow::Cow;

use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use super::model::{UserFields, UserPayload};
use crate::core::error::ApiError;

pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 130;

/// 报错时的字段顺序
const FIELD_ORDER: [&str; 3] = ["name", "email", "age"];

type Rule = fn(&UserPayload) -> Option<(&'static str, ValidationError)>;

const RULES: &[Rule] = &[name_required, email_valid, age_in_range];

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn name_required(payload: &UserPayload) -> Option<(&'static str, ValidationError)> {
    payload
        .name
        .is_empty()
        .then(|| ("name", rule_error("required", "name is required")))
}

fn email_valid(payload: &UserPayload) -> Option<(&'static str, ValidationError)> {
    if payload.email.is_empty() {
        return Some(("email", rule_error("required", "email is required")));
    }
    (!payload.email.validate_email()).then(|| {
        (
            "email",
            rule_error("email", "email must be a valid email address"),
        )
    })
}

fn age_in_range(payload: &UserPayload) -> Option<(&'static str, ValidationError)> {
    (!(MIN_AGE..=MAX_AGE).contains(&payload.age))
        .then(|| ("age", rule_error("range", "age must be between 0 and 130")))
}

impl Validate for UserPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for rule in RULES {
            if let Some((field, error)) = rule(self) {
                errors.add(field, error);
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl UserPayload {
    /// 校验并转换为可写入的字段
    pub fn into_fields(self) -> Result<UserFields, ApiError> {
        self.validate()?;
        let age = i32::try_from(self.age)
            .map_err(|_| ApiError::Validation("age must be between 0 and 130".to_string()))?;

        Ok(UserFields {
            name: self.name,
            email: self.email,
            age,
        })
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        let mut entries: Vec<(usize, String)> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let rank = FIELD_ORDER
                    .iter()
                    .position(|f| *f == field)
                    .unwrap_or(FIELD_ORDER.len());
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                    (rank, message)
                })
            })
            .collect();
        entries.sort();

        let messages: Vec<String> = entries.into_iter().map(|(_, msg)| msg).collect();
        ApiError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, age: i64) -> UserPayload {
        UserPayload {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    fn message(p: UserPayload) -> String {
        match p.into_fields() {
            Err(ApiError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_payload_converts() {
        let fields = payload("Alice", "alice@example.com", 28).into_fields().unwrap();
        assert_eq!(fields.name, "Alice");
        assert_eq!(fields.email, "alice@example.com");
        assert_eq!(fields.age, 28);
    }

    #[test]
    fn age_boundaries() {
        assert!(payload("A", "a@example.com", 0).into_fields().is_ok());
        assert!(payload("A", "a@example.com", 130).into_fields().is_ok());
        assert_eq!(
            message(payload("A", "a@example.com", -1)),
            "age must be between 0 and 130"
        );
        assert_eq!(
            message(payload("A", "a@example.com", 131)),
            "age must be between 0 and 130"
        );
        assert!(payload("A", "a@example.com", i64::MAX).into_fields().is_err());
    }

    #[test]
    fn name_is_required() {
        assert_eq!(message(payload("", "a@example.com", 1)), "name is required");
        // 只拒绝空串，空白名字照常接受
        assert_eq!(
            payload("   ", "a@example.com", 1).into_fields().unwrap().name,
            "   "
        );
    }

    #[test]
    fn email_must_be_present_and_valid() {
        assert_eq!(message(payload("A", "", 1)), "email is required");
        assert_eq!(
            message(payload("A", "not-an-email", 1)),
            "email must be a valid email address"
        );
    }

    #[test]
    fn messages_follow_field_order() {
        assert_eq!(
            message(payload("", "bad", 200)),
            "name is required, email must be a valid email address, age must be between 0 and 130"
        );
    }

    #[test]
    fn missing_fields_default_to_zero_values() {
        let p: UserPayload = serde_json::from_str(r#"{"email": "a@example.com"}"#).unwrap();
        assert_eq!(p.age, 0);
        assert_eq!(message(p), "name is required");
    }
}
