//! String rules
//!
//! [`StringRule`] accepts JSON strings. Transforms (`trim`, `to_lowercase`,
//! `to_uppercase`) run first, in the order they were added, and produce the
//! canonical value; every check then runs against that canonical value and
//! all failures are reported together.
//!
//! # Example
//!
//! ```rust
//! use refinery::schema::{self, Rule};
//!
//! let rule = schema::string().trim().to_lowercase().email();
//!
//! let accepted = rule.parse(&"  Test@Dev.com ".into());
//! assert_eq!(accepted.unwrap(), "test@dev.com");
//!
//! assert!(rule.parse(&"testdev.com".into()).is_failure());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::diagnostics::{Diagnostics, Issue, IssueCode};
use super::Rule;
use crate::Validation;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(?:\.[A-Za-z0-9_'+\-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern is valid")
});

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    Trim,
    Lowercase,
    Uppercase,
}

impl Transform {
    fn apply(self, value: String) -> String {
        match self {
            Transform::Trim => {
                let trimmed = value.trim();
                if trimmed.len() == value.len() {
                    value
                } else {
                    trimmed.to_string()
                }
            }
            Transform::Lowercase => value.to_lowercase(),
            Transform::Uppercase => value.to_uppercase(),
        }
    }
}

#[derive(Debug, Clone)]
enum Check {
    NonEmpty,
    MinLength(usize),
    MaxLength(usize),
    Length(usize),
    Email,
    Uuid,
    StartsWith(String),
    EndsWith(String),
    Includes(String),
    Pattern(Regex),
}

impl Check {
    fn check(&self, value: &str) -> Option<Issue> {
        let len = value.chars().count();
        match self {
            Check::NonEmpty if len == 0 => Some(Issue::new(
                IssueCode::TooSmall {
                    minimum: "1".to_string(),
                    inclusive: true,
                },
                "String must not be empty",
            )),
            Check::MinLength(min) if len < *min => Some(Issue::new(
                IssueCode::TooSmall {
                    minimum: min.to_string(),
                    inclusive: true,
                },
                format!("Too small: expected string to have >={min} characters"),
            )),
            Check::MaxLength(max) if len > *max => Some(Issue::new(
                IssueCode::TooBig {
                    maximum: max.to_string(),
                    inclusive: true,
                },
                format!("Too big: expected string to have <={max} characters"),
            )),
            Check::Length(exact) if len < *exact => Some(Issue::new(
                IssueCode::TooSmall {
                    minimum: exact.to_string(),
                    inclusive: true,
                },
                format!("Too small: expected string to have exactly {exact} characters"),
            )),
            Check::Length(exact) if len > *exact => Some(Issue::new(
                IssueCode::TooBig {
                    maximum: exact.to_string(),
                    inclusive: true,
                },
                format!("Too big: expected string to have exactly {exact} characters"),
            )),
            Check::Email if !EMAIL.is_match(value) => Some(Issue::new(
                IssueCode::InvalidFormat { format: "email" },
                "Invalid email address",
            )),
            Check::Uuid if !UUID.is_match(value) => Some(Issue::new(
                IssueCode::InvalidFormat { format: "uuid" },
                "Invalid UUID",
            )),
            Check::StartsWith(prefix) if !value.starts_with(prefix.as_str()) => Some(Issue::new(
                IssueCode::InvalidFormat {
                    format: "starts_with",
                },
                format!("Invalid string: must start with {prefix:?}"),
            )),
            Check::EndsWith(suffix) if !value.ends_with(suffix.as_str()) => Some(Issue::new(
                IssueCode::InvalidFormat { format: "ends_with" },
                format!("Invalid string: must end with {suffix:?}"),
            )),
            Check::Includes(needle) if !value.contains(needle.as_str()) => Some(Issue::new(
                IssueCode::InvalidFormat { format: "includes" },
                format!("Invalid string: must include {needle:?}"),
            )),
            Check::Pattern(pattern) if !pattern.is_match(value) => Some(Issue::new(
                IssueCode::InvalidFormat { format: "regex" },
                format!("Invalid string: must match pattern /{}/", pattern.as_str()),
            )),
            _ => None,
        }
    }
}

/// Rule accepting JSON strings; see the [module docs](self).
#[derive(Debug, Clone, Default)]
pub struct StringRule {
    transforms: Vec<Transform>,
    checks: Vec<Check>,
}

impl StringRule {
    /// A rule accepting any string.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Strip leading and trailing whitespace before checking.
    pub fn trim(self) -> Self {
        self.with_transform(Transform::Trim)
    }

    /// Lowercase before checking.
    pub fn to_lowercase(self) -> Self {
        self.with_transform(Transform::Lowercase)
    }

    /// Uppercase before checking.
    pub fn to_uppercase(self) -> Self {
        self.with_transform(Transform::Uppercase)
    }

    /// Reject the empty string.
    pub fn non_empty(self) -> Self {
        self.with_check(Check::NonEmpty)
    }

    /// Require at least `min` characters.
    pub fn min_len(self, min: usize) -> Self {
        self.with_check(Check::MinLength(min))
    }

    /// Require at most `max` characters.
    pub fn max_len(self, max: usize) -> Self {
        self.with_check(Check::MaxLength(max))
    }

    /// Require exactly `len` characters.
    pub fn length(self, len: usize) -> Self {
        self.with_check(Check::Length(len))
    }

    /// Require an email address.
    pub fn email(self) -> Self {
        self.with_check(Check::Email)
    }

    /// Require a hyphenated hexadecimal UUID.
    pub fn uuid(self) -> Self {
        self.with_check(Check::Uuid)
    }

    /// Require a prefix.
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.with_check(Check::StartsWith(prefix.into()))
    }

    /// Require a suffix.
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.with_check(Check::EndsWith(suffix.into()))
    }

    /// Require a substring.
    pub fn includes(self, needle: impl Into<String>) -> Self {
        self.with_check(Check::Includes(needle.into()))
    }

    /// Require a match of a compiled regular expression.
    pub fn pattern(self, pattern: Regex) -> Self {
        self.with_check(Check::Pattern(pattern))
    }
}

impl Rule for StringRule {
    type Output = String;

    fn parse(&self, input: &Value) -> Validation<String, Diagnostics> {
        let Some(raw) = input.as_str() else {
            return Validation::Failure(Issue::invalid_type("string", input).into());
        };

        let value = self
            .transforms
            .iter()
            .fold(raw.to_string(), |value, transform| transform.apply(value));

        let issues = self
            .checks
            .iter()
            .filter_map(|check| check.check(&value))
            .collect();

        match Diagnostics::from_issues(issues) {
            Some(diagnostics) => Validation::Failure(diagnostics),
            None => Validation::Success(value),
        }
    }

    fn describe(&self) -> String {
        "string".to_string()
    }
}
