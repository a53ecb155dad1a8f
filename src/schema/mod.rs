//! Schema rules: parse untyped JSON input into typed values
//!
//! A [`Rule`] either accepts an input, producing its canonical typed value,
//! or rejects it with [`Diagnostics`] listing every violated constraint.
//! Rules never panic, whatever the input.
//!
//! Rules are plain values built with chained constructors:
//!
//! ```rust
//! use refinery::schema::{self, Rule, RuleExt};
//! use serde_json::json;
//!
//! let username = schema::string().trim().min_len(3).max_len(20);
//! let profile = schema::object()
//!     .field("username", username)
//!     .field("tags", schema::array(schema::string().non_empty()).max_items(5))
//!     .field("age", schema::integer().non_negative().optional());
//!
//! let parsed = profile.parse(&json!({ "username": " ada ", "tags": ["math"] }));
//! assert_eq!(parsed.unwrap()["username"], "ada");
//! ```
//!
//! A rule becomes a nominal type with [`RuleExt::refined`]; see
//! [`crate::refined`].

mod boolean;
mod combinators;
mod diagnostics;
mod number;
mod object;
mod string;

use std::borrow::Cow;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::refined::{Brand, Refinement, Tag};
use crate::Validation;

pub use boolean::BooleanRule;
pub use combinators::{Ensure, Optional, Transform};
pub use diagnostics::{format, Diagnostics, Issue, IssueCode, PathSegment};
pub use number::{NumberRule, Numeric};
pub use object::{ArrayRule, ObjectRule, TypedRule};
pub use string::StringRule;

/// A description of acceptable input.
///
/// Implementations must be total: every `Value`, including `null` and
/// values of an unrelated kind, yields exactly one of `Success` or `Failure`.
///
/// # Example
///
/// ```rust
/// use refinery::schema::{Diagnostics, Issue, Rule};
/// use refinery::Validation;
/// use serde_json::Value;
///
/// struct Hex;
///
/// impl Rule for Hex {
///     type Output = u64;
///
///     fn parse(&self, input: &Value) -> Validation<u64, Diagnostics> {
///         match input.as_str().map(|s| u64::from_str_radix(s, 16)) {
///             Some(Ok(n)) => Validation::Success(n),
///             _ => Validation::Failure(Issue::custom("Expected a hex string").into()),
///         }
///     }
/// }
///
/// assert_eq!(Hex.parse(&"ff".into()).unwrap(), 255);
/// ```
pub trait Rule: Send + Sync {
    /// The canonical value produced for accepted input
    type Output;

    /// Attempt to parse `input`
    fn parse(&self, input: &Value) -> Validation<Self::Output, Diagnostics>;

    /// Short human-readable description of what this rule accepts
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<R: Rule + ?Sized> Rule for &R {
    type Output = R::Output;

    fn parse(&self, input: &Value) -> Validation<Self::Output, Diagnostics> {
        (**self).parse(input)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    type Output = R::Output;

    fn parse(&self, input: &Value) -> Validation<Self::Output, Diagnostics> {
        (**self).parse(input)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    type Output = R::Output;

    fn parse(&self, input: &Value) -> Validation<Self::Output, Diagnostics> {
        (**self).parse(input)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Combinators available on every rule.
pub trait RuleExt: Rule + Sized {
    /// Add a caller-defined constraint, reported with `message` when
    /// `predicate` returns `false`.
    fn ensure<P>(self, predicate: P, message: impl Into<Cow<'static, str>>) -> Ensure<Self, P>
    where
        P: Fn(&Self::Output) -> bool + Send + Sync,
    {
        Ensure {
            rule: self,
            predicate,
            message: message.into(),
        }
    }

    /// Map the accepted value through `f`.
    fn transform<U, F>(self, f: F) -> Transform<Self, F>
    where
        F: Fn(Self::Output) -> U + Send + Sync,
    {
        Transform { rule: self, f }
    }

    /// Also accept `null`, producing `None`.
    fn optional(self) -> Optional<Self> {
        Optional { rule: self }
    }

    /// Tag accepted values with `B` at the type level.
    fn branded<B: Tag>(self) -> Brand<Self, B> {
        Brand::new(self)
    }

    /// Build a refinement descriptor for tag `B` with the default error.
    ///
    /// ```rust
    /// use refinery::schema::{self, RuleExt};
    ///
    /// refinery::tag!(pub Email);
    ///
    /// let email = schema::string().email().refined::<Email>();
    /// assert!(email.create("test@dev.com").is_success());
    /// ```
    fn refined<B: Tag>(self) -> Refinement<B, Self> {
        Refinement::new(self)
    }
}

impl<R: Rule> RuleExt for R {}

/// Rule accepting strings; see [`StringRule`].
pub fn string() -> StringRule {
    StringRule::new()
}

/// Rule accepting any JSON number as `f64`; see [`NumberRule`].
pub fn number() -> NumberRule<f64> {
    NumberRule::new()
}

/// Rule accepting integral JSON numbers as `i64`; see [`NumberRule`].
pub fn integer() -> NumberRule<i64> {
    NumberRule::new()
}

/// Rule accepting `true` or `false`.
pub fn boolean() -> BooleanRule {
    BooleanRule
}

/// Rule accepting objects; declare fields with [`ObjectRule::field`].
pub fn object() -> ObjectRule {
    ObjectRule::new()
}

/// Rule accepting arrays whose every element satisfies `item`.
pub fn array<R: Rule>(item: R) -> ArrayRule<R> {
    ArrayRule::new(item)
}

/// Rule accepting whatever `T` deserializes from.
pub fn typed<T: DeserializeOwned>() -> TypedRule<T> {
    TypedRule::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_for_references_and_pointers() {
        let rule = string().non_empty();
        assert!((&rule).parse(&json!("x")).is_success());
        assert!(Box::new(rule.clone()).parse(&json!("")).is_failure());

        let shared: Arc<dyn Rule<Output = String>> = Arc::new(rule);
        assert!(shared.parse(&json!("x")).is_success());
    }

    #[test]
    fn test_describe() {
        assert_eq!(string().describe(), "string");
        assert_eq!(integer().describe(), "integer");
        assert_eq!(array(boolean()).describe(), "array of boolean");
        assert_eq!(object().field("a", number()).describe(), "object { a }");
    }

    #[test]
    fn test_every_constructor_is_total() {
        let inputs = [
            json!(null),
            json!(true),
            json!(-1),
            json!(1.5),
            json!(""),
            json!([null]),
            json!({ "k": [] }),
        ];
        for input in &inputs {
            let _ = string().email().parse(input);
            let _ = number().positive().parse(input);
            let _ = integer().multiple_of(0).parse(input);
            let _ = boolean().parse(input);
            let _ = object().field("k", array(integer())).strict().parse(input);
            let _ = typed::<Vec<u8>>().parse(input);
        }
    }
}
