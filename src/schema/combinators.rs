//! Rule combinators
//!
//! - [`Ensure`]: add a caller-defined constraint to a rule
//! - [`Transform`]: map the accepted value to another value
//! - [`Optional`]: accept `null` as `None`

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use super::diagnostics::{Diagnostics, Issue};
use super::Rule;
use crate::Validation;

/// A rule plus a predicate on its accepted value.
///
/// The predicate only runs when the inner rule accepts, so it can assume the
/// inner rule's guarantees.
///
/// # Example
///
/// ```rust
/// use refinery::schema::{self, Rule, RuleExt};
///
/// let even = schema::integer().ensure(|n| n % 2 == 0, "Number must be even");
/// assert!(even.parse(&4.into()).is_success());
/// assert_eq!(
///     even.parse(&3.into()).unwrap_failure().first().message(),
///     "Number must be even"
/// );
/// ```
#[derive(Clone)]
pub struct Ensure<R, P> {
    pub(crate) rule: R,
    pub(crate) predicate: P,
    pub(crate) message: Cow<'static, str>,
}

impl<R: fmt::Debug, P> fmt::Debug for Ensure<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ensure")
            .field("rule", &self.rule)
            .field("message", &self.message)
            .finish()
    }
}

impl<R, P> Rule for Ensure<R, P>
where
    R: Rule,
    P: Fn(&R::Output) -> bool + Send + Sync,
{
    type Output = R::Output;

    fn parse(&self, input: &Value) -> Validation<R::Output, Diagnostics> {
        self.rule.parse(input).and_then(|value| {
            if (self.predicate)(&value) {
                Validation::Success(value)
            } else {
                Validation::Failure(Issue::custom(self.message.clone()).into())
            }
        })
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.rule.describe(), self.message)
    }
}

/// A rule whose accepted value is passed through a function.
///
/// # Example
///
/// ```rust
/// use refinery::schema::{self, Rule, RuleExt};
///
/// let length = schema::string().transform(|s| s.len());
/// assert_eq!(length.parse(&"four".into()).unwrap(), 4);
/// ```
#[derive(Clone)]
pub struct Transform<R, F> {
    pub(crate) rule: R,
    pub(crate) f: F,
}

impl<R: fmt::Debug, F> fmt::Debug for Transform<R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("rule", &self.rule).finish()
    }
}

impl<R, F, U> Rule for Transform<R, F>
where
    R: Rule,
    F: Fn(R::Output) -> U + Send + Sync,
{
    type Output = U;

    fn parse(&self, input: &Value) -> Validation<U, Diagnostics> {
        self.rule.parse(input).map(&self.f)
    }

    fn describe(&self) -> String {
        self.rule.describe()
    }
}

/// A rule that also accepts `null`, producing `None`.
#[derive(Debug, Clone)]
pub struct Optional<R> {
    pub(crate) rule: R,
}

impl<R: Rule> Rule for Optional<R> {
    type Output = Option<R::Output>;

    fn parse(&self, input: &Value) -> Validation<Self::Output, Diagnostics> {
        match input {
            Value::Null => Validation::Success(None),
            other => self.rule.parse(other).map(Some),
        }
    }

    fn describe(&self) -> String {
        format!("{} | null", self.rule.describe())
    }
}
