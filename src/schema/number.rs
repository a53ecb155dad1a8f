//! Numeric rules
//!
//! [`NumberRule<N>`] accepts JSON numbers as `f64` ([`number`](super::number))
//! or as `i64` ([`integer`](super::integer)). Bounds and step checks all run,
//! and every failure is reported.
//!
//! # Example
//!
//! ```rust
//! use refinery::schema::{self, Rule};
//!
//! let rule = schema::integer().positive().max(100);
//! assert_eq!(rule.parse(&42.into()).unwrap(), 42);
//! assert!(rule.parse(&(-5).into()).is_failure());
//! assert!(rule.parse(&"42".into()).is_failure());
//! ```

use std::fmt;

use serde_json::Value;

use super::diagnostics::{Diagnostics, Issue, IssueCode};
use super::Rule;
use crate::Validation;

/// A JSON-representable number type a [`NumberRule`] can produce.
pub trait Numeric: Copy + PartialOrd + fmt::Display + fmt::Debug + Send + Sync + 'static {
    /// Kind name used in type-mismatch messages.
    const KIND: &'static str;

    /// Additive identity.
    const ZERO: Self;

    /// Read the number out of untyped input.
    fn extract(input: &Value) -> Result<Self, Issue>;

    /// Whether `self` is an integer multiple of `divisor`.
    fn is_multiple_of(self, divisor: Self) -> bool;

    /// Whether `self` has no fractional part.
    fn is_integral(self) -> bool;
}

impl Numeric for f64 {
    const KIND: &'static str = "number";
    const ZERO: Self = 0.0;

    fn extract(input: &Value) -> Result<Self, Issue> {
        input
            .as_f64()
            .ok_or_else(|| Issue::invalid_type(Self::KIND, input))
    }

    fn is_multiple_of(self, divisor: Self) -> bool {
        if divisor == 0.0 || !divisor.is_finite() {
            return false;
        }
        let quotient = self / divisor;
        (quotient - quotient.round()).abs() < 1e-9
    }

    fn is_integral(self) -> bool {
        self.is_finite() && self.fract() == 0.0
    }
}

impl Numeric for i64 {
    const KIND: &'static str = "integer";
    const ZERO: Self = 0;

    fn extract(input: &Value) -> Result<Self, Issue> {
        let Value::Number(number) = input else {
            return Err(Issue::invalid_type(Self::KIND, input));
        };
        if let Some(value) = number.as_i64() {
            return Ok(value);
        }
        if number.is_u64() {
            return Err(Issue::new(
                IssueCode::TooBig {
                    maximum: i64::MAX.to_string(),
                    inclusive: true,
                },
                format!("Too big: expected integer to be <={}", i64::MAX),
            ));
        }
        match number.as_f64() {
            Some(value) if value.is_integral() && value < i64::MIN as f64 => Err(Issue::new(
                IssueCode::TooSmall {
                    minimum: i64::MIN.to_string(),
                    inclusive: true,
                },
                format!("Too small: expected integer to be >={}", i64::MIN),
            )),
            Some(value) if value.is_integral() && value < i64::MAX as f64 => Ok(value as i64),
            Some(value) if value.is_integral() => Err(Issue::new(
                IssueCode::TooBig {
                    maximum: i64::MAX.to_string(),
                    inclusive: true,
                },
                format!("Too big: expected integer to be <={}", i64::MAX),
            )),
            _ => Err(Issue::new(
                IssueCode::NotInteger,
                "Invalid input: expected int, received number",
            )),
        }
    }

    fn is_multiple_of(self, divisor: Self) -> bool {
        divisor == -1 || self.checked_rem(divisor) == Some(0)
    }

    fn is_integral(self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum Check<N> {
    Gt(N),
    Gte(N),
    Lt(N),
    Lte(N),
    MultipleOf(N),
    Int,
}

impl<N: Numeric> Check<N> {
    fn check(&self, value: N) -> Option<Issue> {
        match *self {
            Check::Gt(bound) if value <= bound => Some(Issue::new(
                IssueCode::TooSmall {
                    minimum: bound.to_string(),
                    inclusive: false,
                },
                format!("Too small: expected number to be >{bound}"),
            )),
            Check::Gte(bound) if value < bound => Some(Issue::new(
                IssueCode::TooSmall {
                    minimum: bound.to_string(),
                    inclusive: true,
                },
                format!("Too small: expected number to be >={bound}"),
            )),
            Check::Lt(bound) if value >= bound => Some(Issue::new(
                IssueCode::TooBig {
                    maximum: bound.to_string(),
                    inclusive: false,
                },
                format!("Too big: expected number to be <{bound}"),
            )),
            Check::Lte(bound) if value > bound => Some(Issue::new(
                IssueCode::TooBig {
                    maximum: bound.to_string(),
                    inclusive: true,
                },
                format!("Too big: expected number to be <={bound}"),
            )),
            Check::MultipleOf(divisor) if !value.is_multiple_of(divisor) => Some(Issue::new(
                IssueCode::NotMultipleOf {
                    divisor: divisor.to_string(),
                },
                format!("Invalid number: must be a multiple of {divisor}"),
            )),
            Check::Int if !value.is_integral() => Some(Issue::new(
                IssueCode::NotInteger,
                "Invalid input: expected int, received number",
            )),
            _ => None,
        }
    }
}

/// Rule accepting JSON numbers; see the [module docs](self).
#[derive(Debug, Clone)]
pub struct NumberRule<N> {
    checks: Vec<Check<N>>,
}

impl<N: Numeric> Default for NumberRule<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Numeric> NumberRule<N> {
    /// A rule accepting any number of this kind.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    fn with_check(mut self, check: Check<N>) -> Self {
        self.checks.push(check);
        self
    }

    /// Require `value > bound`.
    pub fn gt(self, bound: N) -> Self {
        self.with_check(Check::Gt(bound))
    }

    /// Require `value >= bound`.
    pub fn gte(self, bound: N) -> Self {
        self.with_check(Check::Gte(bound))
    }

    /// Require `value < bound`.
    pub fn lt(self, bound: N) -> Self {
        self.with_check(Check::Lt(bound))
    }

    /// Require `value <= bound`.
    pub fn lte(self, bound: N) -> Self {
        self.with_check(Check::Lte(bound))
    }

    /// Alias for [`gte`](Self::gte).
    pub fn min(self, bound: N) -> Self {
        self.gte(bound)
    }

    /// Alias for [`lte`](Self::lte).
    pub fn max(self, bound: N) -> Self {
        self.lte(bound)
    }

    /// Require `value > 0`.
    pub fn positive(self) -> Self {
        self.gt(N::ZERO)
    }

    /// Require `value >= 0`.
    pub fn non_negative(self) -> Self {
        self.gte(N::ZERO)
    }

    /// Require `value < 0`.
    pub fn negative(self) -> Self {
        self.lt(N::ZERO)
    }

    /// Require `value <= 0`.
    pub fn non_positive(self) -> Self {
        self.lte(N::ZERO)
    }

    /// Require an integer multiple of `divisor`. A zero divisor rejects everything.
    pub fn multiple_of(self, divisor: N) -> Self {
        self.with_check(Check::MultipleOf(divisor))
    }

    /// Require no fractional part.
    pub fn int(self) -> Self {
        self.with_check(Check::Int)
    }
}

impl<N: Numeric> Rule for NumberRule<N> {
    type Output = N;

    fn parse(&self, input: &Value) -> Validation<N, Diagnostics> {
        let value = match N::extract(input) {
            Ok(value) => value,
            Err(issue) => return Validation::Failure(issue.into()),
        };

        let issues = self
            .checks
            .iter()
            .filter_map(|check| check.check(value))
            .collect();

        match Diagnostics::from_issues(issues) {
            Some(diagnostics) => Validation::Failure(diagnostics),
            None => Validation::Success(value),
        }
    }

    fn describe(&self) -> String {
        N::KIND.to_string()
    }
}
