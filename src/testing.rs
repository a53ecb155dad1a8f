//! Testing helpers for code built on refinements
//!
//! Assertion macros for [`Validation`](crate::Validation) results, and,
//! with the `proptest` feature, an `Arbitrary` impl so validations can be
//! generated in property tests.
//!
//! # Examples
//!
//! ```rust
//! use refinery::schema::{self, RuleExt};
//! use refinery::{assert_failure, assert_success};
//!
//! refinery::tag!(pub Email);
//!
//! let email = schema::string().email().refined::<Email>();
//! assert_success!(email.create("test@dev.com"));
//! assert_failure!(email.create("testdev.com"));
//! ```

/// Assert that a validation succeeds.
///
/// Panics with the failure's `Debug` output otherwise.
///
/// # Example
///
/// ```rust
/// use refinery::{Validation, assert_success};
///
/// let val = Validation::<_, Vec<String>>::success(42);
/// assert_success!(val);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
///
/// Panics with the success value's `Debug` output otherwise.
///
/// # Example
///
/// ```rust
/// use refinery::{Validation, assert_failure};
///
/// let val = Validation::<i32, _>::failure(vec!["error".to_string()]);
/// assert_failure!(val);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a validation fails with exactly the expected error.
///
/// Pairs well with [`Diagnostics::messages`](crate::schema::Diagnostics::messages):
///
/// ```rust
/// use refinery::schema::{self, Rule};
/// use refinery::assert_validation_errors;
/// use serde_json::json;
///
/// let rule = schema::string().non_empty().email();
/// assert_validation_errors!(
///     rule.parse(&json!("")).map_err(|d| d.messages().join("; ")),
///     "String must not be empty; Invalid email address"
/// );
/// ```
#[macro_export]
macro_rules! assert_validation_errors {
    ($validation:expr, $expected:expr) => {
        match $validation {
            $crate::Validation::Failure(errors) => {
                assert_eq!(errors, $expected);
            }
            $crate::Validation::Success(v) => {
                panic!(
                    "Expected Failure with errors {:?}, got Success: {:?}",
                    $expected, v
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
use crate::Validation;

// `boxed()` erases the strategy, so every piece must be `'static`.
#[cfg(feature = "proptest")]
impl<T, E> Arbitrary for Validation<T, E>
where
    T: Arbitrary + 'static,
    E: Arbitrary + 'static,
    T::Strategy: 'static,
    E::Strategy: 'static,
{
    type Parameters = (T::Parameters, E::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (t_params, e_params) = args;
        prop_oneof![
            any_with::<T>(t_params).prop_map(Validation::success),
            any_with::<E>(e_params).prop_map(Validation::failure),
        ]
        .boxed()
    }
}
