//! Validation type: the success/failure container returned by every refinement
//!
//! `Validation<T, E>` is the only channel through which a refinement reports
//! its outcome. Rejected input is an expected, frequent result, so it is a
//! value the caller matches on rather than a panic or an early return.
//!
//! # Examples
//!
//! ```
//! use refinery::Validation;
//!
//! let success = Validation::<_, Vec<&str>>::success(42);
//! let failure = Validation::<i32, _>::failure(vec!["must be positive"]);
//!
//! assert!(success.is_success());
//! assert!(failure.is_failure());
//! assert_eq!(failure.unwrap_or(0), 0);
//! ```
//!
//! ## Accumulating errors
//!
//! ```
//! use refinery::Validation;
//!
//! let v1 = Validation::<i32, _>::failure(vec!["error1"]);
//! let v2 = Validation::<i32, _>::failure(vec!["error2"]);
//!
//! assert_eq!(v1.and(v2), Validation::Failure(vec!["error1", "error2"]));
//! ```

use std::fmt;

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with an error
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "a Validation may be a Failure, which should be handled"]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with an error
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Create a validation from a Result
    ///
    /// # Examples
    ///
    /// ```
    /// use refinery::Validation;
    ///
    /// let v = Validation::from_result(Ok::<_, String>(42));
    /// assert_eq!(v, Validation::Success(42));
    /// ```
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }

    /// Convert this validation to a Result so it can be used with `?`
    ///
    /// # Examples
    ///
    /// ```
    /// use refinery::Validation;
    ///
    /// let v = Validation::<i32, _>::failure("error".to_string());
    /// assert_eq!(v.into_result(), Err("error".to_string()));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Borrow the contents of this validation
    #[inline]
    pub fn as_ref(&self) -> Validation<&T, &E> {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// The success value, if any
    #[inline]
    pub fn ok(self) -> Option<T> {
        match self {
            Validation::Success(value) => Some(value),
            Validation::Failure(_) => None,
        }
    }

    /// The failure value, if any
    #[inline]
    pub fn err(self) -> Option<E> {
        match self {
            Validation::Success(_) => None,
            Validation::Failure(error) => Some(error),
        }
    }

    /// Transform the success value if present
    ///
    /// # Examples
    ///
    /// ```
    /// use refinery::Validation;
    ///
    /// let v = Validation::<_, String>::success(5);
    /// assert_eq!(v.map(|x| x * 2), Validation::Success(10));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the error value if present
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }

    /// Chain a dependent validation
    ///
    /// The function is only called if the current validation is successful.
    ///
    /// # Examples
    ///
    /// ```
    /// use refinery::Validation;
    ///
    /// let v = Validation::<_, Vec<&str>>::success(5);
    /// let result = v.and_then(|x| {
    ///     if x > 0 {
    ///         Validation::success(x * 2)
    ///     } else {
    ///         Validation::failure(vec!["must be positive"])
    ///     }
    /// });
    /// assert_eq!(result, Validation::Success(10));
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> Validation<U, E>,
    {
        match self {
            Validation::Success(value) => f(value),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Return the success value, or `default` on failure
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Validation::Success(value) => value,
            Validation::Failure(_) => default,
        }
    }

    /// Return the success value, or compute one from the failure
    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Validation::Success(value) => value,
            Validation::Failure(error) => f(error),
        }
    }

    /// Return the success value, or `T::default()` on failure
    #[inline]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Validation::Success(value) => value,
            Validation::Failure(_) => T::default(),
        }
    }
}

impl<T, E: fmt::Debug> Validation<T, E> {
    /// Return the success value.
    ///
    /// # Panics
    ///
    /// Panics if the validation is a `Failure`. Unwrapping a failure is a
    /// logic error at the call site, not a recoverable path.
    ///
    /// # Examples
    ///
    /// ```
    /// use refinery::Validation;
    ///
    /// let v = Validation::<_, String>::success(42);
    /// assert_eq!(v.unwrap(), 42);
    /// ```
    ///
    /// ```should_panic
    /// use refinery::Validation;
    ///
    /// let v = Validation::<i32, _>::failure("bad input");
    /// v.unwrap(); // panics
    /// ```
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Validation::Success(value) => value,
            Validation::Failure(error) => {
                panic!("called `Validation::unwrap()` on a `Failure` value: {error:?}")
            }
        }
    }
}

impl<T: fmt::Debug, E> Validation<T, E> {
    /// Return the failure value.
    ///
    /// # Panics
    ///
    /// Panics if the validation is a `Success`.
    #[track_caller]
    pub fn unwrap_failure(self) -> E {
        match self {
            Validation::Success(value) => {
                panic!("called `Validation::unwrap_failure()` on a `Success` value: {value:?}")
            }
            Validation::Failure(error) => error,
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine two validations, accumulating errors using the Semigroup instance
    ///
    /// If both validations are successful, returns a success with a tuple of both values.
    /// If either or both fail, accumulates the errors using `Semigroup::combine`.
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) => Validation::Failure(e),
            (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    /// Combine every validation produced by an iterator
    ///
    /// Returns all success values in order if every validation succeeds,
    /// otherwise every failure combined in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use refinery::Validation;
    ///
    /// let result = Validation::all_vec(vec![
    ///     Validation::<i32, _>::failure(vec!["error1"]),
    ///     Validation::success(2),
    ///     Validation::failure(vec!["error2"]),
    /// ]);
    /// assert_eq!(result, Validation::Failure(vec!["error1", "error2"]));
    /// ```
    pub fn all_vec<I>(validations: I) -> Validation<Vec<T>, E>
    where
        I: IntoIterator<Item = Validation<T, E>>,
    {
        let mut successes = Vec::new();
        let mut failure: Option<E> = None;

        for validation in validations {
            match validation {
                Validation::Success(value) => successes.push(value),
                Validation::Failure(error) => {
                    failure = Some(match failure {
                        Some(acc) => acc.combine(error),
                        None => error,
                    });
                }
            }
        }

        match failure {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(successes),
        }
    }
}

impl<T, E> From<Result<T, E>> for Validation<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Validation::from_result(result)
    }
}

impl<T, E> From<Validation<T, E>> for Result<T, E> {
    fn from(validation: Validation<T, E>) -> Self {
        validation.into_result()
    }
}
