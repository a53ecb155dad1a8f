//! Semigroup trait for accumulating failures
//!
//! A Semigroup is a type with an associative binary operation. Refinement
//! diagnostics use it to merge the issues reported by independent checks
//! (every field of an object, every element of an array) into one failure
//! instead of stopping at the first.
//!
//! # Examples
//!
//! ```
//! use refinery::Semigroup;
//!
//! let v1 = vec!["too short"];
//! let v2 = vec!["missing @"];
//! assert_eq!(v1.combine(v2), vec!["too short", "missing @"]);
//! ```

/// A type that supports an associative binary operation
///
/// # Laws
///
/// Implementations must satisfy the associativity law:
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}
