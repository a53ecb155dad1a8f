//! # Refinery
//!
//! Branded refinement types: validate untyped input once, at the boundary,
//! and carry the proof in the type from then on.
//!
//! A refinement is built from a [`Tag`](refined::Tag) and a
//! [`Rule`](schema::Rule). Its `create` method is total: any JSON value goes
//! in, and either a branded value or an error comes out, never a panic.
//! Branded values are zero-cost wrappers, nominally distinct per tag, and
//! unwrap back to their primitive with `primitive`.
//!
//! ## Quick Example
//!
//! ```rust
//! use refinery::prelude::*;
//!
//! refinery::tag!(pub Email);
//!
//! let email = schema::string().email().refined::<Email>();
//!
//! assert!(email.create("").is_failure());
//! assert!(email.create("2").is_failure());
//!
//! match email.create("test@dev.com") {
//!     Validation::Success(address) => {
//!         let raw: String = email.primitive(address);
//!         assert_eq!(raw, "test@dev.com");
//!     }
//!     Validation::Failure(error) => panic!("{error}"),
//! }
//!
//! let error = email.create("testdev.com").unwrap_failure();
//! assert_eq!(error.message(), "✖ Invalid email address");
//! ```
//!
//! ## Cargo features
//!
//! - `tracing`: emit a `trace` event for every accepted input and a `debug`
//!   event for every rejected one, tagged with the refinement's name.
//! - `proptest`: `Arbitrary` for [`Validation`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod nonempty;
pub mod refined;
pub mod schema;
pub mod semigroup;
pub mod testing;
pub mod validation;

// Re-exports
pub use nonempty::NonEmptyVec;
pub use refined::{Branded, Refinement, RefinementError, Tag};
pub use schema::{Diagnostics, Rule, RuleExt};
pub use semigroup::Semigroup;
pub use validation::Validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::nonempty::NonEmptyVec;
    pub use crate::refined::{
        Branded, Descriptor, ErrorTransform, Infer, InferPrimitive, Refinement, RefinementError,
        Tag, Unbranded,
    };
    pub use crate::schema::{self, Diagnostics, Issue, IssueCode, Rule, RuleExt};
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
}
