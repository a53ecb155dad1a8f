//! Refined types: nominal brands over validated primitives
//!
//! This module implements the "parse, don't validate" pattern for untyped
//! input: validate data once where it enters the program, then let the type
//! carry the proof.
//!
//! A [`Refinement`] pairs a [`Tag`] with a [`Rule`](crate::schema::Rule).
//! Its [`create`](Refinement::create) accepts any JSON value and yields
//! either a [`Branded`] value or an error; it never panics. Branded values
//! with different tags are different types even when the primitive is the
//! same, and a plain primitive never passes for a branded one.
//!
//! # Quick Start
//!
//! ```rust
//! use refinery::refined::Branded;
//! use refinery::schema::{self, RuleExt};
//!
//! refinery::tag!(pub Email);
//! refinery::tag!(pub Username);
//!
//! let email = schema::string().email().refined::<Email>();
//! let username = schema::string().trim().min_len(3).refined::<Username>();
//!
//! fn send_welcome(to: &Branded<String, Email>, name: &Branded<String, Username>) -> String {
//!     format!("Welcome {name}, mail goes to {to}")
//! }
//!
//! let to = email.create("test@dev.com").unwrap();
//! let name = username.create(" ada ").unwrap();
//! assert_eq!(send_welcome(&to, &name), "Welcome ada, mail goes to test@dev.com");
//!
//! // Rejected input carries every violation, pretty-printed.
//! let error = email.create("testdev.com").unwrap_failure();
//! assert!(error.message().contains("Invalid email address"));
//! ```
//!
//! # Custom errors
//!
//! ```rust
//! use refinery::schema::{self, RuleExt};
//!
//! refinery::tag!(pub PositiveNumber);
//!
//! let positive = schema::number()
//!     .positive()
//!     .refined::<PositiveNumber>()
//!     .with_error(|input, diagnostics| {
//!         format!("{input} rejected: {}", diagnostics.first().message())
//!     });
//!
//! let error = positive.create(-5).unwrap_failure();
//! assert!(error.starts_with("-5 rejected"));
//! ```
//!
//! # Accumulating across fields
//!
//! `create` returns a [`Validation`](crate::Validation), so independent
//! refinements combine with [`Validation::and`](crate::Validation::and)
//! once their errors share a semigroup:
//!
//! ```rust
//! use refinery::schema::{self, RuleExt};
//!
//! refinery::tag!(pub Email);
//! refinery::tag!(pub Age);
//!
//! let email = schema::string().email().refined::<Email>();
//! let age = schema::integer().gte(18).refined::<Age>();
//!
//! let signup = email
//!     .create("nope")
//!     .map_err(|e| e.into_diagnostics())
//!     .and(age.create(12).map_err(|e| e.into_diagnostics()));
//!
//! assert_eq!(signup.unwrap_failure().len(), 2);
//! ```

mod brand;
mod branded;
mod descriptor;
mod error;
mod serde_impl;

pub use brand::{brand, Brand};
pub use branded::{Branded, Unbrand, Unbranded};
pub use descriptor::{Descriptor, Infer, InferError, InferPrimitive, Refinement};
pub use error::{DefaultErrorTransform, ErrorTransform, RefinementError};

/// A type-level brand.
///
/// Tags are never instantiated; they only distinguish branded types. The
/// usual way to declare one is [`tag!`](crate::tag), which generates an
/// uninhabited enum.
///
/// # Example
///
/// ```rust
/// use refinery::refined::Tag;
///
/// enum OrderId {}
///
/// impl Tag for OrderId {
///     const NAME: &'static str = "OrderId";
/// }
///
/// assert_eq!(<OrderId as Tag>::NAME, "OrderId");
/// ```
pub trait Tag: 'static {
    /// Name used in diagnostics, `Debug` output and log events
    const NAME: &'static str;
}

/// Declare a [`Tag`](crate::refined::Tag).
///
/// `tag!(pub Email)` declares `pub enum Email {}` named `"Email"`;
/// `tag!(Port = "NetworkPort")` overrides the name.
///
/// ```rust
/// use refinery::refined::Tag;
///
/// refinery::tag!(
///     /// Addresses that passed the email rule
///     pub Email
/// );
/// refinery::tag!(Port = "NetworkPort");
///
/// assert_eq!(Email::NAME, "Email");
/// assert_eq!(Port::NAME, "NetworkPort");
/// ```
#[macro_export]
macro_rules! tag {
    ($(#[$meta:meta])* $vis:vis $name:ident = $tag:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis enum $name {}

        impl $crate::refined::Tag for $name {
            const NAME: &'static str = $tag;
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $crate::tag!($(#[$meta])* $vis $name = stringify!($name));
    };
}
