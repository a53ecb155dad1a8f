//! Rejection errors and the error-transform seam

use std::fmt;

use serde_json::Value;

use crate::schema::Diagnostics;

/// The error a refinement reports when no custom transform is installed.
///
/// The message is always the pretty-printed form of the diagnostics it
/// carries; the two cannot be built independently.
///
/// # Example
///
/// ```rust
/// use refinery::schema::{self, RuleExt};
///
/// refinery::tag!(pub Email);
///
/// let email = schema::string().email().refined::<Email>();
/// let error = email.create("testdev.com").unwrap_failure();
///
/// assert_eq!(error.message(), "✖ Invalid email address");
/// assert_eq!(error.diagnostics().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinementError {
    message: String,
    diagnostics: Diagnostics,
}

impl RefinementError {
    /// Wrap diagnostics, deriving the message from them.
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            message: diagnostics.pretty(),
            diagnostics,
        }
    }

    /// Every violation, one per line.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The structured diagnostics behind the message.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consume the error, returning its diagnostics.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

impl fmt::Display for RefinementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RefinementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.diagnostics)
    }
}

impl From<Diagnostics> for RefinementError {
    fn from(diagnostics: Diagnostics) -> Self {
        Self::new(diagnostics)
    }
}

/// Turns a rejected input and its diagnostics into the error a refinement
/// reports.
///
/// Implemented for every `Fn(&Value, Diagnostics) -> E`, so a closure is
/// usually all that's needed. The transform receives the input exactly as
/// it was given to `create`, before any canonicalization.
///
/// # Example
///
/// ```rust
/// use refinery::refined::ErrorTransform;
/// use refinery::schema::Diagnostics;
/// use serde_json::Value;
///
/// struct Codes;
///
/// impl ErrorTransform for Codes {
///     type Error = Vec<String>;
///
///     fn transform(&self, _input: &Value, diagnostics: Diagnostics) -> Vec<String> {
///         diagnostics.issues().map(|i| format!("{:?}", i.code())).collect()
///     }
/// }
/// ```
pub trait ErrorTransform: Send + Sync {
    /// The error produced
    type Error;

    /// Build the error for one rejected input
    fn transform(&self, input: &Value, diagnostics: Diagnostics) -> Self::Error;
}

/// Installs [`RefinementError`] as a refinement's error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorTransform;

impl ErrorTransform for DefaultErrorTransform {
    type Error = RefinementError;

    #[inline]
    fn transform(&self, _input: &Value, diagnostics: Diagnostics) -> RefinementError {
        RefinementError::new(diagnostics)
    }
}

impl<F, E> ErrorTransform for F
where
    F: Fn(&Value, Diagnostics) -> E + Send + Sync,
{
    type Error = E;

    #[inline]
    fn transform(&self, input: &Value, diagnostics: Diagnostics) -> E {
        self(input, diagnostics)
    }
}
