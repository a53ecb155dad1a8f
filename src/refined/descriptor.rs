//! The refinement descriptor

use std::fmt;

use serde_json::Value;

use super::error::{DefaultErrorTransform, ErrorTransform};
use super::{Brand, Branded, Tag};
use crate::schema::{Diagnostics, Rule};
use crate::Validation;

/// A refined type: a tag, the rule its values satisfy, and the error its
/// rejections produce.
///
/// Build one per domain concept, typically once at startup, then call
/// [`create`](Self::create) at every boundary where untyped data enters.
/// A `Refinement` is immutable; it is `Send + Sync` whenever its rule and
/// transform are, and concurrent `create` calls share nothing but the
/// read-only rule.
///
/// # Example
///
/// ```rust
/// use refinery::refined::Refinement;
/// use refinery::schema;
///
/// refinery::tag!(pub PositiveNumber);
///
/// let positive = Refinement::<PositiveNumber, _>::new(schema::number().positive())
///     .with_error(|input, _diagnostics| format!("{input} is not a positive number"));
///
/// let error = positive.create(-5).unwrap_failure();
/// assert_eq!(error, "-5 is not a positive number");
///
/// let n = positive.create(2.5).unwrap();
/// assert_eq!(positive.primitive(n) * 2.0, 5.0);
/// ```
pub struct Refinement<B: Tag, R, F = DefaultErrorTransform> {
    rule: Brand<R, B>,
    transform: F,
}

impl<B: Tag, R: Rule> Refinement<B, R> {
    /// A refinement for `rule`, reporting [`RefinementError`](super::RefinementError)
    /// on rejection.
    pub fn new(rule: R) -> Self {
        Self {
            rule: Brand::new(rule),
            transform: DefaultErrorTransform,
        }
    }
}

impl<B: Tag, R, F> Refinement<B, R, F> {
    /// Replace the error transform with a closure receiving the raw input
    /// and the diagnostics.
    pub fn with_error<G, E>(self, transform: G) -> Refinement<B, R, G>
    where
        G: Fn(&Value, Diagnostics) -> E + Send + Sync,
    {
        self.with_error_transform(transform)
    }

    /// Replace the error transform.
    pub fn with_error_transform<G: ErrorTransform>(self, transform: G) -> Refinement<B, R, G> {
        Refinement {
            rule: self.rule,
            transform,
        }
    }

    /// The tag name.
    pub fn tag(&self) -> &'static str {
        B::NAME
    }

    /// The unbranded rule.
    pub fn rule(&self) -> &R {
        self.rule.inner()
    }

    /// The branded rule, for nesting inside structural rules.
    pub fn branded_rule(&self) -> &Brand<R, B> {
        &self.rule
    }
}

impl<B, R, F> Refinement<B, R, F>
where
    B: Tag,
    R: Rule,
    F: ErrorTransform,
{
    /// Validate untyped input.
    ///
    /// Accepted input becomes the rule's canonical value tagged with `B`.
    /// Rejected input is handed to the error transform together with the
    /// rule's diagnostics. Every input, including `()`/`None` (JSON `null`),
    /// yields exactly one of `Success` or `Failure`.
    ///
    /// The input is converted to a [`Value`] first, and that conversion is
    /// what the error transform sees. JSON has no NaN or infinity, so
    /// non-finite floats arrive as `null`. Use
    /// [`create_value`](Self::create_value) to validate a `Value` already in
    /// hand without cloning it.
    pub fn create<I: Into<Value>>(&self, input: I) -> Validation<Branded<R::Output, B>, F::Error> {
        self.create_value(&input.into())
    }

    /// Validate a borrowed JSON value.
    ///
    /// Same contract as [`create`](Self::create); the error transform
    /// receives `input` itself.
    pub fn create_value(&self, input: &Value) -> Validation<Branded<R::Output, B>, F::Error> {
        match self.rule.parse(input) {
            Validation::Success(value) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(tag = B::NAME, "refinement accepted input");
                Validation::Success(value)
            }
            Validation::Failure(diagnostics) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    tag = B::NAME,
                    issues = diagnostics.len(),
                    "refinement rejected input"
                );
                Validation::Failure(self.transform.transform(input, diagnostics))
            }
        }
    }

    /// Whether `create(input)` would succeed.
    pub fn is_valid<I: Into<Value>>(&self, input: I) -> bool {
        self.rule.parse(&input.into()).is_success()
    }

    /// Drop the brand from a value this refinement produced.
    ///
    /// Identity at runtime; only the static type changes.
    #[inline]
    pub fn primitive(&self, value: Branded<R::Output, B>) -> R::Output {
        value.into_inner()
    }

    /// Borrow the primitive behind a branded value.
    #[inline]
    pub fn primitive_ref<'a>(&self, value: &'a Branded<R::Output, B>) -> &'a R::Output {
        value.get()
    }
}

impl<B: Tag, R: Clone, F: Clone> Clone for Refinement<B, R, F> {
    fn clone(&self) -> Self {
        Self {
            rule: self.rule.clone(),
            transform: self.transform.clone(),
        }
    }
}

impl<B: Tag, R: Rule, F> fmt::Debug for Refinement<B, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("tag", &B::NAME)
            .field("rule", &self.rule.inner().describe())
            .field("error", &std::any::type_name::<F>())
            .finish()
    }
}

/// Type-level view of a refinement.
///
/// Lets code name the types a descriptor produces without spelling out its
/// rule: `Infer<EmailRefinement>` is the branded type,
/// `InferPrimitive<EmailRefinement>` the primitive behind it.
///
/// ```rust
/// use refinery::refined::{Infer, InferPrimitive, Refinement};
/// use refinery::schema::{self, StringRule};
///
/// refinery::tag!(pub Email);
///
/// type EmailRefinement = Refinement<Email, StringRule>;
/// type EmailAddress = Infer<EmailRefinement>;
///
/// fn domain(address: &EmailAddress) -> &str {
///     let raw: &InferPrimitive<EmailRefinement> = address.get();
///     raw.split('@').nth(1).unwrap_or_default()
/// }
///
/// let email: EmailRefinement = Refinement::new(schema::string().email());
/// assert_eq!(domain(&email.create("test@dev.com").unwrap()), "dev.com");
/// ```
pub trait Descriptor {
    /// The branded type `create` produces
    type Infer;
    /// The primitive behind [`Infer`](Self::Infer)
    type InferPrimitive;
    /// The error `create` reports
    type Error;
}

impl<B, R, F> Descriptor for Refinement<B, R, F>
where
    B: Tag,
    R: Rule,
    F: ErrorTransform,
{
    type Infer = Branded<R::Output, B>;
    type InferPrimitive = R::Output;
    type Error = F::Error;
}

/// The branded type produced by descriptor `D`.
pub type Infer<D> = <D as Descriptor>::Infer;

/// The primitive type behind descriptor `D`'s branded type.
pub type InferPrimitive<D> = <D as Descriptor>::InferPrimitive;

/// The error type reported by descriptor `D`.
pub type InferError<D> = <D as Descriptor>::Error;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refined::RefinementError;
    use crate::schema::{self, RuleExt};
    use serde_json::json;

    crate::tag!(Email);
    crate::tag!(PositiveNumber);

    fn email() -> Refinement<Email, schema::StringRule> {
        schema::string().email().refined()
    }

    #[test]
    fn test_empty_string_fails_with_message() {
        let error = email().create("").unwrap_failure();
        assert!(!error.message().is_empty());
        assert!(error.message().contains("Invalid email address"));
    }

    #[test]
    fn test_digit_fails_with_format_violation() {
        let error = email().create("2").unwrap_failure();
        assert!(error.message().contains("email"));
    }

    #[test]
    fn test_valid_email_round_trips_through_primitive() {
        let email = email();
        let value = email.create("test@dev.com").unwrap();
        assert_eq!(email.primitive_ref(&value), "test@dev.com");
        assert_eq!(email.primitive(value), "test@dev.com");
    }

    #[test]
    fn test_missing_at_sign_diagnostics() {
        let error = email().create("testdev.com").unwrap_failure();
        assert_eq!(
            error.diagnostics().first().code(),
            &schema::IssueCode::InvalidFormat { format: "email" }
        );
        assert!(schema::format(error.diagnostics()).contains("Invalid email address"));
    }

    #[test]
    fn test_custom_error_embeds_offending_value() {
        #[derive(Debug, PartialEq)]
        struct NotPositive(String);

        let positive = schema::number()
            .positive()
            .refined::<PositiveNumber>()
            .with_error(|input, _| NotPositive(format!("{input} must be greater than zero")));

        let error = positive.create(-5).unwrap_failure();
        assert!(error.0.contains("-5"));
        assert!(positive.create(5).is_success());
    }

    #[test]
    fn test_null_and_unit_inputs_fail() {
        let email = email();
        assert!(email.create(()).is_failure());
        assert!(email.create(Option::<String>::None).is_failure());
        assert!(email.create(json!({ "email": "test@dev.com" })).is_failure());
        assert!(email.create(vec![1, 2]).is_failure());
    }

    #[test]
    fn test_create_value_borrows_and_reports_same_input() {
        let positive = schema::number()
            .positive()
            .refined::<PositiveNumber>()
            .with_error(|input: &Value, _| input.clone());

        let payload = json!({ "amount": -5 });
        let amount = &payload["amount"];
        assert_eq!(positive.create_value(amount).unwrap_failure(), json!(-5));
        assert_eq!(positive.create_value(&json!(3)).unwrap().into_inner(), 3.0);

        // Non-finite floats have no JSON form.
        assert_eq!(positive.create(f64::NAN).unwrap_failure(), Value::Null);
    }

    #[test]
    fn test_is_valid_matches_create() {
        let email = email();
        assert!(email.is_valid("a@dev.com"));
        assert!(!email.is_valid("a"));
    }

    #[test]
    fn test_accessors() {
        let email = email();
        assert_eq!(email.tag(), "Email");
        assert_eq!(email.rule().describe(), "string");
        assert_eq!(email.branded_rule().describe(), "string & Email");

        let debug = format!("{email:?}");
        assert!(debug.contains("Email"));
        assert!(debug.contains("DefaultErrorTransform"));
    }

    #[test]
    fn test_descriptor_types() {
        fn assert_error<D: Descriptor<Error = RefinementError>>(_: &D) {}
        assert_error(&email());

        let value: Infer<Refinement<Email, schema::StringRule>> =
            email().create("x@dev.com").unwrap();
        let raw: InferPrimitive<Refinement<Email, schema::StringRule>> = value.into_inner();
        assert_eq!(raw, "x@dev.com");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = email();
        let copy = original.clone();
        drop(original);
        assert!(copy.create("x@dev.com").is_success());
    }
}
