//! Brand-augmented rules

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use super::{Branded, Tag};
use crate::schema::{Diagnostics, Rule};
use crate::Validation;

/// A rule that accepts exactly what its inner rule accepts and tags the
/// result with `B`.
///
/// Branding adds no check and no runtime data; it only changes the output
/// type from `R::Output` to `Branded<R::Output, B>`. Because `Brand` is a
/// [`Rule`], a branded rule can be nested inside [`object`](crate::schema::object)
/// or [`array`](crate::schema::array).
///
/// # Example
///
/// ```rust
/// use refinery::refined::brand;
/// use refinery::schema::{self, Rule};
///
/// refinery::tag!(pub UserId);
///
/// let ids = schema::array(brand::<UserId, _>(schema::integer().positive()));
/// let parsed = ids.parse(&serde_json::json!([1, 2, 3])).unwrap();
/// assert_eq!(*parsed[0], 1);
/// ```
pub struct Brand<R, B: Tag> {
    rule: R,
    _brand: PhantomData<fn() -> B>,
}

impl<R, B: Tag> Brand<R, B> {
    /// Brand `rule` with tag `B`.
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            _brand: PhantomData,
        }
    }

    /// The unbranded rule.
    pub fn inner(&self) -> &R {
        &self.rule
    }

    /// Consume the brand, returning the unbranded rule.
    pub fn into_inner(self) -> R {
        self.rule
    }
}

/// Brand `rule` with tag `B`; see [`Brand`].
pub fn brand<B: Tag, R: Rule>(rule: R) -> Brand<R, B> {
    Brand::new(rule)
}

impl<R: Clone, B: Tag> Clone for Brand<R, B> {
    fn clone(&self) -> Self {
        Self::new(self.rule.clone())
    }
}

impl<R: fmt::Debug, B: Tag> fmt::Debug for Brand<R, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Brand")
            .field("tag", &B::NAME)
            .field("rule", &self.rule)
            .finish()
    }
}

impl<R: Rule, B: Tag> Rule for Brand<R, B> {
    type Output = Branded<R::Output, B>;

    #[inline]
    fn parse(&self, input: &Value) -> Validation<Self::Output, Diagnostics> {
        self.rule.parse(input).map(Branded::new_unchecked)
    }

    fn describe(&self) -> String {
        format!("{} & {}", self.rule.describe(), B::NAME)
    }
}
