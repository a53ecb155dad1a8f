//! The branded value: a primitive tagged at the type level only

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde_json::Value;

use super::Tag;

/// A value of type `T` that passed the rule of the refinement tagged `B`.
///
/// # Memory Layout
///
/// `Branded<T, B>` is `#[repr(transparent)]` over `T`; the tag is a
/// zero-sized `PhantomData`. A branded value has exactly the size, alignment
/// and bytes of its primitive, and serializes exactly like it.
///
/// # Nominal distinctness
///
/// `Branded<String, Email>` and `Branded<String, Username>` are different
/// types, and neither converts implicitly from or to `String`. Values come
/// from [`Refinement::create`](super::Refinement::create); the primitive
/// comes back through [`Refinement::primitive`](super::Refinement::primitive),
/// [`into_inner`](Self::into_inner), or `Deref`.
///
/// # Example
///
/// ```rust
/// use refinery::refined::{Branded, Refinement};
/// use refinery::schema;
///
/// refinery::tag!(pub Email);
///
/// let email = Refinement::<Email, _>::new(schema::string().email());
/// let value: Branded<String, Email> = email.create("test@dev.com").unwrap();
///
/// assert_eq!(value.len(), 12);
/// assert_eq!(email.primitive(value), "test@dev.com");
/// ```
#[repr(transparent)]
pub struct Branded<T, B: Tag> {
    value: T,
    _brand: PhantomData<fn() -> B>,
}

impl<T, B: Tag> Branded<T, B> {
    /// Tag a value without checking any rule.
    ///
    /// # Safety (Logical)
    ///
    /// This is not unsafe in the Rust memory sense, but it forges the brand:
    /// nothing verifies that `value` satisfies the rule behind `B`. The
    /// caller takes on that obligation. Reserve it for values already
    /// known valid, such as rows read back from storage this program wrote.
    ///
    /// ```rust
    /// use refinery::refined::Branded;
    ///
    /// refinery::tag!(pub Email);
    ///
    /// let trusted = Branded::<String, Email>::new_unchecked("ops@dev.com".to_string());
    /// assert_eq!(trusted.get(), "ops@dev.com");
    /// ```
    #[inline]
    pub fn new_unchecked(value: T) -> Self {
        Self {
            value,
            _brand: PhantomData,
        }
    }

    /// Borrow the primitive.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Consume the brand, returning the primitive.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The tag name of `B`.
    #[inline]
    pub fn tag(&self) -> &'static str {
        B::NAME
    }
}

impl<T: fmt::Debug, B: Tag> fmt::Debug for Branded<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branded")
            .field("tag", &B::NAME)
            .field("value", &self.value)
            .finish()
    }
}

impl<T: fmt::Display, B: Tag> fmt::Display for Branded<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: Clone, B: Tag> Clone for Branded<T, B> {
    fn clone(&self) -> Self {
        Self::new_unchecked(self.value.clone())
    }
}

impl<T: Copy, B: Tag> Copy for Branded<T, B> {}

impl<T: PartialEq, B: Tag> PartialEq for Branded<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, B: Tag> Eq for Branded<T, B> {}

impl<T: PartialOrd, B: Tag> PartialOrd for Branded<T, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord, B: Tag> Ord for Branded<T, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash, B: Tag> Hash for Branded<T, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T, B: Tag> AsRef<T> for Branded<T, B> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

// Hash and Eq delegate to `T`, so map lookups by the primitive agree.
impl<T, B: Tag> Borrow<T> for Branded<T, B> {
    fn borrow(&self) -> &T {
        &self.value
    }
}

impl<T, B: Tag> std::ops::Deref for Branded<T, B> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

// Lets a refined value be fed back into `create` for re-validation.
impl<T: Into<Value>, B: Tag> From<Branded<T, B>> for Value {
    fn from(branded: Branded<T, B>) -> Self {
        branded.value.into()
    }
}

/// Recover the primitive type behind a branded type.
///
/// Type-level only; there is nothing to call.
///
/// ```rust
/// use refinery::refined::{Branded, Unbranded};
///
/// refinery::tag!(pub Email);
///
/// let raw: Unbranded<Branded<String, Email>> = String::from("test@dev.com");
/// # let _ = raw;
/// ```
pub trait Unbrand {
    /// The primitive type
    type Primitive;
}

impl<T, B: Tag> Unbrand for Branded<T, B> {
    type Primitive = T;
}

/// The primitive type behind branded type `T`.
pub type Unbranded<T> = <T as Unbrand>::Primitive;
