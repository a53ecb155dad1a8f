//! Serde support for branded values
//!
//! A [`Branded`] value serializes exactly as its primitive. Deserializing
//! one needs the rule, which lives in the descriptor, so it goes through
//! [`DeserializeSeed`] on `&Refinement`:
//!
//! ```rust
//! use serde::de::DeserializeSeed;
//! use refinery::schema::{self, RuleExt};
//!
//! refinery::tag!(pub Email);
//!
//! let email = schema::string().email().refined::<Email>();
//!
//! let mut de = serde_json::Deserializer::from_str(r#""test@dev.com""#);
//! let value = (&email).deserialize(&mut de).unwrap();
//! assert_eq!(serde_json::to_string(&value).unwrap(), r#""test@dev.com""#);
//!
//! let mut de = serde_json::Deserializer::from_str(r#""testdev.com""#);
//! assert!((&email).deserialize(&mut de).is_err());
//! ```

use std::fmt;

use serde::de::{self, DeserializeSeed};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::error::ErrorTransform;
use super::{Branded, Refinement, Tag};
use crate::schema::Rule;

impl<T: Serialize, B: Tag> Serialize for Branded<T, B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de, B, R, F> DeserializeSeed<'de> for &Refinement<B, R, F>
where
    B: Tag,
    R: Rule,
    F: ErrorTransform,
    F::Error: fmt::Display,
{
    type Value = Branded<R::Output, B>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let input = Value::deserialize(deserializer)?;
        self.create(input).into_result().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{self, RuleExt};
    use serde_json::json;

    crate::tag!(Email);
    crate::tag!(Age);

    #[derive(Serialize)]
    struct User {
        email: Branded<String, Email>,
        age: Branded<i64, Age>,
    }

    fn seed_from_str<'a, S>(seed: S, json: &'a str) -> Result<S::Value, serde_json::Error>
    where
        S: DeserializeSeed<'a>,
    {
        let mut de = serde_json::Deserializer::from_str(json);
        seed.deserialize(&mut de)
    }

    #[test]
    fn test_serialize_is_transparent() {
        let email = schema::string().email().refined::<Email>();
        let age = schema::integer().positive().refined::<Age>();
        let user = User {
            email: email.create("ada@dev.com").unwrap(),
            age: age.create(36).unwrap(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"email":"ada@dev.com","age":36}"#);
        assert_eq!(serde_json::to_value(user.age).unwrap(), json!(36));
    }

    #[test]
    fn test_seed_accepts_valid_input() {
        let age = schema::integer().positive().refined::<Age>();
        let value = seed_from_str(&age, "25").unwrap();
        assert_eq!(age.primitive(value), 25);
    }

    #[test]
    fn test_seed_reports_refinement_message() {
        let email = schema::string().email().refined::<Email>();
        let err = seed_from_str(&email, r#""testdev.com""#).unwrap_err();
        assert!(err.to_string().contains("Invalid email address"));
    }

    #[test]
    fn test_seed_uses_custom_error() {
        let age = schema::integer()
            .positive()
            .refined::<Age>()
            .with_error(|input, _| format!("{input} is not an age"));
        let err = seed_from_str(&age, "-5").unwrap_err();
        assert!(err.to_string().contains("-5 is not an age"));
    }

    #[test]
    fn test_seed_propagates_syntax_errors() {
        let age = schema::integer().refined::<Age>();
        assert!(seed_from_str(&age, "{not json").unwrap_err().is_syntax());
    }

    #[test]
    fn test_round_trip_through_wire() {
        let email = schema::string().trim().email().refined::<Email>();
        let first = email.create("  ada@dev.com ").unwrap();
        let json = serde_json::to_string(&first).unwrap();
        let second = seed_from_str(&email, &json).unwrap();
        assert_eq!(first, second);
    }
}
