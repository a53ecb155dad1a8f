//! Structural rules: objects, arrays, and serde-described shapes
//!
//! Nested failures keep their location: an issue found in the second
//! element of `tags` is reported at path `tags[1]`, and sibling failures
//! are all reported together.
//!
//! # Example
//!
//! ```rust
//! use refinery::schema::{self, Rule};
//! use serde_json::json;
//!
//! let signup = schema::object()
//!     .field("email", schema::string().email())
//!     .field("age", schema::integer().min(13));
//!
//! let diagnostics = signup
//!     .parse(&json!({ "email": "nope", "age": 9 }))
//!     .unwrap_failure();
//!
//! assert_eq!(diagnostics.len(), 2);
//! assert_eq!(diagnostics.first().path_string(), "email");
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::diagnostics::{Diagnostics, Issue, IssueCode};
use super::Rule;
use crate::Validation;

/// A field rule with its output erased to JSON.
trait FieldRule: Send + Sync {
    fn parse_field(&self, input: &Value) -> Validation<Value, Diagnostics>;
    fn describe_field(&self) -> String;
}

impl<R> FieldRule for R
where
    R: Rule,
    R::Output: Serialize,
{
    fn parse_field(&self, input: &Value) -> Validation<Value, Diagnostics> {
        self.parse(input).and_then(|output| {
            Validation::from_result(serde_json::to_value(output))
                .map_err(|err| Issue::custom(format!("Unrepresentable value: {err}")).into())
        })
    }

    fn describe_field(&self) -> String {
        self.describe()
    }
}

/// Rule accepting JSON objects with declared fields.
///
/// Missing fields are parsed as `null`, so only [`optional`](super::RuleExt::optional)
/// field rules accept them; optional fields that are absent stay absent in
/// the output. Undeclared keys are dropped unless the rule is
/// [`strict`](ObjectRule::strict).
#[derive(Default)]
pub struct ObjectRule {
    fields: Vec<(String, Box<dyn FieldRule>)>,
    strict: bool,
}

impl ObjectRule {
    /// An object rule with no declared fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field and the rule its value must satisfy.
    pub fn field<R>(mut self, name: impl Into<String>, rule: R) -> Self
    where
        R: Rule + 'static,
        R::Output: Serialize,
    {
        self.fields.push((name.into(), Box::new(rule)));
        self
    }

    /// Reject keys that are not declared fields.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn unknown_keys(&self, object: &Map<String, Value>) -> Vec<Issue> {
        object
            .keys()
            .filter(|key| !self.fields.iter().any(|(name, _)| name == *key))
            .map(|key| {
                Issue::new(
                    IssueCode::UnrecognizedKey { key: key.clone() },
                    format!("Unrecognized key: {key:?}"),
                )
            })
            .collect()
    }
}

impl fmt::Debug for ObjectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, rule) in &self.fields {
            map.entry(name, &rule.describe_field());
        }
        map.finish()
    }
}

impl Rule for ObjectRule {
    type Output = Map<String, Value>;

    fn parse(&self, input: &Value) -> Validation<Self::Output, Diagnostics> {
        let Value::Object(object) = input else {
            return Validation::Failure(Issue::invalid_type("object", input).into());
        };

        let fields = Validation::all_vec(self.fields.iter().map(|(name, rule)| {
            let present = object.get(name);
            rule.parse_field(present.unwrap_or(&Value::Null))
                .map(|value| (name.clone(), present.is_some() || !value.is_null(), value))
                .map_err(|diagnostics| diagnostics.at(name.as_str()))
        }));

        let unknown = if self.strict {
            Diagnostics::from_issues(self.unknown_keys(object))
        } else {
            None
        };
        let unknown = match unknown {
            Some(diagnostics) => Validation::Failure(diagnostics),
            None => Validation::Success(()),
        };

        fields.and(unknown).map(|(fields, ())| {
            fields
                .into_iter()
                .filter(|(_, keep, _)| *keep)
                .map(|(name, _, value)| (name, value))
                .collect()
        })
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.fields.iter().map(|(name, _)| name.as_str()).collect();
        format!("object {{ {} }}", names.join(", "))
    }
}

/// Rule accepting JSON arrays whose every element satisfies an item rule.
#[derive(Debug, Clone)]
pub struct ArrayRule<R> {
    item: R,
    min_items: Option<usize>,
    max_items: Option<usize>,
}

impl<R: Rule> ArrayRule<R> {
    /// An array rule for elements satisfying `item`.
    pub fn new(item: R) -> Self {
        Self {
            item,
            min_items: None,
            max_items: None,
        }
    }

    /// Require at least `min` elements.
    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Require at most `max` elements.
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    fn length_issues(&self, len: usize) -> Vec<Issue> {
        let mut issues = Vec::new();
        if let Some(min) = self.min_items.filter(|min| len < *min) {
            issues.push(Issue::new(
                IssueCode::TooSmall {
                    minimum: min.to_string(),
                    inclusive: true,
                },
                format!("Too small: expected array to have >={min} items"),
            ));
        }
        if let Some(max) = self.max_items.filter(|max| len > *max) {
            issues.push(Issue::new(
                IssueCode::TooBig {
                    maximum: max.to_string(),
                    inclusive: true,
                },
                format!("Too big: expected array to have <={max} items"),
            ));
        }
        issues
    }
}

impl<R: Rule> Rule for ArrayRule<R> {
    type Output = Vec<R::Output>;

    fn parse(&self, input: &Value) -> Validation<Self::Output, Diagnostics> {
        let Value::Array(items) = input else {
            return Validation::Failure(Issue::invalid_type("array", input).into());
        };

        let length = match Diagnostics::from_issues(self.length_issues(items.len())) {
            Some(diagnostics) => Validation::Failure(diagnostics),
            None => Validation::Success(()),
        };

        let elements = Validation::all_vec(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| self.item.parse(item).map_err(|d| d.at(index))),
        );

        length.and(elements).map(|((), elements)| elements)
    }

    fn describe(&self) -> String {
        format!("array of {}", self.item.describe())
    }
}

/// Rule accepting anything `T` can be deserialized from.
///
/// Serde stops at the first mismatch, so a rejection carries exactly one issue.
pub struct TypedRule<T> {
    _shape: PhantomData<fn() -> T>,
}

impl<T> TypedRule<T> {
    /// A rule for the serde shape of `T`.
    pub fn new() -> Self {
        Self {
            _shape: PhantomData,
        }
    }
}

impl<T> Default for TypedRule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedRule<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypedRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedRule<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Rule for TypedRule<T> {
    type Output = T;

    fn parse(&self, input: &Value) -> Validation<T, Diagnostics> {
        Validation::from_result(<T as serde::Deserialize>::deserialize(input)).map_err(|err| {
            Issue::new(
                IssueCode::InvalidType {
                    expected: self.describe(),
                    received: super::diagnostics::kind_of(input),
                },
                format!("Invalid input: {err}"),
            )
            .into()
        })
    }

    fn describe(&self) -> String {
        let name = std::any::type_name::<T>();
        name.rsplit("::").next().unwrap_or(name).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{integer, string, RuleExt};
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_object_collects_issues_from_every_field() {
        let rule = ObjectRule::new()
            .field("name", string().non_empty())
            .field("age", integer().positive());

        let diagnostics = rule.parse(&json!({ "name": "", "age": -1 })).unwrap_failure();
        let paths: Vec<String> = diagnostics.issues().map(|i| i.path_string()).collect();
        assert_eq!(paths, vec!["name", "age"]);
    }

    #[test]
    fn test_object_strips_unknown_keys_by_default() {
        let rule = ObjectRule::new().field("id", integer());
        let output = rule.parse(&json!({ "id": 1, "extra": true })).unwrap();
        assert_eq!(Value::Object(output), json!({ "id": 1 }));
    }

    #[test]
    fn test_strict_object_reports_unknown_keys() {
        let rule = ObjectRule::new().field("id", integer()).strict();
        let diagnostics = rule.parse(&json!({ "id": 1, "extra": true })).unwrap_failure();
        assert_eq!(
            diagnostics.first().code(),
            &IssueCode::UnrecognizedKey {
                key: "extra".to_string()
            }
        );
    }

    #[test]
    fn test_missing_fields() {
        let rule = ObjectRule::new()
            .field("id", integer())
            .field("nickname", string().optional());

        let diagnostics = rule.parse(&json!({})).unwrap_failure();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.first().path_string(), "id");

        let output = rule.parse(&json!({ "id": 3 })).unwrap();
        assert!(!output.contains_key("nickname"));
    }

    #[test]
    fn test_object_rejects_non_objects() {
        let rule = ObjectRule::new();
        assert!(rule.parse(&json!([])).is_failure());
        assert!(rule.parse(&json!(null)).is_failure());
    }

    #[test]
    fn test_array_paths_and_lengths() {
        let rule = ArrayRule::new(string().email()).min_items(1).max_items(2);

        let diagnostics = rule
            .parse(&json!(["a@dev.com", "nope", "also-nope"]))
            .unwrap_failure();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.first().message(), "Too big: expected array to have <=2 items");
        let paths: Vec<String> = diagnostics.issues().skip(1).map(|i| i.path_string()).collect();
        assert_eq!(paths, vec!["[1]", "[2]"]);

        assert!(rule.parse(&json!([])).is_failure());
        assert_eq!(rule.parse(&json!(["a@dev.com"])).unwrap(), vec!["a@dev.com"]);
    }

    #[test]
    fn test_nested_paths() {
        let rule = ObjectRule::new().field(
            "contacts",
            ArrayRule::new(ObjectRule::new().field("email", string().email())),
        );
        let diagnostics = rule
            .parse(&json!({ "contacts": [{ "email": "a@dev.com" }, { "email": "x" }] }))
            .unwrap_failure();
        assert_eq!(diagnostics.first().path_string(), "contacts[1].email");
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_typed_rule() {
        let rule = TypedRule::<Point>::new();
        assert_eq!(rule.parse(&json!({ "x": 1, "y": 2 })).unwrap(), Point { x: 1, y: 2 });

        let diagnostics = rule.parse(&json!({ "x": 1 })).unwrap_failure();
        assert!(diagnostics.first().message().contains("missing field `y`"));
        assert_eq!(rule.describe(), "Point");
    }
}
