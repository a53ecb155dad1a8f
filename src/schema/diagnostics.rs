//! Structured diagnostics reported by a rejected parse
//!
//! A [`Diagnostics`] value lists every constraint the input violated, each
//! as an [`Issue`] with a machine-readable [`IssueCode`], a message, and the
//! path to the offending value inside nested input.

use std::fmt;

use serde_json::Value;

use crate::{NonEmptyVec, Semigroup};

/// One step into nested input: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member name
    Key(String),
    /// Array position
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// What kind of constraint an [`Issue`] reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// The input was not of the expected JSON type
    InvalidType {
        /// Expected kind, e.g. `"string"`
        expected: String,
        /// Kind actually received, e.g. `"null"`
        received: &'static str,
    },
    /// A length or numeric lower bound was not met
    TooSmall {
        /// The bound, rendered
        minimum: String,
        /// Whether the bound itself is allowed
        inclusive: bool,
    },
    /// A length or numeric upper bound was exceeded
    TooBig {
        /// The bound, rendered
        maximum: String,
        /// Whether the bound itself is allowed
        inclusive: bool,
    },
    /// A string did not match a named format
    InvalidFormat {
        /// Format name, e.g. `"email"`
        format: &'static str,
    },
    /// A number with a fractional part where an integer was required
    NotInteger,
    /// A number that is not a multiple of the required step
    NotMultipleOf {
        /// The step, rendered
        divisor: String,
    },
    /// An object member that a strict object rule does not declare
    UnrecognizedKey {
        /// The offending key
        key: String,
    },
    /// A caller-defined constraint
    Custom,
}

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Issue {
    code: IssueCode,
    message: String,
    path: Vec<PathSegment>,
}

impl Issue {
    /// Create an issue at the root of the input.
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Issue for input whose JSON type is not `expected`.
    pub fn invalid_type(expected: impl Into<String>, input: &Value) -> Self {
        let expected = expected.into();
        let received = kind_of(input);
        let message = format!("Invalid input: expected {expected}, received {received}");
        Self::new(IssueCode::InvalidType { expected, received }, message)
    }

    /// Issue for a failed caller-defined constraint.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(IssueCode::Custom, message)
    }

    /// The constraint kind.
    pub fn code(&self) -> &IssueCode {
        &self.code
    }

    /// Human-readable description of the violation.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location of the offending value, outermost segment first.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Render the path the way it would be written in JavaScript-ish
    /// accessor syntax: `user.emails[0]`.
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) if is_identifier(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Key(key) => out.push_str(&format!("[{key:?}]")),
                PathSegment::Index(index) => out.push_str(&format!("[{index}]")),
            }
        }
        out
    }

    fn prefixed(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (at {})", self.message, self.path_string())
        }
    }
}

/// Every constraint violated by one rejected parse.
///
/// Always holds at least one [`Issue`].
///
/// # Example
///
/// ```rust
/// use refinery::schema::{self, Rule};
///
/// let rule = schema::string().min_len(5).email();
/// let diagnostics = rule.parse(&"a@b".into()).unwrap_failure();
///
/// assert_eq!(diagnostics.len(), 2);
/// assert!(diagnostics.pretty().contains("Invalid email address"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    issues: NonEmptyVec<Issue>,
}

impl Diagnostics {
    /// Diagnostics holding a single issue.
    pub fn new(issue: Issue) -> Self {
        Self {
            issues: NonEmptyVec::singleton(issue),
        }
    }

    /// Diagnostics from a list of issues; `None` when the list is empty.
    pub fn from_issues(issues: Vec<Issue>) -> Option<Self> {
        NonEmptyVec::from_vec(issues).map(|issues| Self { issues })
    }

    /// Iterate over the issues in the order they were found.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// The first issue found.
    pub fn first(&self) -> &Issue {
        self.issues.head()
    }

    /// Number of issues, always >= 1.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The issue messages, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.issues().map(Issue::message).collect()
    }

    /// Prefix every issue path with `segment`.
    ///
    /// Structural rules call this on the diagnostics of a nested value so the
    /// reported path points into the outer input.
    pub fn at(self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        Self {
            issues: self.issues.map(|issue| issue.prefixed(segment.clone())),
        }
    }

    /// Pretty-print every issue, one per line.
    ///
    /// ```text
    /// ✖ Invalid email address
    ///   → at contact.email
    /// ```
    pub fn pretty(&self) -> String {
        let mut lines = Vec::with_capacity(self.len() * 2);
        for issue in self.issues() {
            lines.push(format!("✖ {}", issue.message()));
            if !issue.path().is_empty() {
                lines.push(format!("  → at {}", issue.path_string()));
            }
        }
        lines.join("\n")
    }

    /// Consume into the underlying issues.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues.into_vec()
    }
}

impl Semigroup for Diagnostics {
    fn combine(self, other: Self) -> Self {
        Self {
            issues: self.issues.combine(other.issues),
        }
    }
}

impl From<Issue> for Diagnostics {
    fn from(issue: Issue) -> Self {
        Self::new(issue)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

impl std::error::Error for Diagnostics {}

/// Pretty-print diagnostics; see [`Diagnostics::pretty`].
pub fn format(diagnostics: &Diagnostics) -> String {
    diagnostics.pretty()
}

/// JSON kind name used in type-mismatch messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_type_message_names_both_kinds() {
        let issue = Issue::invalid_type("string", &Value::Null);
        assert_eq!(issue.message(), "Invalid input: expected string, received null");
        assert_eq!(
            issue.code(),
            &IssueCode::InvalidType {
                expected: "string".to_string(),
                received: "null"
            }
        );
    }

    #[test]
    fn test_at_prefixes_outermost_first() {
        let diagnostics = Diagnostics::new(Issue::custom("bad"))
            .at(0usize)
            .at("emails")
            .at("user");

        let issue = diagnostics.first();
        assert_eq!(issue.path_string(), "user.emails[0]");
    }

    #[test]
    fn test_non_identifier_key_is_quoted() {
        let diagnostics = Diagnostics::new(Issue::custom("bad")).at("first name");
        assert_eq!(diagnostics.first().path_string(), "[\"first name\"]");
    }

    #[test]
    fn test_pretty_lists_every_issue() {
        let diagnostics = Diagnostics::new(Issue::custom("too short"))
            .combine(Diagnostics::new(Issue::custom("missing @")).at("email"));

        assert_eq!(
            diagnostics.pretty(),
            "✖ too short\n✖ missing @\n  → at email"
        );
        assert_eq!(format(&diagnostics), diagnostics.to_string());
    }

    #[test]
    fn test_from_issues_rejects_empty() {
        assert!(Diagnostics::from_issues(Vec::new()).is_none());
        let diagnostics = Diagnostics::from_issues(vec![Issue::custom("a"), Issue::custom("b")]);
        assert_eq!(diagnostics.map(|d| d.messages().len()), Some(2));
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!(1.5)), "number");
        assert_eq!(kind_of(&json!([1])), "array");
        assert_eq!(kind_of(&json!({"a": 1})), "object");
    }
}
