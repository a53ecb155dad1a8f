//! Boolean rule

use serde_json::Value;

use super::diagnostics::{Diagnostics, Issue};
use super::Rule;
use crate::Validation;

/// Rule accepting JSON `true` and `false` only; no truthiness coercion.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanRule;

impl Rule for BooleanRule {
    type Output = bool;

    fn parse(&self, input: &Value) -> Validation<bool, Diagnostics> {
        match input {
            Value::Bool(value) => Validation::Success(*value),
            other => Validation::Failure(Issue::invalid_type("boolean", other).into()),
        }
    }

    fn describe(&self) -> String {
        "boolean".to_string()
    }
}
