//! End-to-end behavior of an email refinement and custom error transforms

use refinery::prelude::*;
use refinery::{assert_failure, assert_success};
use serde_json::json;

refinery::tag!(Email);
refinery::tag!(PositiveNumber);

fn email() -> Refinement<Email, schema::StringRule> {
    schema::string().email().refined()
}

#[test]
fn empty_string_is_rejected_with_a_message() {
    let error = email().create("").unwrap_failure();
    assert!(!error.message().is_empty());
    assert!(!error.diagnostics().is_empty());
}

#[test]
fn single_digit_is_rejected_as_a_format_violation() {
    let error = email().create("2").unwrap_failure();
    assert!(error
        .diagnostics()
        .issues()
        .any(|issue| matches!(issue.code(), IssueCode::InvalidFormat { format: "email" })));
}

#[test]
fn valid_address_is_accepted_and_unwraps_unchanged() {
    let email = email();
    let value = email.create("test@dev.com").unwrap();
    let raw: String = email.primitive(value);
    assert_eq!(raw, "test@dev.com");
}

#[test]
fn missing_at_sign_reports_invalid_email() {
    let error = email().create("testdev.com").unwrap_failure();
    assert!(schema::format(error.diagnostics()).contains("Invalid email address"));
    assert_eq!(error.to_string(), error.message());
}

#[test]
fn custom_transform_embeds_the_offending_value() {
    let positive = schema::number()
        .positive()
        .refined::<PositiveNumber>()
        .with_error(|input, _| format!("Expected a positive number, got {input}"));

    let error = positive.create(-5).unwrap_failure();
    assert!(error.contains("-5"));
    assert_success!(positive.create(5));
}

#[test]
fn default_and_custom_errors_share_diagnostics() {
    let rule = || schema::string().non_empty().email();
    let default = rule().refined::<Email>();
    let custom = rule()
        .refined::<Email>()
        .with_error(|input: &serde_json::Value, diagnostics: Diagnostics| {
            (input.clone(), diagnostics)
        });

    let default_error = default.create("").unwrap_failure();
    let (input, diagnostics) = custom.create("").unwrap_failure();

    assert_eq!(input, json!(""));
    assert_eq!(default_error.diagnostics(), &diagnostics);
    assert_eq!(default_error.message(), diagnostics.pretty());
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn non_string_inputs_are_rejected_not_panicking() {
    let email = email();
    for input in [
        json!(null),
        json!(42),
        json!(true),
        json!(["test@dev.com"]),
        json!({ "email": "test@dev.com" }),
    ] {
        let error = email.create(input).unwrap_failure();
        assert!(matches!(
            error.diagnostics().first().code(),
            IssueCode::InvalidType { .. }
        ));
    }
    assert_failure!(email.create(()));
}

#[test]
fn refined_values_are_revalidated_without_change() {
    let email = schema::string().trim().to_lowercase().email().refined::<Email>();
    let first = email.create("  Ada@Dev.COM ").unwrap();
    assert_eq!(first.get(), "ada@dev.com");

    let second = email.create(first.clone()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn type_markers_name_the_produced_types() {
    type EmailRefinement = Refinement<Email, schema::StringRule>;

    fn domain(address: &Infer<EmailRefinement>) -> &str {
        let raw: &InferPrimitive<EmailRefinement> = address.get();
        raw.rsplit('@').next().unwrap_or_default()
    }

    fn unbrand(address: Infer<EmailRefinement>) -> Unbranded<Infer<EmailRefinement>> {
        address.into_inner()
    }

    let address = email().create("ops@dev.com").unwrap();
    assert_eq!(domain(&address), "dev.com");
    assert_eq!(unbrand(address), "ops@dev.com");
}

#[test]
fn nested_branded_fields_report_paths() {
    let signup = schema::object()
        .field("email", email().branded_rule().clone())
        .field("age", schema::integer().gte(18));

    let diagnostics = signup
        .parse(&json!({ "email": "nope", "age": 12 }))
        .unwrap_failure();

    let paths: Vec<String> = diagnostics.issues().map(|i| i.path_string()).collect();
    assert_eq!(paths, ["email", "age"]);
}
