//! Testing patterns for code that takes branded values

use refinery::prelude::*;
use refinery::{assert_failure, assert_success, assert_validation_errors};
use serde_json::json;

refinery::tag!(Email);
refinery::tag!(Age);

#[derive(Debug, Clone, PartialEq)]
struct User {
    email: Branded<String, Email>,
    age: Branded<i64, Age>,
}

struct Signup {
    email: Refinement<Email, schema::StringRule>,
    age: Refinement<Age, schema::NumberRule<i64>>,
}

impl Signup {
    fn new() -> Self {
        Self {
            email: schema::string().trim().email().refined(),
            age: schema::integer().gte(18).lte(150).refined(),
        }
    }

    fn user(&self, email: &str, age: i64) -> Validation<User, Diagnostics> {
        let email = self.email.create(email).map_err(RefinementError::into_diagnostics);
        let age = self
            .age
            .create(age)
            .map_err(|e| e.into_diagnostics().at("age"));
        email.and(age).map(|(email, age)| User { email, age })
    }
}

#[test]
fn valid_signup_builds_a_user() {
    let signup = Signup::new();
    assert_success!(signup.user(" ada@dev.com ", 36));

    let user = signup.user("ada@dev.com", 36).unwrap();
    assert_eq!(user.email.get(), "ada@dev.com");
    assert_eq!(*user.age, 36);
}

#[test]
fn invalid_signup_accumulates_both_fields() {
    let signup = Signup::new();
    assert_failure!(signup.user("ada", 12));
    assert_validation_errors!(
        signup.user("ada", 12).map_err(|d| d.messages().len()),
        2
    );
}

#[test]
fn error_paths_identify_the_field() {
    let diagnostics = Signup::new().user("ada@dev.com", 200).unwrap_failure();
    assert_eq!(diagnostics.first().path_string(), "age");
    assert!(diagnostics.pretty().contains("→ at age"));
}

#[test]
fn trusted_values_skip_validation() {
    let user = User {
        email: Branded::new_unchecked("fixture@dev.com".to_string()),
        age: Branded::new_unchecked(30),
    };
    let json = serde_json::to_value(user.email.clone()).unwrap();
    assert_eq!(json, json!("fixture@dev.com"));
    assert_success!(Signup::new().email.create(user.email));
}
