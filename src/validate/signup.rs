//! Validation rules for the sign-up form.

use super::{FieldRule, RuleKind, Schema, ValidationResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Tweet-sized limit on the profile description.
const DESCRIPTION_MAX_CHARS: usize = 280;
const PASSWORD_MIN_CHARS: usize = 8;

// Local part, "@", then a domain with at least two labels
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").unwrap());

/// Profile thumbnail: an uploaded image, a URL, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    pub image: Option<serde_json::Value>,
    pub url: Option<String>,
}

impl Thumbnail {
    fn is_provided(&self) -> bool {
        self.image.is_some() || self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// A sign-up submission as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_image: Thumbnail,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
    #[serde(default)]
    pub contact_permission: bool,
    #[serde(default)]
    pub terms_and_conditions: bool,
}

static SIGNUP_RULES: &[FieldRule<SignUpForm>] = &[
    FieldRule {
        field: "courses",
        kind: RuleKind::MissingSelection,
        message: "Please select at least one class",
        passes: |f| !f.courses.is_empty(),
    },
    FieldRule {
        field: "first_name",
        kind: RuleKind::MissingField,
        message: "Please enter your first name",
        passes: |f| !f.first_name.trim().is_empty(),
    },
    FieldRule {
        field: "description",
        kind: RuleKind::TooLong,
        message: "Just like a tweet, keep it short (less than 280 characters) and sweet",
        passes: |f| f.description.chars().count() <= DESCRIPTION_MAX_CHARS,
    },
    FieldRule {
        field: "thumbnail_image",
        kind: RuleKind::MissingField,
        message: "Must provide a thumbnail",
        passes: |f| f.thumbnail_image.is_provided(),
    },
    FieldRule {
        field: "email",
        kind: RuleKind::MissingField,
        message: "Please enter an email",
        passes: |f| !f.email.trim().is_empty(),
    },
    FieldRule {
        field: "email",
        kind: RuleKind::Invalid,
        message: "Please enter a valid email",
        passes: |f| EMAIL_REGEX.is_match(f.email.trim()),
    },
    FieldRule {
        field: "password",
        kind: RuleKind::MissingField,
        message: "Password must be at least 8 characters",
        passes: |f| f.password.chars().count() >= PASSWORD_MIN_CHARS,
    },
    FieldRule {
        field: "password_confirmation",
        kind: RuleKind::Mismatch,
        message: "Passwords don't match",
        passes: |f| f.password_confirmation == f.password,
    },
    FieldRule {
        field: "terms_and_conditions",
        kind: RuleKind::NotAccepted,
        message: "Please agree to our terms and conditions",
        passes: |f| f.terms_and_conditions,
    },
];

static SIGNUP_SCHEMA: Schema<SignUpForm> = Schema::new(SIGNUP_RULES);

/// Runs the sign-up rule set against a form snapshot.
pub fn validate_signup(form: &SignUpForm) -> ValidationResult {
    SIGNUP_SCHEMA.validate(form)
}
