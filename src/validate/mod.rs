//! Declarative field validation.
//!
//! A [`Schema`] is a static table of per-field rules. Rules are evaluated
//! independently per field (no short-circuit across fields); within a
//! field, the first failing rule wins. Validation is a pure function of
//! the input record - callers decide when to run it (on edit, on blur,
//! on submit).

mod search;
mod signup;

pub use search::validate_criteria;
pub use signup::{validate_signup, SignUpForm, Thumbnail};

use std::collections::BTreeMap;

/// Classifies why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// A multi-select had no entries
    MissingSelection,
    /// A required scalar field was absent or unparsable
    MissingField,
    /// A value exceeded its length limit
    TooLong,
    /// A value was present but malformed
    Invalid,
    /// A value did not match its companion field
    Mismatch,
    /// A flag that must be set was not
    NotAccepted,
}

/// A single field failure: the kind plus the user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub kind: RuleKind,
    pub message: &'static str,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

/// One validation rule: `passes` returns true when the record satisfies
/// the constraint for `field`.
pub struct FieldRule<T> {
    pub field: &'static str,
    pub kind: RuleKind,
    pub message: &'static str,
    pub passes: fn(&T) -> bool,
}

/// A static rule table for records of type `T`.
pub struct Schema<T: 'static> {
    rules: &'static [FieldRule<T>],
}

impl<T: 'static> Schema<T> {
    pub const fn new(rules: &'static [FieldRule<T>]) -> Self {
        Self { rules }
    }

    /// Evaluates every rule against `record`.
    ///
    /// Fields are checked independently; the first failing rule per field
    /// is reported.
    pub fn validate(&self, record: &T) -> ValidationResult {
        let mut result = ValidationResult::default();
        for rule in self.rules {
            if result.error(rule.field).is_some() {
                continue;
            }
            if !(rule.passes)(record) {
                result.errors.insert(
                    rule.field,
                    FieldError {
                        kind: rule.kind,
                        message: rule.message,
                    },
                );
            }
        }
        result
    }
}

/// Mapping from field name to its error. Empty means submittable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<&'static str, FieldError>,
}

impl ValidationResult {
    /// Returns true when no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Looks up the error for a single field.
    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Iterates `(field, error)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.errors.iter().map(|(field, err)| (*field, err))
    }
}
