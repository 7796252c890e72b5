//! Validation rules for teacher search criteria.

use super::{FieldRule, RuleKind, Schema, ValidationResult};
use crate::search::SearchCriteria;

static SEARCH_RULES: &[FieldRule<SearchCriteria>] = &[
    FieldRule {
        field: "day",
        kind: RuleKind::MissingSelection,
        message: "Please select at least one day",
        passes: |c| !c.day.is_empty(),
    },
    // course is optional: an empty selection is fine
    FieldRule {
        field: "timezone",
        kind: RuleKind::MissingField,
        message: "Please select a timezone",
        passes: |c| c.timezone.as_deref().is_some_and(|tz| !tz.is_empty()),
    },
    FieldRule {
        field: "start_time",
        kind: RuleKind::MissingField,
        message: "Please select a start time",
        passes: |c| c.start_time.is_some(),
    },
    FieldRule {
        field: "end_time",
        kind: RuleKind::MissingField,
        message: "Please enter an end time",
        passes: |c| c.end_time.is_some(),
    },
];

static SEARCH_SCHEMA: Schema<SearchCriteria> = Schema::new(SEARCH_RULES);

/// Runs the search rule set against a criteria snapshot.
///
/// Pure function of the input; an empty result means the criteria are
/// submittable.
pub fn validate_criteria(criteria: &SearchCriteria) -> ValidationResult {
    SEARCH_SCHEMA.validate(criteria)
}
