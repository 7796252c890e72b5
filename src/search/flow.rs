//! Submission flow for teacher search.
//!
//! The flow is a reducer: every transition consumes the current state and
//! returns the next one, so there is no hidden component-local mutation.
//! Submission is gated on an empty validation result, and each accepted
//! submit gets a fresh generation number - a response is applied only if
//! its generation is still current, so a re-submission can never be
//! overwritten by a slower, earlier request.

use tracing::{debug, warn};

use super::client::TeacherDirectory;
use super::query::build_results_query;
use super::types::{CriteriaEdit, SearchCriteria, Teacher};
use crate::error::SearchError;
use crate::validate::{validate_criteria, ValidationResult};

/// Shown in place of the result list when a search completes empty.
pub const NO_TEACHER_MESSAGE: &str =
    "Oops. It seems like no teacher is available. Why not try a different search?";

/// What a completed search displays.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Non-empty result list, in backend order
    Teachers(Vec<Teacher>),
    /// Search completed with zero teachers
    Empty,
}

/// Where the flow currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No submission attempted since the last edit
    Idle,
    /// Last submit was rejected by validation; cleared by the next edit
    Blocked,
    /// A request is in flight
    Submitting { generation: u64 },
    /// A search completed
    ResultsShown(Outcome),
    /// The request failed; retryable
    Failed(SearchError),
}

/// Token returned by an accepted submit. Carries the generation that
/// must still be current for the response to be applied, plus the query
/// to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub query: String,
}

/// The search flow state: criteria, their validation, the current phase,
/// and the results of the last completed search.
#[derive(Debug, Clone)]
pub struct SearchFlow {
    criteria: SearchCriteria,
    validation: ValidationResult,
    phase: Phase,
    generation: u64,
    results: Option<Vec<Teacher>>,
}

impl SearchFlow {
    /// Starts a flow with empty criteria.
    pub fn new() -> Self {
        Self::with_criteria(SearchCriteria::default())
    }

    /// Starts a flow from a prebuilt criteria snapshot.
    pub fn with_criteria(criteria: SearchCriteria) -> Self {
        let validation = validate_criteria(&criteria);
        Self {
            criteria,
            validation,
            phase: Phase::Idle,
            generation: 0,
            results: None,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// Current field errors; recomputed on every edit and submit.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Results of the most recent completed search. `None` means no
    /// search has completed yet - distinct from a search that completed
    /// empty. A later failure leaves this untouched.
    pub fn results(&self) -> Option<&[Teacher]> {
        self.results.as_deref()
    }

    pub fn failure(&self) -> Option<&SearchError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Applies a field edit and re-runs the validation gate.
    /// A blocked flow returns to idle.
    pub fn edit(mut self, edit: CriteriaEdit) -> Self {
        self.criteria.apply(edit);
        self.validation = validate_criteria(&self.criteria);
        if self.phase == Phase::Blocked {
            self.phase = Phase::Idle;
        }
        self
    }

    /// Attempts to submit the current criteria.
    ///
    /// Validation runs at the moment of submit. Errors block the
    /// submission and no ticket is issued; otherwise the flow enters
    /// `Submitting` under a fresh generation and the caller gets the
    /// ticket to execute.
    pub fn submit(mut self) -> (Self, Option<SubmitTicket>) {
        self.validation = validate_criteria(&self.criteria);
        if !self.validation.is_valid() {
            debug!(errors = self.validation.len(), "Submission blocked by validation");
            self.phase = Phase::Blocked;
            return (self, None);
        }

        self.generation += 1;
        let ticket = SubmitTicket {
            generation: self.generation,
            query: build_results_query(&self.criteria),
        };
        self.phase = Phase::Submitting {
            generation: self.generation,
        };
        (self, Some(ticket))
    }

    /// Applies the outcome of an executed ticket.
    ///
    /// A ticket whose generation is no longer current is stale - a newer
    /// submission has superseded it - and its outcome is dropped. On
    /// success the result list replaces the stored one; on failure the
    /// flow enters `Failed` and prior results stay as they were.
    pub fn resolve(
        mut self,
        ticket: &SubmitTicket,
        outcome: Result<Vec<Teacher>, SearchError>,
    ) -> Self {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "Dropping response from superseded search"
            );
            return self;
        }

        match outcome {
            Ok(teachers) => {
                let shown = if teachers.is_empty() {
                    Outcome::Empty
                } else {
                    Outcome::Teachers(teachers.clone())
                };
                self.results = Some(teachers);
                self.phase = Phase::ResultsShown(shown);
            }
            Err(err) => {
                warn!(error = %err, "Search failed");
                self.phase = Phase::Failed(err);
            }
        }
        self
    }

    /// Re-submits the current criteria, e.g. after a failure.
    pub fn retry(self) -> (Self, Option<SubmitTicket>) {
        self.submit()
    }
}

impl Default for SearchFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one full submission: validate, fetch, resolve.
///
/// A blocked submission returns immediately without touching the
/// directory.
pub async fn run_search<D>(flow: SearchFlow, directory: &D) -> SearchFlow
where
    D: TeacherDirectory + ?Sized,
{
    let (flow, ticket) = flow.submit();
    let Some(ticket) = ticket else {
        return flow;
    };

    let outcome = directory.fetch_teachers(&ticket.query).await;
    flow.resolve(&ticket, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_flow() -> SearchFlow {
        SearchFlow::new()
            .edit(CriteriaEdit::Days(vec!["Monday".to_string()]))
            .edit(CriteriaEdit::Timezone("UTC".to_string()))
            .edit(CriteriaEdit::StartTime("09:00".to_string()))
            .edit(CriteriaEdit::EndTime("10:00".to_string()))
    }

    fn teacher(name: &str) -> Teacher {
        Teacher {
            name: Some(name.to_string()),
            ..Teacher::default()
        }
    }

    #[test]
    fn test_invalid_submit_blocks_without_ticket() {
        let (flow, ticket) = SearchFlow::new().submit();
        assert!(ticket.is_none());
        assert_eq!(*flow.phase(), Phase::Blocked);
        assert!(flow.results().is_none());
    }

    #[test]
    fn test_edit_clears_blocked() {
        let (flow, _) = SearchFlow::new().submit();
        let flow = flow.edit(CriteriaEdit::Days(vec!["Friday".to_string()]));
        assert_eq!(*flow.phase(), Phase::Idle);
    }

    #[test]
    fn test_valid_submit_issues_ticket_with_query() {
        let (flow, ticket) = ready_flow().submit();
        let ticket = ticket.expect("ticket expected");
        assert_eq!(ticket.generation, 1);
        assert_eq!(
            ticket.query,
            "/results?&day=Monday&start_time=09:00&end_time=10:00"
        );
        assert_eq!(*flow.phase(), Phase::Submitting { generation: 1 });
    }

    #[test]
    fn test_empty_result_shows_message_state() {
        let (flow, ticket) = ready_flow().submit();
        let flow = flow.resolve(&ticket.unwrap(), Ok(vec![]));
        assert_eq!(*flow.phase(), Phase::ResultsShown(Outcome::Empty));
        // Completed-but-empty is not "no search yet"
        assert_eq!(flow.results(), Some(&[][..]));
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let (flow, first) = ready_flow().submit();
        let first = first.unwrap();
        let (flow, second) = flow.retry();
        let second = second.unwrap();

        let flow = flow.resolve(&first, Ok(vec![teacher("Stale")]));
        assert_eq!(*flow.phase(), Phase::Submitting { generation: 2 });
        assert!(flow.results().is_none());

        let flow = flow.resolve(&second, Ok(vec![teacher("Fresh")]));
        let Phase::ResultsShown(Outcome::Teachers(teachers)) = flow.phase() else {
            panic!("expected results, got {:?}", flow.phase());
        };
        assert_eq!(teachers[0].name.as_deref(), Some("Fresh"));
    }

    #[test]
    fn test_failure_preserves_prior_results() {
        let (flow, ticket) = ready_flow().submit();
        let flow = flow.resolve(&ticket.unwrap(), Ok(vec![teacher("Ada")]));

        let (flow, ticket) = flow.retry();
        let flow = flow.resolve(
            &ticket.unwrap(),
            Err(SearchError::SearchFailed { status: 502 }),
        );

        assert!(matches!(flow.phase(), Phase::Failed(_)));
        assert!(flow.failure().unwrap().is_retryable());
        let results = flow.results().unwrap();
        assert_eq!(results[0].name.as_deref(), Some("Ada"));
    }
}
