use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tutormatch::search::{
    run_search, CriteriaEdit, Outcome, Phase, SearchFlow, Teacher, TeacherDirectory,
};
use tutormatch::SearchError;

/// Directory double that returns a fixed list and counts calls.
struct StaticDirectory {
    teachers: Vec<Teacher>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl StaticDirectory {
    fn with_teachers(teachers: Vec<Teacher>) -> Self {
        Self {
            teachers,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TeacherDirectory for StaticDirectory {
    async fn fetch_teachers(&self, query: &str) -> Result<Vec<Teacher>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.teachers.clone())
    }
}

/// Directory double that always fails with the given status.
struct FailingDirectory {
    status: u16,
}

#[async_trait]
impl TeacherDirectory for FailingDirectory {
    async fn fetch_teachers(&self, _query: &str) -> Result<Vec<Teacher>, SearchError> {
        Err(SearchError::SearchFailed {
            status: self.status,
        })
    }
}

fn teacher(name: &str, email: &str) -> Teacher {
    Teacher {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        ..Teacher::default()
    }
}

fn ready_flow() -> SearchFlow {
    SearchFlow::new()
        .edit(CriteriaEdit::Days(vec!["Mon".to_string()]))
        .edit(CriteriaEdit::Timezone("UTC".to_string()))
        .edit(CriteriaEdit::StartTime("09:00".to_string()))
        .edit(CriteriaEdit::EndTime("10:00".to_string()))
}

#[tokio::test]
async fn blocked_submission_never_reaches_the_network() {
    let directory = StaticDirectory::with_teachers(vec![teacher("Ada", "ada@example.com")]);

    // Day selection missing: the gate must block before any request
    let flow = SearchFlow::new()
        .edit(CriteriaEdit::Timezone("UTC".to_string()))
        .edit(CriteriaEdit::StartTime("09:00".to_string()))
        .edit(CriteriaEdit::EndTime("10:00".to_string()));

    let flow = run_search(flow, &directory).await;

    assert_eq!(*flow.phase(), Phase::Blocked);
    assert_eq!(directory.call_count(), 0);
    assert_eq!(
        flow.validation().error("day").unwrap().message,
        "Please select at least one day"
    );
}

#[tokio::test]
async fn successful_search_sends_the_expected_query() {
    let directory = StaticDirectory::with_teachers(vec![teacher("Ada", "ada@example.com")]);

    let flow = run_search(ready_flow(), &directory).await;

    assert_eq!(directory.call_count(), 1);
    let queries = directory.queries.lock().unwrap();
    assert_eq!(queries[0], "/results?&day=Mon&start_time=09:00&end_time=10:00");
    assert!(matches!(flow.phase(), Phase::ResultsShown(_)));
}

#[tokio::test]
async fn empty_search_result_is_the_message_state() {
    let directory = StaticDirectory::with_teachers(vec![]);

    let flow = run_search(ready_flow(), &directory).await;

    assert_eq!(*flow.phase(), Phase::ResultsShown(Outcome::Empty));
    // Distinguished from "no search yet"
    assert_eq!(flow.results(), Some(&[][..]));
}

#[tokio::test]
async fn result_list_preserves_backend_order() {
    let directory = StaticDirectory::with_teachers(vec![
        teacher("Zoe", "zoe@example.com"),
        teacher("Ada", "ada@example.com"),
        teacher("Mia", "mia@example.com"),
    ]);

    let flow = run_search(ready_flow(), &directory).await;

    let Phase::ResultsShown(Outcome::Teachers(teachers)) = flow.phase() else {
        panic!("expected a result list, got {:?}", flow.phase());
    };
    let names: Vec<_> = teachers.iter().filter_map(|t| t.name.as_deref()).collect();
    assert_eq!(names, vec!["Zoe", "Ada", "Mia"]);
}

#[tokio::test]
async fn failed_search_is_surfaced_and_retryable() {
    let good = StaticDirectory::with_teachers(vec![teacher("Ada", "ada@example.com")]);
    let bad = FailingDirectory { status: 502 };

    let flow = run_search(ready_flow(), &good).await;
    let flow = run_search(flow, &bad).await;

    let err = flow.failure().expect("failure expected");
    assert_eq!(*err, SearchError::SearchFailed { status: 502 });
    assert!(err.is_retryable());
    // Prior results survive the failure
    assert_eq!(flow.results().unwrap().len(), 1);

    let flow = run_search(flow, &good).await;
    assert!(matches!(
        flow.phase(),
        Phase::ResultsShown(Outcome::Teachers(_))
    ));
}

#[tokio::test]
async fn only_the_latest_generation_is_applied() {
    let (flow, first) = ready_flow().submit();
    let first = first.expect("first ticket");
    let (flow, second) = flow.retry();
    let second = second.expect("second ticket");

    // The slow first response lands after the re-submission
    let flow = flow.resolve(&first, Ok(vec![teacher("Slow", "slow@example.com")]));
    assert_eq!(*flow.phase(), Phase::Submitting { generation: 2 });

    let flow = flow.resolve(&second, Ok(vec![teacher("Fast", "fast@example.com")]));
    let Phase::ResultsShown(Outcome::Teachers(teachers)) = flow.phase() else {
        panic!("expected a result list");
    };
    assert_eq!(teachers[0].name.as_deref(), Some("Fast"));
}
