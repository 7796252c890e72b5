//! Teacher search: criteria, query construction, transport, and the
//! submission flow that ties them together.

mod client;
mod flow;
pub(crate) mod query;
mod types;

pub use client::{SearchClient, TeacherDirectory};
pub use flow::{run_search, Outcome, Phase, SearchFlow, SubmitTicket, NO_TEACHER_MESSAGE};
pub use query::{build_results_query, parse_time_text, RESULTS_PATH};
pub use types::{CriteriaEdit, SearchCriteria, SearchResponse, Teacher};
