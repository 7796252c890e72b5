//! Client-side core of a tutor-discovery app: a validation gate over the
//! search criteria, a query builder for the `/results` endpoint, an HTTP
//! client, and the submission flow gating requests on clean validation.
//!
//! The usual entry points are [`search::SearchFlow`] for state,
//! [`search::SearchClient`] for transport, and [`search::run_search`] to
//! drive one submission end to end.

pub mod config;
pub mod error;
pub mod search;
pub mod validate;

pub use config::SearchConfig;
pub use error::SearchError;
