//! qaboard-server: anonymous question board over HTTP
//!
//! Participants post short questions and vote on them; moderators holding
//! the shared admin token hide, unhide, or delete them. State lives in a
//! single SQLite table.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, QuestionRepo};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::{ListOrder, Question, QuestionId, QuestionText, ValidationError};
