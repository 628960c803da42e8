//! Repository implementations for database access

pub mod questions;

pub use questions::{DbError, QuestionRepo};
