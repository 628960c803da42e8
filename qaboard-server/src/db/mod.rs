//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Every mutation is a single statement, so SQLite's write lock serializes it
//! - No check-then-write for counters; `votes = votes + 1` runs inside the UPDATE

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, open};
pub use repos::*;
