//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod question;
pub mod order;

pub use validation::ValidationError;
pub use question::{Question, QuestionId, QuestionText, VoteCount};
pub use order::{parse_include_hidden, ListOrder};
