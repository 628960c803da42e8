//! Question record and its validated inputs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for question text, in characters
pub const MAX_TEXT_LEN: usize = 500;

/// A stored question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub votes: i64,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

/// Vote count after a successful vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow)]
pub struct VoteCount {
    pub id: i64,
    pub votes: i64,
}

/// Validated question text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionText(String);

impl QuestionText {
    /// Create question text, trimming surrounding whitespace.
    ///
    /// # Rules
    /// - 1 to 500 characters after trimming
    /// - Length is counted in characters, not bytes
    /// - No control characters other than tab and line breaks
    ///
    /// # Example
    /// ```
    /// use qaboard_server::models::QuestionText;
    ///
    /// assert!(QuestionText::new("Hello?").is_ok());
    /// assert!(QuestionText::new("   ").is_err());
    /// assert_eq!(QuestionText::new("  why?  ").unwrap().as_str(), "why?");
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }

        if trimmed.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "text",
                max: MAX_TEXT_LEN,
            });
        }

        if trimmed
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
        {
            return Err(ValidationError::InvalidFormat {
                field: "text",
                reason: "must not contain control characters",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for QuestionText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated question id (positive integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(i64);

impl QuestionId {
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id < 1 {
            return Err(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            });
        }
        Ok(Self(id))
    }

    /// Parse an id from a path segment.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let id = s.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a positive integer",
        })?;
        Self::new(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
