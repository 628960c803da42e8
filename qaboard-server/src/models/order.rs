//! Listing options

use std::str::FromStr;

use super::ValidationError;

/// Sort order for question listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    /// Newest first
    #[default]
    New,
    /// Most votes first, oldest first among equals
    Top,
}

impl ListOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Top => "top",
        }
    }

    /// SQL ORDER BY clause for this order.
    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            Self::New => "id DESC",
            Self::Top => "votes DESC, id ASC",
        }
    }
}

impl FromStr for ListOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "top" => Ok(Self::Top),
            other => Err(ValidationError::InvalidVariant {
                field: "order",
                value: other.to_owned(),
            }),
        }
    }
}

/// Parse the `include_hidden` query flag.
pub fn parse_include_hidden(s: &str) -> Result<bool, ValidationError> {
    match s {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ValidationError::InvalidVariant {
            field: "include_hidden",
            value: other.to_owned(),
        }),
    }
}
