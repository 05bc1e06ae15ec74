//! Domain rejections raised while turning raw form input into a [`Record`].
//!
//! Application plumbing (terminal, logging) keeps using `anyhow`; these are the
//! cases the menu shows back to the user inline.
//!
//! [`Record`]: crate::models::Record

use std::fmt;

use thiserror::Error;

/// Which text field of a record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "Name"),
            Field::Category => write!(f, "Category"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Name must contain only letters and spaces.")]
    InvalidName,

    #[error("{field} is too long ({len} of at most {limit} characters).")]
    OversizedField {
        field: Field,
        len: usize,
        limit: usize,
    },

    #[error("Priority must be an integer, got '{0}'.")]
    InvalidPriority(String),
}
