//! Domain model for the backpack. A [`Record`] is a plain data holder; the
//! store owns every instance and the menu only ever builds new ones through
//! [`Record::new`], which applies the name rule and the field capacity.

use std::fmt;

use crate::error::{Field, RecordError};

/// Usable characters per text field, matching the fixed buffers the backpack
/// has always used.
pub const FIELD_CAPACITY: usize = 49;

/// Capacity rule applied to `name` and `category` before a record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLimit {
    /// Reject text longer than the given number of characters.
    Bounded(usize),
    /// Accept text of any length.
    Unbounded,
}

impl Default for FieldLimit {
    fn default() -> Self {
        FieldLimit::Bounded(FIELD_CAPACITY)
    }
}

impl FieldLimit {
    /// Check one field against the limit. Lengths are counted in characters,
    /// not bytes, so accented letters cost one slot each.
    pub fn check(&self, field: Field, value: &str) -> Result<(), RecordError> {
        match *self {
            FieldLimit::Unbounded => Ok(()),
            FieldLimit::Bounded(limit) => {
                let len = value.chars().count();
                if len > limit {
                    Err(RecordError::OversizedField { field, len, limit })
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// One item in the backpack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Lookup key for removal. Letters and spaces only.
    pub name: String,
    /// Free-form kind of item ("Tool", "Supply", ...).
    pub category: String,
    /// Lower values sort first. No range is enforced.
    pub priority: i64,
}

impl Record {
    /// Build a record from already-trimmed input, enforcing the name rule and
    /// the field capacity.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        priority: i64,
        limit: FieldLimit,
    ) -> Result<Self, RecordError> {
        let name = name.into();
        let category = category.into();

        if !validate_name(&name) {
            return Err(RecordError::InvalidName);
        }
        limit.check(Field::Name, &name)?;
        limit.check(Field::Category, &category)?;

        Ok(Self {
            name,
            category,
            priority,
        })
    }
}

impl fmt::Display for Record {
    /// One listing line: `- Rope (Tool) priority: 3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} ({}) priority: {}",
            self.name, self.category, self.priority
        )
    }
}

/// True iff `text` is non-empty and made only of alphabetic letters and spaces.
pub fn validate_name(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_alphabetic() || ch == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation_accepts_letters_and_spaces() {
        assert!(!validate_name(""));
        assert!(validate_name("Alex"));
        assert!(!validate_name("Al3x"));
        assert!(validate_name("Ana Maria"));
        assert!(!validate_name("ana-maria"));
    }

    #[test]
    fn name_of_only_spaces_is_accepted() {
        assert!(validate_name("   "));
    }

    #[test]
    fn new_rejects_invalid_name() {
        let err = Record::new("R0pe", "Tool", 1, FieldLimit::default()).unwrap_err();
        assert_eq!(err, RecordError::InvalidName);
    }

    #[test]
    fn new_rejects_oversized_category() {
        let category = "x".repeat(FIELD_CAPACITY + 1);
        let err = Record::new("Rope", category, 1, FieldLimit::default()).unwrap_err();
        assert_eq!(
            err,
            RecordError::OversizedField {
                field: Field::Category,
                len: FIELD_CAPACITY + 1,
                limit: FIELD_CAPACITY,
            }
        );
    }

    #[test]
    fn capacity_is_inclusive() {
        let name = "a".repeat(FIELD_CAPACITY);
        assert!(Record::new(name, "", 0, FieldLimit::default()).is_ok());
    }

    #[test]
    fn unbounded_limit_accepts_long_text() {
        let name = "a".repeat(FIELD_CAPACITY * 3);
        let record = Record::new(name.clone(), "Tool", -2, FieldLimit::Unbounded).unwrap();
        assert_eq!(record.name, name);
        assert_eq!(record.priority, -2);
    }

    #[test]
    fn display_matches_listing_line() {
        let record = Record::new("Rope", "Tool", 3, FieldLimit::default()).unwrap();
        assert_eq!(record.to_string(), "- Rope (Tool) priority: 3");
    }
}
