use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::RecordError;
use crate::models::{FieldLimit, Record};

/// Drop trailing line breaks from typed or pasted text. Spaces are part of a
/// valid name, so nothing else is trimmed.
pub(crate) fn strip_line_break(raw: &str) -> &str {
    raw.trim_end_matches(['\r', '\n'])
}

/// Internal representation of the "add item" form fields.
#[derive(Default, Clone)]
pub(crate) struct ItemForm {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) priority: String,
    pub(crate) active: ItemField,
    pub(crate) error: Option<String>,
}

/// Fields available within the item form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum ItemField {
    #[default]
    Name,
    Category,
    Priority,
}

impl ItemField {
    fn next(self) -> Self {
        match self {
            ItemField::Name => ItemField::Category,
            ItemField::Category => ItemField::Priority,
            ItemField::Priority => ItemField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            ItemField::Name => ItemField::Priority,
            ItemField::Category => ItemField::Name,
            ItemField::Priority => ItemField::Category,
        }
    }

    /// Label shown in front of the value; also used to place the cursor.
    pub(crate) fn label(self) -> &'static str {
        match self {
            ItemField::Name => "Name",
            ItemField::Category => "Category",
            ItemField::Priority => "Priority",
        }
    }

    /// Row of the field inside the form popup.
    pub(crate) fn row(self) -> u16 {
        match self {
            ItemField::Name => 0,
            ItemField::Category => 1,
            ItemField::Priority => 2,
        }
    }
}

impl ItemForm {
    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    fn value(&self, field: ItemField) -> &String {
        match field {
            ItemField::Name => &self.name,
            ItemField::Category => &self.category,
            ItemField::Priority => &self.priority,
        }
    }

    /// Append a character to the active field. Priority only takes digits and
    /// a leading minus; text fields take anything printable so the name rule
    /// can report a proper error on save.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            ItemField::Priority => {
                if ch.is_ascii_digit() || (ch == '-' && self.priority.is_empty()) {
                    self.priority.push(ch);
                    true
                } else {
                    false
                }
            }
            ItemField::Name | ItemField::Category => {
                if ch.is_control() {
                    return false;
                }
                if self.active == ItemField::Name {
                    self.name.push(ch);
                } else {
                    self.category.push(ch);
                }
                true
            }
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            ItemField::Name => {
                self.name.pop();
            }
            ItemField::Category => {
                self.category.pop();
            }
            ItemField::Priority => {
                self.priority.pop();
            }
        }
    }

    /// Validate the inputs and build the record ready for insertion.
    pub(crate) fn parse_inputs(&self, limit: FieldLimit) -> Result<Record> {
        let priority_raw = self.priority.trim();
        if priority_raw.is_empty() {
            return Err(anyhow!("Priority is required."));
        }
        let priority = priority_raw
            .parse::<i64>()
            .map_err(|_| RecordError::InvalidPriority(priority_raw.to_string()))?;

        let record = Record::new(
            strip_line_break(&self.name),
            strip_line_break(&self.category),
            priority,
            limit,
        )?;
        Ok(record)
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: ItemField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                ItemField::Category => "<optional>".to_string(),
                _ => "<required>".to_string(),
            }
        } else {
            value.clone()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, field_style(is_active, value.is_empty())),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: ItemField) -> usize {
        self.value(field).chars().count()
    }
}

/// Single-field form used to remove an item by name.
#[derive(Default, Clone)]
pub(crate) struct RemoveForm {
    pub(crate) name: String,
}

impl RemoveForm {
    /// Prefill the form with the name of the selected listing row.
    pub(crate) fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            false
        } else {
            self.name.push(ch);
            true
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.name.pop();
    }

    /// The exact key to look up, minus any trailing line break.
    pub(crate) fn key(&self) -> &str {
        strip_line_break(&self.name)
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::raw("Name: "),
            Span::styled(self.name.clone(), field_style(true, self.name.is_empty())),
        ])
    }
}

/// Choices offered by the "organize backpack" popup.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum SortChoice {
    ByName,
    ByPriority,
    Cancel,
}

impl SortChoice {
    pub(crate) const ALL: [SortChoice; 3] =
        [SortChoice::ByName, SortChoice::ByPriority, SortChoice::Cancel];

    pub(crate) fn label(self) -> &'static str {
        match self {
            SortChoice::ByName => "By name (alphabetical)",
            SortChoice::ByPriority => "By priority",
            SortChoice::Cancel => "Cancel",
        }
    }

    /// Map the digit shown next to each choice back to the choice.
    pub(crate) fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        index
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

/// Selection state of the sort popup.
#[derive(Default, Clone)]
pub(crate) struct SortMenu {
    pub(crate) selected: usize,
}

impl SortMenu {
    pub(crate) fn move_selection(&mut self, offset: isize) {
        let last = SortChoice::ALL.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn current(&self) -> SortChoice {
        SortChoice::ALL[self.selected]
    }
}

fn field_style(is_active: bool, is_empty: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Yellow)
    } else if is_empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}
