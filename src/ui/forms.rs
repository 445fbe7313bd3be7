use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::BookId;

/// Parse the book id typed into a form.
fn parse_book_id(raw: &str) -> Result<BookId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(anyhow!("Book ID is required."));
    }
    raw.parse::<BookId>()
        .context("Book ID must be a number.")
}

/// Render `Name: value` with the active field highlighted.
fn field_line(field_name: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}

/// Internal representation of the "issue book" form fields.
#[derive(Default, Clone)]
pub(crate) struct IssueForm {
    pub(crate) book_id: String,
    pub(crate) lender: String,
    pub(crate) active: IssueField,
    pub(crate) error: Option<String>,
}

/// Fields available within the issue form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum IssueField {
    #[default]
    BookId,
    Lender,
}

impl IssueForm {
    /// Seed the form with the book highlighted on the list screen. Focus jumps
    /// straight to the lender when an id is already known.
    pub(crate) fn for_book(id: Option<BookId>) -> Self {
        let mut form = Self::default();
        if let Some(id) = id {
            form.book_id = id.to_string();
            form.active = IssueField::Lender;
        }
        form
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            IssueField::BookId => IssueField::Lender,
            IssueField::Lender => IssueField::BookId,
        };
    }

    /// Append a character to the active field. Ids only take digits.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            IssueField::BookId => {
                if ch.is_ascii_digit() {
                    self.book_id.push(ch);
                    true
                } else {
                    false
                }
            }
            IssueField::Lender => {
                if !ch.is_control() {
                    self.lender.push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            IssueField::BookId => {
                self.book_id.pop();
            }
            IssueField::Lender => {
                self.lender.pop();
            }
        }
    }

    /// The lender name is passed through untouched; the catalog decides
    /// whether it is blank.
    pub(crate) fn parse_inputs(&self) -> Result<(BookId, String)> {
        let id = parse_book_id(&self.book_id)?;
        Ok((id, self.lender.clone()))
    }

    pub(crate) fn build_line(&self, field_name: &str, field: IssueField) -> Line<'static> {
        let value = match field {
            IssueField::BookId => &self.book_id,
            IssueField::Lender => &self.lender,
        };
        field_line(field_name, value, self.active == field)
    }

    pub(crate) fn value_len(&self, field: IssueField) -> usize {
        match field {
            IssueField::BookId => self.book_id.chars().count(),
            IssueField::Lender => self.lender.chars().count(),
        }
    }
}

/// Single-field form used by the return flow.
#[derive(Default, Clone)]
pub(crate) struct ReturnForm {
    pub(crate) book_id: String,
    pub(crate) error: Option<String>,
}

impl ReturnForm {
    pub(crate) fn for_book(id: Option<BookId>) -> Self {
        Self {
            book_id: id.map(|id| id.to_string()).unwrap_or_default(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() {
            self.book_id.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.book_id.pop();
    }

    pub(crate) fn parse_inputs(&self) -> Result<BookId> {
        parse_book_id(&self.book_id)
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line("Book ID", &self.book_id, true)
    }
}

/// Form state for adding a title.
#[derive(Default, Clone)]
pub(crate) struct AddForm {
    pub(crate) title: String,
    pub(crate) error: Option<String>,
}

impl AddForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.title.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.title.pop();
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line("Title", &self.title, true)
    }

    pub(crate) fn value_len(&self) -> usize {
        self.title.chars().count()
    }
}
