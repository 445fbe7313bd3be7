//! Domain models for the catalog. These types stay light-weight data holders so
//! the catalog can focus on state transitions and the UI on presentation.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::NaiveDateTime;

/// Format used whenever an issue date is shown to the operator.
pub const ISSUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Catalog-assigned book identifier. Kept numeric so the next id is computed
/// with a numeric max (book 101 before book 1000).
pub struct BookId(u32);

impl BookId {
    /// Identifier handed to the first book of an empty catalog.
    pub const FIRST: BookId = BookId(101);

    /// The identifier that follows this one.
    pub fn next(self) -> BookId {
        BookId(self.0.saturating_add(1))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(BookId)
    }
}

impl From<u32> for BookId {
    fn from(value: u32) -> Self {
        BookId(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Lending status of a single copy.
pub enum BookStatus {
    #[default]
    Available,
    Issued,
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "available"),
            BookStatus::Issued => write!(f, "issued"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entry in the catalog. The lending fields are only meaningful while the
/// status is `Issued`; `Catalog` keeps them in step with the status.
pub struct BookRecord {
    /// Title as read from the backing file or entered on add.
    pub title: String,
    /// Person currently holding the book. Empty while available.
    pub lender_name: String,
    /// Moment the book was issued, truncated to whole seconds.
    pub issue_date: Option<NaiveDateTime>,
    pub status: BookStatus,
}

impl BookRecord {
    /// Fresh record for a title that has just entered the catalog.
    pub fn available(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lender_name: String::new(),
            issue_date: None,
            status: BookStatus::Available,
        }
    }

    /// Whether the status agrees with the lending fields.
    pub fn is_consistent(&self) -> bool {
        let lent = !self.lender_name.is_empty() && self.issue_date.is_some();
        match self.status {
            BookStatus::Issued => lent,
            BookStatus::Available => self.lender_name.is_empty() && self.issue_date.is_none(),
        }
    }

    /// Rendered issue date, or an empty string while available.
    pub fn issue_date_display(&self) -> String {
        self.issue_date
            .map(|date| date.format(ISSUE_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub(crate) fn clear_loan(&mut self) {
        self.lender_name.clear();
        self.issue_date = None;
        self.status = BookStatus::Available;
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
