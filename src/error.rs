//! Errors raised by catalog operations and the title file.

use std::io;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{BookId, ISSUE_DATE_FORMAT};

/// Longest title accepted by `Catalog::add`, in characters.
pub const MAX_TITLE_LEN: usize = 50;

/// Rejected operator input. Callers re-prompt; the catalog never does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Lender name cannot be blank.")]
    BlankLender,

    #[error("Book title cannot be blank.")]
    BlankTitle,

    #[error("Book title is too long ({len} characters, max {max}).", max = MAX_TITLE_LEN)]
    TitleTooLong { len: usize },

    #[error("Book title cannot contain line breaks.")]
    TitleHasLineBreak,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Book ID {0} not found in the catalog.")]
    NotFound(BookId),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error(
        "Book ID {id} is already issued to {lender} (issue date: {}).",
        .issued_at.format(ISSUE_DATE_FORMAT)
    )]
    AlreadyIssued {
        id: BookId,
        lender: String,
        issued_at: NaiveDateTime,
    },

    #[error("Book ID {0} is already in the library (available).")]
    NotIssued(BookId),

    #[error("could not read book list {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write to book list {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
