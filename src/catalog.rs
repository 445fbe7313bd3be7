//! In-memory catalog of books and the lending transitions over it.
//!
//! Records live in an insertion-ordered map keyed by `BookId`, so listing
//! follows load order and then add order. Only `add` touches the backing
//! file; issue and return state lives in memory for the life of the process.

use chrono::{Local, NaiveDateTime, SubsecRound};
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{CatalogError, InvalidInput, Result, MAX_TITLE_LEN};
use crate::models::{BookId, BookRecord, BookStatus};
use crate::store::TitleStore;

/// Result of a successful `Catalog::return_book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// An issued book came back.
    Returned(BookRecord),
    /// The record disagreed with its own status and was reset to available.
    Recovered(BookRecord),
}

impl ReturnOutcome {
    pub fn record(&self) -> &BookRecord {
        match self {
            ReturnOutcome::Returned(record) | ReturnOutcome::Recovered(record) => record,
        }
    }
}

#[derive(Debug)]
pub struct Catalog {
    books: IndexMap<BookId, BookRecord>,
    store: TitleStore,
}

impl Catalog {
    /// Build a catalog from titles already read out of `store`, assigning ids
    /// from 101 in order.
    pub fn with_titles<I, S>(store: TitleStore, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut books = IndexMap::new();
        let mut id = BookId::FIRST;
        for title in titles {
            books.insert(id, BookRecord::available(title));
            id = id.next();
        }
        Self { books, store }
    }

    /// Empty catalog backed by `store`. Used when the title file could not be
    /// read at startup.
    pub fn empty(store: TitleStore) -> Self {
        Self {
            books: IndexMap::new(),
            store,
        }
    }

    pub fn store(&self) -> &TitleStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: BookId) -> Option<&BookRecord> {
        self.books.get(&id)
    }

    /// `(id, title, status)` for every book in insertion order. Call again to
    /// restart.
    pub fn list(&self) -> impl Iterator<Item = (BookId, &str, BookStatus)> + '_ {
        self.books
            .iter()
            .map(|(id, record)| (*id, record.title.as_str(), record.status))
    }

    /// Identifier the next added book will receive.
    pub fn next_id(&self) -> BookId {
        self.books
            .keys()
            .max()
            .map(|id| id.next())
            .unwrap_or(BookId::FIRST)
    }

    /// Lend `id` to `lender_name`, stamped with the current local time.
    pub fn issue(&mut self, id: BookId, lender_name: &str) -> Result<BookRecord> {
        let now = Local::now().naive_local().trunc_subsecs(0);
        self.issue_at(id, lender_name, now)
    }

    /// Lend `id` to `lender_name` with an explicit issue date.
    pub fn issue_at(
        &mut self,
        id: BookId,
        lender_name: &str,
        issued_at: NaiveDateTime,
    ) -> Result<BookRecord> {
        let record = self.books.get_mut(&id).ok_or(CatalogError::NotFound(id))?;

        if !record.is_consistent() {
            warn!(%id, status = %record.status, "inconsistent record reset before issue");
            record.clear_loan();
        }

        if let (BookStatus::Issued, Some(date)) = (record.status, record.issue_date) {
            return Err(CatalogError::AlreadyIssued {
                id,
                lender: record.lender_name.clone(),
                issued_at: date,
            });
        }

        let lender_name = lender_name.trim();
        if lender_name.is_empty() {
            return Err(InvalidInput::BlankLender.into());
        }

        record.lender_name = lender_name.to_string();
        record.issue_date = Some(issued_at);
        record.status = BookStatus::Issued;
        info!(%id, title = %record.title, lender = lender_name, "book issued");
        Ok(record.clone())
    }

    /// Bring `id` back into the library.
    pub fn return_book(&mut self, id: BookId) -> Result<ReturnOutcome> {
        let record = self.books.get_mut(&id).ok_or(CatalogError::NotFound(id))?;

        match (record.status, record.is_consistent()) {
            (BookStatus::Available, true) => Err(CatalogError::NotIssued(id)),
            (BookStatus::Issued, true) => {
                let lender = std::mem::take(&mut record.lender_name);
                record.clear_loan();
                info!(%id, title = %record.title, lender = %lender, "book returned");
                Ok(ReturnOutcome::Returned(record.clone()))
            }
            (status, false) => {
                warn!(%id, %status, "unknown lending state, resetting to available");
                record.clear_loan();
                Ok(ReturnOutcome::Recovered(record.clone()))
            }
        }
    }

    /// Add a title to the catalog and the backing file.
    ///
    /// The file append runs first; if it fails the catalog is left untouched,
    /// so memory never holds a book the file does not.
    pub fn add(&mut self, title: &str) -> Result<(BookId, BookRecord)> {
        let title = validate_title(title)?;
        let id = self.next_id();

        self.store.append(title)?;

        let record = BookRecord::available(title);
        self.books.insert(id, record.clone());
        info!(%id, title, "book added");
        Ok((id, record))
    }
}

/// Trim and check a title before it reaches the file.
pub fn validate_title(title: &str) -> Result<&str, InvalidInput> {
    let title = title.trim();
    if title.is_empty() {
        return Err(InvalidInput::BlankTitle);
    }
    if title.contains(['\n', '\r']) {
        return Err(InvalidInput::TitleHasLineBreak);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(InvalidInput::TitleTooLong { len });
    }
    Ok(title)
}
