use crate::catalog::Catalog;
use crate::models::BookId;

/// Selection state for the book list. The list itself is read from the
/// catalog on every draw so it never goes stale after an issue or return.
#[derive(Default)]
pub(crate) struct BooksScreen {
    pub(crate) selected: usize,
}

impl BooksScreen {
    /// Move the highlight by `offset` rows, clamped to the list.
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let max_index = len - 1;
        self.selected = self.selected.saturating_add_signed(offset).min(max_index);
    }

    /// Keep the highlight on a valid row after the catalog changed size.
    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Highlight `id` if it is in the catalog.
    pub(crate) fn focus(&mut self, catalog: &Catalog, id: BookId) {
        if let Some(idx) = catalog.list().position(|(book_id, _, _)| book_id == id) {
            self.selected = idx;
        }
    }

    pub(crate) fn current_id(&self, catalog: &Catalog) -> Option<BookId> {
        catalog.list().nth(self.selected).map(|(id, _, _)| id)
    }
}
