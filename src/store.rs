//! Flat-file persistence for the title list. The file holds one title per line
//! and is only ever appended to; lending state is never written out.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CatalogError, Result};

/// Handle on the newline-delimited title file backing the catalog.
#[derive(Debug, Clone)]
pub struct TitleStore {
    path: PathBuf,
}

impl TitleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every title in file order. Lines are trimmed and blank lines are
    /// skipped so a trailing newline never produces an empty book.
    pub fn load(&self) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|source| self.unavailable(source))?;

        let mut titles = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| self.unavailable(source))?;
            let title = line.trim();
            if !title.is_empty() {
                titles.push(title.to_string());
            }
        }

        debug!(path = %self.path.display(), count = titles.len(), "loaded titles");
        Ok(titles)
    }

    /// Append one title as a new line, creating the file (and its directory)
    /// on first use.
    pub fn append(&self, title: &str) -> Result<()> {
        self.append_line(title)
            .map_err(|source| CatalogError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn append_line(&self, title: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut line = String::with_capacity(title.len() + 2);
        if needs_separator(&mut file)? {
            line.push('\n');
        }
        line.push_str(title);
        line.push('\n');

        file.write_all(line.as_bytes())?;
        file.flush()
    }

    fn unavailable(&self, source: io::Error) -> CatalogError {
        CatalogError::SourceUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

/// True when the file has content that does not end in a newline, which is
/// how hand-edited lists usually look.
fn needs_separator(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TitleStore {
        TitleStore::new(dir.path().join("list_of_books.txt"))
    }

    #[test]
    fn load_trims_lines_and_skips_blanks() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "  Dune \n\n1984\n").unwrap();

        assert_eq!(store.load().unwrap(), vec!["Dune", "1984"]);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let err = store.load().unwrap_err();
        assert!(matches!(err, CatalogError::SourceUnavailable { .. }));
    }

    #[test]
    fn load_reports_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), [b'D', 0xff, 0xfe, b'\n']).unwrap();

        assert!(matches!(
            store.load(),
            Err(CatalogError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn append_creates_missing_file_and_directory() {
        let dir = TempDir::new().unwrap();
        let store = TitleStore::new(dir.path().join("nested").join("books.txt"));

        store.append("Dune").unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "Dune\n");
    }

    #[test]
    fn append_separates_from_unterminated_last_line() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Dune\n1984").unwrap();

        store.append("Foundation").unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "Dune\n1984\nFoundation\n"
        );
        assert_eq!(store.load().unwrap(), vec!["Dune", "1984", "Foundation"]);
    }

    #[test]
    fn append_reports_write_failure() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be opened for append.
        let store = TitleStore::new(dir.path());

        assert!(matches!(
            store.append("Dune"),
            Err(CatalogError::Write { .. })
        ));
    }
}
