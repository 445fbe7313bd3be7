use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-catalog";
/// Title list file stored inside the application data directory.
const BOOKS_FILE_NAME: &str = "list_of_books.txt";
/// Log file written while the terminal UI owns stdout.
const LOG_FILE_NAME: &str = "catalog.log";
/// Name shown in the welcome banner and the book list heading.
pub const LIBRARY_NAME: &str = "Community Library";

/// Startup settings. Everything is derived from fixed names; there are no
/// flags or environment overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub library_name: String,
    pub books_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve the data directory inside the user's home.
    pub fn resolve() -> Result<Self> {
        let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Lay out every file beneath `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            library_name: LIBRARY_NAME.to_string(),
            books_path: data_dir.join(BOOKS_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_share_the_data_directory() {
        let config = Config::in_dir("/tmp/catalog");
        assert_eq!(config.books_path, Path::new("/tmp/catalog/list_of_books.txt"));
        assert_eq!(config.log_path, Path::new("/tmp/catalog/catalog.log"));
        assert_eq!(config.library_name, LIBRARY_NAME);
    }
}
