//! Builds the application state from resolved settings. Nothing here aborts
//! the process: an unusable log file or book list becomes a footer notice.

use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::logging;
use crate::store::TitleStore;
use crate::ui::App;

/// Install logging, load the title list, and hand back a ready `App`.
pub fn start(config: &Config) -> App {
    let mut notices = Vec::new();

    if let Err(err) = logging::init(&config.log_path) {
        notices.push(format!("Logging disabled ({err:#})."));
    }
    info!(path = %config.books_path.display(), "starting library catalog");

    let store = TitleStore::new(&config.books_path);
    let catalog = match store.load() {
        Ok(titles) => Catalog::with_titles(store, titles),
        Err(err) => {
            // A missing list is not fatal; the first add creates it.
            warn!(error = %err, "starting with an empty catalog");
            notices.push(format!("{err}. Starting with an empty catalog."));
            Catalog::empty(store)
        }
    };

    let app = App::new(catalog, &config.library_name);
    if notices.is_empty() {
        app
    } else {
        app.with_notice(notices.join(" "))
    }
}
