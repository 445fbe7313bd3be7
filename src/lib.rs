//! Core library surface for the library catalog terminal application.
//!
//! The catalog and its title file are usable without the terminal UI, which is
//! how the tests drive them.
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod startup;
pub mod store;
pub mod ui;

pub use catalog::{Catalog, ReturnOutcome};
pub use config::Config;
pub use error::{CatalogError, InvalidInput};
pub use models::{BookId, BookRecord, BookStatus};
pub use store::TitleStore;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
