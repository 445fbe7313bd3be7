//! Ratatui front-end for the catalog. The shell only dispatches key presses to
//! `Catalog` operations and renders their results; every rule about books
//! lives in the catalog itself.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
