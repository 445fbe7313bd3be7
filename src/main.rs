//! Binary entry point: resolve paths, build the app, and drive the Ratatui
//! event loop until the operator quits.
use library_catalog::{run_app, startup, Config};

fn main() -> anyhow::Result<()> {
    let config = Config::resolve()?;
    let mut app = startup::start(&config);
    run_app(&mut app)
}
