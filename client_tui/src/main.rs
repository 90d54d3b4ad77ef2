use std::fs::File;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod app;
mod input;
mod reporter;
mod surface;

use crate::app::App;

fn main() -> anyhow::Result<()> {
    // Stderr belongs to the terminal UI, so logs go to a file next to
    // the binary. RUST_LOG still controls the filter.
    let log_file = File::create("pong.log").context("creating pong.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let terminal = ratatui::init();
    let result = App::new().run(terminal);
    ratatui::restore();

    if let Err(err) = &result {
        eprintln!("exited with error: {err:#}");
    }
    result
}
