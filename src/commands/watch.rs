use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use assetpipe::application::{WatchOptions, WatchUseCase};
use assetpipe::presentation::{Cli, Output};

use super::load_context;

pub fn cmd_watch(cli: &Cli) -> Result<()> {
    let output = Output::new(cli.json, "watch");
    let (ctx, config) = load_context(cli, &output)?;

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .map_err(|e| anyhow!("cannot install Ctrl+C handler: {e}"))?;

    let options = WatchOptions::default().with_debounce_ms(config.watch.debounce_ms);
    WatchUseCase::new(&ctx, options).start(
        running,
        |event| output.watch_event(&event),
        |event| output.task_event(event),
    )?;

    Ok(())
}
