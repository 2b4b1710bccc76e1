//! Watch mode: build once, then rebuild on source changes.
//!
//! Build errors are reported and the loop returns to waiting for the next
//! change; only a shutdown signal (or a failed watcher setup) ends the
//! process.

use anyhow::Result;

use crate::config::BuildConfig;
use crate::log;
use crate::logger::{status_error, status_success};
use crate::pipeline::StyleBuildTask;
use crate::watch::WatchTrigger;

pub fn watch(config: &BuildConfig) -> Result<()> {
    // From here on Ctrl+C sets the shutdown flag instead of exiting; the
    // event loop polls it and unwinds
    crate::core::set_watching();

    let task = StyleBuildTask::new(config.source_glob(), config.output_dir());

    // Attach the watcher before the initial build so changes made while it
    // runs buffer in the channel instead of getting lost.
    let trigger = WatchTrigger::new(task.source_glob())?;

    match task.run() {
        Ok(written) => log!(
            "build";
            "compiled {} stylesheet{}",
            written.len(),
            if written.len() == 1 { "" } else { "s" }
        ),
        Err(e) => status_error("initial build failed", &e.to_string()),
    }

    log!("watch"; "watching `{}` (Ctrl+C to stop)", trigger.root().display());

    trigger.run(|| match task.run() {
        Ok(written) => status_success(&format!(
            "rebuilt {} stylesheet{}",
            written.len(),
            if written.len() == 1 { "" } else { "s" }
        )),
        Err(e) => status_error("rebuild failed", &e.to_string()),
    });

    log!("watch"; "stopped");
    Ok(())
}
