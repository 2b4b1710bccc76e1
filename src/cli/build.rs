//! One-shot build command.

use std::time::Instant;

use anyhow::Result;

use crate::config::BuildConfig;
use crate::pipeline::StyleBuildTask;
use crate::{debug, log};

/// Build all matched stylesheets once. Exits non-zero (via the returned
/// error) on the first compile/minify failure.
pub fn build_once(config: &BuildConfig) -> Result<()> {
    let task = StyleBuildTask::new(config.source_glob(), config.output_dir());

    let start = Instant::now();
    let written = task.run()?;

    if written.is_empty() {
        log!("build"; "no stylesheets matched `{}`", config.source);
        return Ok(());
    }

    for file in &written {
        debug!("build"; "{} -> {}", file.source.display(), file.output.display());
    }

    log!(
        "build";
        "compiled {} stylesheet{} in {:.0?}",
        written.len(),
        if written.len() == 1 { "" } else { "s" },
        start.elapsed()
    );

    Ok(())
}
