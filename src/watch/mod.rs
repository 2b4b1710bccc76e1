//! Filesystem watch trigger.
//!
//! `WatchTrigger` owns a notify watcher rooted at the non-wildcard prefix
//! of the source glob and turns raw filesystem events into debounced
//! rebuild invocations. The caller passes the rebuild closure explicitly;
//! there is no task registry to look anything up in.
//!
//! ```text
//! notify watcher → channel → Debouncer (timing + dedup) → on_change()
//! ```

mod debouncer;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::{core, debug, log};
use debouncer::Debouncer;

/// How often the event loop wakes up to poll the shutdown flag.
const SHUTDOWN_POLL_MS: u64 = 500;

/// Errors raised while setting up the watcher.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The non-wildcard prefix of the source glob does not exist, so there
    /// is nothing to watch. Reported at startup instead of idling inert.
    #[error("watch path `{0}` does not exist")]
    Setup(PathBuf),

    #[error("invalid source glob `{0}`")]
    Pattern(String, #[source] glob::PatternError),

    #[error("failed to start filesystem watcher")]
    Notify(#[from] notify::Error),
}

/// Re-invokes a rebuild closure whenever watched source files change.
pub struct WatchTrigger {
    /// Channel carrying raw notify events
    notify_rx: Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    #[allow(dead_code)]
    watcher: RecommendedWatcher,
    /// Directory under watch
    root: PathBuf,
    /// File-name pattern from the source glob (`*.scss`)
    matcher: glob::Pattern,
    /// Debouncer state
    debouncer: Debouncer,
}

impl WatchTrigger {
    /// Create a trigger for the given source glob.
    ///
    /// The watcher starts immediately; events arriving before `run` is
    /// called buffer in the channel, so a change made during the initial
    /// build is not lost.
    pub fn new(source_glob: &str) -> Result<Self, WatchError> {
        let root = watch_root(source_glob);
        if !root.exists() {
            return Err(WatchError::Setup(root));
        }

        let file_pattern = Path::new(source_glob)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("*");
        let matcher = glob::Pattern::new(file_pattern)
            .map_err(|e| WatchError::Pattern(source_glob.to_string(), e))?;

        let (notify_tx, notify_rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;
        watcher.watch(&root, recursion_mode(source_glob))?;

        Ok(Self {
            notify_rx,
            watcher,
            root,
            matcher,
            debouncer: Debouncer::new(),
        })
    }

    /// The directory under watch.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run the event loop until shutdown is requested.
    ///
    /// Rebuilds run on this thread, one at a time. Events that fire during
    /// a rebuild buffer in the channel and the debouncer collapses them
    /// into at most one pending rebuild.
    pub fn run<F: FnMut()>(mut self, mut on_change: F) {
        loop {
            if core::is_shutdown() {
                break;
            }

            let timeout = self
                .debouncer
                .sleep_duration()
                .min(Duration::from_millis(SHUTDOWN_POLL_MS));

            match self.notify_rx.recv_timeout(timeout) {
                Ok(Ok(event)) => self.debouncer.add_event(&event, &self.matcher),
                Ok(Err(e)) => log!("watch"; "notify error: {}", e),
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(count) = self.debouncer.take_if_ready() {
                        debug!("watch"; "{} coalesced change(s), rebuilding", count);
                        on_change();
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

/// Recursive when the glob has wildcard directory components below the
/// root (`styles/**/*.scss`); a flat glob watches a single directory.
fn recursion_mode(pattern: &str) -> RecursiveMode {
    let wildcard_components = Path::new(pattern)
        .components()
        .filter(|c| c.as_os_str().to_string_lossy().contains(['*', '?', '[']))
        .count();

    if wildcard_components > 1 {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    }
}

/// Directory to watch: everything before the first wildcard component.
fn watch_root(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();
    for component in Path::new(pattern).components() {
        let part = component.as_os_str().to_string_lossy();
        if part.contains(['*', '?', '[']) {
            break;
        }
        root.push(component);
    }

    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}
