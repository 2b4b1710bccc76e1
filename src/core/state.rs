//! Process state tracking.
//!
//! Two flags: `WATCHING`, set when the watch loop takes over the process,
//! and `SHUTDOWN`, set by the Ctrl+C handler and polled by that loop so it
//! can unwind instead of dying mid-write.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// A watch loop is running and polls the shutdown flag
static WATCHING: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start
///
/// The handler behavior depends on whether a watch loop has been registered:
/// - Before `set_watching()`: exit immediately, nothing polls the flag
/// - After `set_watching()`: set SHUTDOWN, the watch loop unwinds normally
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if !WATCHING.load(Ordering::SeqCst) {
            // One-shot build in progress, no loop to unwind
            std::process::exit(130);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the watch loop: from here on Ctrl+C requests a graceful stop
/// instead of exiting the process directly
pub fn set_watching() {
    WATCHING.store(true, Ordering::SeqCst);
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering for performance - worst case is processing
/// a few more items before stopping, which is acceptable
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag() {
        SHUTDOWN.store(false, Ordering::SeqCst);
        assert!(!is_shutdown());

        SHUTDOWN.store(true, Ordering::SeqCst);
        assert!(is_shutdown());

        SHUTDOWN.store(false, Ordering::SeqCst);
    }

    #[test]
    fn test_set_watching() {
        set_watching();
        assert!(WATCHING.load(Ordering::SeqCst));
    }
}
