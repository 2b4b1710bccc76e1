//! Core process state shared across the codebase.

mod state;

pub use state::{is_shutdown, set_watching, setup_shutdown_handler};
