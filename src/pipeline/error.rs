//! Build pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a single build invocation.
///
/// The pipeline is fail-fast: the first error aborts the remaining files.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Malformed source stylesheet
    #[error("failed to compile `{file}`:\n{message}")]
    Compile { file: PathBuf, message: String },

    /// Malformed intermediate CSS. The compiler already accepted the source,
    /// so this is an internal-consistency fault rather than a user error.
    #[error("failed to minify output of `{file}`:\n{message}")]
    Minify { file: PathBuf, message: String },

    #[error("invalid source glob `{0}`")]
    Pattern(String, #[source] glob::PatternError),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}
