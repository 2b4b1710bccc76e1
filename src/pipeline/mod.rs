//! The style build pipeline.
//!
//! `StyleBuildTask` is the one-shot unit of work: enumerate the source
//! glob, compile each SCSS file, minify the compiled CSS, write the result
//! into the output directory. Watch mode re-runs the same task on change.

mod compile;
mod error;
mod minify;

pub use error::BuildError;

use crate::debug;
use compile::compile_scss;
use minify::minify_css;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// One persisted output of a build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Source SCSS file
    pub source: PathBuf,
    /// Minified CSS file under the output directory
    pub output: PathBuf,
}

/// One-shot SCSS build task.
///
/// Holds the resolved source glob and output directory; `run` re-enumerates
/// sources on every invocation so files added between runs are picked up.
pub struct StyleBuildTask {
    source_glob: String,
    dest_dir: PathBuf,
}

impl StyleBuildTask {
    pub fn new(source_glob: String, dest_dir: PathBuf) -> Self {
        Self {
            source_glob,
            dest_dir,
        }
    }

    /// Compile, minify and write every matched stylesheet, in enumeration
    /// order. Fail-fast: the first error aborts the remaining files.
    ///
    /// Outputs no longer matched by the glob are not cleaned up. An empty
    /// match is a successful no-op and does not create the output directory.
    pub fn run(&self) -> Result<Vec<WrittenFile>, BuildError> {
        let sources = enumerate_sources(&self.source_glob)?;
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.dest_dir)
            .map_err(|e| BuildError::Io(self.dest_dir.clone(), e))?;

        let mut written = Vec::with_capacity(sources.len());
        for source in sources {
            debug!("build"; "compiling {}", source.display());

            let css = compile_scss(&source)?;
            let minified = minify_css(&css).map_err(|message| BuildError::Minify {
                file: source.clone(),
                message,
            })?;

            let output = self.dest_dir.join(output_name(&source));
            fs::write(&output, minified).map_err(|e| BuildError::Io(output.clone(), e))?;

            debug!("build"; "wrote {}", output.display());
            written.push(WrittenFile { source, output });
        }

        Ok(written)
    }

    /// The source glob this task enumerates.
    pub fn source_glob(&self) -> &str {
        &self.source_glob
    }
}

/// Enumerate source files matching the glob, in glob order (alphabetical).
///
/// Underscore-prefixed files are SCSS partials, pulled in via `@import` or
/// `@use` by other sheets, and are never compiled standalone.
fn enumerate_sources(pattern: &str) -> Result<Vec<PathBuf>, BuildError> {
    let entries =
        glob::glob(pattern).map_err(|e| BuildError::Pattern(pattern.to_string(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            BuildError::Io(path, e.into_error())
        })?;
        if path.is_file() && !is_partial(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

/// SCSS partial convention: `_name.scss` is import-only.
fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('_'))
}

/// Output filename: same base name, `.css` extension.
fn output_name(source: &Path) -> PathBuf {
    let mut name = PathBuf::from(source.file_name().unwrap_or_default());
    name.set_extension("css");
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> (TempDir, StyleBuildTask) {
        let dir = TempDir::new().unwrap();
        let scss_dir = dir.path().join("src/scss");
        fs::create_dir_all(&scss_dir).unwrap();
        for (name, content) in files {
            fs::write(scss_dir.join(name), content).unwrap();
        }

        let glob = dir
            .path()
            .join("src/scss/*.scss")
            .to_string_lossy()
            .into_owned();
        let dest = dir.path().join("assets/css");
        let task = StyleBuildTask::new(glob, dest);
        (dir, task)
    }

    #[test]
    fn test_build_two_files() {
        let (dir, task) = project(&[
            ("a.scss", "a { color: red; }\n"),
            ("b.scss", "b { margin: 0; }\n"),
        ]);

        let written = task.run().unwrap();
        assert_eq!(written.len(), 2);

        // Output list follows input enumeration order (alphabetical)
        assert_eq!(written[0].output, dir.path().join("assets/css/a.css"));
        assert_eq!(written[1].output, dir.path().join("assets/css/b.css"));

        for file in &written {
            let content = fs::read_to_string(&file.output).unwrap();
            assert!(!content.contains('\n'), "output not minified: {content:?}");
        }
    }

    #[test]
    fn test_build_idempotent() {
        let (dir, task) = project(&[("main.scss", "$c: red;\nbody { color: $c; }\n")]);

        task.run().unwrap();
        let first = fs::read(dir.path().join("assets/css/main.css")).unwrap();

        task.run().unwrap();
        let second = fs::read(dir.path().join("assets/css/main.css")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_empty_match() {
        let dir = TempDir::new().unwrap();
        let glob = dir
            .path()
            .join("src/scss/*.scss")
            .to_string_lossy()
            .into_owned();
        let dest = dir.path().join("assets/css");
        let task = StyleBuildTask::new(glob, dest.clone());

        let written = task.run().unwrap();
        assert!(written.is_empty());
        // No-op builds do not create the output directory
        assert!(!dest.exists());
    }

    #[test]
    fn test_build_compile_error_fails_fast() {
        let (dir, task) = project(&[
            ("a.scss", "a { color: red; }\n"),
            ("broken.scss", "b { color: "),
        ]);

        let err = task.run().unwrap_err();
        match err {
            BuildError::Compile { file, .. } => {
                assert_eq!(file, dir.path().join("src/scss/broken.scss"));
            }
            other => panic!("expected Compile error, got {other:?}"),
        }

        // Files before the failure are written, nothing for the broken one
        assert!(dir.path().join("assets/css/a.css").exists());
        assert!(!dir.path().join("assets/css/broken.css").exists());
    }

    #[test]
    fn test_build_skips_partials() {
        let (dir, task) = project(&[
            ("_mixins.scss", "@mixin pad { padding: 1rem; }\n"),
            ("site.scss", "p { margin: 0; }\n"),
        ]);

        let written = task.run().unwrap();
        assert_eq!(written.len(), 1);
        assert!(dir.path().join("assets/css/site.css").exists());
        assert!(!dir.path().join("assets/css/_mixins.css").exists());
    }

    #[test]
    fn test_stale_output_untouched() {
        let (dir, task) = project(&[("a.scss", "a { color: red; }\n")]);

        // A leftover from a previous run, no longer matched by anything
        let dest = dir.path().join("assets/css");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("old.css"), "old{}").unwrap();

        task.run().unwrap();
        assert_eq!(fs::read_to_string(dest.join("old.css")).unwrap(), "old{}");
    }

    #[test]
    fn test_output_name() {
        assert_eq!(
            output_name(Path::new("src/scss/main.scss")),
            PathBuf::from("main.css")
        );
    }

    #[test]
    fn test_is_partial() {
        assert!(is_partial(Path::new("src/scss/_vars.scss")));
        assert!(!is_partial(Path::new("src/scss/vars.scss")));
    }
}
