//! SCSS compilation stage.

use super::BuildError;
use rsass::output::{Format, Style};
use std::path::Path;

/// Compile one SCSS file to expanded CSS.
///
/// Output stays expanded here; compression is the minify stage's job, so a
/// broken intermediate is attributable to the right stage.
pub fn compile_scss(path: &Path) -> Result<String, BuildError> {
    let format = Format {
        style: Style::Expanded,
        ..Format::default()
    };

    let css = rsass::compile_scss_path(path, format).map_err(|e| BuildError::Compile {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    String::from_utf8(css).map_err(|e| BuildError::Compile {
        file: path.to_path_buf(),
        message: format!("compiler produced non-UTF-8 output: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compile_simple() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("main.scss");
        fs::write(&file, "$accent: #663399;\nh1 { color: $accent; }\n").unwrap();

        let css = compile_scss(&file).unwrap();
        assert!(css.contains("h1"));
        assert!(css.contains("#663399"));
    }

    #[test]
    fn test_compile_nested_rules() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nav.scss");
        fs::write(&file, "nav { ul { margin: 0; } }\n").unwrap();

        let css = compile_scss(&file).unwrap();
        assert!(css.contains("nav ul"));
    }

    #[test]
    fn test_compile_syntax_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.scss");
        fs::write(&file, "body { color: ").unwrap();

        let err = compile_scss(&file).unwrap_err();
        match err {
            BuildError::Compile { file: f, .. } => assert_eq!(f, file),
            other => panic!("expected Compile error, got {other:?}"),
        }
    }
}
