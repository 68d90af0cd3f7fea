//! Reads activity scripts from YAML.

use std::path::Path;

use tracing::debug;

use crate::domain::errors::ContentError;
use crate::domain::script::ActivityScript;

/// Parses a script from YAML text.
///
/// # Errors
///
/// Returns `ContentError::Parse` if the text is not a valid script.
pub fn parse_script(yaml: &str) -> Result<ActivityScript, ContentError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Reads and parses the script at `path`.
///
/// # Errors
///
/// Returns `ContentError::Io` if the file cannot be read and
/// `ContentError::Parse` if it is not a valid script.
pub fn load_script(path: &Path) -> Result<ActivityScript, ContentError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let script = parse_script(&yaml)?;
    debug!(path = %path.display(), activity_id = %script.id, sequences = ?script.sequence_names(), "script loaded");
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_its_path() {
        let path = Path::new("does/not/exist.yaml");

        let err = load_script(path).unwrap_err();

        match err {
            ContentError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let result = parse_script("id: [unclosed");

        assert!(matches!(result, Err(ContentError::Parse(_))));
    }

    #[test]
    fn test_bundled_demo_script_compiles() {
        // Arrange
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/number-rods.yaml");

        // Act
        let script = load_script(&path).unwrap();

        // Assert
        for name in script.sequence_names() {
            crate::application::compiler::compile(&script, Some(name)).unwrap();
        }
    }
}
