//! Settings loading.

use std::path::Path;

use anyhow::{Context, Result};
use orderdoc_export::DocumentSettings;
use tracing::debug;

/// Load document settings. Without a path the defaults are used.
///
/// `.json` files are read as JSON, anything else as YAML.
pub fn load_settings(path: Option<&Path>) -> Result<DocumentSettings> {
    let Some(path) = path else {
        debug!("No settings file, using defaults");
        return Ok(DocumentSettings::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    let settings = if is_json(path) {
        DocumentSettings::from_json_str(&text)
    } else {
        DocumentSettings::from_yaml_str(&text)
    }
    .with_context(|| format!("Invalid settings file: {}", path.display()))?;

    debug!(path = %path.display(), columns = settings.export.columns.len(), "Loaded settings");
    Ok(settings)
}

pub fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_without_path() {
        assert_eq!(load_settings(None).unwrap(), DocumentSettings::default());
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "export:\n  total_label: Sum").unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.export.total_label, "Sum");
    }

    #[test]
    fn test_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"print": {{"strict": true}}}}"#).unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert!(settings.print.strict);
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings(Some(Path::new("/nonexistent/settings.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}
