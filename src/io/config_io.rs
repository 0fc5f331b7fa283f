use std::fs;
use std::path::Path;

use crate::io::payload_io::PayloadError;
use crate::model::config::KioskConfig;

/// Read a kiosk.toml config, or fall back to the built-in defaults when no
/// path was given.
pub fn load_config(path: Option<&Path>) -> Result<KioskConfig, PayloadError> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| PayloadError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(toml::from_str(&text)?)
        }
        None => Ok(KioskConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.directory.description_word_limit, 20);
    }

    #[test]
    fn test_load_config_from_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kiosk.toml");
        fs::write(
            &path,
            r#"
[directory]
new_window_days = 7
"#,
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.directory.new_window_days, 7);
        assert_eq!(config.assets.image_prefix, "images/content/");
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kiosk.toml");
        fs::write(&path, "directory = nonsense").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, PayloadError::ConfigParseError(_)));
    }
}
