//! Settings handling for blade.
//! Settings come from an optional `blade.json`, `blade.yml` or `blade.yaml`
//! file; command-line flags override whatever the file provides.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::template::BuildFlavor;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Template archive location
    pub templates: Option<PathBuf>,
    /// Build flavor used when a request names none
    pub build: BuildFlavor,
    /// Whether generation replaces existing files unconditionally
    pub overwrite: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { templates: None, build: BuildFlavor::default(), overwrite: true }
    }
}

impl Settings {
    /// Loads settings from `explicit`, or from the first settings file found in
    /// the current directory.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `explicit` does not exist or a file fails to parse
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let content = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::ConfigError(format!(
                        "Invalid configuration path: {}",
                        path.display()
                    )));
                }
                Some(read_config(path)?)
            }
            None => {
                let cwd = std::env::current_dir().map_err(Error::IoError)?;
                load_config(cwd, &CONFIG_FILES)?
            }
        };

        match content {
            Some(content) => parse_settings(&content),
            None => {
                debug!("No settings file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<String> {
    debug!("Loading configuration from {}", path.display());
    std::fs::read_to_string(path).map_err(|e| Error::at_path("read", path, e))
}

/// Reads the first of `config_files` that exists in `dir`.
pub fn load_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<Option<String>> {
    for file in config_files {
        let config_path = dir.as_ref().join(file);
        if config_path.is_file() {
            return read_config(&config_path).map(Some);
        }
    }
    Ok(None)
}

/// Parses settings as JSON, falling back to YAML.
pub fn parse_settings(content: &str) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_settings() {
        let settings =
            parse_settings(r#"{"templates": "/opt/blade/templates.tar.gz", "build": "maven"}"#)
                .unwrap();
        assert_eq!(settings.templates, Some(PathBuf::from("/opt/blade/templates.tar.gz")));
        assert_eq!(settings.build, BuildFlavor::Maven);
        assert!(settings.overwrite);
    }

    #[test]
    fn test_parse_yaml_settings() {
        let settings = parse_settings("overwrite: false\n").unwrap();
        assert_eq!(settings.templates, None);
        assert_eq!(settings.build, BuildFlavor::Gradle);
        assert!(!settings.overwrite);
    }

    #[test]
    fn test_empty_settings() {
        assert_eq!(parse_settings("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_settings() {
        let err = parse_settings("build: ant\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Invalid configuration format"));
    }

    #[test]
    fn test_load_config_picks_first_existing() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(load_config(dir.path(), &CONFIG_FILES).unwrap(), None);

        std::fs::write(dir.path().join("blade.yaml"), "build: maven").unwrap();
        std::fs::write(dir.path().join("blade.yml"), "build: gradle").unwrap();
        let content = load_config(dir.path(), &CONFIG_FILES).unwrap();
        assert_eq!(content.as_deref(), Some("build: gradle"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Settings::load(Some(Path::new("/nonexistent/blade.json")));
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
