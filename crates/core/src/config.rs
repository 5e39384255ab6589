//! Configuration file loading
//!
//! The original fix script hardcoded its project path, group, target and
//! filename at the top of the file. Those constants live here instead, as an
//! explicit schema with defaults, overridable from a `.pbxfix.toml` file and
//! again from CLI flags.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration schema, as read from `.pbxfix.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSchema {
    pub project: ProjectSection,
}

/// `[project]` section: which manifest to patch and what to track in it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Path to the .xcodeproj bundle
    pub path: PathBuf,
    /// Group holding the tracked resource, as a /-separated path from the
    /// project's main group
    pub group: String,
    /// Target whose resources build phase must bundle the resource
    pub target: String,
    /// Tracked resource filename (bare name, no directories)
    pub file: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ios/Runner.xcodeproj"),
            group: "Runner".to_string(),
            target: "Runner".to_string(),
            file: "GoogleService-Info.plist".to_string(),
        }
    }
}

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [".pbxfix.toml", "pbxfix.toml"];

    candidates
        .iter()
        .find(|c| Path::new(c).exists())
        .map(|c| c.to_string())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file {}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_original_script_constants() {
        let section = ProjectSection::default();
        assert_eq!(section.path, PathBuf::from("ios/Runner.xcodeproj"));
        assert_eq!(section.group, "Runner");
        assert_eq!(section.target, "Runner");
        assert_eq!(section.file, "GoogleService-Info.plist");
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[project]\npath = \"MyApp.xcodeproj\"\ntarget = \"MyApp\""
        )
        .unwrap();

        let config = Config::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.schema.project.path, PathBuf::from("MyApp.xcodeproj"));
        assert_eq!(config.schema.project.target, "MyApp");
        // unspecified keys keep their defaults
        assert_eq!(config.schema.project.group, "Runner");
        assert_eq!(config.schema.project.file, "GoogleService-Info.plist");
    }

    #[test]
    fn test_load_missing_explicit_file_is_config_error() {
        let err = Config::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[project\npath =").unwrap();

        let err = Config::load(Some(file.path().to_str().unwrap())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
