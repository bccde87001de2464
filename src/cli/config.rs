use crate::error::{CompilerError, Result};
use crate::CompilerOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed in the project root, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["brik.config.toml", "brik.config.json"];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrikConfig {
    pub out_dir: Option<String>,
    pub entries: Option<Vec<String>>,
    pub as_widget: Option<bool>,
    pub exclude_dirs: Option<Vec<String>>,
    pub ios_dir: Option<String>,
    pub android_dir: Option<String>,
    pub kotlin_package: Option<String>,
}

impl BrikConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| CompilerError::FileNotFound {
            path: format!("Config file {}: {}", config_path.display(), e),
        })?;

        let config = match config_path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&config_content).map_err(|e| CompilerError::InvalidFormat {
                message: format!("Invalid JSON config: {}", e),
            })?,
            Some("toml") => toml::from_str(&config_content).map_err(|e| CompilerError::InvalidFormat {
                message: format!("Invalid TOML config: {}", e),
            })?,
            _ => {
                return Err(CompilerError::InvalidFormat {
                    message: "Config file must be .json or .toml format".to_string(),
                })
            }
        };

        log::info!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Load the first config file found in `project_root`, if any
    pub fn discover(project_root: &Path) -> Result<Option<Self>> {
        for name in CONFIG_FILE_NAMES {
            let candidate = project_root.join(name);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
        }
        log::debug!("No config file in {}", project_root.display());
        Ok(None)
    }

    /// Copy every set value onto `options`
    pub fn apply_to(&self, options: &mut CompilerOptions) {
        if let Some(out_dir) = &self.out_dir {
            options.out_dir = PathBuf::from(out_dir);
        }
        if let Some(entries) = &self.entries {
            options.entries = Some(entries.iter().map(PathBuf::from).collect());
        }
        if let Some(as_widget) = self.as_widget {
            options.as_widget = as_widget;
        }
        if let Some(exclude_dirs) = &self.exclude_dirs {
            options.exclude_dirs.extend(exclude_dirs.iter().cloned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("brik.config.toml");
        fs::write(
            &path,
            "out_dir = \"build/ir\"\nas_widget = true\nkotlin_package = \"com.example.widgets\"\n",
        )
        .unwrap();

        let config = BrikConfig::load(&path).unwrap();
        assert_eq!(config.out_dir.as_deref(), Some("build/ir"));
        assert_eq!(config.as_widget, Some(true));
        assert_eq!(config.kotlin_package.as_deref(), Some("com.example.widgets"));
        assert!(config.entries.is_none());
    }

    #[test]
    fn test_load_json_and_bad_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("brik.config.json");
        fs::write(&path, r#"{ "entries": ["src/A.tsx"], "ios_dir": "app/ios" }"#).unwrap();
        let config = BrikConfig::load(&path).unwrap();
        assert_eq!(config.entries, Some(vec!["src/A.tsx".to_string()]));
        assert_eq!(config.ios_dir.as_deref(), Some("app/ios"));

        let yaml = temp_dir.path().join("brik.config.yaml");
        fs::write(&yaml, "out_dir: x").unwrap();
        let err = BrikConfig::load(&yaml).unwrap_err();
        assert_eq!(err.code(), "BR101");
    }

    #[test]
    fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("brik.config.toml");
        fs::write(&path, "as_widget = \"yes\"").unwrap();
        assert!(matches!(
            BrikConfig::load(&path),
            Err(CompilerError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_discover() {
        let temp_dir = TempDir::new().unwrap();
        assert!(BrikConfig::discover(temp_dir.path()).unwrap().is_none());

        fs::write(temp_dir.path().join("brik.config.json"), r#"{ "as_widget": true }"#).unwrap();
        let config = BrikConfig::discover(temp_dir.path()).unwrap().unwrap();
        assert_eq!(config.as_widget, Some(true));
    }

    #[test]
    fn test_apply_to() {
        let config = BrikConfig {
            out_dir: Some("out".into()),
            exclude_dirs: Some(vec!["vendor".into()]),
            ..BrikConfig::default()
        };
        let mut options = CompilerOptions::default();
        config.apply_to(&mut options);
        assert_eq!(options.out_dir, PathBuf::from("out"));
        assert_eq!(options.exclude_dirs, vec!["vendor".to_string()]);
        assert!(!options.as_widget);
        assert!(options.entries.is_none());
    }
}
