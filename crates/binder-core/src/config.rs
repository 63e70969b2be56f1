use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory exported task files are written to.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/binder/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("binder/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("binder\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Missing or malformed files fall back to the defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn effective_export_dir(&self) -> &Path {
        self.export_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_export_dir_is_current_dir() {
        let config = AppConfig::default();
        assert_eq!(config.effective_export_dir(), Path::new("."));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "export_dir = \"/tmp/exports\"\n").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.effective_export_dir(), Path::new("/tmp/exports"));
    }

    #[test]
    fn test_malformed_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "export_dir = [").unwrap();

        let config = AppConfig::load_from(&path);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert!(config.export_dir.is_none());
    }
}
