use crate::error::Result;
use hdlscope_api::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-project settings file, looked up at the project root.
pub const CONFIG_FILE_NAME: &str = ".hdlscope.json";

/// Overrides the tag tool location.
pub const CTAGS_ENV_VAR: &str = "HDLSCOPE_CTAGS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexConfig {
    /// Explicit path to the ctags binary.
    pub ctags_path: Option<PathBuf>,
    /// File extensions (without dot) that are indexed.
    pub extensions: Vec<String>,
    /// Directory names never descended into.
    pub excluded_dirs: Vec<String>,
    pub watch_debounce_ms: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            ctags_path: None,
            extensions: Language::EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_dirs: vec![
                "node_modules".to_string(),
                "bower_components".to_string(),
            ],
            watch_debounce_ms: 500,
        }
    }
}

impl IndexConfig {
    /// Reads `<root>/.hdlscope.json` when present, then applies the
    /// environment override for the tool path.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        let mut config = if path.is_file() {
            let text = std::fs::read_to_string(&path)?;
            let config: IndexConfig = serde_json::from_str(&text)?;
            tracing::info!("Loaded configuration from {}", path.display());
            config
        } else {
            IndexConfig::default()
        };

        if let Ok(env_path) = std::env::var(CTAGS_ENV_VAR) {
            if !env_path.is_empty() {
                config.ctags_path = Some(PathBuf::from(env_path));
            }
        }

        Ok(config)
    }

    pub fn with_ctags_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ctags_path = Some(path.into());
        self
    }

    pub fn is_indexable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let config = IndexConfig::default();
        assert!(config.is_indexable(Path::new("rtl/top.sv")));
        assert!(config.is_indexable(Path::new("rtl/ALU.VHD")));
        assert!(!config.is_indexable(Path::new("README.md")));
        assert!(!config.is_indexable(Path::new("Makefile")));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: IndexConfig =
            serde_json::from_str(r#"{ "ctagsPath": "/opt/ctags/bin/ctags" }"#).unwrap();
        assert_eq!(config.ctags_path, Some(PathBuf::from("/opt/ctags/bin/ctags")));
        assert_eq!(config.extensions.len(), 6);
        assert_eq!(config.watch_debounce_ms, 500);
    }

    #[test]
    fn test_load_reads_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "extensions": ["v"], "excludedDirs": ["sim"] }"#,
        )
        .unwrap();
        let config = IndexConfig::load(dir.path()).unwrap();
        assert_eq!(config.extensions, vec!["v".to_string()]);
        assert!(config.is_excluded_dir("sim"));
        assert!(!config.is_indexable(Path::new("a.sv")));
    }
}
