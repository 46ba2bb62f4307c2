use crate::config::IndexConfig;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub struct Scanner;

impl Scanner {
    /// Every indexable file under `root`, sorted.
    ///
    /// Skips hidden and excluded directories. Ignore files (`.gitignore`,
    /// `.ignore`) are not consulted.
    pub fn collect_paths(root: &Path, config: &IndexConfig) -> Vec<PathBuf> {
        let excluded = config.clone();
        let mut paths: Vec<PathBuf> = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(true)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| excluded.is_excluded_dir(name)))
            })
            .build()
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::debug!("Skipping unreadable entry: {}", e);
                        return None;
                    }
                };
                let path = entry.path();
                if entry.file_type().is_some_and(|t| t.is_file()) && config.is_indexable(path) {
                    return Some(path.to_path_buf());
                }
                None
            })
            .collect();
        paths.sort();
        paths
    }
}
