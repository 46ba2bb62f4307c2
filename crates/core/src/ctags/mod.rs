//! Adapter for the external tag extraction tool.
//!
//! The tool is invoked once per file and its tab-separated output is fed
//! through [`parse_tag_line`]. Everything behind [`TagProvider`] can be
//! swapped out, which is how tests run without a ctags binary.

use crate::config::{CTAGS_ENV_VAR, IndexConfig};
use crate::error::Result;
use crate::parser::parse_tag_line;
use async_trait::async_trait;
use hdlscope_api::Symbol;
use std::path::{Path, PathBuf};
use tokio::process::Command;

#[cfg(windows)]
const CTAGS_BINARY: &str = "ctags.exe";
#[cfg(not(windows))]
const CTAGS_BINARY: &str = "ctags";

const CTAGS_ARGS: [&str; 5] = ["-f", "-", "--fields=+K", "--sort=no", "--excmd=n"];

/// Source of raw tag records for a file.
#[async_trait]
pub trait TagProvider: Send + Sync {
    /// Raw tool output for `path`, or `None` when the tool produced nothing.
    async fn tags_for(&self, path: &Path) -> Result<Option<String>>;
}

/// Runs a ctags binary as a subprocess.
#[derive(Debug, Clone)]
pub struct CtagsRunner {
    binary: PathBuf,
}

impl CtagsRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl TagProvider for CtagsRunner {
    async fn tags_for(&self, path: &Path) -> Result<Option<String>> {
        let output = match Command::new(&self.binary)
            .args(CTAGS_ARGS)
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(
                    "Failed to run {} on {}: {}",
                    self.binary.display(),
                    path.display(),
                    e
                );
                return Ok(None);
            }
        };

        if !output.stderr.is_empty() {
            tracing::warn!(
                "ctags stderr for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        if !output.status.success() {
            tracing::warn!(
                "ctags exited with {} for {}",
                output.status,
                path.display()
            );
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(stdout))
    }
}

/// Resolves the ctags binary: configured path, then the environment
/// override, then a `PATH` lookup.
pub fn locate_ctags(config: &IndexConfig) -> Option<PathBuf> {
    if let Some(path) = &config.ctags_path {
        if path.is_file() {
            return Some(path.clone());
        }
        tracing::warn!("Configured ctags path {} does not exist", path.display());
    }

    if let Some(path) = std::env::var_os(CTAGS_ENV_VAR).map(PathBuf::from) {
        if path.is_file() {
            return Some(path);
        }
        tracing::warn!(
            "{} points to {}, which does not exist",
            CTAGS_ENV_VAR,
            path.display()
        );
    }

    let search = std::env::var_os("PATH")?;
    std::env::split_paths(&search)
        .map(|dir| dir.join(CTAGS_BINARY))
        .find(|candidate| candidate.is_file())
}

/// Parses a whole tool output, skipping malformed records.
pub fn parse_tag_output(text: &str, path: &Path) -> Vec<Symbol> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_tag_line(line, path) {
            Ok(symbol) => Some(symbol),
            Err(e) => {
                tracing::warn!("Skipping tag line in {}: {} ({:?})", path.display(), e, line);
                None
            }
        })
        .collect()
}
