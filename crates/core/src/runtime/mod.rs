//! Core indexing engine.

use crate::config::IndexConfig;
use crate::ctags::{CtagsRunner, TagProvider, locate_ctags};
use crate::store::IndexStore;
use hdlscope_api::IndexState;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

mod indexing;
mod lifecycle;
mod progress;
mod watch;

pub use indexing::extract_file;
pub use watch::WatchHandle;

use progress::IndexProgress;

/// HDL indexing engine
///
/// Owns the [`IndexStore`] and every operation that writes to it:
/// - full rebuilds and single-file updates go through here
/// - readers take the read lock for the duration of one query
/// - per-file data is swapped under a single write-lock acquisition
pub struct HdlscopeEngine {
    /// Symbol table and instantiation edges
    store: Arc<RwLock<IndexStore>>,

    /// Project root path
    project_root: PathBuf,

    config: IndexConfig,

    /// `None` when no ctags binary was found; indexing is then disabled.
    tags: Option<Arc<dyn TagProvider>>,

    progress: IndexProgress,

    /// Cancellation token for background tasks (like watcher)
    cancel_token: tokio_util::sync::CancellationToken,
}

pub struct HdlscopeEngineBuilder {
    project_root: PathBuf,
    config: Option<IndexConfig>,
    tags: Option<Arc<dyn TagProvider>>,
    locate_tool: bool,
}

impl HdlscopeEngineBuilder {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config: None,
            tags: None,
            locate_tool: true,
        }
    }

    /// Use this configuration instead of reading `.hdlscope.json`.
    pub fn with_config(mut self, config: IndexConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use this tag source instead of locating a ctags binary.
    pub fn with_tag_provider(mut self, provider: Arc<dyn TagProvider>) -> Self {
        self.tags = Some(provider);
        self
    }

    /// Never look for a ctags binary; without an explicit provider the
    /// engine is built with indexing disabled.
    pub fn without_tool_lookup(mut self) -> Self {
        self.locate_tool = false;
        self
    }

    pub fn build(self) -> HdlscopeEngine {
        let canonical_root = self
            .project_root
            .canonicalize()
            .unwrap_or_else(|_| self.project_root.clone());

        let config = match self.config {
            Some(config) => config,
            None => IndexConfig::load(&canonical_root).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid project configuration: {}", e);
                IndexConfig::default()
            }),
        };

        let locate_tool = self.locate_tool;
        let tags = self.tags.or_else(|| {
            if !locate_tool {
                return None;
            }
            locate_ctags(&config).map(|binary| {
                tracing::info!("Using ctags at {}", binary.display());
                Arc::new(CtagsRunner::new(binary)) as Arc<dyn TagProvider>
            })
        });
        if tags.is_none() {
            tracing::error!(
                "ctags binary not found; indexing is disabled for {}",
                canonical_root.display()
            );
        }

        HdlscopeEngine {
            store: Arc::new(RwLock::new(IndexStore::new())),
            project_root: canonical_root,
            config,
            tags,
            progress: IndexProgress::new(),
            cancel_token: tokio_util::sync::CancellationToken::new(),
        }
    }
}

impl Drop for HdlscopeEngine {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

impl HdlscopeEngine {
    /// Create a builder for the engine
    pub fn builder(project_root: PathBuf) -> HdlscopeEngineBuilder {
        HdlscopeEngineBuilder::new(project_root)
    }

    /// Get the project root path
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Whether a tag source is available.
    pub fn is_enabled(&self) -> bool {
        self.tags.is_some()
    }

    pub fn index_state(&self) -> IndexState {
        self.progress.state()
    }

    /// Read access to the store. Hold it only for the duration of a query.
    pub async fn store(&self) -> RwLockReadGuard<'_, IndexStore> {
        self.store.read().await
    }

    /// Resolves once no rebuild or file update is running.
    pub async fn wait_for_index(&self) {
        self.progress.wait_idle().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_engine_without_tool_is_disabled_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("top.v"), "module top;\nendmodule\n").unwrap();
        let engine = HdlscopeEngine::builder(dir.path().to_path_buf())
            .with_config(IndexConfig::default())
            .without_tool_lookup()
            .build();

        assert!(!engine.is_enabled());
        assert_eq!(engine.index_state(), IndexState::Empty);

        engine.rebuild().await.unwrap();
        engine.reindex_file(Path::new("top.v")).await.unwrap();
        engine.wait_for_index().await;

        assert_eq!(engine.index_state(), IndexState::Empty);
        assert_eq!(engine.store().await.file_count(), 0);
        assert!(engine.file_symbols(Path::new("top.v"), None).await.is_empty());
    }
}
