use super::*;
use crate::error::Result;
use crate::parser::resolve_container_ranges;
use crate::project::Scanner;
use hdlscope_api::Symbol;
use super::indexing::tool_symbols;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Upper bound on concurrently running tool processes.
const MAX_CONCURRENT_EXTRACTIONS: usize = 64;

impl HdlscopeEngine {
    /// Rebuild the index from scratch
    pub async fn rebuild(&self) -> Result<()> {
        let Some(tags) = self.tags.clone() else {
            tracing::warn!("Indexing is disabled; rebuild skipped");
            return Ok(());
        };
        let _guard = self.progress.begin();
        tracing::info!("Starting workspace indexing of {}", self.project_root.display());

        self.store.write().await.clear();

        let root = self.project_root.clone();
        let config = self.config.clone();
        let paths =
            tokio::task::spawn_blocking(move || Scanner::collect_paths(&root, &config)).await?;
        tracing::info!("Found {} files to index", paths.len());

        let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_EXTRACTIONS));
        let mut set = JoinSet::new();
        for path in paths {
            let tags = tags.clone();
            let permits = permits.clone();
            set.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                extract_file(tags.as_ref(), &path).await
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(unit) => self.store.write().await.replace_file(unit),
                Err(e) => tracing::error!("Indexing task failed: {}", e),
            }
        }
        // Discovery returns sorted paths; undo the completion order.
        self.store.write().await.sort_by_path();

        let stats = self.store.read().await.stats();
        tracing::info!(
            "Workspace indexing complete: {} files, {} symbols, {} module references",
            stats.file_count,
            stats.symbol_count,
            stats.reference_count
        );
        Ok(())
    }

    /// Replace the data of one file. A file that no longer exists is dropped.
    pub async fn reindex_file(&self, path: &Path) -> Result<()> {
        let Some(tags) = self.tags.clone() else {
            return Ok(());
        };
        let _guard = self.progress.begin();
        let path = self.resolve_path(path);

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!("Removing deleted file {} from the index", path.display());
            self.store.write().await.remove_file(&path);
            return Ok(());
        }

        tracing::info!("Re-indexing {}", path.display());
        let unit = extract_file(tags.as_ref(), &path).await;
        self.store.write().await.replace_file(unit);
        Ok(())
    }

    /// Symbols of a file, parsed on demand when it is not indexed.
    ///
    /// The on-demand result is never written to the store. `content`
    /// overrides the file text used for range resolution.
    pub async fn file_symbols(&self, path: &Path, content: Option<String>) -> Vec<Symbol> {
        let path = self.resolve_path(path);
        {
            let store = self.store.read().await;
            if let Some(symbols) = store.symbols_for(&path) {
                return symbols.to_vec();
            }
        }

        let Some(tags) = &self.tags else {
            return Vec::new();
        };
        tracing::info!("Cache miss, parsing {} on demand", path.display());
        let mut symbols = tool_symbols(tags.as_ref(), &path).await;

        let text = match content {
            Some(text) => Some(text),
            None => tokio::fs::read_to_string(&path).await.ok(),
        };
        if let Some(text) = text {
            resolve_container_ranges(&text, &mut symbols);
        }
        symbols
    }

    /// Relative paths are taken relative to the project root.
    pub(crate) fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}
