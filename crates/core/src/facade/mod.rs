use std::path::PathBuf;
use std::sync::Arc;

use crate::runtime::HdlscopeEngine as InternalEngine;

mod hierarchy;
mod index;
mod lifecycle;
mod navigation;

/// Engine handle - unified interface for all clients
///
/// Implements every service trait of `hdlscope-api` on top of the shared
/// engine. Cloning is cheap.
#[derive(Clone)]
pub struct EngineHandle {
    pub(crate) engine: Arc<InternalEngine>,
}

impl EngineHandle {
    /// Create a new engine handle
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            engine: Arc::new(InternalEngine::builder(project_root).build()),
        }
    }

    /// Create a handle from an existing engine (useful for testing)
    pub fn from_engine(engine: Arc<InternalEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<InternalEngine> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlscope_api::{HdlscopeEngine, IndexService, IndexState};
    use tokio::task::JoinSet;

    fn assert_full_api<T: HdlscopeEngine>(_: &T) {}

    #[tokio::test]
    async fn test_clones_share_one_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("top.v"), "module top;\nendmodule\n").unwrap();
        let handle = EngineHandle::new(dir.path().to_path_buf());
        assert_full_api(&handle);

        let mut readers = JoinSet::new();
        for i in 0..8 {
            let h = handle.clone();
            readers.spawn(async move {
                let name = format!("mod_{}", i);
                assert!(h.module_references(&name).await.unwrap().is_empty());
                h.workspace_symbols().await.unwrap().len()
            });
        }
        while let Some(indexed) = readers.join_next().await {
            assert_eq!(indexed.unwrap(), 0);
        }

        assert!(Arc::ptr_eq(handle.engine(), handle.clone().engine()));
        assert_eq!(handle.engine().index_state(), IndexState::Empty);
    }

    #[tokio::test]
    async fn test_watch_is_refused_without_tool() {
        use hdlscope_api::{ApiError, EngineLifecycle};

        let dir = tempfile::tempdir().unwrap();
        let engine = InternalEngine::builder(dir.path().to_path_buf())
            .with_config(crate::IndexConfig::default())
            .without_tool_lookup()
            .build();
        let handle = EngineHandle::from_engine(Arc::new(engine));

        match handle.start_watch().await {
            Err(ApiError::IndexingDisabled(_)) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("watch started without a tag tool"),
        }
    }
}
