use super::EngineHandle;
use crate::runtime::WatchHandle;
use async_trait::async_trait;
use hdlscope_api::lifecycle::{EngineLifecycle, EngineWatchHandle};
use hdlscope_api::{ApiError, ApiResult, IndexState};
use std::path::Path;
use std::sync::Arc;

impl EngineWatchHandle for WatchHandle {
    fn stop(&self) {
        WatchHandle::stop(self);
    }
}

#[async_trait]
impl EngineLifecycle for EngineHandle {
    async fn rebuild(&self) -> ApiResult<()> {
        self.engine.rebuild().await.map_err(ApiError::from)
    }

    async fn reindex_file(&self, path: &Path) -> ApiResult<()> {
        self.engine.reindex_file(path).await.map_err(ApiError::from)
    }

    async fn wait_for_index(&self) {
        self.engine.wait_for_index().await;
    }

    fn index_state(&self) -> IndexState {
        self.engine.index_state()
    }

    async fn start_watch(&self) -> ApiResult<Arc<dyn EngineWatchHandle>> {
        if !self.engine.is_enabled() {
            return Err(ApiError::IndexingDisabled(
                "ctags binary not found".to_string(),
            ));
        }
        let handle = self.engine.clone().start_watch()?;
        Ok(Arc::new(handle))
    }
}
