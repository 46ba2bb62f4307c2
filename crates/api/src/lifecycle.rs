use crate::ApiResult;
use crate::models::IndexState;
use async_trait::async_trait;
use std::path::Path;

pub trait EngineWatchHandle: Send + Sync {
    fn stop(&self);
}

#[async_trait]
pub trait EngineLifecycle: Send + Sync {
    /// Clear the store and index every source file under the root.
    async fn rebuild(&self) -> ApiResult<()>;

    /// Replace the indexed data of a single file (e.g. after a save).
    async fn reindex_file(&self, path: &Path) -> ApiResult<()>;

    /// Resolve once no indexing operation is in flight.
    async fn wait_for_index(&self);

    /// Current lifecycle state.
    fn index_state(&self) -> IndexState;

    /// Re-index files as they change on disk.
    async fn start_watch(&self) -> ApiResult<std::sync::Arc<dyn EngineWatchHandle>>;
}
