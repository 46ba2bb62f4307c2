use crate::ApiResult;
use crate::models::ModuleNode;
use async_trait::async_trait;

#[async_trait]
pub trait HierarchyService: Send + Sync {
    /// Root modules (never instantiated) with their instantiation subtrees,
    /// sorted by label. Waits for in-flight indexing first.
    async fn dependency_forest(&self) -> ApiResult<Vec<ModuleNode>>;
}
