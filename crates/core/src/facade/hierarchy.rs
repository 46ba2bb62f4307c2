use super::EngineHandle;
use crate::features::dependency_forest;
use async_trait::async_trait;
use hdlscope_api::{ApiResult, HierarchyService, ModuleNode};

#[async_trait]
impl HierarchyService for EngineHandle {
    async fn dependency_forest(&self) -> ApiResult<Vec<ModuleNode>> {
        Ok(dependency_forest(&self.engine).await)
    }
}
