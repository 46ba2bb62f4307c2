use super::EngineHandle;
use async_trait::async_trait;
use hdlscope_api::{ApiResult, IndexService, IndexStats, ModuleReference, Symbol};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[async_trait]
impl IndexService for EngineHandle {
    async fn file_symbols(&self, path: &Path, content: Option<String>) -> ApiResult<Vec<Symbol>> {
        Ok(self.engine.file_symbols(path, content).await)
    }

    async fn workspace_symbols(&self) -> ApiResult<HashMap<PathBuf, Vec<Symbol>>> {
        let store = self.engine.store().await;
        Ok(store
            .files()
            .map(|(path, entry)| (path.clone(), entry.symbols.clone()))
            .collect())
    }

    async fn module_references(&self, name: &str) -> ApiResult<Vec<ModuleReference>> {
        Ok(self.engine.store().await.references_for(name).to_vec())
    }

    async fn get_stats(&self) -> ApiResult<IndexStats> {
        Ok(self.engine.store().await.stats())
    }
}
