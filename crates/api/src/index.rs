use crate::ApiResult;
use crate::models::{IndexStats, ModuleReference, Symbol};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Read access to the symbol table and the instantiation edges.
#[async_trait]
pub trait IndexService: Send + Sync {
    /// Symbols of one file. Falls back to an on-demand parse, which is not
    /// stored, when the file is not indexed.
    async fn file_symbols(&self, path: &Path, content: Option<String>) -> ApiResult<Vec<Symbol>>;

    /// Every indexed file with its symbols.
    async fn workspace_symbols(&self) -> ApiResult<HashMap<PathBuf, Vec<Symbol>>>;

    /// Places where the module/entity `name` is instantiated.
    async fn module_references(&self, name: &str) -> ApiResult<Vec<ModuleReference>>;

    async fn get_stats(&self) -> ApiResult<IndexStats>;
}
