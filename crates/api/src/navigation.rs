use crate::error::ApiResult;
use crate::models::{
    CodeLens, CompletionItem, DefinitionTarget, HoverInfo, Instantiation, PositionContext,
};
use async_trait::async_trait;
use std::path::Path;

/// Editor-facing queries answered from the index.
#[async_trait]
pub trait NavigationService: Send + Sync {
    /// Declaration of the identifier under the cursor, searched workspace-wide.
    async fn find_definition(&self, ctx: &PositionContext) -> ApiResult<Option<DefinitionTarget>>;

    /// Hover details for the declaration under the cursor.
    async fn hover(&self, ctx: &PositionContext) -> ApiResult<Option<HoverInfo>>;

    /// One lens per instantiated module declared in `path`.
    async fn code_lenses(&self, path: &Path) -> ApiResult<Vec<CodeLens>>;

    /// Keywords, directives, system tasks and file symbols for the cursor.
    async fn completions(
        &self,
        ctx: &PositionContext,
        trigger: Option<char>,
    ) -> ApiResult<Vec<CompletionItem>>;

    /// Instance template for a module declared in `path`. With several
    /// modules in the file, `module` selects one.
    async fn instantiation_template(
        &self,
        path: &Path,
        module: Option<&str>,
    ) -> ApiResult<Instantiation>;
}
