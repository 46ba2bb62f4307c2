use super::EngineHandle;
use crate::features::navigation;
use crate::util::word_at;
use async_trait::async_trait;
use hdlscope_api::{
    ApiResult, CodeLens, CompletionItem, DefinitionTarget, HoverInfo, Instantiation, Language,
    NavigationService, PositionContext,
};
use std::path::Path;

const TEMPLATE_INDENT: &str = "    ";

impl EngineHandle {
    /// Unsaved content when given, else the file on disk.
    async fn document_text(&self, ctx: &PositionContext) -> Option<String> {
        if let Some(content) = &ctx.content {
            return Some(content.clone());
        }
        let path = self.engine.resolve_path(&ctx.path);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[async_trait]
impl NavigationService for EngineHandle {
    async fn find_definition(&self, ctx: &PositionContext) -> ApiResult<Option<DefinitionTarget>> {
        let Some(text) = self.document_text(ctx).await else {
            return Ok(None);
        };
        let Some(word) = word_at(&text, ctx.line, ctx.col) else {
            return Ok(None);
        };
        self.engine.wait_for_index().await;
        let store = self.engine.store().await;
        Ok(navigation::find_definition(&store, &word))
    }

    async fn hover(&self, ctx: &PositionContext) -> ApiResult<Option<HoverInfo>> {
        self.engine.wait_for_index().await;
        let Some(text) = self.document_text(ctx).await else {
            return Ok(None);
        };
        let Some(word) = word_at(&text, ctx.line, ctx.col) else {
            return Ok(None);
        };
        let symbols = self.engine.file_symbols(&ctx.path, Some(text.clone())).await;
        let store = self.engine.store().await;
        Ok(navigation::hover(&symbols, &store, &word, ctx.line, Some(&text)))
    }

    async fn code_lenses(&self, path: &Path) -> ApiResult<Vec<CodeLens>> {
        let symbols = self.engine.file_symbols(path, None).await;
        let store = self.engine.store().await;
        Ok(navigation::code_lenses(&symbols, &store))
    }

    async fn completions(
        &self,
        ctx: &PositionContext,
        trigger: Option<char>,
    ) -> ApiResult<Vec<CompletionItem>> {
        let language = Language::from_path(&ctx.path).unwrap_or(Language::Verilog);
        let text = self.document_text(ctx).await.unwrap_or_default();
        let prefix = navigation::completion_prefix(&text, ctx.line, ctx.col);
        let symbols = if language == Language::Vhdl {
            Vec::new()
        } else {
            self.engine.file_symbols(&ctx.path, ctx.content.clone()).await
        };
        Ok(navigation::completions(language, &prefix, trigger, &symbols))
    }

    async fn instantiation_template(
        &self,
        path: &Path,
        module: Option<&str>,
    ) -> ApiResult<Instantiation> {
        let symbols = self.engine.file_symbols(path, None).await;
        navigation::instantiation_template(&symbols, module, TEMPLATE_INDENT)
    }
}
