#![allow(dead_code)]

use async_trait::async_trait;
use hdlscope_core::ctags::TagProvider;
use hdlscope_core::{EngineHandle, HdlscopeEngine, IndexConfig, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Stands in for ctags: emits a tag record for every `module`, `entity`
/// and port declaration it finds in the file.
#[derive(Default)]
pub struct ScriptedTags {
    calls: AtomicUsize,
    /// File name -> time to wait before answering.
    delays: HashMap<String, Duration>,
}

impl ScriptedTags {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn with_delay(mut self, file_name: &str, delay: Duration) -> Self {
        self.delays.insert(file_name.to_string(), delay);
        self
    }
}

fn ident(text: &str) -> Option<&str> {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    (end > 0).then(|| &text[..end])
}

pub fn scripted_tag_output(text: &str) -> String {
    let mut out = String::new();
    let mut current: Option<String> = None;
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        let lineno = idx + 1;
        if let Some(name) = trimmed.strip_prefix("module ").and_then(ident) {
            out.push_str(&format!("{name}\t{trimmed}\t{lineno};\"\tmodule\n"));
            current = Some(name.to_string());
        } else if let Some(name) = trimmed.strip_prefix("entity ").and_then(ident) {
            out.push_str(&format!("{name}\t{trimmed}\t{lineno};\"\tentity\n"));
        } else if let Some(rest) = trimmed
            .strip_prefix("input ")
            .or_else(|| trimmed.strip_prefix("output "))
        {
            let name = rest.trim_start_matches("wire ").trim_end_matches([',', ';']);
            if let (Some(name), Some(module)) = (ident(name), &current) {
                out.push_str(&format!(
                    "{name}\t{trimmed}\t{lineno};\"\tport\tmodule:{module}\n"
                ));
            }
        }
    }
    out
}

#[async_trait]
impl TagProvider for ScriptedTags {
    async fn tags_for(&self, path: &Path) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }
        let text = tokio::fs::read_to_string(path).await?;
        let out = scripted_tag_output(&text);
        Ok((!out.is_empty()).then_some(out))
    }
}

pub struct TestProject {
    pub dir: tempfile::TempDir,
    pub tags: Arc<ScriptedTags>,
    pub handle: EngineHandle,
}

impl TestProject {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self::with_tags(files, ScriptedTags::default())
    }

    pub fn with_tags(files: &[(&str, &str)], tags: ScriptedTags) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for (name, text) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, text).unwrap();
        }
        let tags = Arc::new(tags);
        let engine = HdlscopeEngine::builder(dir.path().to_path_buf())
            .with_config(IndexConfig::default())
            .with_tag_provider(tags.clone())
            .build();
        Self {
            dir,
            tags,
            handle: EngineHandle::from_engine(Arc::new(engine)),
        }
    }

    /// Absolute path under the canonical project root.
    pub fn path(&self, name: &str) -> PathBuf {
        self.handle.engine().root_path().join(name)
    }

    pub fn write(&self, name: &str, text: &str) {
        std::fs::write(self.path(name), text).unwrap();
    }
}
