use crate::ctags::{TagProvider, parse_tag_output};
use crate::parser::{find_instances, resolve_container_ranges};
use crate::store::{FileUnit, ReferenceSink};
use hdlscope_api::{Position, Symbol, SymbolKind};
use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

/// Tool symbols of `path`. Tool failures degrade to an empty list.
pub(crate) async fn tool_symbols(tags: &dyn TagProvider, path: &Path) -> Vec<Symbol> {
    match tags.tags_for(path).await {
        Ok(Some(output)) => parse_tag_output(&output, path),
        Ok(None) => {
            tracing::debug!("No tags for {}", path.display());
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Tag extraction failed for {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Runs every extraction step for one file.
///
/// The lexical scanner still runs when the tool yields nothing; when the
/// file cannot be read the tool symbols are kept with unresolved ranges.
pub async fn extract_file(tags: &dyn TagProvider, path: &Path) -> FileUnit {
    let mut symbols = tool_symbols(tags, path).await;

    let mut sink = ReferenceSink::new(path);
    for symbol in &symbols {
        if symbol.kind == SymbolKind::Instance {
            if let Some(type_ref) = &symbol.type_ref {
                sink.record(type_ref, Position::line_start(symbol.start_line()));
            }
        }
    }

    let content_hash = match tokio::fs::read(path).await {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            resolve_container_ranges(&text, &mut symbols);
            for site in find_instances(&text) {
                sink.record(&site.module_name, site.position);
            }
            Some(xxh3_64(&bytes))
        }
        Err(e) => {
            tracing::error!("Failed to read {} for scanning: {}", path.display(), e);
            None
        }
    };

    tracing::debug!(
        "Extracted {} symbols and {} references from {}",
        symbols.len(),
        sink.len(),
        path.display()
    );

    FileUnit {
        path: path.to_path_buf(),
        symbols,
        references: sink.into_records(),
        content_hash,
    }
}
