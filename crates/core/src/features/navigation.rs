use super::keywords::*;
use crate::store::IndexStore;
use hdlscope_api::{
    ApiError, ApiResult, CodeLens, CompletionItem, CompletionKind, DefinitionTarget, HoverInfo,
    Instantiation, Language, Symbol, SymbolKind,
};
use std::collections::HashSet;
use std::path::Path;

fn is_navigable(kind: &SymbolKind) -> bool {
    use SymbolKind::*;
    match kind {
        Module | Interface | Program | Package | Class | Port | Net | Register | Parameter
        | Constant | Function | Task | Typedef | Enum | Struct | Instance | Entity
        | Architecture | Signal | Variable | Process | PackageBody | Literal => true,
        Custom(name) => matches!(
            name.as_str(),
            "logic" | "wire" | "reg" | "integer" | "real" | "time" | "localparam"
        ),
        _ => false,
    }
}

/// First indexed declaration named `word`.
pub fn find_definition(store: &IndexStore, word: &str) -> Option<DefinitionTarget> {
    if NON_NAVIGABLE.contains(&word) {
        return None;
    }
    store
        .symbols()
        .find(|s| s.name == word && is_navigable(&s.kind))
        .map(|s| DefinitionTarget {
            name: s.name.clone(),
            kind: s.kind.clone(),
            path: s.path.clone(),
            position: s.range.start,
        })
}

/// Hover for the declaration of `word` on `line`.
///
/// Declarations show their source line when `content` is given.
pub fn hover(
    symbols: &[Symbol],
    store: &IndexStore,
    word: &str,
    line: usize,
    content: Option<&str>,
) -> Option<HoverInfo> {
    let Some(symbol) = symbols
        .iter()
        .find(|s| s.name == word && s.start_line() == line)
    else {
        tracing::debug!("No declaration of '{}' on line {}", word, line + 1);
        return None;
    };

    if matches!(symbol.kind, SymbolKind::Module | SymbolKind::Entity) {
        let references = store.references_for(&symbol.name);
        return Some(if references.is_empty() {
            HoverInfo::NotInstantiated {
                name: symbol.name.clone(),
                kind: symbol.kind.clone(),
            }
        } else {
            HoverInfo::Instantiations {
                name: symbol.name.clone(),
                kind: symbol.kind.clone(),
                references: references.to_vec(),
            }
        });
    }

    let text = content
        .and_then(|c| c.lines().nth(symbol.start_line()))
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| symbol.declaration().to_string());
    if text.is_empty() {
        return None;
    }
    Some(HoverInfo::Declaration {
        name: symbol.name.clone(),
        kind: symbol.kind.clone(),
        text,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Markdown body of a hover.
pub fn render_markdown(info: &HoverInfo, language: Option<Language>) -> String {
    match info {
        HoverInfo::Instantiations {
            name, references, ..
        } => {
            let mut out = format!(
                "### **Module `{}` is instantiated {} time(s):**\n---\n",
                name,
                references.len()
            );
            for r in references {
                out.push_str(&format!(
                    "- [{}:{}]({})\n",
                    file_name(&r.path),
                    r.position.line + 1,
                    r.path.display()
                ));
            }
            out
        }
        HoverInfo::NotInstantiated { name, .. } => {
            format!("### **Module `{}` is defined but not instantiated.**", name)
        }
        HoverInfo::Declaration { kind, text, .. } => {
            let lang = language.map(|l| l.as_str()).unwrap_or("");
            format!("```{}\n{}\n```\n*({})*", lang, text, kind)
        }
    }
}

/// One lens per `module` declaration that is instantiated somewhere.
pub fn code_lenses(symbols: &[Symbol], store: &IndexStore) -> Vec<CodeLens> {
    symbols
        .iter()
        .filter(|s| s.kind == SymbolKind::Module)
        .filter_map(|s| {
            let references = store.references_for(&s.name);
            if references.is_empty() {
                return None;
            }
            let mut seen = HashSet::new();
            let title = references
                .iter()
                .filter(|r| seen.insert(&r.path))
                .map(|r| format!("↑ {}", file_name(&r.path)))
                .collect::<Vec<_>>()
                .join(" | ");
            Some(CodeLens {
                module_name: s.name.clone(),
                position: s.range.start,
                title,
                references: references.to_vec(),
            })
        })
        .collect()
}

fn completion_kind(kind: &SymbolKind) -> CompletionKind {
    match kind {
        SymbolKind::Constant => CompletionKind::Constant,
        SymbolKind::Event => CompletionKind::Event,
        SymbolKind::Function | SymbolKind::Task | SymbolKind::Prototype => CompletionKind::Function,
        SymbolKind::Module | SymbolKind::Block | SymbolKind::Package | SymbolKind::Program => {
            CompletionKind::Module
        }
        SymbolKind::Port | SymbolKind::Interface => CompletionKind::Interface,
        SymbolKind::Class | SymbolKind::Covergroup => CompletionKind::Class,
        SymbolKind::Enum => CompletionKind::Enum,
        SymbolKind::Property => CompletionKind::Property,
        SymbolKind::Struct => CompletionKind::Struct,
        SymbolKind::Typedef => CompletionKind::TypeParameter,
        _ => CompletionKind::Variable,
    }
}

fn unique<'a>(lists: &[&'a [&'a str]]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    lists
        .iter()
        .flat_map(|l| l.iter().copied())
        .filter(|w| seen.insert(*w))
        .collect()
}

fn keyword_item(word: &str) -> CompletionItem {
    CompletionItem {
        label: word.to_string(),
        kind: CompletionKind::Keyword,
        detail: "Keyword".to_string(),
        insert_text: None,
    }
}

/// Text typed before the cursor that completion replaces: an identifier,
/// optionally led by `` ` `` or `$`.
pub fn completion_prefix(content: &str, line: usize, col: usize) -> String {
    let Some(text) = content.lines().nth(line) else {
        return String::new();
    };
    let chars: Vec<char> = text.chars().take(col).collect();
    let mut start = chars.len();
    while start > 0 && crate::util::is_ident_char(chars[start - 1]) {
        start -= 1;
    }
    if start > 0 && matches!(chars[start - 1], '`' | '$') {
        start -= 1;
    }
    chars[start..].iter().collect()
}

/// Completion candidates for a cursor in a file of `language`.
///
/// The editor filters the list by prefix; only the trigger decides which
/// list is returned.
pub fn completions(
    language: Language,
    prefix: &str,
    trigger: Option<char>,
    symbols: &[Symbol],
) -> Vec<CompletionItem> {
    if language == Language::Vhdl {
        return VHDL_KEYWORDS.iter().map(|k| keyword_item(k)).collect();
    }
    let systemverilog = language == Language::SystemVerilog;

    if trigger == Some('`') || prefix.starts_with('`') {
        return DIRECTIVES
            .iter()
            .map(|d| CompletionItem {
                label: format!("`{}", d),
                kind: CompletionKind::Directive,
                detail: "Compiler Directive".to_string(),
                insert_text: Some(format!("`{} ", d)),
            })
            .collect();
    }

    if trigger == Some('$') || prefix.starts_with('$') {
        let tasks = if systemverilog {
            unique(&[VERILOG_SYSTEM_TASKS, SYSTEMVERILOG_SYSTEM_TASKS])
        } else {
            unique(&[VERILOG_SYSTEM_TASKS])
        };
        return tasks
            .into_iter()
            .map(|t| CompletionItem {
                label: format!("${}", t),
                kind: CompletionKind::SystemFunction,
                detail: "System Task/Function".to_string(),
                insert_text: Some(format!("${}()", t)),
            })
            .collect();
    }

    let keywords = if systemverilog {
        unique(&[VERILOG_KEYWORDS, SYSTEMVERILOG_KEYWORDS])
    } else {
        unique(&[VERILOG_KEYWORDS])
    };
    let mut items: Vec<CompletionItem> = keywords.into_iter().map(keyword_item).collect();
    items.extend(symbols.iter().map(|s| CompletionItem {
        label: s.name.clone(),
        kind: completion_kind(&s.kind),
        detail: format!("{} (symbol)", s.kind),
        insert_text: None,
    }));
    items
}

/// `.name (name)` lines, names padded to a common width.
fn connection_list(names: &[String], indent: &str) -> String {
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let sep = if i + 1 < names.len() { "," } else { "" };
            format!("{indent}.{name:<width$} ({name}){sep}\n")
        })
        .collect()
}

/// Instance snippet for a module declared in `symbols`.
///
/// With several modules in the file, `module` must name one.
pub fn instantiation_template(
    symbols: &[Symbol],
    module: Option<&str>,
    indent: &str,
) -> ApiResult<Instantiation> {
    let modules: Vec<&Symbol> = symbols
        .iter()
        .filter(|s| s.kind == SymbolKind::Module)
        .collect();

    let target = match (module, modules.as_slice()) {
        (_, []) => return Err(ApiError::NotFound("no modules found in the file".to_string())),
        (Some(name), _) => modules
            .iter()
            .find(|s| s.name == name)
            .copied()
            .ok_or_else(|| ApiError::NotFound(format!("module '{}'", name)))?,
        (None, [only]) => *only,
        (None, many) => {
            let names: Vec<&str> = many.iter().map(|s| s.name.as_str()).collect();
            return Err(ApiError::InvalidArgument(format!(
                "the file declares several modules, choose one of: {}",
                names.join(", ")
            )));
        }
    };

    let scope = if target.parent_scope.is_empty() {
        target.name.clone()
    } else {
        format!("{}.{}", target.parent_scope, target.name)
    };
    let members = |kind: SymbolKind| -> Vec<String> {
        symbols
            .iter()
            .filter(|s| s.kind == kind && s.parent_kind == "module" && s.parent_scope == scope)
            .map(|s| s.name.clone())
            .collect()
    };
    let ports = members(SymbolKind::Port);
    let parameters = members(SymbolKind::Parameter);

    let mut text = format!("{} ", target.name);
    if !parameters.is_empty() {
        text.push_str(&format!("\n#(\n{})\n", connection_list(&parameters, indent)));
    }
    text.push_str(&format!("u_{}(\n", target.name));
    text.push_str(&connection_list(&ports, indent));
    text.push_str(");\n");

    Ok(Instantiation {
        module_name: target.name.clone(),
        ports,
        parameters,
        text,
    })
}
