use super::symbol::{ModuleReference, Position, SymbolKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A cursor inside a document, optionally with unsaved content.
#[derive(Debug, Clone)]
pub struct PositionContext {
    pub path: PathBuf,
    pub line: usize,
    pub col: usize,
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DefinitionTarget {
    pub name: String,
    pub kind: SymbolKind,
    pub path: PathBuf,
    pub position: Position,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HoverInfo {
    /// A module or entity together with every place it is instantiated.
    Instantiations {
        name: String,
        kind: SymbolKind,
        references: Vec<ModuleReference>,
    },
    /// A module or entity nobody instantiates.
    NotInstantiated { name: String, kind: SymbolKind },
    /// Any other declaration.
    Declaration {
        name: String,
        kind: SymbolKind,
        text: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodeLens {
    pub module_name: String,
    pub position: Position,
    pub title: String,
    pub references: Vec<ModuleReference>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    Keyword,
    Directive,
    SystemFunction,
    Module,
    Function,
    Variable,
    Constant,
    Class,
    Interface,
    Enum,
    Struct,
    Property,
    Event,
    TypeParameter,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: String,
    /// Text to insert when it differs from the label.
    pub insert_text: Option<String>,
}

/// A ready-to-insert instantiation of a module.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instantiation {
    pub module_name: String,
    pub ports: Vec<String>,
    pub parameters: Vec<String>,
    pub text: String,
}
