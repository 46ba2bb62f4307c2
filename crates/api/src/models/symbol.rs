use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A 0-based line/column pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Column used for "until the end of the line".
    pub const END_OF_LINE: usize = usize::MAX;

    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn line_start(line: usize) -> Self {
        Self { line, col: 0 }
    }

    pub fn line_end(line: usize) -> Self {
        Self {
            line,
            col: Self::END_OF_LINE,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolRange {
    pub start: Position,
    pub end: Position,
}

impl SymbolRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn contains_range(&self, other: &SymbolRange) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }
}

/// Declaration kinds as spelled by the tag tool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum SymbolKind {
    // Verilog / SystemVerilog
    Module,
    Interface,
    Program,
    Package,
    Class,
    Function,
    Task,
    Block,
    Covergroup,
    Enum,
    Struct,
    Typedef,
    Port,
    Net,
    Register,
    Parameter,
    Constant,
    Event,
    Modport,
    Prototype,
    Property,
    Assert,
    Instance,
    // VHDL
    Entity,
    Architecture,
    Process,
    PackageBody,
    Signal,
    Variable,
    Literal,
    Component,
    Custom(String),
}

impl SymbolKind {
    pub fn as_str(&self) -> &str {
        match self {
            SymbolKind::Module => "module",
            SymbolKind::Interface => "interface",
            SymbolKind::Program => "program",
            SymbolKind::Package => "package",
            SymbolKind::Class => "class",
            SymbolKind::Function => "function",
            SymbolKind::Task => "task",
            SymbolKind::Block => "block",
            SymbolKind::Covergroup => "covergroup",
            SymbolKind::Enum => "enum",
            SymbolKind::Struct => "struct",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Port => "port",
            SymbolKind::Net => "net",
            SymbolKind::Register => "register",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Constant => "constant",
            SymbolKind::Event => "event",
            SymbolKind::Modport => "modport",
            SymbolKind::Prototype => "prototype",
            SymbolKind::Property => "property",
            SymbolKind::Assert => "assert",
            SymbolKind::Instance => "instance",
            SymbolKind::Entity => "entity",
            SymbolKind::Architecture => "architecture",
            SymbolKind::Process => "process",
            SymbolKind::PackageBody => "package_body",
            SymbolKind::Signal => "signal",
            SymbolKind::Variable => "variable",
            SymbolKind::Literal => "literal",
            SymbolKind::Component => "component",
            SymbolKind::Custom(s) => s,
        }
    }

    /// Kinds that enclose a body and therefore get an end boundary.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            SymbolKind::Function
                | SymbolKind::Module
                | SymbolKind::Task
                | SymbolKind::Block
                | SymbolKind::Class
                | SymbolKind::Covergroup
                | SymbolKind::Enum
                | SymbolKind::Interface
                | SymbolKind::Package
                | SymbolKind::Program
                | SymbolKind::Struct
                | SymbolKind::Entity
                | SymbolKind::Architecture
                | SymbolKind::Process
                | SymbolKind::PackageBody
        )
    }

    /// Kinds that can be instantiated and appear in the dependency tree.
    pub fn is_design_unit(&self) -> bool {
        matches!(
            self,
            SymbolKind::Module | SymbolKind::Interface | SymbolKind::Entity
        )
    }
}

impl From<&str> for SymbolKind {
    fn from(s: &str) -> Self {
        match s {
            "module" => SymbolKind::Module,
            "interface" => SymbolKind::Interface,
            "program" => SymbolKind::Program,
            "package" => SymbolKind::Package,
            "class" => SymbolKind::Class,
            "function" => SymbolKind::Function,
            "task" => SymbolKind::Task,
            "block" => SymbolKind::Block,
            "covergroup" => SymbolKind::Covergroup,
            "enum" => SymbolKind::Enum,
            "struct" => SymbolKind::Struct,
            "typedef" => SymbolKind::Typedef,
            "port" => SymbolKind::Port,
            "net" => SymbolKind::Net,
            "register" => SymbolKind::Register,
            "parameter" => SymbolKind::Parameter,
            "constant" => SymbolKind::Constant,
            "event" => SymbolKind::Event,
            "modport" => SymbolKind::Modport,
            "prototype" => SymbolKind::Prototype,
            "property" => SymbolKind::Property,
            "assert" => SymbolKind::Assert,
            "instance" => SymbolKind::Instance,
            "entity" => SymbolKind::Entity,
            "architecture" => SymbolKind::Architecture,
            "process" => SymbolKind::Process,
            "package_body" => SymbolKind::PackageBody,
            "signal" => SymbolKind::Signal,
            "variable" => SymbolKind::Variable,
            "literal" => SymbolKind::Literal,
            "component" => SymbolKind::Component,
            other => SymbolKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for SymbolKind {
    fn from(s: String) -> Self {
        SymbolKind::from(s.as_str())
    }
}

impl From<SymbolKind> for String {
    fn from(kind: SymbolKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named declaration found in a source file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Raw matched text reported by the tag tool.
    pub pattern: String,
    pub range: SymbolRange,
    /// Name of the enclosing container, empty at top level.
    pub parent_scope: String,
    /// Kind of the enclosing container, empty at top level.
    pub parent_kind: String,
    pub path: PathBuf,
    /// For instances: the module/entity being instantiated.
    pub type_ref: Option<String>,
    /// True once the end boundary came from a real closing keyword.
    pub is_valid: bool,
}

impl Symbol {
    /// Creates a symbol whose extent is its start line, unbounded to the right.
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        pattern: impl Into<String>,
        start_line: usize,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            pattern: pattern.into(),
            range: SymbolRange::new(
                Position::line_start(start_line),
                Position::line_end(start_line),
            ),
            parent_scope: String::new(),
            parent_kind: String::new(),
            path: path.into(),
            type_ref: None,
            is_valid: false,
        }
    }

    pub fn start_line(&self) -> usize {
        self.range.start.line
    }

    pub fn end_line(&self) -> usize {
        self.range.end.line
    }

    pub fn set_end_line(&mut self, line: usize, found_closing: bool) {
        self.range.end = Position::line_end(line);
        self.is_valid = found_closing;
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_scope.is_empty()
    }

    /// Declaration text without the tool's search-pattern anchors.
    pub fn declaration(&self) -> &str {
        let text = self.pattern.as_str();
        let text = text.strip_prefix('/').unwrap_or(text);
        let text = text.strip_prefix('^').unwrap_or(text);
        let text = text.strip_suffix('/').unwrap_or(text);
        let text = text.strip_suffix('$').unwrap_or(text);
        text.trim()
    }
}

/// One place where a module/entity is instantiated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleReference {
    pub path: PathBuf,
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_tool_spelling() {
        assert_eq!(SymbolKind::from("package_body"), SymbolKind::PackageBody);
        assert_eq!(SymbolKind::from("module").as_str(), "module");
        let custom = SymbolKind::from("clocking");
        assert_eq!(custom, SymbolKind::Custom("clocking".to_string()));
        assert_eq!(custom.as_str(), "clocking");
    }

    #[test]
    fn test_container_predicate() {
        assert!(SymbolKind::Module.is_container());
        assert!(SymbolKind::Process.is_container());
        assert!(!SymbolKind::Port.is_container());
        assert!(!SymbolKind::Signal.is_container());
        assert!(!SymbolKind::Custom("clocking".into()).is_container());
    }

    #[test]
    fn test_range_contains_unbounded_end() {
        let range = SymbolRange::new(Position::line_start(2), Position::line_end(5));
        assert!(range.contains(Position::new(5, 400)));
        assert!(range.contains(Position::new(2, 0)));
        assert!(!range.contains(Position::new(6, 0)));
        assert!(!range.contains(Position::new(1, 10)));

        let inner = SymbolRange::new(Position::line_start(3), Position::line_end(4));
        assert!(range.contains_range(&inner));
        assert!(!inner.contains_range(&range));
    }

    #[test]
    fn test_declaration_strips_anchors() {
        let sym = Symbol::new("sig", SymbolKind::Register, "/^reg sig;$/", 0, "a.v");
        assert_eq!(sym.declaration(), "reg sig;");
    }
}
