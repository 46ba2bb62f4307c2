use crate::util::LineIndex;
use hdlscope_api::Position;
use once_cell::sync::Lazy;
use regex::Regex;

/// `type [#( params )] name (`
static VERILOG_INSTANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\w+)\b\s*(?:#\s*\([^;]*\))?\s*\b(\w+)\b\s*\(")
        .expect("Failed to compile Verilog instance pattern")
});

/// `label : component port map ( ... )`
static VHDL_INSTANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([a-zA-Z_][a-zA-Z0-9_]*)\s*:\s*([a-zA-Z_][a-zA-Z0-9_]*)\s+port\s+map\s*\([\s\S]*?\)")
        .expect("Failed to compile VHDL instance pattern")
});

/// Leading words that look like `a b (` but never start an instantiation.
const NON_MODULE_KEYWORDS: &[&str] = &[
    "always", "initial", "if", "else", "for", "while", "repeat", "forever", "case", "casex",
    "casez", "module", "macromodule", "primitive", "interface", "program", "begin", "end",
    "generate", "assign", "function", "task", "automatic", "static", "return", "wait", "void",
    "int", "integer", "bit", "logic", "reg", "wire", "real", "string", "byte",
    // VHDL `port map (...);` has the same shape
    "port",
];

/// An instantiation statement found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSite {
    /// The module/entity/component being instantiated.
    pub module_name: String,
    pub instance_name: Option<String>,
    /// Start of the statement.
    pub position: Position,
}

/// Blanks out `/* */` comments, keeping every byte offset and every
/// newline where it was.
pub fn strip_block_comments(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut in_comment = false;
    let mut i = 0;
    while i < bytes.len() {
        let pair = (bytes[i], bytes.get(i + 1).copied());
        match (in_comment, pair) {
            (false, (b'/', Some(b'*'))) | (true, (b'*', Some(b'/'))) => {
                in_comment = !in_comment;
                out.extend_from_slice(b"  ");
                i += 2;
                continue;
            }
            (false, (b, _)) => out.push(b),
            (true, (b'\n', _)) => out.push(b'\n'),
            (true, _) => out.push(b' '),
        }
        i += 1;
    }

    // Only whole comment runs (delimited by ASCII) were replaced.
    String::from_utf8(out).unwrap_or_else(|_| content.to_string())
}

/// Scans `content` for module and entity instantiations.
///
/// Runs a Verilog pass over text without block comments and a VHDL
/// `port map` pass over the raw text.
pub fn find_instances(content: &str) -> Vec<InstanceSite> {
    let index = LineIndex::new(content);
    let mut sites = find_verilog_instances(content, &index);
    sites.extend(find_vhdl_instances(content, &index));
    sites
}

fn find_verilog_instances(content: &str, index: &LineIndex<'_>) -> Vec<InstanceSite> {
    let code = strip_block_comments(content);
    let bytes = code.as_bytes();
    let mut sites = Vec::new();

    for caps in VERILOG_INSTANCE.captures_iter(&code) {
        let (Some(whole), Some(module), Some(instance)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        if NON_MODULE_KEYWORDS
            .iter()
            .any(|kw| kw.eq_ignore_ascii_case(module.as_str()))
        {
            continue;
        }

        let Some(close) = find_closing_paren(bytes, whole.end()) else {
            continue;
        };
        // `foo bar(a) + 1;` is an expression, not a statement.
        if !followed_by_semicolon(bytes, close + 1) {
            continue;
        }

        let position = index.position(whole.start());
        tracing::debug!(
            "Found instance of '{}' at line {}",
            module.as_str(),
            position.line + 1
        );
        sites.push(InstanceSite {
            module_name: module.as_str().to_string(),
            instance_name: Some(instance.as_str().to_string()),
            position,
        });
    }
    sites
}

fn find_vhdl_instances(content: &str, index: &LineIndex<'_>) -> Vec<InstanceSite> {
    VHDL_INSTANCE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.get(1)?;
            let component = caps.get(2)?;
            let position = index.position(whole.start());
            tracing::debug!(
                "Found VHDL instance of '{}' at line {}",
                component.as_str(),
                position.line + 1
            );
            Some(InstanceSite {
                module_name: component.as_str().to_string(),
                instance_name: Some(label.as_str().to_string()),
                position,
            })
        })
        .collect()
}

/// Index of the `)` balancing an already opened `(`, skipping `//` comments.
fn find_closing_paren(bytes: &[u8], start: usize) -> Option<usize> {
    let mut balance = 1usize;
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            i += 1;
            continue;
        }
        match bytes[i] {
            b'(' => balance += 1,
            b')' => {
                balance -= 1;
                if balance == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn followed_by_semicolon(bytes: &[u8], from: usize) -> bool {
    for &b in bytes.iter().skip(from) {
        match b {
            b';' => return true,
            b' ' | b'\t' | b'\r' | b'\n' => continue,
            _ => return false,
        }
    }
    false
}
