use hdlscope_api::{Position, Symbol, SymbolKind};
use regex::{Regex, RegexBuilder};

/// Opening/closing keywords of a container kind.
struct KeywordPair {
    start: &'static str,
    end: &'static str,
    /// VHDL: case-insensitive, and the closing `end` must be terminated by `;`.
    vhdl: bool,
}

fn keyword_pair(kind: &SymbolKind) -> Option<KeywordPair> {
    let (start, end, vhdl) = match kind {
        SymbolKind::Module => ("module", "endmodule", false),
        SymbolKind::Interface => ("interface", "endinterface", false),
        SymbolKind::Program => ("program", "endprogram", false),
        SymbolKind::Package => ("package", "endpackage", false),
        SymbolKind::Function => ("function", "endfunction", false),
        SymbolKind::Task => ("task", "endtask", false),
        SymbolKind::Class => ("class", "endclass", false),
        SymbolKind::Entity => ("entity", "end", true),
        SymbolKind::Architecture => ("architecture", "end", true),
        SymbolKind::Process => ("process", "end process", true),
        SymbolKind::PackageBody => ("package body", "end", true),
        _ => return None,
    };
    Some(KeywordPair { start, end, vhdl })
}

/// `package body` → `package\s+body`
fn keyword_pattern(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

struct Matchers {
    start: Option<Regex>,
    end: Regex,
}

impl Matchers {
    fn for_symbol(pair: &KeywordPair, kind: &SymbolKind, name: &str) -> Option<Self> {
        let start_kw = keyword_pattern(pair.start);
        let end_kw = keyword_pattern(pair.end);

        // `process` never nests.
        let start = if matches!(kind, SymbolKind::Process) {
            None
        } else {
            Some(
                RegexBuilder::new(&format!(r"\b{}\b", start_kw))
                    .case_insensitive(true)
                    .build()
                    .ok()?,
            )
        };

        let end_pattern = if pair.vhdl && pair.end == "end" {
            // A bare `end` closes too many things; require `end [kw] [name];`
            format!(
                r"\b{}\b(\s+{})?(\s+{})?\s*;",
                end_kw,
                start_kw,
                regex::escape(name)
            )
        } else {
            format!(r"\b{}\b", end_kw)
        };
        let end = RegexBuilder::new(&end_pattern)
            .case_insensitive(pair.vhdl)
            .build()
            .ok()?;

        Some(Self { start, end })
    }
}

fn strip_line_comment(line: &str) -> &str {
    let line = line.split("--").next().unwrap_or(line);
    line.split("//").next().unwrap_or(line)
}

/// Sets the end boundary of every container symbol by keyword balancing.
///
/// Scanning starts on the line after the declaration. A container that is
/// never closed extends to the last line and stays `is_valid == false`.
/// String literals are not excluded from keyword matching.
pub fn resolve_container_ranges(content: &str, symbols: &mut [Symbol]) {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    let last_line = lines.len().saturating_sub(1);

    for symbol in symbols.iter_mut().filter(|s| s.kind.is_container()) {
        let Some(pair) = keyword_pair(&symbol.kind) else {
            continue;
        };
        let Some(matchers) = Matchers::for_symbol(&pair, &symbol.kind, &symbol.name) else {
            tracing::warn!("Cannot build keyword matchers for '{}'", symbol.name);
            continue;
        };

        let mut depth = 1usize;
        let mut closing_line = None;
        for (line_no, raw) in lines.iter().enumerate().skip(symbol.start_line() + 1) {
            let code = strip_line_comment(raw);
            let closes = matchers.end.is_match(code);
            // `end entity e;` repeats the start keyword without opening anything.
            let opens = !(closes && pair.vhdl)
                && matchers.start.as_ref().is_some_and(|re| re.is_match(code));
            if opens {
                depth += 1;
            }
            if closes {
                depth -= 1;
            }
            if depth == 0 {
                closing_line = Some(line_no);
                break;
            }
        }

        match closing_line {
            Some(line) => symbol.set_end_line(line, true),
            None => symbol.set_end_line(last_line.max(symbol.start_line()), false),
        }
    }
}

/// Innermost symbol accepted by `filter` whose range contains `pos`.
///
/// When ranges nest, the most deeply nested one wins.
pub fn enclosing_container<'a>(
    symbols: &'a [Symbol],
    pos: Position,
    filter: impl Fn(&Symbol) -> bool,
) -> Option<&'a Symbol> {
    let mut best: Option<&Symbol> = None;
    for symbol in symbols.iter().filter(|s| filter(s)) {
        if !symbol.range.contains(pos) {
            continue;
        }
        match best {
            Some(current) if !current.range.contains_range(&symbol.range) => {}
            _ => best = Some(symbol),
        }
    }
    best
}
