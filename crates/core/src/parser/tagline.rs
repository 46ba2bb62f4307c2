use hdlscope_api::{Symbol, SymbolKind};
use std::path::Path;
use thiserror::Error;

const TYPEREF_PREFIX: &str = "typeref:";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagLineError {
    #[error("expected at least 4 tab-separated fields, found {0}")]
    TooFewFields(usize),
    #[error("invalid line specification '{0}'")]
    BadLineNumber(String),
}

/// Parses one record of `ctags --excmd=n --fields=+K` output:
/// `name<TAB>pattern<TAB>lineSpec<TAB>kind[<TAB>scope][<TAB>typeref]`.
pub fn parse_tag_line(line: &str, path: &Path) -> Result<Symbol, TagLineError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 4 {
        return Err(TagLineError::TooFewFields(parts.len()));
    }

    let start_line = parse_line_spec(parts[2])?;

    // The tool tags some parameters with an unrelated kind; the trailing
    // marker is authoritative.
    let kind = if parts.len() == 6 && parts[5] == "parameter:" {
        SymbolKind::Parameter
    } else {
        SymbolKind::from(parts[3])
    };

    let mut symbol = Symbol::new(parts[0], kind, parts[1], start_line, path);

    if let Some(scope) = parts.get(4) {
        if !scope.starts_with(TYPEREF_PREFIX) {
            if let Some((kind, name)) = scope.split_once(':') {
                symbol.parent_kind = kind.to_string();
                symbol.parent_scope = name.to_string();
            }
        }
    }

    symbol.type_ref = parts[4..]
        .iter()
        .rev()
        .find_map(|field| field.strip_prefix(TYPEREF_PREFIX))
        .map(|t| t.replacen("struct ", "", 1));

    Ok(symbol)
}

/// `12;"` → 11. The two trailing characters are the tool's ex-command
/// terminator.
fn parse_line_spec(spec: &str) -> Result<usize, TagLineError> {
    let bad = || TagLineError::BadLineNumber(spec.to_string());
    let digits = spec
        .char_indices()
        .rev()
        .nth(1)
        .and_then(|(idx, _)| spec.get(..idx))
        .ok_or_else(bad)?;
    let line: usize = digits.trim().parse().map_err(|_| bad())?;
    line.checked_sub(1).ok_or_else(bad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Symbol, TagLineError> {
        parse_tag_line(line, Path::new("rtl/top.v"))
    }

    #[test]
    fn test_scoped_register() {
        let sym = parse("sig\t/^reg sig$/\t12;\"\tregister\tmodule:top").unwrap();
        assert_eq!(sym.name, "sig");
        assert_eq!(sym.kind, SymbolKind::Register);
        assert_eq!(sym.start_line(), 11);
        assert_eq!(sym.parent_kind, "module");
        assert_eq!(sym.parent_scope, "top");
        assert_eq!(sym.pattern, "/^reg sig$/");
        assert!(!sym.is_valid);
        assert_eq!(sym.type_ref, None);
    }

    #[test]
    fn test_top_level_symbol_has_empty_scope() {
        let sym = parse("top\trtl/top.v\t1;\"\tmodule").unwrap();
        assert_eq!(sym.kind, SymbolKind::Module);
        assert_eq!(sym.start_line(), 0);
        assert!(sym.parent_kind.is_empty());
        assert!(sym.parent_scope.is_empty());
        assert!(sym.is_top_level());
    }

    #[test]
    fn test_instance_typeref() {
        let sym =
            parse("u_cnt\trtl/top.v\t7;\"\tinstance\tmodule:top\ttyperef:struct counter").unwrap();
        assert_eq!(sym.kind, SymbolKind::Instance);
        assert_eq!(sym.type_ref.as_deref(), Some("counter"));
        assert_eq!(sym.parent_scope, "top");

        let plain = parse("u_fifo\trtl/top.v\t9;\"\tinstance\tmodule:top\ttyperef:fifo").unwrap();
        assert_eq!(plain.type_ref.as_deref(), Some("fifo"));
    }

    #[test]
    fn test_typeref_is_not_a_scope() {
        let sym = parse("u0\trtl/top.v\t3;\"\tinstance\ttyperef:adder").unwrap();
        assert!(sym.parent_scope.is_empty());
        assert_eq!(sym.type_ref.as_deref(), Some("adder"));
    }

    #[test]
    fn test_parameter_marker_overrides_kind() {
        let sym = parse("WIDTH\trtl/top.v\t2;\"\tconstant\tmodule:top\tparameter:").unwrap();
        assert_eq!(sym.kind, SymbolKind::Parameter);

        let five = parse("WIDTH\trtl/top.v\t2;\"\tconstant\tparameter:").unwrap();
        assert_eq!(five.kind, SymbolKind::Constant);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            parse("only\tthree\tfields").unwrap_err(),
            TagLineError::TooFewFields(3)
        );
        assert!(matches!(
            parse("x\tp\tabc;\"\tnet"),
            Err(TagLineError::BadLineNumber(_))
        ));
        assert!(matches!(
            parse("x\tp\t0;\"\tnet"),
            Err(TagLineError::BadLineNumber(_))
        ));
        assert!(matches!(
            parse("x\tp\t;\tnet"),
            Err(TagLineError::BadLineNumber(_))
        ));
    }
}
