use hdlscope_api::Position;

/// Maps byte offsets of a text to line/column positions.
///
/// Columns count characters, not bytes.
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    pub fn position(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let end = offset.min(self.text.len());
        let col = self
            .text
            .get(start..end)
            .map(|s| s.chars().count())
            .unwrap_or(end - start);
        Position::new(line, col)
    }
}

pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Identifier touching the given character column of `line`, if any.
pub fn word_at(content: &str, line: usize, col: usize) -> Option<String> {
    let chars: Vec<char> = content.lines().nth(line)?.chars().collect();
    let mut pos = col.min(chars.len());
    if pos == chars.len() || !is_ident_char(chars[pos]) {
        // cursor just after the word
        if pos > 0 && is_ident_char(chars[pos - 1]) {
            pos -= 1;
        } else {
            return None;
        }
    }

    let mut start = pos;
    while start > 0 && is_ident_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = pos;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }
    Some(chars[start..end].iter().collect())
}
