//! Lexical scanner over raw source bytes.
//!
//! Cursor operations that step over string literals and comments so that
//! brace matching and declaration scans only ever look at code. Every
//! function is a pure function of `(source, position)` and returns a new
//! position; none of them allocate except `code_lines`.
//!
//! ## Recognized constructs
//!
//! | Construct | Opens with | Closes with | Escapes |
//! |-----------|------------|-------------|---------|
//! | Raw string | `r"` / `r'` | same quote | none |
//! | Raw triple-quoted string | `r"""` / `r'''` | same three quotes | none |
//! | Triple-quoted string | `"""` / `'''` | same three quotes | backslash |
//! | String | `"` / `'` | same quote | backslash |
//! | Line comment | `//` | newline (not consumed) | - |
//! | Block comment | `/*` | first `*/` (no nesting) | - |
//!
//! Unterminated constructs run to the end of the input. The brace matcher
//! then reports that no closing delimiter exists.

/// Position just past a regular string literal.
///
/// `pos` is the opening quote. A backslash and the byte after it are consumed
/// as a pair, so an escaped quote never closes the literal.
#[must_use]
pub fn skip_string(source: &[u8], pos: usize) -> usize {
    let Some(&quote) = source.get(pos) else {
        return source.len();
    };
    let mut i = pos + 1;
    while i < source.len() {
        match source[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    source.len()
}

/// Position just past a raw string literal.
///
/// `pos` is the `r` prefix. Raw strings have no escapes: the first matching
/// quote closes the literal. `r"""` and `r'''` close on the same three quotes.
#[must_use]
pub fn skip_raw_string(source: &[u8], pos: usize) -> usize {
    let quote_pos = pos + 1;
    let Some(&quote) = source.get(quote_pos) else {
        return source.len();
    };

    if is_triple_quote(source, quote_pos) {
        return find_triple_close(source, quote_pos + 3, quote, false);
    }

    source[quote_pos + 1..]
        .iter()
        .position(|&b| b == quote)
        .map_or(source.len(), |rel| quote_pos + 1 + rel + 1)
}

/// Position just past a triple-quoted string literal.
///
/// `pos` is the first of the three opening quotes.
#[must_use]
pub fn skip_triple_quoted_string(source: &[u8], pos: usize) -> usize {
    let Some(&quote) = source.get(pos) else {
        return source.len();
    };
    find_triple_close(source, pos + 3, quote, true)
}

/// Position of the newline that ends a line comment, or end of input.
///
/// `pos` is the first `/` of `//`. The newline itself is left for the caller.
#[must_use]
pub fn skip_line_comment(source: &[u8], pos: usize) -> usize {
    source
        .get(pos..)
        .and_then(|rest| rest.iter().position(|&b| b == b'\n'))
        .map_or(source.len(), |rel| pos + rel)
}

/// Position just past the `*/` that closes a block comment.
///
/// `pos` is the `/` of `/*`. Block comments do not nest: the first `*/`
/// closes the comment.
#[must_use]
pub fn skip_block_comment(source: &[u8], pos: usize) -> usize {
    let mut i = pos + 2;
    while i + 1 < source.len() {
        if source[i] == b'*' && source[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    source.len()
}

/// If a string literal or comment starts at `pos`, the position just past it.
///
/// Line comments end at their newline rather than past it.
#[must_use]
pub fn skip_literal_or_comment(source: &[u8], pos: usize) -> Option<usize> {
    let b = *source.get(pos)?;
    let next = source.get(pos + 1).copied();
    match b {
        b'r' if matches!(next, Some(b'"' | b'\'')) => Some(skip_raw_string(source, pos)),
        b'"' | b'\'' if is_triple_quote(source, pos) => Some(skip_triple_quoted_string(source, pos)),
        b'"' | b'\'' => Some(skip_string(source, pos)),
        b'/' if next == Some(b'/') => Some(skip_line_comment(source, pos)),
        b'/' if next == Some(b'*') => Some(skip_block_comment(source, pos)),
        _ => None,
    }
}

/// Find the `}` that closes the `{` at `open`.
///
/// Depth starts at 1 on the opening brace. Braces inside strings and
/// comments are ignored.
///
/// # Returns
///
/// The offset of the closing brace, or `None` if `open` is not a `{` or the
/// input ends first.
#[must_use]
pub fn find_matching_brace(source: &[u8], open: usize) -> Option<usize> {
    find_matching_delimiter(source, open, b'{', b'}')
}

/// Find the delimiter that closes the `open_byte` at `open`.
///
/// Same rules as [`find_matching_brace`], for any bracket pair.
#[must_use]
pub fn find_matching_delimiter(
    source: &[u8],
    open: usize,
    open_byte: u8,
    close_byte: u8,
) -> Option<usize> {
    if source.get(open) != Some(&open_byte) {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < source.len() {
        if let Some(end) = skip_literal_or_comment(source, i) {
            i = end;
            continue;
        }

        let b = source[i];
        if b == open_byte {
            depth += 1;
        } else if b == close_byte {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// First position at or after `from` holding one of `targets`, outside
/// strings and comments.
#[must_use]
pub fn find_in_code(source: &[u8], from: usize, targets: &[u8]) -> Option<usize> {
    let mut i = from;
    while i < source.len() {
        if let Some(end) = skip_literal_or_comment(source, i) {
            i = end;
            continue;
        }
        if targets.contains(&source[i]) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Skip whitespace (newlines included) and comments.
#[must_use]
pub fn skip_trivia(source: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < source.len() {
        let b = source[i];
        if b.is_ascii_whitespace() {
            i += 1;
        } else if b == b'/' && matches!(source.get(i + 1), Some(b'/' | b'*')) {
            // Never `None`: a comment starts here.
            i = skip_literal_or_comment(source, i).unwrap_or(source.len());
        } else {
            break;
        }
    }
    i
}

/// A line start that is in code state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLine {
    /// Byte offset of the first byte of the line
    pub offset: usize,
    /// Number of `{` still open at the start of the line
    pub depth: usize,
}

/// Every line start that is in code state, with its brace depth.
///
/// A line that begins inside a multi-line string or block comment is left
/// out, so declaration scans never anchor on text that is not code. Stray
/// closing braces never take the depth below zero.
#[must_use]
pub fn code_lines(source: &[u8]) -> Vec<CodeLine> {
    let mut lines = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;
    while i < source.len() {
        if i == 0 || source[i - 1] == b'\n' {
            lines.push(CodeLine { offset: i, depth });
        }
        if let Some(end) = skip_literal_or_comment(source, i) {
            i = end;
            continue;
        }
        match source[i] {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    lines
}

fn is_triple_quote(source: &[u8], pos: usize) -> bool {
    match source.get(pos) {
        Some(&q @ (b'"' | b'\'')) => source.get(pos + 1) == Some(&q) && source.get(pos + 2) == Some(&q),
        _ => false,
    }
}

fn find_triple_close(source: &[u8], from: usize, quote: u8, escapes: bool) -> usize {
    let mut i = from;
    while i < source.len() {
        if escapes && source[i] == b'\\' {
            i += 2;
            continue;
        }
        if source[i] == quote && is_triple_quote(source, i) {
            return i + 3;
        }
        i += 1;
    }
    source.len()
}
