//! Top-level declaration locator for Dart.
//!
//! One forward pass over the code lines of the document. Type declarations
//! (`class`, `mixin`, `extension`, `enum`) are recognized on any code line;
//! functions and variables only on lines at brace depth zero, which keeps
//! class members and function-local statements out of the top level.

use tracing::trace;

use super::members::extract_members;
use super::patterns::{
    match_binding, match_callable, match_type_declaration, TypeDeclaration, VARIABLE_RULES,
};
use crate::position::LineIndex;
use crate::scanner::{code_lines, find_in_code, find_matching_brace, CodeLine};
use crate::types::{Symbol, SymbolKind};

/// Locate every top-level declaration in `source`, in source order.
#[must_use]
pub fn locate_declarations(source: &str, index: &LineIndex) -> Vec<Symbol> {
    let bytes = source.as_bytes();
    let mut symbols = Vec::new();
    // Lines already covered by a matched header (annotations, multi-line
    // signatures) are not anchors again.
    let mut resume_at = 0;
    let lines = code_lines(bytes);

    for line in &lines {
        if line.offset < resume_at {
            continue;
        }
        let anchor = skip_indent(bytes, line.offset);
        if matches!(bytes.get(anchor), None | Some(b'\n')) {
            continue;
        }

        if let Some(decl) = match_type_declaration(source, anchor) {
            let (symbol, resume) = type_symbol(source, index, &decl, &lines);
            symbols.push(symbol);
            resume_at = resume;
            continue;
        }

        if line.depth > 0 {
            continue;
        }

        if let Some(callable) =
            match_callable(source, anchor).filter(|c| !c.name.text(source).contains('.'))
        {
            let end = body_end(bytes, callable.body_open, callable.name.text(source));
            symbols.push(Symbol::new(
                callable.name.text(source),
                SymbolKind::Function,
                index.location(callable.start, end),
            ));
            resume_at = callable.body_open + 1;
            continue;
        }

        if let Some(binding) = match_binding(source, anchor, VARIABLE_RULES) {
            symbols.push(Symbol::new(
                binding.name.text(source),
                SymbolKind::Variable,
                index.location(binding.start, binding.end),
            ));
            resume_at = binding.end;
        }
    }

    symbols
}

/// Build the symbol for a type declaration, members included.
///
/// Returns the symbol and the offset from which line anchors resume. A `{`
/// or `;` that only appears after the next declaration belongs to that
/// declaration, so the header is left without a body.
fn type_symbol(
    source: &str,
    index: &LineIndex,
    decl: &TypeDeclaration,
    lines: &[CodeLine],
) -> (Symbol, usize) {
    let bytes = source.as_bytes();
    let terminator = find_in_code(bytes, decl.header_end, b"{;")
        .filter(|&found| !declaration_starts_between(source, lines, decl.header_end, found));

    match terminator {
        Some(open) if bytes[open] == b'{' => {
            let end = body_end(bytes, open, &decl.name);
            let children = extract_members(source, index, open, end, &decl.name);
            let symbol = Symbol::new(&decl.name, decl.kind, index.location(decl.start, end))
                .with_children(children);
            (symbol, open + 1)
        }
        // Header-only declaration, e.g. `class A = B with M;`
        Some(semicolon) => (
            Symbol::new(&decl.name, decl.kind, index.location(decl.start, semicolon)),
            semicolon + 1,
        ),
        None => {
            trace!(name = %decl.name, kind = %decl.kind, "Declaration has no body");
            (
                Symbol::new(&decl.name, decl.kind, index.location(decl.start, decl.header_end)),
                decl.header_end,
            )
        }
    }
}

/// Whether a code line starting in `(from, to]` opens another declaration.
fn declaration_starts_between(source: &str, lines: &[CodeLine], from: usize, to: usize) -> bool {
    let first = lines.partition_point(|line| line.offset <= from);
    lines[first..]
        .iter()
        .take_while(|line| line.offset <= to)
        .any(|line| {
            let anchor = skip_indent(source.as_bytes(), line.offset);
            match_type_declaration(source, anchor).is_some()
                || match_callable(source, anchor).is_some()
                || match_binding(source, anchor, VARIABLE_RULES).is_some()
        })
}

/// Offset of the `}` closing the body at `open`, or end of input.
pub(super) fn body_end(bytes: &[u8], open: usize, name: &str) -> usize {
    find_matching_brace(bytes, open).unwrap_or_else(|| {
        trace!(name, open, "Body has no closing brace, extending to end of input");
        bytes.len()
    })
}

fn skip_indent(bytes: &[u8], pos: usize) -> usize {
    let len = bytes[pos..]
        .iter()
        .take_while(|&&b| matches!(b, b' ' | b'\t' | b'\r'))
        .count();
    pos + len
}
