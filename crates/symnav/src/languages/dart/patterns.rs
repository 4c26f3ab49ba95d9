//! Declaration-shape matchers for Dart.
//!
//! Each matcher starts at an anchor (the first token of a line or of a
//! member) and either recognizes one declaration shape or returns `None`.
//! Results are explicit offsets into the document: where the declaration
//! starts, where its name is, and where its header ends. Matchers never look
//! past the header; bodies are delimited by the caller through the scanner.

use crate::scanner::{find_matching_delimiter, skip_trivia};
use crate::types::SymbolKind;

/// Modifiers that may precede `class` (and `mixin` in `base mixin`).
const CLASS_MODIFIERS: &[&str] = &["abstract", "sealed", "base", "final", "interface"];

/// Modifiers that may precede a method or constructor.
const CALLABLE_MODIFIERS: &[&str] = &["static", "external", "factory"];

/// Modifiers that may precede a field or variable.
const FIELD_MODIFIERS: &[&str] = &[
    "static",
    "final",
    "const",
    "late",
    "var",
    "covariant",
    "external",
];

/// Words that look like a call followed by a block but are statements.
const STATEMENT_KEYWORDS: &[&str] = &[
    "assert", "await", "catch", "do", "else", "for", "if", "new", "rethrow", "return", "super",
    "switch", "this", "throw", "try", "while", "yield",
];

/// Byte range of an identifier or dotted name in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSpan {
    /// Offset of the first byte of the name
    pub start: usize,
    /// Offset just past the last byte of the name
    pub end: usize,
}

impl NameSpan {
    /// The name's text.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// A `class`, `mixin`, `extension` or `enum` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Kind of the declared type
    pub kind: SymbolKind,
    /// First token of the declaration, after annotations
    pub start: usize,
    /// Display name (`on T` for unnamed extensions)
    pub name: String,
    /// Offset just past the name
    pub header_end: usize,
}

/// A function, method or constructor header ending at its body brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    /// First token of the declaration, after annotations
    pub start: usize,
    /// The declared name; dotted for named constructors
    pub name: NameSpan,
    /// Offset of the `{` that opens the body
    pub body_open: usize,
    /// Declared with the `factory` modifier
    pub is_factory: bool,
}

/// A field or variable declaration up to its `=` or `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// First token of the declaration, after annotations
    pub start: usize,
    /// The declared name
    pub name: NameSpan,
    /// Offset just past the terminating `=` or `;`
    pub end: usize,
}

/// Which bindings a caller accepts.
#[derive(Debug, Clone, Copy)]
pub struct BindingRules {
    /// At least one of `final`, `const`, `var`, ... must be present
    pub require_modifier: bool,
    /// Bytes that may follow the name
    pub terminators: &'static [u8],
}

/// Top-level variables: `final`/`const`/`var` binding followed by `=`.
pub const VARIABLE_RULES: BindingRules = BindingRules {
    require_modifier: true,
    terminators: b"=",
};

/// Class fields: optional modifiers, a type, a name, then `=` or `;`.
pub const FIELD_RULES: BindingRules = BindingRules {
    require_modifier: false,
    terminators: b"=;",
};

/// Match a type declaration header at `anchor`.
#[must_use]
pub fn match_type_declaration(source: &str, anchor: usize) -> Option<TypeDeclaration> {
    let bytes = source.as_bytes();
    let start = skip_annotations(bytes, anchor)?;
    let mut pos = start;
    let mut is_abstract = false;

    loop {
        let word = read_identifier(bytes, pos)?;
        let after = skip_trivia(bytes, word.end);
        match word.text(source) {
            modifier if CLASS_MODIFIERS.contains(&modifier) => {
                is_abstract |= modifier == "abstract";
                pos = after;
            }
            // `mixin class X` declares a class
            "mixin" if read_identifier(bytes, after).is_some_and(|w| w.text(source) == "class") => {
                pos = after;
            }
            "class" => {
                let kind = if is_abstract {
                    SymbolKind::AbstractClass
                } else {
                    SymbolKind::Class
                };
                return named_type(source, kind, start, after);
            }
            "mixin" => return named_type(source, SymbolKind::Mixin, start, after),
            "enum" => return named_type(source, SymbolKind::Enum, start, after),
            "extension" => return match_extension(source, start, after),
            _ => return None,
        }
    }
}

fn named_type(source: &str, kind: SymbolKind, start: usize, pos: usize) -> Option<TypeDeclaration> {
    let name = read_identifier(source.as_bytes(), pos)?;
    Some(TypeDeclaration {
        kind,
        start,
        name: name.text(source).to_string(),
        header_end: name.end,
    })
}

fn match_extension(source: &str, start: usize, pos: usize) -> Option<TypeDeclaration> {
    let bytes = source.as_bytes();
    let mut pos = pos;

    // `extension type [const] Id(int v)` is named by the word after `type`.
    // `extension type on T` is an ordinary extension named `type`.
    if let Some(word) = read_identifier(bytes, pos).filter(|w| w.text(source) == "type") {
        let mut next = read_identifier(bytes, skip_trivia(bytes, word.end));
        if let Some(modifier) = next.filter(|w| w.text(source) == "const") {
            next = read_identifier(bytes, skip_trivia(bytes, modifier.end));
        }
        if let Some(name) = next.filter(|n| n.text(source) != "on") {
            pos = name.start;
        }
    }

    if let Some(name) = read_identifier(bytes, pos).filter(|n| n.text(source) != "on") {
        return Some(TypeDeclaration {
            kind: SymbolKind::Extension,
            start,
            name: name.text(source).to_string(),
            header_end: name.end,
        });
    }

    // Unnamed: `extension on T` or `extension<T> on T`
    if bytes.get(pos) == Some(&b'<') {
        pos = skip_trivia(bytes, find_matching_delimiter(bytes, pos, b'<', b'>')? + 1);
    }
    let on = read_identifier(bytes, pos).filter(|w| w.text(source) == "on")?;
    let target_start = skip_trivia(bytes, on.end);
    let target_end = read_type(bytes, target_start)?;
    Some(TypeDeclaration {
        kind: SymbolKind::Extension,
        start,
        name: format!("on {}", &source[target_start..target_end]),
        header_end: target_end,
    })
}

/// Match a function, method or constructor whose body opens with `{`.
///
/// Shape: modifiers, optional return type, name (dotted for named
/// constructors), optional type parameters, parameter list, optional
/// `async`/`async*`/`sync*`, then `{`.
#[must_use]
pub fn match_callable(source: &str, anchor: usize) -> Option<Callable> {
    let bytes = source.as_bytes();
    let start = skip_annotations(bytes, anchor)?;
    let mut pos = start;
    let mut is_factory = false;

    while let Some(word) = read_identifier(bytes, pos) {
        let text = word.text(source);
        if !CALLABLE_MODIFIERS.contains(&text) {
            break;
        }
        is_factory |= text == "factory";
        pos = skip_trivia(bytes, word.end);
    }

    let first = read_name(bytes, pos)?;
    let after_type = skip_trivia(bytes, read_type(bytes, pos)?);
    let name = if bytes.get(after_type) == Some(&b'(') {
        // No return type: `first` is the name, possibly with type parameters.
        first
    } else {
        read_name(bytes, after_type)?
    };
    let after_name = skip_trivia(bytes, name.end);

    if STATEMENT_KEYWORDS.contains(&name.text(source)) {
        return None;
    }

    let mut pos = after_name;
    if bytes.get(pos) == Some(&b'<') {
        pos = skip_trivia(bytes, find_matching_delimiter(bytes, pos, b'<', b'>')? + 1);
    }
    let params_close = find_matching_delimiter(bytes, pos, b'(', b')')?;
    pos = skip_trivia(bytes, params_close + 1);

    if let Some(marker) = read_identifier(bytes, pos) {
        if !matches!(marker.text(source), "async" | "sync") {
            return None;
        }
        pos = marker.end;
        if bytes.get(pos) == Some(&b'*') {
            pos += 1;
        }
        pos = skip_trivia(bytes, pos);
    }

    (bytes.get(pos) == Some(&b'{')).then_some(Callable {
        start,
        name,
        body_open: pos,
        is_factory,
    })
}

/// Match a field or variable binding under `rules`.
#[must_use]
pub fn match_binding(source: &str, anchor: usize, rules: BindingRules) -> Option<Binding> {
    let bytes = source.as_bytes();
    let start = skip_annotations(bytes, anchor)?;
    let mut pos = start;
    let mut has_modifier = false;

    while let Some(word) = read_identifier(bytes, pos) {
        if !FIELD_MODIFIERS.contains(&word.text(source)) {
            break;
        }
        has_modifier = true;
        pos = skip_trivia(bytes, word.end);
    }
    if rules.require_modifier && !has_modifier {
        return None;
    }

    let type_end = read_type(bytes, pos)?;
    let after_type = skip_trivia(bytes, type_end);

    let (name, after_name) = match read_identifier(bytes, after_type) {
        Some(name) => (name, skip_trivia(bytes, name.end)),
        // Type-less binding such as `final x = 1;`
        None => {
            let name = read_identifier(bytes, pos)?;
            if !has_modifier || name.end != type_end {
                return None;
            }
            (name, after_type)
        }
    };

    let terminator = *bytes.get(after_name)?;
    let is_equality = terminator == b'=' && bytes.get(after_name + 1) == Some(&b'=');
    (rules.terminators.contains(&terminator) && !is_equality).then_some(Binding {
        start,
        name,
        end: after_name + 1,
    })
}

/// Skip leading `@annotation` and `@annotation(...)` tokens.
///
/// Returns the position of the first non-annotation token, or `None` when an
/// `@` is not followed by a name or its argument list never closes.
fn skip_annotations(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut pos = pos;
    while bytes.get(pos) == Some(&b'@') {
        let name = read_name(bytes, pos + 1)?;
        pos = name.end;
        if bytes.get(pos) == Some(&b'(') {
            pos = find_matching_delimiter(bytes, pos, b'(', b')')? + 1;
        }
        pos = skip_trivia(bytes, pos);
    }
    Some(pos)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Read a single identifier starting exactly at `pos`.
#[must_use]
pub fn read_identifier(bytes: &[u8], pos: usize) -> Option<NameSpan> {
    if !is_ident_start(*bytes.get(pos)?) {
        return None;
    }
    let len = bytes[pos..].iter().take_while(|&&b| is_ident_byte(b)).count();
    Some(NameSpan {
        start: pos,
        end: pos + len,
    })
}

/// Read an identifier with at most one `.segment` (`Point.origin`).
fn read_name(bytes: &[u8], pos: usize) -> Option<NameSpan> {
    let head = read_identifier(bytes, pos)?;
    if bytes.get(head.end) == Some(&b'.') {
        if let Some(tail) = read_identifier(bytes, head.end + 1) {
            return Some(NameSpan {
                start: head.start,
                end: tail.end,
            });
        }
    }
    Some(head)
}

/// Read a type: a (possibly prefixed) name, optional type arguments, and an
/// optional `?`. Returns the offset just past it.
fn read_type(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut end = read_name(bytes, pos)?.end;
    if bytes.get(end) == Some(&b'<') {
        end = find_matching_delimiter(bytes, end, b'<', b'>')? + 1;
    }
    if bytes.get(end) == Some(&b'?') {
        end += 1;
    }
    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn type_decl(source: &str) -> Option<(SymbolKind, String)> {
        match_type_declaration(source, 0).map(|d| (d.kind, d.name))
    }

    #[rstest]
    #[case::class("class Foo {", SymbolKind::Class, "Foo")]
    #[case::generic_class("class Box<T> {", SymbolKind::Class, "Box")]
    #[case::abstract_class("abstract class Shape {", SymbolKind::AbstractClass, "Shape")]
    #[case::abstract_across_lines("abstract\nclass Shape {", SymbolKind::AbstractClass, "Shape")]
    #[case::sealed_class("sealed class Result {", SymbolKind::Class, "Result")]
    #[case::abstract_interface("abstract interface class Repo {", SymbolKind::AbstractClass, "Repo")]
    #[case::mixin_class("mixin class Walker {", SymbolKind::Class, "Walker")]
    #[case::mixin("mixin Logger {", SymbolKind::Mixin, "Logger")]
    #[case::base_mixin("base mixin Logger on Object {", SymbolKind::Mixin, "Logger")]
    #[case::extension("extension StringX on String {", SymbolKind::Extension, "StringX")]
    #[case::unnamed_extension("extension on List<int> {", SymbolKind::Extension, "on List<int>")]
    #[case::extension_type("extension type Id(int v) {", SymbolKind::Extension, "Id")]
    #[case::const_extension_type("extension type const Meters(double m) {", SymbolKind::Extension, "Meters")]
    #[case::extension_named_type("extension type on Type {", SymbolKind::Extension, "type")]
    #[case::enum_decl("enum Color { red }", SymbolKind::Enum, "Color")]
    #[case::annotated("@immutable\nclass Point {", SymbolKind::Class, "Point")]
    fn recognizes_type_declarations(
        #[case] source: &str,
        #[case] kind: SymbolKind,
        #[case] name: &str,
    ) {
        assert_eq!(type_decl(source), Some((kind, name.to_string())));
    }

    #[rstest]
    #[case::classy("classy Foo {")]
    #[case::missing_name("class {")]
    #[case::final_variable("final x = 1;")]
    #[case::mixin_call("mixin.apply();")]
    #[case::comment("// class Foo {")]
    fn rejects_non_type_declarations(#[case] source: &str) {
        assert_eq!(type_decl(source), None);
    }

    #[test]
    fn type_declaration_starts_after_annotations() {
        let source = "@immutable class Point {";
        let decl = match_type_declaration(source, 0).expect("annotated class");
        assert_eq!(decl.start, 11);
        assert_eq!(decl.header_end, 22);
    }

    fn callable(source: &str) -> Option<(String, bool)> {
        match_callable(source, 0).map(|c| (c.name.text(source).to_string(), c.is_factory))
    }

    #[rstest]
    #[case::no_return_type("main() {", "main")]
    #[case::void("void main() {", "main")]
    #[case::generic_return("Future<List<int>> load(String path) async {", "load")]
    #[case::nullable_return("String? find(int id) {", "find")]
    #[case::static_method("static int twice(int x) {", "twice")]
    #[case::async_star("Stream<int> ticks() async* {", "ticks")]
    #[case::sync_star("Iterable<int> range(int n) sync* {", "range")]
    #[case::type_parameters("T first<T>(List<T> items) {", "first")]
    #[case::nested_parens("void listen(void Function(int) cb) {", "listen")]
    #[case::multi_line_params("void configure(\n  int a,\n  int b,\n) {", "configure")]
    #[case::named_constructor("Point.origin() {", "Point.origin")]
    #[case::annotated("@override\n  void build() {", "build")]
    #[case::comment_before_body("void run() // go\n{", "run")]
    fn recognizes_callables(#[case] source: &str, #[case] name: &str) {
        let (found, _) = callable(source).expect("callable should match");
        assert_eq!(found, name);
    }

    #[test]
    fn factory_constructors_are_flagged() {
        assert_eq!(
            callable("factory Point.fromJson(Map<String, dynamic> json) {"),
            Some(("Point.fromJson".to_string(), true))
        );
    }

    #[rstest]
    #[case::expression_body("int twice(int x) => x * 2;")]
    #[case::abstract_method("void makeSound();")]
    #[case::initializer_list("Point(this.x) : y = 0 {")]
    #[case::if_statement("if (ready) {")]
    #[case::while_statement("while (true) {")]
    #[case::catch_clause("catch (e) {")]
    #[case::unclosed_params("void broken(int a {")]
    #[case::getter("int get length {")]
    fn rejects_non_callables(#[case] source: &str) {
        assert_eq!(callable(source), None);
    }

    fn binding(source: &str, rules: BindingRules) -> Option<(String, usize)> {
        match_binding(source, 0, rules).map(|b| (b.name.text(source).to_string(), b.end))
    }

    #[rstest]
    #[case::typed("String name;", "name")]
    #[case::initialized("int count = 0;", "count")]
    #[case::generic("Map<String, int> scores = {};", "scores")]
    #[case::nullable("String? nickname;", "nickname")]
    #[case::final_typed("final int id;", "id")]
    #[case::final_untyped("final id = 7;", "id")]
    #[case::modifier_chain("static final int max = 5;", "max")]
    #[case::late("late final String label;", "label")]
    #[case::prefixed_type("ui.Color tint = x;", "tint")]
    fn recognizes_fields(#[case] source: &str, #[case] name: &str) {
        let (found, end) = binding(source, FIELD_RULES).expect("field should match");
        assert_eq!(found, name);
        assert!(matches!(source.as_bytes()[end - 1], b'=' | b';'));
    }

    #[rstest]
    #[case::method_declaration("void makeSound();")]
    #[case::constructor("Point(this.x);")]
    #[case::const_constructor("const Point(this.x);")]
    #[case::getter("int get length => 0;")]
    #[case::comparison("a == b;")]
    #[case::bare_expression("value;")]
    fn rejects_non_fields(#[case] source: &str) {
        assert_eq!(binding(source, FIELD_RULES), None);
    }

    #[rstest]
    #[case::final_var("final apiUrl = 'x';", "apiUrl")]
    #[case::const_var("const limit = 10;", "limit")]
    #[case::var("var counter = 0;", "counter")]
    #[case::typed_final("final Duration timeout = Duration.zero;", "timeout")]
    fn recognizes_variables(#[case] source: &str, #[case] name: &str) {
        let (found, _) = binding(source, VARIABLE_RULES).expect("variable should match");
        assert_eq!(found, name);
    }

    #[rstest]
    #[case::no_modifier("int counter = 0;")]
    #[case::no_initializer("final int counter;")]
    fn rejects_non_variables(#[case] source: &str) {
        assert_eq!(binding(source, VARIABLE_RULES), None);
    }
}
