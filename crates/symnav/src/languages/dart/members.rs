//! Member extraction for a single type body.
//!
//! The body is walked byte by byte in code state. A member may start at
//! every boundary: just inside the opening brace, after `;`, after a
//! newline, and after a nested block that was skipped whole. Method and
//! constructor bodies are skipped, so nothing declared inside them is ever
//! reported as a member.

use super::declarations::body_end;
use super::patterns::{match_binding, match_callable, Callable, FIELD_RULES};
use crate::position::LineIndex;
use crate::scanner::{find_matching_brace, skip_literal_or_comment, skip_trivia};
use crate::types::{Symbol, SymbolKind};

/// Extract the members of the type `type_name` whose body spans
/// `body_open..body_close`.
///
/// `body_close` is the offset of the closing `}`, or the content length when
/// the body never closes.
#[must_use]
pub fn extract_members(
    source: &str,
    index: &LineIndex,
    body_open: usize,
    body_close: usize,
    type_name: &str,
) -> Vec<Symbol> {
    let bytes = source.as_bytes();
    let mut members = Vec::new();
    let mut pos = body_open + 1;
    let mut at_boundary = true;

    while pos < body_close {
        if at_boundary {
            at_boundary = false;
            let anchor = skip_trivia(bytes, pos);
            if anchor >= body_close {
                break;
            }

            if let Some(callable) =
                match_callable(source, anchor).filter(|c| c.body_open < body_close)
            {
                let end = body_end(bytes, callable.body_open, callable.name.text(source));
                members.push(
                    Symbol::new(
                        callable.name.text(source),
                        callable_kind(source, &callable, type_name),
                        index.location(callable.start, end),
                    )
                    .with_parent(type_name),
                );
                pos = end + 1;
                at_boundary = true;
                continue;
            }

            if let Some(binding) =
                match_binding(source, anchor, FIELD_RULES).filter(|b| b.end <= body_close)
            {
                members.push(
                    Symbol::new(
                        binding.name.text(source),
                        SymbolKind::Field,
                        index.location(binding.start, binding.end),
                    )
                    .with_parent(type_name),
                );
                pos = binding.end;
                at_boundary = bytes[binding.end - 1] == b';';
                continue;
            }

            pos = anchor;
            continue;
        }

        if let Some(next) = skip_literal_or_comment(bytes, pos) {
            pos = next;
            continue;
        }

        match bytes[pos] {
            b'\n' | b';' | b'}' => at_boundary = true,
            b'{' => match find_matching_brace(bytes, pos) {
                Some(close) => {
                    pos = close + 1;
                    at_boundary = true;
                    continue;
                }
                None => break,
            },
            _ => {}
        }
        pos += 1;
    }

    members
}

/// Constructors are named after their type, optionally with a `.name`
/// suffix, or are declared `factory`.
fn callable_kind(source: &str, callable: &Callable, type_name: &str) -> SymbolKind {
    let name = callable.name.text(source);
    let named_after_type = name
        .strip_prefix(type_name)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'));

    if callable.is_factory || named_after_type {
        SymbolKind::Constructor
    } else {
        SymbolKind::Method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Members of the first `{ ... }` body in `source`, parented to `name`.
    fn members(source: &str, name: &str) -> Vec<Symbol> {
        let open = source.find('{').expect("body");
        let close = find_matching_brace(source.as_bytes(), open).unwrap_or(source.len());
        extract_members(source, &LineIndex::new(source), open, close, name)
    }

    fn names_and_kinds(symbols: &[Symbol]) -> Vec<(&str, SymbolKind)> {
        symbols.iter().map(|s| (s.name.as_str(), s.kind)).collect()
    }

    #[test]
    fn fields_and_methods_in_source_order() {
        let source = "\
class MyClass {
  String name;
  int age;

  void greet() {
    print('Hello');
  }
}";
        let found = members(source, "MyClass");

        assert_eq!(
            names_and_kinds(&found),
            vec![
                ("name", SymbolKind::Field),
                ("age", SymbolKind::Field),
                ("greet", SymbolKind::Method),
            ]
        );
        assert!(found.iter().all(|m| m.parent == "MyClass"));
    }

    #[test]
    fn brace_inside_string_does_not_end_the_class() {
        let source = r#"class X { String s = "{"; void m() {} }"#;
        let found = members(source, "X");

        let methods: Vec<&Symbol> = found.iter().filter(|m| m.kind == SymbolKind::Method).collect();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "m");

        let body = &source[source.find("m()").expect("method") + 4..=methods[0].location.end_offset];
        assert_eq!(body, "{}");
    }

    #[rstest]
    #[case::unnamed("Point(int x) {}", "Point", SymbolKind::Constructor)]
    #[case::named("Point.origin() {}", "Point.origin", SymbolKind::Constructor)]
    #[case::factory("factory Point.fromJson(Map json) {}", "Point.fromJson", SymbolKind::Constructor)]
    #[case::prefix_is_not_enough("PointCloud cloud() {}", "cloud", SymbolKind::Method)]
    #[case::method("double distance(Point other) {}", "distance", SymbolKind::Method)]
    #[case::static_method("static Point parse(String s) {}", "parse", SymbolKind::Method)]
    fn classifies_callables(#[case] member: &str, #[case] name: &str, #[case] kind: SymbolKind) {
        let source = format!("class Point {{\n  {member}\n}}");
        let found = members(&source, "Point");

        assert_eq!(names_and_kinds(&found), vec![(name, kind)]);
    }

    #[test]
    fn locals_inside_method_bodies_are_not_members() {
        let source = "\
class Counter {
  int value = 0;
  void increment() {
    final int step = 1;
    if (value > 10) {
      String message = 'big';
    }
    value += step;
  }
}";
        let found = members(source, "Counter");

        assert_eq!(
            names_and_kinds(&found),
            vec![("value", SymbolKind::Field), ("increment", SymbolKind::Method)]
        );
    }

    #[test]
    fn abstract_and_expression_bodied_members_are_skipped() {
        let source = "\
abstract class Shape {
  double area();
  double get perimeter => 0;
  String describe() => 'shape';
  void draw() {}
}";
        let found = members(source, "Shape");

        assert_eq!(names_and_kinds(&found), vec![("draw", SymbolKind::Method)]);
    }

    #[test]
    fn multi_line_initializer_does_not_leak_members() {
        let source = "\
class Routes {
  final Map<String, int> table = {
    'home': 1,
  };
  void go() {}
}";
        let found = members(source, "Routes");

        assert_eq!(
            names_and_kinds(&found),
            vec![("table", SymbolKind::Field), ("go", SymbolKind::Method)]
        );
    }

    #[test]
    fn method_span_ends_at_its_closing_brace() {
        let source = "class A {\n  void run() {\n    work();\n  }\n}";
        let found = members(source, "A");

        let location = &found[0].location;
        assert_eq!((location.start_line, location.start_column), (1, 2));
        assert_eq!((location.end_line, location.end_column), (3, 2));
    }

    #[test]
    fn field_span_is_the_declaration_header() {
        let source = "class A {\n  int count = 0;\n}";
        let found = members(source, "A");

        let location = &found[0].location;
        assert_eq!(&source[location.start_offset..location.end_offset], "int count =");
    }

    #[test]
    fn unterminated_method_stops_the_walk() {
        let source = "class A {\n  void run() {\n    work();\n";
        let found = members(source, "A");

        assert_eq!(names_and_kinds(&found), vec![("run", SymbolKind::Method)]);
        assert_eq!(found[0].location.end_offset, source.len());
    }
}
