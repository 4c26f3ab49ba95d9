//! Symbol tree rendering for CLI output.

use colored::{ColoredString, Colorize};
use symnav::{Symbol, SymbolKind};

/// Print symbols as a tree with connector lines:
///
/// ```text
/// ├── class Greeter  1:1
/// │   ├── field name  2:3
/// │   └── method greet  4:3
/// └── function main  8:1
/// ```
///
/// Positions are 1-based for humans.
pub fn print_symbol_tree(symbols: &[Symbol]) {
    print_children(symbols, &mut Vec::new());
}

/// `has_more` records, per ancestor level, whether siblings follow below it.
fn print_children(symbols: &[Symbol], has_more: &mut Vec<bool>) {
    for (i, symbol) in symbols.iter().enumerate() {
        let is_last = i == symbols.len() - 1;

        let prefix: String = has_more
            .iter()
            .map(|&more| if more { "│   " } else { "    " })
            .collect();
        let connector = if is_last { "└── " } else { "├── " };

        println!(
            "{}{} {}{}",
            format!("{prefix}{connector}").dimmed(),
            colorize_kind(symbol.kind),
            symbol.name.white().bold(),
            format!(
                "  {}:{}",
                symbol.location.start_line + 1,
                symbol.location.start_column + 1
            )
            .dimmed()
        );

        if !symbol.children.is_empty() {
            has_more.push(!is_last);
            print_children(&symbol.children, has_more);
            has_more.pop();
        }
    }
}

fn colorize_kind(kind: SymbolKind) -> ColoredString {
    let label = kind.as_str();
    match kind {
        k if k.is_type() => label.cyan(),
        SymbolKind::Function | SymbolKind::Method => label.green(),
        SymbolKind::Constructor => label.yellow(),
        _ => label.blue(),
    }
}
