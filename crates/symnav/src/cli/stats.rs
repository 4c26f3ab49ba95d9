//! `symnav stats` command implementation.

use std::path::Path;

use colored::Colorize;
use symnav::{handle_request, Config, ParseRequest, SymbolKind};

use super::load_source;

/// Run the stats command.
pub fn run(file: &Path, language: Option<&str>, config: &Config) -> Result<(), symnav::Error> {
    let (content, tag) = load_source(file, language, config)?;
    let bytes = content.len();
    let request = ParseRequest {
        content,
        language: tag,
        file_path: file.display().to_string(),
    };
    let response = handle_request(&request, config)?;

    println!("{}", "Symbol Statistics".cyan().bold());
    println!();
    println!(
        "  {}: {} ({}, {} bytes)",
        "File".white().bold(),
        file.display(),
        response.language,
        bytes
    );
    println!(
        "  {}: {} ms",
        "Parse time".white().bold(),
        response.parse_duration_ms
    );
    println!();

    let total: usize = response.statistics.values().sum();
    println!(
        "  {}: {} total",
        "Symbols".white().bold(),
        total.to_string().green()
    );

    // Sort by count descending, then by kind for deterministic output
    let mut kind_counts: Vec<_> = response.statistics.into_iter().collect();
    kind_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    for (kind, count) in kind_counts {
        println!("    {}: {}", plural_label(kind).dimmed(), count);
    }

    Ok(())
}

fn plural_label(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::Class => "Classes",
        SymbolKind::AbstractClass => "Abstract Classes",
        SymbolKind::Mixin => "Mixins",
        SymbolKind::Extension => "Extensions",
        SymbolKind::Enum => "Enums",
        SymbolKind::Typedef => "Typedefs",
        SymbolKind::Function => "Functions",
        SymbolKind::Method => "Methods",
        SymbolKind::Constructor => "Constructors",
        SymbolKind::Getter => "Getters",
        SymbolKind::Setter => "Setters",
        SymbolKind::Field => "Fields",
        SymbolKind::Property => "Properties",
        SymbolKind::Constant => "Constants",
        SymbolKind::Variable => "Variables",
        SymbolKind::EnumValue => "Enum Values",
        SymbolKind::Parameter => "Parameters",
    }
}
