//! `symnav outline` command implementation.

use std::path::Path;

use colored::Colorize;
use symnav::{handle_request, Config, ParseRequest};

use super::display::print_symbol_tree;
use super::load_source;

/// Run the outline command.
pub fn run(
    file: &Path,
    language: Option<&str>,
    json: bool,
    config: &Config,
) -> Result<(), symnav::Error> {
    let (content, tag) = load_source(file, language, config)?;
    let request = ParseRequest {
        content,
        language: tag,
        file_path: file.display().to_string(),
    };
    let response = handle_request(&request, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{} {}",
        file.display().to_string().white().bold(),
        format!("({})", response.language).dimmed()
    );

    if response.symbols.is_empty() {
        println!("  {}", "No symbols found".dimmed());
        return Ok(());
    }

    print_symbol_tree(&response.symbols);
    Ok(())
}
