//! `symnav manifest` command implementation.

use symnav::manifest;

/// Print the manifest as JSON.
pub fn run() -> Result<(), symnav::Error> {
    println!("{}", serde_json::to_string_pretty(&manifest())?);
    Ok(())
}
