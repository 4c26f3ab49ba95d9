//! `symnav request` command implementation.
//!
//! Reads one JSON-encoded parse request and writes the JSON response, the
//! same exchange a host performs through the boundary layer.

use std::io::{Read, Write};
use std::path::Path;

use symnav::{handle_request_json, Config};

/// Run the request command, reading from `input` or stdin.
pub fn run(input: Option<&Path>, config: &Config) -> Result<(), symnav::Error> {
    let bytes = match input {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };

    let response = handle_request_json(&bytes, config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&response)?;
    writeln!(stdout)?;
    Ok(())
}
