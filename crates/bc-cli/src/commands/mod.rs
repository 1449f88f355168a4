pub mod case;
pub mod config;
pub mod preload;

use anyhow::{Context, Result};

/// Read a file, or stdin when `source` is "-"
pub fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source))
    }
}
