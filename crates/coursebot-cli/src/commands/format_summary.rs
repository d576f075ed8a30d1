use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use coursebot_core::render::format_summary;

pub fn run(file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    println!("{}", format_summary(&text));
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => io::read_to_string(io::stdin()).context("Failed to read stdin"),
    }
}
