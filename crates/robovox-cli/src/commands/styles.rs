//! Styles command implementation
//!
//! Lists the active style table.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use robovox_spec::{note_name, StyleTable};

/// Run the styles command
///
/// With `json_output` the full table is printed in the same format
/// `--styles` accepts.
pub fn run(styles: &StyleTable, json_output: bool) -> Result<ExitCode> {
    if json_output {
        println!("{}", styles.to_json_pretty()?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} ({})", "Styles".cyan().bold(), styles.len());
    for style in styles.iter() {
        let roots: Vec<String> = style.roots.iter().map(|&r| note_name(r)).collect();
        let vocal = if style.vocal.is_some() {
            "vocal".green()
        } else {
            "-".dimmed()
        };
        println!(
            "  {} {:>3}-{:<3} bpm  drive {:.2}  {}  [{}]",
            format!("{:<10}", style.id).bold(),
            style.tempo.min,
            style.tempo.max,
            style.drive,
            vocal,
            roots.join(" ")
        );
    }

    Ok(ExitCode::SUCCESS)
}
