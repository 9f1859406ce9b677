//! Output formatting for CLI commands.
//!
//! Generated code goes to stdout untouched so it can be piped; warnings and
//! notes go to stderr.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::run::CommandResult;
use crate::core::{Outcome, PageEntry, StderrSink, WarningSink};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

const MISSING: &str = "-";

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    for warning in result.warnings() {
        StderrSink.report(warning);
    }

    let stdout = &mut io::stdout().lock();
    match result {
        CommandResult::Transform { outcome, .. } => print_outcome(outcome, verbose, stdout),
        CommandResult::Scan { index, json, .. } => {
            if *json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&index.pages)?)?;
            } else {
                print_pages_to(&index.pages, stdout)?;
                writeln!(
                    stdout,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!(
                        "Scanned {} {}, {} with route configuration",
                        index.scanned_files,
                        if index.scanned_files == 1 { "file" } else { "files" },
                        index.pages.len()
                    )
                    .green()
                )?;
            }
            if index.skipped_files > 0 {
                eprintln!(
                    "{} {} file(s) could not be read",
                    "warning:".bold().yellow(),
                    index.skipped_files
                );
            }
            Ok(())
        }
        CommandResult::Init { path } => {
            writeln!(
                stdout,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", path.display()).green()
            )?;
            Ok(())
        }
    }
}

fn print_outcome<W: Write>(outcome: &Outcome, verbose: bool, writer: &mut W) -> Result<()> {
    match outcome.code() {
        Some(code) => writeln!(writer, "{}", code)?,
        None if verbose => eprintln!("{} no transform needed", "note:".bold().cyan()),
        None => {}
    }
    Ok(())
}

/// Print pages as aligned `file  name  path` rows.
pub fn print_pages_to<W: Write>(pages: &[PageEntry], writer: &mut W) -> Result<()> {
    let file_width = pages.iter().map(|p| p.file.width()).max().unwrap_or(0);
    let name_width = pages
        .iter()
        .map(|p| p.config.name.as_deref().unwrap_or(MISSING).width())
        .max()
        .unwrap_or(0);

    for page in pages {
        let name = page.config.name.as_deref().unwrap_or(MISSING);
        let path = page.config.path.as_deref().unwrap_or(MISSING);
        writeln!(
            writer,
            "{}{}  {}{}  {}",
            page.file.cyan(),
            " ".repeat(file_width - page.file.width()),
            name,
            " ".repeat(name_width - name.width()),
            path
        )?;
    }
    Ok(())
}
