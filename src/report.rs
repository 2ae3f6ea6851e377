//! Output formatting for extraction runs.
//!
//! Supports four output formats:
//! - Text: the plain line layout of [`TextSink`], one line per fact
//! - Pretty: colored terminal output grouped by file
//! - JSON: structured output for programmatic consumption
//! - Trace: raw source text behind every record, for debugging the parser
//!
//! Records of a failed file are never reported; the failure itself is.

use std::io::Write;

use colored::*;
use serde::Serialize;

use crate::records::Declaration;
use crate::runner::{ExtractionResult, FileExtraction};
use crate::sink::{Sink, TextSink, TraceSink};

// =============================================================================
// Text and trace formats
// =============================================================================

/// Write the records of every successful file, in path order.
pub fn write_text<W: Write>(out: &mut W, result: &ExtractionResult) -> anyhow::Result<()> {
    let mut sink = TextSink::new(out);
    for record in successful(result).flat_map(|f| f.declarations()) {
        sink.accept(record.clone())?;
    }
    sink.flush()?;
    Ok(())
}

/// Write a raw-text trace of every successful file, each under a header line.
pub fn write_trace<W: Write>(out: &mut W, result: &ExtractionResult) -> anyhow::Result<()> {
    for file in successful(result) {
        writeln!(out, "file {}", file.path)?;
        let mut sink = TraceSink::new(&file.source, &mut *out);
        for record in file.declarations() {
            sink.accept(record.clone())?;
        }
        sink.flush()?;
    }
    Ok(())
}

fn successful(result: &ExtractionResult) -> impl Iterator<Item = &FileExtraction> {
    result.files.iter().filter(|f| f.outcome.is_ok())
}

// =============================================================================
// JSON format
// =============================================================================

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
pub struct JsonFile<'a> {
    pub path: &'a str,
    pub declarations: &'a [Declaration],
    pub error: Option<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new(path: &str, result: &'a ExtractionResult) -> Self {
        let files = result
            .files
            .iter()
            .map(|f| JsonFile {
                path: &f.path,
                declarations: f.declarations(),
                error: f.error().map(|e| e.kind.to_string()),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            files_scanned: result.scanned(),
            files_failed: result.failed(),
            files,
        }
    }
}

/// Write results in JSON format.
pub fn write_json<W: Write>(
    out: &mut W,
    path: &str,
    result: &ExtractionResult,
) -> anyhow::Result<()> {
    let report = JsonReport::new(path, result);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// Pretty format
// =============================================================================

/// Write colored, human-oriented output.
pub fn write_pretty<W: Write>(
    out: &mut W,
    path: &str,
    config_path: Option<&str>,
    result: &ExtractionResult,
) -> anyhow::Result<()> {
    // Header
    writeln!(out)?;
    writeln!(
        out,
        "  {} v{}",
        "visionscan".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    writeln!(out, "  {}{}", "Scanning: ".dimmed(), path)?;
    writeln!(
        out,
        "  {}{}",
        "Config:   ".dimmed(),
        config_path.unwrap_or("(defaults)")
    )?;
    writeln!(out)?;

    for file in &result.files {
        write_file(out, file)?;
    }
    if !result.files.is_empty() {
        writeln!(out)?;
    }

    write_summary(out, result)?;
    writeln!(out)?;
    Ok(())
}

fn write_file<W: Write>(out: &mut W, file: &FileExtraction) -> anyhow::Result<()> {
    match &file.outcome {
        Ok(records) => {
            writeln!(out, "  {}", file.path.bold())?;
            for record in records {
                write_declaration(out, record)?;
            }
        }
        Err(err) => {
            writeln!(out, "  {}", file.path.bold().red())?;
            writeln!(out, "    {} {}", "✗".red(), err.kind)?;
        }
    }
    Ok(())
}

fn write_declaration<W: Write>(out: &mut W, record: &Declaration) -> anyhow::Result<()> {
    let location = format!("{:>7}", record.span().to_string()).dimmed();
    match record {
        Declaration::Package(package) => {
            writeln!(out, "  {} {} {}", location, "package".magenta(), package.name)?;
        }
        Declaration::Interface(interface) => {
            writeln!(
                out,
                "  {} {} {}",
                location,
                "interface".blue(),
                interface.name.bold()
            )?;
        }
        Declaration::Class(class) => {
            writeln!(out, "  {} {} {}", location, "class".green(), class.name.bold())?;
            for field in &class.fields {
                writeln!(
                    out,
                    "  {}     {}: {}",
                    " ".repeat(7),
                    field.name,
                    field.ty.yellow()
                )?;
            }
            for method in &class.methods {
                writeln!(
                    out,
                    "  {}     {} {}",
                    " ".repeat(7),
                    "fun".cyan(),
                    method.name
                )?;
            }
        }
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, result: &ExtractionResult) -> anyhow::Result<()> {
    let counts = format!(
        "{} files, {} declarations",
        result.scanned(),
        result.declaration_count()
    );
    if result.is_success() {
        writeln!(out, "  {}  {}", "✓ OK".green(), counts)?;
    } else {
        writeln!(
            out,
            "  {}  {} ({} failed)",
            "✗ FAIL".red(),
            counts,
            result.failed()
        )?;
    }
    Ok(())
}
