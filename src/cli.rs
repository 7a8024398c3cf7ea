//! Command-line interface for the importer.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::diagnostics::DiagnosticKind;
use crate::error::{ImportError, Result};
use crate::import::import_questions;
use crate::output::save_yaml;

/// Fronter Import - Convert legacy quiz exports to YAML.
#[derive(Parser)]
#[command(name = "fronter-import")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one export file to a YAML question batch.
    Convert {
        /// Path to the exported XML file
        input: PathBuf,

        /// Output file (default: input with a .yaml extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output } => convert_command(&input, output.as_deref()),
    }
}

/// Execute the convert command.
fn convert_command(input: &Path, output: Option<&Path>) -> Result<()> {
    let content = fs::read_to_string(input).map_err(|source| ImportError::InputRead {
        path: input.to_path_buf(),
        source,
    })?;
    // Exports occasionally break elements across lines mid-text; the legacy
    // importer joined lines with spaces before parsing, and downstream
    // whitespace handling depends on that.
    let content = content.lines().collect::<Vec<_>>().join(" ");

    println!(
        "{} {}",
        style("Converting").bold(),
        style(input.display()).cyan()
    );

    let report = import_questions(&content);

    if let Some(parse_failure) = report
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::DocumentParse)
    {
        return Err(ImportError::MalformedDocument(parse_failure.message.clone()));
    }

    println!("  Questions: {}", style(report.questions.len()).green());
    for question in &report.questions {
        println!("    {} ({})", question.name(), question.qtype());
    }
    if !report.diagnostics.is_empty() {
        println!(
            "  Diagnostics: {}",
            style(report.diagnostics.len()).yellow().bold()
        );
        for diagnostic in &report.diagnostics {
            match &diagnostic.item {
                Some(item) => println!("    [{item}] {}", diagnostic.message),
                None => println!("    {}", diagnostic.message),
            }
        }
    }

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("yaml"),
    };
    save_yaml(&report, &output_path)?;

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}
