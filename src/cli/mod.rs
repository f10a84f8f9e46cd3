//! Command-line interface for contig-origin.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **resolve**: Assign each contig in a hit table to its origin hit(s)
//! - **coverage**: Report the merged coverage intervals of each contig
//!
//! ## Usage
//!
//! ```text
//! # Resolve contigs from a BLAST tabular file
//! contig-origin resolve hits.tsv
//!
//! # CSV input, CSV output written to a file
//! contig-origin --format csv resolve hits.csv --output resolved.csv
//!
//! # Pipe from another tool
//! parse_blast results.xml | contig-origin --format json resolve -
//!
//! # Inspect which regions of each contig are covered
//! contig-origin coverage hits.tsv.gz
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use csv::WriterBuilder;

use crate::core::hit::Hit;
use crate::parsing;

pub mod coverage;
pub mod resolve;

#[derive(Parser)]
#[command(name = "contig-origin")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Resolve the origin organism(s) of contigs from alignment hits")]
#[command(
    long_about = "contig-origin decides, for each assembled contig, which reference organism it came from.\n\nGiven the search hits of every contig against a reference database it reports:\n- A single best hit when one organism explains the whole contig\n- One best hit per covered region when the contig is a chimera"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "tsv")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assign each contig to its best-supported origin hit(s)
    Resolve(resolve::ResolveArgs),

    /// Report merged coverage intervals per contig
    Coverage(coverage::CoverageArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
    Csv,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    Tsv,
    Csv,
}

impl InputFormat {
    #[must_use]
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            Self::Csv => b',',
        }
    }
}

/// Hit table input shared by all commands
#[derive(clap::Args)]
pub struct InputArgs {
    /// Hit table (TSV or CSV, optionally gzipped). Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (auto-detected from the extension by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,
}

impl InputArgs {
    /// Parse the hit table
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or parsed.
    pub fn load_hits(&self) -> anyhow::Result<Vec<Hit>> {
        let format = self
            .input_format
            .unwrap_or_else(|| detect_format(&self.input));

        if self.input.to_string_lossy() == "-" {
            let stdin = io::stdin();
            return parsing::hits::parse_hits_reader(stdin.lock(), format.delimiter())
                .context("Failed to parse hits from stdin");
        }

        parsing::hits::parse_hits_file(&self.input, format.delimiter())
            .with_context(|| format!("Failed to parse hits from {}", self.input.display()))
    }
}

/// Detect input format from file extension, ignoring a trailing `.gz`/`.bgz`
fn detect_format(path: &Path) -> InputFormat {
    let path_str = path.to_string_lossy().to_lowercase();
    let stem = path_str
        .strip_suffix(".gz")
        .or_else(|| path_str.strip_suffix(".bgz"))
        .unwrap_or(&path_str);

    if stem.ends_with(".csv") {
        InputFormat::Csv
    } else {
        InputFormat::Tsv // BLAST tabular output is tab-delimited
    }
}

/// Open the output destination: the given file, or stdout
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Delimited record writer; fields holding the delimiter or a quote are quoted
pub fn delimited_writer(out: &mut dyn Write, delimiter: u8) -> csv::Writer<&mut dyn Write> {
    WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(out)
}

/// Format an e-value compactly: `0`, plain decimals, or scientific notation
#[must_use]
pub fn format_e_val(e_val: f64) -> String {
    if e_val == 0.0 {
        "0".to_string()
    } else if (1e-4..1e6).contains(&e_val.abs()) {
        format!("{e_val}")
    } else {
        format!("{e_val:e}")
    }
}
