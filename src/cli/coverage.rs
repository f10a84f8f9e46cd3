use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::cli::{delimited_writer, open_output, InputArgs, OutputFormat};
use crate::core::types::CoverageInterval;
use crate::resolve::batch::group_by_query;
use crate::resolve::coverage::contig_coverage;

#[derive(Args)]
pub struct CoverageArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Coverage of one contig
struct ContigCoverage {
    query_id: String,
    query_length: u64,
    intervals: Vec<CoverageInterval>,
}

impl ContigCoverage {
    /// Bases covered by at least one hit
    fn covered_bases(&self) -> u64 {
        self.intervals.iter().map(CoverageInterval::len).sum()
    }
}

/// Execute coverage subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CoverageArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let hits = args.input.load_hits()?;

    if verbose {
        eprintln!(
            "Parsed {} hits from {}",
            hits.len(),
            args.input.input.display()
        );
    }

    if hits.is_empty() {
        eprintln!("No hits found in input.");
        return Ok(());
    }

    let coverages: Vec<ContigCoverage> = group_by_query(hits)
        .into_iter()
        .map(|(query_id, contig_hits)| ContigCoverage {
            query_length: contig_hits.first().map_or(0, |hit| hit.query_length),
            intervals: contig_coverage(&contig_hits),
            query_id,
        })
        .collect();

    let mut out = open_output(args.output.as_deref())?;

    match format {
        OutputFormat::Text => write_text(&mut out, &coverages)?,
        OutputFormat::Json => write_json(&mut out, &coverages)?,
        OutputFormat::Tsv => write_delimited(&mut out, &coverages, b'\t')?,
        OutputFormat::Csv => write_delimited(&mut out, &coverages, b',')?,
    }

    out.flush()?;
    Ok(())
}

fn write_delimited(
    out: &mut dyn Write,
    coverages: &[ContigCoverage],
    delimiter: u8,
) -> anyhow::Result<()> {
    let mut writer = delimited_writer(out, delimiter);
    writer.write_record(["query_id", "start", "end", "length"])?;

    for coverage in coverages {
        for interval in &coverage.intervals {
            writer.write_record([
                coverage.query_id.clone(),
                interval.start.to_string(),
                interval.end.to_string(),
                interval.len().to_string(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn write_json(out: &mut dyn Write, coverages: &[ContigCoverage]) -> anyhow::Result<()> {
    let output: Vec<_> = coverages
        .iter()
        .map(|coverage| {
            serde_json::json!({
                "query_id": coverage.query_id,
                "query_length": coverage.query_length,
                "covered_bases": coverage.covered_bases(),
                "intervals": coverage.intervals,
            })
        })
        .collect();

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn write_text(out: &mut dyn Write, coverages: &[ContigCoverage]) -> anyhow::Result<()> {
    for coverage in coverages {
        let intervals: Vec<String> = coverage
            .intervals
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(
            out,
            "{} ({} bp, {} covered): {}",
            coverage.query_id,
            coverage.query_length,
            coverage.covered_bases(),
            intervals.join(", ")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverages() -> Vec<ContigCoverage> {
        vec![
            ContigCoverage {
                query_id: "k1_1".to_string(),
                query_length: 500,
                intervals: vec![CoverageInterval::new(1, 201), CoverageInterval::new(251, 500)],
            },
            ContigCoverage {
                query_id: "k2_1".to_string(),
                query_length: 535,
                intervals: vec![CoverageInterval::new(1, 535)],
            },
        ]
    }

    #[test]
    fn test_covered_bases() {
        assert_eq!(coverages()[0].covered_bases(), 451);
    }

    #[test]
    fn test_write_delimited() {
        let mut buf = Vec::new();
        write_delimited(&mut buf, &coverages(), b',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "query_id,start,end,length\nk1_1,1,201,201\nk1_1,251,500,250\nk2_1,1,535,535\n"
        );
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&mut buf, &coverages()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["intervals"][1]["start"], 251);
        assert_eq!(value[1]["covered_bases"], 535);
    }

    #[test]
    fn test_write_text() {
        let mut buf = Vec::new();
        write_text(&mut buf, &coverages()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("k1_1 (500 bp, 451 covered): 1-201, 251-500\n"));
    }
}
