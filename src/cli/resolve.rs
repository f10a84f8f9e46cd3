use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{delimited_writer, format_e_val, open_output, InputArgs, OutputFormat};
use crate::parsing::hits::HIT_COLUMNS;
use crate::resolve::batch::{resolve_all, ContigResolution, ResolutionSummary};
use crate::resolve::resolver::{ResolveConfig, SpanPolicy};

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Reject hits whose start lies after their end instead of warning
    #[arg(long)]
    pub strict_spans: bool,

    /// Number of worker threads (defaults to one per core)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed, a contig cannot be
/// resolved, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
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

    let config = ResolveConfig {
        span_policy: if args.strict_spans {
            SpanPolicy::Strict
        } else {
            SpanPolicy::Warn
        },
        threads: args.threads,
    };

    let resolutions = resolve_all(hits, &config).context("Failed to resolve contigs")?;
    let summary = ResolutionSummary::from_resolutions(&resolutions);

    if verbose {
        eprintln!(
            "Resolved {} contigs: {} single, {} chimera",
            summary.contigs, summary.single, summary.chimera
        );
    }

    let mut out = open_output(args.output.as_deref())?;

    match format {
        OutputFormat::Text => write_text(&mut out, &resolutions, &summary)?,
        OutputFormat::Json => write_json(&mut out, &resolutions, &summary)?,
        OutputFormat::Tsv => write_delimited(&mut out, &resolutions, b'\t')?,
        OutputFormat::Csv => write_delimited(&mut out, &resolutions, b',')?,
    }

    out.flush()?;

    if verbose {
        if let Some(path) = &args.output {
            eprintln!("Wrote {} assignments to {}", summary.assignments, path.display());
        }
    }

    Ok(())
}

fn write_delimited(
    out: &mut dyn Write,
    resolutions: &[ContigResolution],
    delimiter: u8,
) -> anyhow::Result<()> {
    let mut writer = delimited_writer(out, delimiter);
    writer.write_record(HIT_COLUMNS.into_iter().chain(["origin"]))?;

    for assignment in resolutions.iter().flat_map(|r| &r.assignments) {
        let hit = &assignment.hit;
        writer.write_record([
            hit.query_id.clone(),
            hit.hit_id.clone(),
            format_e_val(hit.e_val),
            hit.query_length.to_string(),
            hit.alignment_length.to_string(),
            hit.start.to_string(),
            hit.end.to_string(),
            assignment.origin.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_json(
    out: &mut dyn Write,
    resolutions: &[ContigResolution],
    summary: &ResolutionSummary,
) -> anyhow::Result<()> {
    let assignments: Vec<_> = resolutions.iter().flat_map(|r| &r.assignments).collect();

    let output = serde_json::json!({
        "summary": summary,
        "assignments": assignments,
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn write_text(
    out: &mut dyn Write,
    resolutions: &[ContigResolution],
    summary: &ResolutionSummary,
) -> anyhow::Result<()> {
    for resolution in resolutions {
        if resolution.is_chimera() {
            writeln!(
                out,
                "{}: CHIMERA ({} regions from {} hits)",
                resolution.query_id,
                resolution.coverage.len(),
                resolution.hit_count
            )?;
            for (interval, assignment) in resolution.coverage.iter().zip(&resolution.assignments) {
                writeln!(
                    out,
                    "   region {interval}: {} (e_val {}, alignment {} bp, span {}-{})",
                    assignment.hit.hit_id,
                    format_e_val(assignment.hit.e_val),
                    assignment.hit.alignment_length,
                    assignment.hit.start,
                    assignment.hit.end,
                )?;
            }
        } else {
            for assignment in &resolution.assignments {
                writeln!(
                    out,
                    "{}: SINGLE {} (e_val {}, alignment {}/{} bp, from {} hits)",
                    resolution.query_id,
                    assignment.hit.hit_id,
                    format_e_val(assignment.hit.e_val),
                    assignment.hit.alignment_length,
                    assignment.hit.query_length,
                    resolution.hit_count
                )?;
            }
        }
    }

    writeln!(out, "\n{}", "=".repeat(60))?;
    writeln!(
        out,
        "Contigs: {} ({} single, {} chimera)",
        summary.contigs, summary.single, summary.chimera
    )?;
    writeln!(out, "Hits: {}", summary.hits)?;
    writeln!(out, "Assignments: {}", summary.assignments)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hit::Hit;
    use crate::parsing::hits::parse_hits_text;

    fn resolutions() -> Vec<ContigResolution> {
        let hits = vec![
            Hit::new("k1_1", "GCF_001", 0.0, 500, 200, 1, 199),
            Hit::new("k1_1", "GCF_002", 0.0, 500, 200, 3, 201),
            Hit::new("k1_1", "GCF_003", 0.0, 500, 200, 301, 500),
            Hit::new("k1_1", "GCF_004", 0.05, 500, 250, 251, 500),
            Hit::new("k2_1", "GCF_010", 1.16e-28, 535, 535, 1, 535),
        ];
        resolve_all(hits, &ResolveConfig::default()).unwrap()
    }

    #[test]
    fn test_write_tsv() {
        let mut buf = Vec::new();
        write_delimited(&mut buf, &resolutions(), b'\t').unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "query_id\thit_id\te_val\tquery_length\talignment_length\tstart\tend\torigin",
                "k1_1\tGCF_001\t0\t500\t200\t1\t199\tchimera",
                "k1_1\tGCF_003\t0\t500\t200\t301\t500\tchimera",
                "k2_1\tGCF_010\t1.16e-28\t535\t535\t1\t535\tsingle",
            ]
        );
    }

    #[test]
    fn test_write_csv_header() {
        let mut buf = Vec::new();
        write_delimited(&mut buf, &resolutions(), b',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(
            "query_id,hit_id,e_val,query_length,alignment_length,start,end,origin\n"
        ));
    }

    #[test]
    fn test_write_csv_reads_back() {
        let hits = vec![
            Hit::new("contig,1", "GCF_001", 0.0, 500, 200, 1, 199),
            Hit::new("contig,1", "GCF \"x\"", 0.0, 500, 200, 301, 500),
            Hit::new("k2_1", "GCF_010", 1.16e-28, 535, 535, 1, 535),
        ];
        let resolutions = resolve_all(hits.clone(), &ResolveConfig::default()).unwrap();

        for delimiter in [b',', b'\t'] {
            let mut buf = Vec::new();
            write_delimited(&mut buf, &resolutions, delimiter).unwrap();
            let text = String::from_utf8(buf).unwrap();

            let read_back = parse_hits_text(&text, delimiter).unwrap();
            assert_eq!(read_back, hits);
        }
    }

    #[test]
    fn test_write_json() {
        let resolutions = resolutions();
        let summary = ResolutionSummary::from_resolutions(&resolutions);
        let mut buf = Vec::new();
        write_json(&mut buf, &resolutions, &summary).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["summary"]["contigs"], 2);
        assert_eq!(value["summary"]["chimera"], 1);
        assert_eq!(value["assignments"].as_array().unwrap().len(), 3);
        assert_eq!(value["assignments"][1]["hit_id"], "GCF_003");
        assert_eq!(value["assignments"][2]["origin"], "single");
    }

    #[test]
    fn test_write_text() {
        let resolutions = resolutions();
        let summary = ResolutionSummary::from_resolutions(&resolutions);
        let mut buf = Vec::new();
        write_text(&mut buf, &resolutions, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("k1_1: CHIMERA (2 regions from 4 hits)"));
        assert!(text.contains("region 251-500: GCF_003"));
        assert!(text.contains("k2_1: SINGLE GCF_010"));
        assert!(text.contains("Contigs: 2 (1 single, 1 chimera)"));
    }
}
