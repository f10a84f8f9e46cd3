use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, Trim};
use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::debug;

use crate::core::hit::Hit;
use crate::utils::validation::{is_valid_e_value, is_valid_identifier, MAX_HITS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid hit table: {0}")]
    InvalidFormat(String),

    #[error("Too many hits: input exceeds the maximum of {0} records")]
    TooManyHits(usize),
}

/// Column order of a hit table
pub const HIT_COLUMNS: [&str; 7] = [
    "query_id",
    "hit_id",
    "e_val",
    "query_length",
    "alignment_length",
    "start",
    "end",
];

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a hit table file. Gzip/bgzip input is decompressed transparently.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_hits_file(path: &Path, delimiter: u8) -> Result<Vec<Hit>, ParseError> {
    let file = File::open(path)?;

    let hits = if is_gzipped(path) {
        parse_hits_reader(BufReader::new(MultiGzDecoder::new(file)), delimiter)?
    } else {
        parse_hits_reader(BufReader::new(file), delimiter)?
    };

    debug!("Parsed {} hits from {}", hits.len(), path.display());
    Ok(hits)
}

/// Parse hit table text.
///
/// # Errors
///
/// See [`parse_hits_reader`].
pub fn parse_hits_text(text: &str, delimiter: u8) -> Result<Vec<Hit>, ParseError> {
    parse_hits_reader(text.as_bytes(), delimiter)
}

/// Parse a hit table with columns:
/// `query_id, hit_id, e_val, query_length, alignment_length, start, end`.
///
/// Fields may be quoted, so identifiers containing the delimiter survive a
/// round trip through this crate's delimited output. Blank lines and `#`
/// comments are skipped. The first data line is treated as a header if its
/// first field is `query_id` or `qseqid`. Columns past the seventh are ignored.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 7 fields, an
/// empty identifier, an unparseable number, or a negative/non-finite e-value;
/// `ParseError::TooManyHits` if the limit is exceeded; `ParseError::Csv` on
/// malformed quoting; `ParseError::Io` on read failure.
pub fn parse_hits_reader<R: BufRead>(reader: R, delimiter: u8) -> Result<Vec<Hit>, ParseError> {
    read_hits(reader, delimiter, MAX_HITS)
}

fn read_hits<R: BufRead>(
    reader: R,
    delimiter: u8,
    max_hits: usize,
) -> Result<Vec<Hit>, ParseError> {
    let mut fields_reader = ReaderBuilder::new();
    fields_reader
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All);

    let mut hits = Vec::new();
    let mut first_data_line = true;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Leading delimiters are kept so an empty first field is reported
        let Some(record) = fields_reader
            .from_reader(line.as_bytes())
            .records()
            .next()
            .transpose()?
        else {
            continue;
        };

        if first_data_line {
            first_data_line = false;
            let first = record.get(0).unwrap_or_default().to_lowercase();
            if first == "query_id" || first == "qseqid" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if hits.len() >= max_hits {
            return Err(ParseError::TooManyHits(max_hits));
        }

        let fields: Vec<&str> = record.iter().collect();
        hits.push(parse_fields(&fields, line_num)?);
    }

    Ok(hits)
}

fn parse_fields(fields: &[&str], line_num: usize) -> Result<Hit, ParseError> {
    if fields.len() < HIT_COLUMNS.len() {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num} has {} fields, expected {}",
            fields.len(),
            HIT_COLUMNS.len()
        )));
    }

    let query_id = parse_identifier(fields[0], HIT_COLUMNS[0], line_num)?;
    let hit_id = parse_identifier(fields[1], HIT_COLUMNS[1], line_num)?;

    let e_val: f64 = parse_field(fields[2], HIT_COLUMNS[2], line_num)?;
    if !is_valid_e_value(e_val) {
        return Err(ParseError::InvalidFormat(format!(
            "Invalid e_val on line {line_num}: '{}' (must be a non-negative number)",
            fields[2]
        )));
    }

    Ok(Hit::new(
        query_id,
        hit_id,
        e_val,
        parse_field(fields[3], HIT_COLUMNS[3], line_num)?,
        parse_field(fields[4], HIT_COLUMNS[4], line_num)?,
        parse_field(fields[5], HIT_COLUMNS[5], line_num)?,
        parse_field(fields[6], HIT_COLUMNS[6], line_num)?,
    ))
}

fn parse_identifier(value: &str, column: &str, line_num: usize) -> Result<String, ParseError> {
    if is_valid_identifier(value) {
        Ok(value.to_string())
    } else {
        Err(ParseError::InvalidFormat(format!(
            "Empty {column} on line {line_num}"
        )))
    }
}

fn parse_field<T: FromStr>(value: &str, column: &str, line_num: usize) -> Result<T, ParseError> {
    value.parse().map_err(|_| {
        ParseError::InvalidFormat(format!(
            "Invalid {column} on line {line_num}: '{value}'"
        ))
    })
}
