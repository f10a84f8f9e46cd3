//! Parsers for hit tables produced by upstream alignment post-processing.
//!
//! A hit table is delimited text (TSV or CSV, optionally gzip-compressed)
//! with one alignment per line:
//!
//! | Column             | Type    | Description                              |
//! |--------------------|---------|------------------------------------------|
//! | `query_id`         | string  | Contig identifier                        |
//! | `hit_id`           | string  | Matched reference sequence               |
//! | `e_val`            | float   | Expect value, non-negative               |
//! | `query_length`     | integer | Contig length                            |
//! | `alignment_length` | integer | Aligned length reported by the tool      |
//! | `start`            | integer | First aligned query base (1-based)       |
//! | `end`              | integer | Last aligned query base (1-based)        |
//!
//! This is the column order of BLAST `-outfmt "6 qseqid sseqid evalue qlen length qstart qend"`.
//!
//! ## Example
//!
//! ```rust
//! use contig_origin::parsing::hits::parse_hits_text;
//!
//! let table = "k1_1\tGCF_001\t0\t535\t535\t1\t535\n";
//! let hits = parse_hits_text(table, b'\t').unwrap();
//! assert_eq!(hits[0].hit_id, "GCF_001");
//! ```

pub mod hits;
