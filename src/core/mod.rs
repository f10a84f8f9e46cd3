//! Core data types for contig origin resolution.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Hit`]: One alignment of a query contig against a reference sequence
//! - [`ResolvedAssignment`]: A hit chosen as (part of) the contig's origin, tagged with an [`Origin`]
//! - [`CoverageInterval`]: A merged span of the query contig covered by one or more hits
//!
//! ## Coordinates
//!
//! All positions are 1-based and inclusive on the query contig, exactly as
//! reported by BLAST-like search tools:
//!
//! | Field   | Meaning                         |
//! |---------|---------------------------------|
//! | `start` | First aligned base on the query |
//! | `end`   | Last aligned base on the query  |
//!
//! A span touching another at a single coordinate (`end == start`) counts as
//! overlapping.

pub mod hit;
pub mod types;
