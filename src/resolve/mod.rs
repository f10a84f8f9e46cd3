//! Contig origin resolution.
//!
//! This module provides the resolution algorithm and its building blocks:
//!
//! - [`TaxonomyResolver`]: Picks the hit(s) that best explain one contig
//! - [`merge_coverage`]: Merges start-sorted spans into coverage intervals
//! - [`select_best`]: Ranks hits by e-value, then alignment length
//! - [`resolve_all`]: Groups a hit table by contig and resolves each in parallel
//!
//! ## Resolution Algorithm
//!
//! For each contig, the first rule that applies decides the outcome:
//!
//! 1. **Single hit**: the only hit is the origin
//! 2. **Full-length hit**: lowest e-value hit with `alignment_length == query_length`
//! 3. **Over-length hit**: lowest e-value hit with `alignment_length > query_length`
//! 4. **Region analysis**: hits are merged into coverage intervals
//!    - one interval: best hit overall, tagged `single`
//!    - several intervals: best hit inside each interval, tagged `chimera`
//!
//! ## Example
//!
//! ```rust
//! use contig_origin::{assign_taxonomy, Hit, Origin};
//!
//! let hits = vec![
//!     Hit::new("k1_1", "GCF_001", 0.0, 500, 200, 1, 199),
//!     Hit::new("k1_1", "GCF_003", 0.0, 500, 200, 301, 500),
//! ];
//!
//! let assignments = assign_taxonomy(&hits).unwrap();
//! assert_eq!(assignments.len(), 2);
//! assert!(assignments.iter().all(|a| a.origin == Origin::Chimera));
//! ```

pub mod batch;
pub mod coverage;
pub mod resolver;
pub mod selection;

pub use batch::{resolve_all, BatchError, ContigResolution, ResolutionSummary};
pub use coverage::merge_coverage;
pub use resolver::{assign_taxonomy, TaxonomyResolver};
pub use selection::select_best;
