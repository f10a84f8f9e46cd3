//! # contig-origin
//!
//! A library for resolving which reference organism(s) assembled contigs came from.
//!
//! Searching metagenomic contigs against a reference database (e.g. with BLAST)
//! typically yields many hits per contig. Some contigs are fully explained by one
//! organism; others are chimeras, assembled from fragments of several organisms.
//!
//! `contig-origin` takes the hits for each contig and reports the best-supported
//! origin: a single hit tagged `single`, or one hit per distinct covered region
//! tagged `chimera`.
//!
//! ## Features
//!
//! - **Full-length detection**: A hit spanning the whole contig settles its origin
//! - **Coverage merging**: Overlapping or touching hit spans are merged into regions
//! - **Chimera splitting**: Each disjoint region gets its own best hit
//! - **Deterministic ranking**: Lowest e-value, then longest alignment, then input order
//! - **Parallel batches**: Contigs are resolved independently across threads
//!
//! ## Example
//!
//! ```rust
//! use contig_origin::{assign_taxonomy, Hit, Origin};
//!
//! let hits = vec![
//!     Hit::new("k1_1", "GCF_001", 1.16e-28, 535, 535, 1, 535),
//!     Hit::new("k1_1", "GCF_002", 0.0, 535, 535, 1, 535),
//! ];
//!
//! let assignments = assign_taxonomy(&hits).unwrap();
//! assert_eq!(assignments.len(), 1);
//! assert_eq!(assignments[0].hit.hit_id, "GCF_002");
//! assert_eq!(assignments[0].origin, Origin::Single);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Hit, assignment, and coverage interval types
//! - [`resolve`]: Coverage merging, best-hit selection, and the resolver
//! - [`parsing`]: Hit table parser
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod resolve;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::hit::{Hit, ResolvedAssignment};
pub use crate::core::types::*;
pub use resolve::batch::{resolve_all, BatchError, ContigResolution, ResolutionSummary};
pub use resolve::coverage::merge_coverage;
pub use resolve::resolver::{
    assign_taxonomy, ResolveConfig, ResolveError, SpanPolicy, TaxonomyResolver,
};
pub use resolve::selection::select_best;
