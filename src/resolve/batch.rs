use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::hit::{Hit, ResolvedAssignment};
use crate::core::types::{CoverageInterval, Origin};
use crate::resolve::coverage::contig_coverage;
use crate::resolve::resolver::{ResolveConfig, ResolveError, TaxonomyResolver};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Resolution of one contig
#[derive(Debug, Clone, Serialize)]
pub struct ContigResolution {
    /// Contig identifier
    pub query_id: String,

    /// Number of hits the contig had
    pub hit_count: usize,

    /// Merged coverage intervals of all hits, in start order
    pub coverage: Vec<CoverageInterval>,

    /// Selected hits, one for a single origin or one per region for a chimera
    pub assignments: Vec<ResolvedAssignment>,
}

impl ContigResolution {
    #[must_use]
    pub fn is_chimera(&self) -> bool {
        self.assignments
            .iter()
            .any(|assignment| assignment.origin == Origin::Chimera)
    }
}

/// Aggregate counts over a batch of resolutions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub contigs: usize,
    pub hits: usize,
    pub single: usize,
    pub chimera: usize,
    pub assignments: usize,
}

impl ResolutionSummary {
    #[must_use]
    pub fn from_resolutions(resolutions: &[ContigResolution]) -> Self {
        let mut summary = Self::default();
        for resolution in resolutions {
            summary.contigs += 1;
            summary.hits += resolution.hit_count;
            summary.assignments += resolution.assignments.len();
            if resolution.is_chimera() {
                summary.chimera += 1;
            } else {
                summary.single += 1;
            }
        }
        summary
    }
}

/// Group hits by contig.
///
/// Contigs appear in the order they were first seen, and each group keeps
/// the input order of its hits.
pub fn group_by_query(hits: Vec<Hit>) -> Vec<(String, Vec<Hit>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Hit>)> = Vec::new();

    for hit in hits {
        match index.get(&hit.query_id) {
            Some(&i) => groups[i].1.push(hit),
            None => {
                index.insert(hit.query_id.clone(), groups.len());
                groups.push((hit.query_id.clone(), vec![hit]));
            }
        }
    }

    groups
}

impl TaxonomyResolver {
    /// Resolve one contig and keep its coverage alongside the assignments.
    ///
    /// # Errors
    ///
    /// See [`TaxonomyResolver::resolve`].
    pub fn resolve_contig(&self, hits: &[Hit]) -> Result<ContigResolution, ResolveError> {
        let assignments = self.resolve(hits)?;
        let query_id = hits
            .first()
            .map(|hit| hit.query_id.clone())
            .unwrap_or_default();

        Ok(ContigResolution {
            query_id,
            hit_count: hits.len(),
            coverage: contig_coverage(hits),
            assignments,
        })
    }
}

/// Resolve every contig in a hit table.
///
/// Contigs are resolved independently on the rayon pool; results come back in
/// the order contigs were first seen in `hits`.
///
/// # Errors
///
/// Returns `BatchError::Resolve` with the first error raised by any contig, or
/// `BatchError::ThreadPool` if a pool of `config.threads` workers cannot be
/// built.
pub fn resolve_all(
    hits: Vec<Hit>,
    config: &ResolveConfig,
) -> Result<Vec<ContigResolution>, BatchError> {
    let groups = group_by_query(hits);
    debug!("Resolving {} contigs", groups.len());

    let resolver = TaxonomyResolver::with_config(config.clone());
    let run = || {
        groups
            .par_iter()
            .map(|(_, contig_hits)| resolver.resolve_contig(contig_hits))
            .collect::<Result<Vec<_>, _>>()
    };

    let resolutions = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(run)?,
        None => run()?,
    };

    Ok(resolutions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hits() -> Vec<Hit> {
        vec![
            Hit::new("k1_1", "GCF_001", 0.0, 500, 200, 1, 199),
            Hit::new("k2_1", "GCF_010", 0.0, 535, 535, 1, 535),
            Hit::new("k1_1", "GCF_002", 0.0, 500, 200, 3, 201),
            Hit::new("k1_1", "GCF_003", 0.0, 500, 200, 301, 500),
            Hit::new("k2_1", "GCF_011", 1e-20, 535, 535, 1, 535),
            Hit::new("k1_1", "GCF_004", 0.05, 500, 250, 251, 500),
            Hit::new("k3_1", "GCF_020", 0.2, 800, 90, 10, 99),
        ]
    }

    #[test]
    fn test_group_by_query_preserves_order() {
        let groups = group_by_query(sample_hits());
        let names: Vec<&str> = groups.iter().map(|(q, _)| q.as_str()).collect();
        assert_eq!(names, vec!["k1_1", "k2_1", "k3_1"]);

        let k1: Vec<&str> = groups[0].1.iter().map(|h| h.hit_id.as_str()).collect();
        assert_eq!(k1, vec!["GCF_001", "GCF_002", "GCF_003", "GCF_004"]);
    }

    #[test]
    fn test_resolve_all() {
        let resolutions = resolve_all(sample_hits(), &ResolveConfig::default()).unwrap();
        assert_eq!(resolutions.len(), 3);

        assert_eq!(resolutions[0].query_id, "k1_1");
        assert!(resolutions[0].is_chimera());
        assert_eq!(resolutions[0].assignments.len(), 2);
        assert_eq!(resolutions[0].coverage.len(), 2);

        assert_eq!(resolutions[1].query_id, "k2_1");
        assert!(!resolutions[1].is_chimera());
        assert_eq!(resolutions[1].assignments[0].hit_id(), "GCF_010");

        assert_eq!(resolutions[2].assignments[0].origin, Origin::Single);
    }

    #[test]
    fn test_resolve_all_with_fixed_threads() {
        let config = ResolveConfig {
            threads: Some(2),
            ..ResolveConfig::default()
        };
        let parallel = resolve_all(sample_hits(), &config).unwrap();
        let default = resolve_all(sample_hits(), &ResolveConfig::default()).unwrap();
        let ids = |rs: &[ContigResolution]| -> Vec<String> {
            rs.iter()
                .flat_map(|r| r.assignments.iter().map(|a| a.hit_id().to_string()))
                .collect()
        };
        assert_eq!(ids(&parallel), ids(&default));
    }

    #[test]
    fn test_resolve_all_reports_contig_error() {
        let mut hits = sample_hits();
        hits.push(Hit::new("k2_1", "GCF_012", 0.0, 536, 536, 1, 536));

        let err = resolve_all(hits, &ResolveConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BatchError::Resolve(ResolveError::MixedQueryLengths {
                expected: 535,
                found: 536,
                ..
            })
        ));
        assert!(err.to_string().starts_with("Inconsistent query length for contig 'k2_1'"));
    }

    #[test]
    fn test_resolve_all_empty() {
        let resolutions = resolve_all(Vec::new(), &ResolveConfig::default()).unwrap();
        assert!(resolutions.is_empty());
    }

    #[test]
    fn test_summary() {
        let resolutions = resolve_all(sample_hits(), &ResolveConfig::default()).unwrap();
        let summary = ResolutionSummary::from_resolutions(&resolutions);
        assert_eq!(
            summary,
            ResolutionSummary {
                contigs: 3,
                hits: 7,
                single: 2,
                chimera: 1,
                assignments: 4,
            }
        );
    }
}
