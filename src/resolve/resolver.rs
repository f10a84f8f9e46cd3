use thiserror::Error;
use tracing::{debug, warn};

use crate::core::hit::{cmp_e_val, Hit, ResolvedAssignment};
use crate::core::types::Origin;
use crate::resolve::coverage::contig_coverage;
use crate::resolve::selection::select_best;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No hits supplied")]
    EmptyHits,

    #[error("Hits from more than one contig in a single call: expected '{expected}', found '{found}'")]
    MixedQueryIds { expected: String, found: String },

    #[error("Inconsistent query length for contig '{query_id}': expected {expected}, found {found}")]
    MixedQueryLengths {
        query_id: String,
        expected: u64,
        found: u64,
    },

    #[error("Hit '{hit_id}' on contig '{query_id}' has start {start} after end {end}")]
    InvalidSpan {
        query_id: String,
        hit_id: String,
        start: u64,
        end: u64,
    },

    #[error("Coverage region {start}-{end} of contig '{query_id}' contains no hit")]
    EmptyRegion {
        query_id: String,
        start: u64,
        end: u64,
    },
}

/// What to do with a hit whose start lies after its end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpanPolicy {
    /// Log a warning and resolve anyway
    #[default]
    Warn,
    /// Reject the contig with `ResolveError::InvalidSpan`
    Strict,
}

/// Configuration for taxonomy resolution
#[derive(Debug, Clone, Default)]
pub struct ResolveConfig {
    /// Handling of inverted (`start > end`) spans
    pub span_policy: SpanPolicy,
    /// Worker threads for batch resolution (`None` uses the rayon default)
    pub threads: Option<usize>,
}

/// Resolves the origin of one contig from its hits
#[derive(Debug, Clone, Default)]
pub struct TaxonomyResolver {
    config: ResolveConfig,
}

impl TaxonomyResolver {
    /// Create a resolver with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with custom configuration
    #[must_use]
    pub fn with_config(config: ResolveConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Assign taxonomy to a single contig.
    ///
    /// Rules are tried in order and the first that applies wins:
    ///
    /// 1. A lone hit is the contig's origin.
    /// 2. The lowest e-value hit whose alignment length equals the query length.
    /// 3. The lowest e-value hit whose alignment length exceeds the query length.
    /// 4. Hit spans are merged into coverage intervals. One interval means a
    ///    single origin: the best hit overall wins. Several intervals mean a
    ///    chimera: the best hit fully inside each interval is reported.
    ///
    /// Inverted spans (`start > end`) cover the same bases as their swapped
    /// form when coverage is merged, unless `SpanPolicy::Strict` rejects them.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::EmptyHits`, `ResolveError::MixedQueryIds` or
    /// `ResolveError::MixedQueryLengths` when the input is not one contig's
    /// hits, `ResolveError::InvalidSpan` for inverted spans under
    /// `SpanPolicy::Strict`, and `ResolveError::EmptyRegion` if a coverage
    /// interval ends up with no contained hit.
    pub fn resolve(&self, hits: &[Hit]) -> Result<Vec<ResolvedAssignment>, ResolveError> {
        self.validate(hits)?;

        if let [hit] = hits {
            return Ok(vec![hit.clone().with_origin(Origin::Single)]);
        }

        let query_id = &hits[0].query_id;

        let mut by_e_val: Vec<&Hit> = hits.iter().collect();
        by_e_val.sort_by(|a, b| cmp_e_val(a.e_val, b.e_val));

        if let Some(hit) = by_e_val.iter().find(|hit| hit.is_full_length()) {
            debug!("{query_id}: full-length hit {}", hit.hit_id);
            return Ok(vec![(*hit).clone().with_origin(Origin::Single)]);
        }

        if let Some(hit) = by_e_val.iter().find(|hit| hit.is_over_length()) {
            debug!("{query_id}: over-length hit {}", hit.hit_id);
            return Ok(vec![(*hit).clone().with_origin(Origin::Single)]);
        }

        let coverage = contig_coverage(hits);

        if coverage.len() == 1 {
            let best = select_best(hits).ok_or(ResolveError::EmptyHits)?;
            debug!("{query_id}: one coverage region, best hit {}", best.hit_id);
            return Ok(vec![best.clone().with_origin(Origin::Single)]);
        }

        debug!("{query_id}: chimera with {} regions", coverage.len());

        coverage
            .iter()
            .map(|interval| {
                select_best(hits.iter().filter(|hit| interval.contains(hit)))
                    .map(|best| best.clone().with_origin(Origin::Chimera))
                    .ok_or_else(|| ResolveError::EmptyRegion {
                        query_id: query_id.clone(),
                        start: interval.start,
                        end: interval.end,
                    })
            })
            .collect()
    }

    fn validate(&self, hits: &[Hit]) -> Result<(), ResolveError> {
        let first = hits.first().ok_or(ResolveError::EmptyHits)?;

        for hit in hits {
            if hit.query_id != first.query_id {
                return Err(ResolveError::MixedQueryIds {
                    expected: first.query_id.clone(),
                    found: hit.query_id.clone(),
                });
            }
            if hit.query_length != first.query_length {
                return Err(ResolveError::MixedQueryLengths {
                    query_id: first.query_id.clone(),
                    expected: first.query_length,
                    found: hit.query_length,
                });
            }
            if hit.is_inverted() {
                match self.config.span_policy {
                    SpanPolicy::Warn => warn!(
                        "Hit {} on contig {} has start {} after end {}",
                        hit.hit_id, hit.query_id, hit.start, hit.end
                    ),
                    SpanPolicy::Strict => {
                        return Err(ResolveError::InvalidSpan {
                            query_id: hit.query_id.clone(),
                            hit_id: hit.hit_id.clone(),
                            start: hit.start,
                            end: hit.end,
                        })
                    }
                }
            }
        }

        Ok(())
    }
}

/// Assign taxonomy to a single contig with the default configuration.
///
/// # Errors
///
/// See [`TaxonomyResolver::resolve`].
pub fn assign_taxonomy(hits: &[Hit]) -> Result<Vec<ResolvedAssignment>, ResolveError> {
    TaxonomyResolver::new().resolve(hits)
}
