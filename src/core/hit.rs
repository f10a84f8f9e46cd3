use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::types::Origin;

/// One alignment of a query contig against one reference sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Contig identifier, shared by all hits for that contig
    pub query_id: String,

    /// Identifier of the matched reference sequence
    pub hit_id: String,

    /// Expect value of the alignment (lower is more significant)
    pub e_val: f64,

    /// Length of the query contig
    pub query_length: u64,

    /// Aligned length as reported by the search tool.
    /// May exceed `query_length` when the alignment carries gaps.
    pub alignment_length: u64,

    /// First aligned base on the query (1-based, inclusive)
    pub start: u64,

    /// Last aligned base on the query (1-based, inclusive)
    pub end: u64,
}

impl Hit {
    #[allow(clippy::too_many_arguments)] // Mirrors the seven columns of a hit table
    pub fn new(
        query_id: impl Into<String>,
        hit_id: impl Into<String>,
        e_val: f64,
        query_length: u64,
        alignment_length: u64,
        start: u64,
        end: u64,
    ) -> Self {
        Self {
            query_id: query_id.into(),
            hit_id: hit_id.into(),
            e_val,
            query_length,
            alignment_length,
            start,
            end,
        }
    }

    /// Aligned span on the query as `(low, high)`.
    ///
    /// Inverted coordinates (`start > end`) are swapped, so the span always
    /// covers the bases the alignment touches.
    #[must_use]
    pub fn span(&self) -> (u64, u64) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Alignment length equals the query length
    #[must_use]
    pub fn is_full_length(&self) -> bool {
        self.alignment_length == self.query_length
    }

    /// Alignment length exceeds the query length
    #[must_use]
    pub fn is_over_length(&self) -> bool {
        self.alignment_length > self.query_length
    }

    /// `start > end`, which a well-formed search result never reports
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Tag this hit with an origin
    #[must_use]
    pub fn with_origin(self, origin: Origin) -> ResolvedAssignment {
        ResolvedAssignment { hit: self, origin }
    }
}

/// Compare two e-values, treating `-0.0` and `0.0` as equal.
///
/// NaN sorts after every number, so it can never outrank a real e-value.
#[must_use]
pub fn cmp_e_val(a: f64, b: f64) -> Ordering {
    // `+ 0.0` folds -0.0 into 0.0
    (a + 0.0).total_cmp(&(b + 0.0))
}

/// A hit selected as the origin of a contig (or of one region of it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAssignment {
    #[serde(flatten)]
    pub hit: Hit,

    pub origin: Origin,
}

impl ResolvedAssignment {
    #[must_use]
    pub fn query_id(&self) -> &str {
        &self.hit.query_id
    }

    #[must_use]
    pub fn hit_id(&self) -> &str {
        &self.hit.hit_id
    }
}
