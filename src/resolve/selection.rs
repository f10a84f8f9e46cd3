use std::cmp::Ordering;

use crate::core::hit::{cmp_e_val, Hit};

/// Rank two hits: lower e-value first, then longer alignment first
#[must_use]
pub fn rank_hits(a: &Hit, b: &Hit) -> Ordering {
    cmp_e_val(a.e_val, b.e_val).then_with(|| b.alignment_length.cmp(&a.alignment_length))
}

/// Select the best-ranked hit.
///
/// Hits tied on both e-value and alignment length resolve to the first one
/// in iteration order. Returns `None` only for empty input.
pub fn select_best<'a, I>(hits: I) -> Option<&'a Hit>
where
    I: IntoIterator<Item = &'a Hit>,
{
    hits.into_iter().min_by(|a, b| rank_hits(a, b))
}
