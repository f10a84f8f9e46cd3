use crate::core::hit::Hit;
use crate::core::types::CoverageInterval;

/// Merge aligned spans into non-overlapping coverage intervals.
///
/// `spans` must be sorted ascending by start. Each span either extends the
/// interval its start falls into (boundaries included, so spans touching at a
/// single base merge) or opens a new interval. Intervals are returned in the
/// order they were opened.
pub fn merge_coverage<I>(spans: I) -> Vec<CoverageInterval>
where
    I: IntoIterator<Item = (u64, u64)>,
{
    let mut merged: Vec<CoverageInterval> = Vec::new();

    for (start, end) in spans {
        match merged
            .iter_mut()
            .find(|interval| interval.contains_position(start))
        {
            Some(interval) => interval.end = interval.end.max(end),
            None => merged.push(CoverageInterval::new(start, end)),
        }
    }

    merged
}

/// Coverage intervals of a contig's hits, sorting their spans by start first
pub fn contig_coverage(hits: &[Hit]) -> Vec<CoverageInterval> {
    let mut spans: Vec<(u64, u64)> = hits.iter().map(Hit::span).collect();
    spans.sort_by_key(|&(start, _)| start);
    merge_coverage(spans)
}
