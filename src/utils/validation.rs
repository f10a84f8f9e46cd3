//! Centralized validation helpers.

/// Maximum number of hits accepted from a single input (DOS protection)
pub const MAX_HITS: usize = 1_000_000;

/// Validate that a value can be used as an e-value (finite and not negative).
///
/// # Examples
///
/// ```
/// use contig_origin::utils::validation::is_valid_e_value;
///
/// assert!(is_valid_e_value(0.0));
/// assert!(is_valid_e_value(1.16e-28));
/// assert!(!is_valid_e_value(-1.0));
/// assert!(!is_valid_e_value(f64::NAN));
/// ```
#[must_use]
pub fn is_valid_e_value(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validate a contig or reference identifier: non-empty, no surrounding whitespace
#[must_use]
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty() && id.trim() == id
}
