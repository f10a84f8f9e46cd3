use serde::{Deserialize, Serialize};

use crate::core::hit::Hit;

/// How a resolved hit relates to the contig it was chosen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// The whole contig is assigned to one organism
    Single,
    /// One of several independently assigned regions of a chimeric contig
    Chimera,
}

impl Origin {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Chimera => "chimera",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A maximal run of overlapping or touching hit spans on the query contig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageInterval {
    /// First covered base (1-based, inclusive)
    pub start: u64,
    /// Last covered base (1-based, inclusive)
    pub end: u64,
}

impl CoverageInterval {
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// True if `position` falls inside this interval, boundaries included
    #[must_use]
    pub fn contains_position(&self, position: u64) -> bool {
        self.start <= position && position <= self.end
    }

    /// True if the hit's aligned span lies entirely inside this interval
    #[must_use]
    pub fn contains(&self, hit: &Hit) -> bool {
        let (low, high) = hit.span();
        low >= self.start && high <= self.end
    }

    /// Number of bases covered
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_add(1).saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<(u64, u64)> for CoverageInterval {
    fn from((start, end): (u64, u64)) -> Self {
        Self::new(start, end)
    }
}

impl std::fmt::Display for CoverageInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
