//! Citation distribution histogram.

use serde::Serialize;

use crate::models::Publication;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// One fixed-width histogram bucket over citation counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationBucket {
    /// Lowest citation count in this bucket, inclusive.
    pub lower: u32,

    /// Highest citation count in this bucket, inclusive.
    pub upper: u32,

    /// Publications whose count falls in the bucket.
    pub count: usize,
}

/// Bucket reported citation counts into at most `bins` fixed-width
/// buckets. Publications without a reported count are excluded, not
/// counted as zero. Empty buckets up to the maximum are kept so the
/// histogram keeps its shape.
#[must_use]
pub fn citation_distribution(publications: &[Publication], bins: usize) -> Vec<CitationBucket> {
    let counts: Vec<u32> = publications.iter().filter_map(|p| p.times_cited).collect();
    if counts.is_empty() || bins == 0 {
        return Vec::new();
    }

    let max = counts.iter().copied().max().unwrap_or(0);
    let width = ((u64::from(max) + 1).div_ceil(bins as u64)).max(1) as u32;
    let used_bins = (max / width) as usize + 1;

    let mut buckets: Vec<CitationBucket> = (0..used_bins)
        .map(|i| {
            let lower = i as u32 * width;
            CitationBucket { lower, upper: lower + width - 1, count: 0 }
        })
        .collect();

    for count in counts {
        buckets[(count / width) as usize].count += 1;
    }

    buckets
}
