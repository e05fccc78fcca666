use std::cmp::Reverse;

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Observation, Series, TimelineInstant, TimelineKey};
use crate::error::{SeriesError, SeriesResult};

/// Result of a nearest-date lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestMatch<'a> {
    pub index: usize,
    pub observation: &'a Observation,
    /// Binary-search probes spent locating the insertion point.
    pub probes: u32,
}

/// Reusable nearest-date lookup over a borrowed, date-sorted series.
///
/// Every query is a lower-bound binary search followed by a comparison of
/// the two neighbouring candidates, so repeated pointer-driven lookups stay
/// `O(log n)`.
#[derive(Debug, Clone, Copy)]
pub struct NearestPointIndex<'a> {
    observations: &'a [Observation],
}

impl<'a> NearestPointIndex<'a> {
    #[must_use]
    pub fn new(series: &'a Series) -> Self {
        Self {
            observations: series.as_slice(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the observation closest to `query`; equal distances resolve
    /// to the later observation.
    pub fn lookup<Q: TimelineKey + ?Sized>(&self, query: &Q) -> SeriesResult<NearestMatch<'a>> {
        if self.observations.is_empty() {
            return Err(SeriesError::EmptyIndex);
        }

        let query = query.timeline_instant();
        let (lower, probes) = self.lower_bound(query);

        // lower == 0: query at or before the first date, only the first entry qualifies.
        // lower == len: query after the last date, only the last entry qualifies.
        let mut candidates: SmallVec<[(u64, Reverse<usize>); 2]> = SmallVec::new();
        if lower > 0 {
            let before = lower - 1;
            candidates.push((self.distance_at(before, query), Reverse(before)));
        }
        if lower < self.observations.len() {
            candidates.push((self.distance_at(lower, query), Reverse(lower)));
        }

        let (_, Reverse(index)) = candidates
            .into_iter()
            .min()
            .ok_or(SeriesError::EmptyIndex)?;
        trace!(query = query.seconds(), lower, index, probes, "nearest lookup");

        Ok(NearestMatch {
            index,
            observation: &self.observations[index],
            probes,
        })
    }

    /// Least index whose date is `>= query`, plus the number of probes taken.
    fn lower_bound(&self, query: TimelineInstant) -> (usize, u32) {
        let mut lo = 0_usize;
        let mut hi = self.observations.len();
        let mut probes = 0_u32;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            probes += 1;
            if self.observations[mid].instant() < query {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        (lo, probes)
    }

    fn distance_at(&self, index: usize, query: TimelineInstant) -> u64 {
        self.observations[index].instant().distance(query)
    }
}

/// One-shot form of [`NearestPointIndex::lookup`].
pub fn nearest<'a, Q: TimelineKey + ?Sized>(
    series: &'a Series,
    query: &Q,
) -> SeriesResult<&'a Observation> {
    NearestPointIndex::new(series)
        .lookup(query)
        .map(|found| found.observation)
}

/// Upper bound on probes for a lower-bound search over `len` entries: `ceil(log2(len + 1))`.
#[must_use]
pub fn max_probes(len: usize) -> u32 {
    usize::BITS - len.leading_zeros()
}
