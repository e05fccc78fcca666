use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{DeltaObservation, Observation, RawRow};
use crate::error::{SeriesError, SeriesResult};

/// Immutable, date-sorted observation sequence.
///
/// Built only through [`Series::load`] (or [`Series::from_observations`]), so
/// the ordering invariant the nearest-point search relies on always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Parses and canonicalizes raw rows.
    ///
    /// Any unparsable date or count fails the whole load; no partial series
    /// is returned. Rows are sorted by date (stable, so entities sharing a
    /// date keep their input order). A repeated `(label, region_code, date)`
    /// key keeps the last occurrence.
    pub fn load(rows: &[RawRow]) -> SeriesResult<Self> {
        let observations = rows
            .iter()
            .enumerate()
            .map(|(row, raw)| raw.parse(row))
            .collect::<SeriesResult<Vec<_>>>()?;
        let series = Self::from_observations(observations);
        debug!(
            raw_count = rows.len(),
            canonical_count = series.len(),
            "loaded series"
        );
        Ok(series)
    }

    /// Canonicalizes already-typed observations.
    #[must_use]
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self {
            observations: canonicalize_observations(observations),
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

    #[must_use]
    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Day-over-day deltas; see [`deltas`].
    #[must_use]
    pub fn deltas(&self) -> Vec<DeltaObservation> {
        deltas(self)
    }

    /// Keeps the observations whose key equals `key`, in their original order.
    ///
    /// Returns [`SeriesError::EmptyResult`] when nothing matches so callers
    /// never proceed with a missing first element.
    pub fn filter_by_key<K, F>(&self, key_fn: F, key: &K) -> SeriesResult<Self>
    where
        K: PartialEq + std::fmt::Debug + ?Sized,
        F: Fn(&Observation) -> &K,
    {
        let observations: Vec<Observation> = self
            .observations
            .iter()
            .filter(|obs| key_fn(*obs) == key)
            .cloned()
            .collect();
        debug!(
            source_count = self.len(),
            matched_count = observations.len(),
            key = ?key,
            "filtered series"
        );
        if observations.is_empty() {
            return Err(SeriesError::empty_result(key));
        }
        Ok(Self { observations })
    }

    /// Narrows a multi-state series down to one state.
    pub fn filter_by_label(&self, label: &str) -> SeriesResult<Self> {
        self.filter_by_key(|obs| obs.label.as_deref().unwrap_or_default(), label)
    }

    /// Distinct entity labels in sorted order.
    #[must_use]
    pub fn entity_labels(&self) -> Vec<String> {
        self.observations
            .iter()
            .filter_map(|obs| obs.label.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// All observations recorded on `date` (one per entity for state data).
    #[must_use]
    pub fn observations_on(&self, date: NaiveDate) -> &[Observation] {
        let start = self.observations.partition_point(|obs| obs.date < date);
        let end = self.observations.partition_point(|obs| obs.date <= date);
        &self.observations[start..end]
    }
}

impl From<Vec<Observation>> for Series {
    fn from(observations: Vec<Observation>) -> Self {
        Self::from_observations(observations)
    }
}

impl From<Series> for Vec<Observation> {
    fn from(series: Series) -> Self {
        series.observations
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Derives the day-over-day delta sequence.
///
/// The predecessor of the first observation is taken as zero, so the first
/// delta equals the first cumulative value.
#[must_use]
pub fn deltas(series: &Series) -> Vec<DeltaObservation> {
    let mut previous: Option<&Observation> = None;
    series
        .iter()
        .map(|obs| {
            let (prev_cases, prev_deaths) =
                previous.map_or((0, 0), |p| (p.cumulative_cases, p.cumulative_deaths));
            previous = Some(obs);
            DeltaObservation {
                date: obs.date,
                case_delta: signed_difference(obs.cumulative_cases, prev_cases),
                death_delta: signed_difference(obs.cumulative_deaths, prev_deaths),
                label: obs.label.clone(),
                region_code: obs.region_code.clone(),
            }
        })
        .collect()
}

fn signed_difference(current: u64, previous: u64) -> i64 {
    let diff = i128::from(current) - i128::from(previous);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

fn canonicalize_observations(mut observations: Vec<Observation>) -> Vec<Observation> {
    let original_len = observations.len();
    observations.sort_by(|a, b| a.date.cmp(&b.date));

    let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
    let mut duplicate_count = 0_usize;
    for obs in observations {
        let day_start = deduped.partition_point(|kept| kept.date < obs.date);
        if let Some(existing) = deduped[day_start..]
            .iter_mut()
            .find(|kept| kept.label == obs.label && kept.region_code == obs.region_code)
        {
            *existing = obs;
            duplicate_count += 1;
            continue;
        }
        deduped.push(obs);
    }

    if duplicate_count > 0 {
        warn!(
            original_count = original_len,
            duplicate_count,
            canonical_count = deduped.len(),
            "replaced duplicate observations on load"
        );
    }
    deduped
}
