use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Observation, RegionBucket, Series, classify_optional};
use crate::error::{SeriesError, SeriesResult};

/// One state or territory in a per-date snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLeaf {
    pub label: String,
    pub region_code: Option<String>,
    pub cases: u64,
    pub deaths: u64,
    /// Share of national cases on the snapshot date, in percent.
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGroup {
    pub region: RegionBucket,
    pub total_cases: u64,
    pub total_deaths: u64,
    pub leaves: Vec<RegionLeaf>,
}

impl RegionGroup {
    fn empty(region: RegionBucket) -> Self {
        Self {
            region,
            total_cases: 0,
            total_deaths: 0,
            leaves: Vec::new(),
        }
    }
}

/// Nation → region → state hierarchy for a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalBreakdown {
    pub date: NaiveDate,
    pub national_cases: u64,
    pub national_deaths: u64,
    /// Always holds every [`RegionBucket`], in [`RegionBucket::ALL`] order.
    pub regions: IndexMap<RegionBucket, RegionGroup>,
}

impl RegionalBreakdown {
    /// Groups the state observations recorded on `date` by region.
    pub fn for_date(series: &Series, date: NaiveDate) -> SeriesResult<Self> {
        let snapshot = series.observations_on(date);
        if snapshot.is_empty() {
            return Err(SeriesError::empty_result(date));
        }

        let national_cases = snapshot
            .iter()
            .fold(0_u64, |acc, obs| acc.saturating_add(obs.cumulative_cases));
        let national_deaths = snapshot
            .iter()
            .fold(0_u64, |acc, obs| acc.saturating_add(obs.cumulative_deaths));

        let mut regions: IndexMap<RegionBucket, RegionGroup> = RegionBucket::ALL
            .into_iter()
            .map(|region| (region, RegionGroup::empty(region)))
            .collect();

        for obs in snapshot {
            let region = classify_optional(obs.region_code.as_deref());
            let group = regions
                .entry(region)
                .or_insert_with(|| RegionGroup::empty(region));
            group.total_cases = group.total_cases.saturating_add(obs.cumulative_cases);
            group.total_deaths = group.total_deaths.saturating_add(obs.cumulative_deaths);
            group.leaves.push(leaf_for(obs, national_cases));
        }

        debug!(
            %date,
            leaf_count = snapshot.len(),
            national_cases,
            "built regional breakdown"
        );
        Ok(Self {
            date,
            national_cases,
            national_deaths,
            regions,
        })
    }

    #[must_use]
    pub fn region(&self, region: RegionBucket) -> Option<&RegionGroup> {
        self.regions.get(&region)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &RegionLeaf> {
        self.regions.values().flat_map(|group| group.leaves.iter())
    }
}

fn leaf_for(obs: &Observation, national_cases: u64) -> RegionLeaf {
    let label = obs
        .label
        .clone()
        .or_else(|| obs.region_code.clone())
        .unwrap_or_else(|| "Unknown".to_owned());
    RegionLeaf {
        label,
        region_code: obs.region_code.clone(),
        cases: obs.cumulative_cases,
        deaths: obs.cumulative_deaths,
        share_percent: share_percent(obs.cumulative_cases, national_cases),
    }
}

fn share_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}
