use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// One dated record of cumulative case/death counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub cumulative_cases: u64,
    pub cumulative_deaths: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
}

impl Observation {
    #[must_use]
    pub fn new(date: NaiveDate, cumulative_cases: u64, cumulative_deaths: u64) -> Self {
        Self {
            date,
            cumulative_cases,
            cumulative_deaths,
            label: None,
            region_code: None,
        }
    }

    /// Attaches the sub-national entity identity (state name and FIPS code).
    #[must_use]
    pub fn with_entity(mut self, label: impl Into<String>, region_code: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self.region_code = Some(region_code.into());
        self
    }

    #[must_use]
    pub fn instant(&self) -> TimelineInstant {
        TimelineInstant::from_date(self.date)
    }
}

/// Day-over-day difference of cumulative counts, index-aligned with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaObservation {
    pub date: NaiveDate,
    pub case_delta: i64,
    pub death_delta: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
}

/// Position on a continuous day axis, in seconds. Day `N` of the common era
/// starts at `N * 86_400`.
///
/// Calendar dates sit at midnight; pointer positions mapped through a
/// [`crate::core::DateScale`] may land anywhere in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimelineInstant(pub i64);

impl TimelineInstant {
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(i64::from(date.num_days_from_ce()) * SECONDS_PER_DAY)
    }

    #[must_use]
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        let day = Self::from_date(datetime.date()).0;
        Self(day + i64::from(datetime.time().num_seconds_from_midnight()))
    }

    #[must_use]
    pub fn seconds(self) -> i64 {
        self.0
    }

    /// Absolute distance between two instants, in seconds.
    #[must_use]
    pub fn distance(self, other: Self) -> u64 {
        self.0.abs_diff(other.0)
    }
}

/// Anything that can be placed on the day axis and used as a lookup query.
pub trait TimelineKey {
    fn timeline_instant(&self) -> TimelineInstant;
}

impl TimelineKey for TimelineInstant {
    fn timeline_instant(&self) -> TimelineInstant {
        *self
    }
}

impl TimelineKey for NaiveDate {
    fn timeline_instant(&self) -> TimelineInstant {
        TimelineInstant::from_date(*self)
    }
}

impl TimelineKey for NaiveDateTime {
    fn timeline_instant(&self) -> TimelineInstant {
        TimelineInstant::from_datetime(*self)
    }
}
