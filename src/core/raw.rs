use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::Observation;
use crate::error::{SeriesError, SeriesResult};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Count field as it arrives from a loader: a JSON number or integer-valued text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl From<u64> for RawCount {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Self::Integer(v),
            Err(_) => Self::Unsigned(value),
        }
    }
}

impl From<&str> for RawCount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Unvalidated tabular record (`us.csv` / `us-states.csv` layout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub date: String,
    pub cases: RawCount,
    pub deaths: RawCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fips: Option<String>,
}

impl RawRow {
    #[must_use]
    pub fn national(
        date: impl Into<String>,
        cases: impl Into<RawCount>,
        deaths: impl Into<RawCount>,
    ) -> Self {
        Self {
            date: date.into(),
            cases: cases.into(),
            deaths: deaths.into(),
            state: None,
            fips: None,
        }
    }

    #[must_use]
    pub fn state(
        date: impl Into<String>,
        state: impl Into<String>,
        fips: impl Into<String>,
        cases: impl Into<RawCount>,
        deaths: impl Into<RawCount>,
    ) -> Self {
        Self {
            date: date.into(),
            cases: cases.into(),
            deaths: deaths.into(),
            state: Some(state.into()),
            fips: Some(fips.into()),
        }
    }

    /// Validates the row into an [`Observation`]. `row` is only used for error reporting.
    pub fn parse(&self, row: usize) -> SeriesResult<Observation> {
        Ok(Observation {
            date: parse_iso_date(&self.date, row)?,
            cumulative_cases: coerce_count(&self.cases, "cases", row)?,
            cumulative_deaths: coerce_count(&self.deaths, "deaths", row)?,
            label: non_empty(self.state.as_deref()),
            region_code: non_empty(self.fips.as_deref()),
        })
    }
}

pub fn parse_iso_date(value: &str, row: usize) -> SeriesResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)
        .map_err(|e| SeriesError::parse(row, "date", value, e.to_string()))
}

pub fn coerce_count(value: &RawCount, field: &'static str, row: usize) -> SeriesResult<u64> {
    match value {
        RawCount::Integer(v) => u64::try_from(*v)
            .map_err(|_| SeriesError::parse(row, field, v.to_string(), "count must be >= 0")),
        RawCount::Unsigned(v) => Ok(*v),
        RawCount::Float(v) => float_to_count(*v)
            .ok_or_else(|| SeriesError::parse(row, field, v.to_string(), "not a non-negative integer")),
        RawCount::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(SeriesError::parse(row, field, text.as_str(), "empty value"));
            }
            if let Ok(v) = trimmed.parse::<u64>() {
                return Ok(v);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(float_to_count)
                .ok_or_else(|| {
                    SeriesError::parse(row, field, text.as_str(), "not a non-negative integer")
                })
        }
    }
}

fn float_to_count(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return None;
    }
    Some(value as u64)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
