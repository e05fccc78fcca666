use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{DeltaObservation, Observation, RegionLeaf};

pub const DEFAULT_AXIS_DATE_PATTERN: &str = "%m/%d/%Y";

/// Formats a count with en-US thousands separators (`1234567` → `1,234,567`).
#[must_use]
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[must_use]
pub fn format_unsigned_count(value: u64) -> String {
    match i64::try_from(value) {
        Ok(v) => format_count(v),
        Err(_) => format_count(i64::MAX),
    }
}

/// `M/D/YYYY` without zero padding, the en-US short date style.
#[must_use]
pub fn format_date_us(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

#[must_use]
pub fn format_axis_date(date: NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}

/// Text block shown next to a hovered data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    pub date: NaiveDate,
    pub lines: Vec<String>,
}

impl Tooltip {
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[must_use]
pub fn line_tooltip(obs: &Observation) -> Tooltip {
    Tooltip {
        date: obs.date,
        lines: vec![
            format!("Date: {}", format_date_us(obs.date)),
            format!(
                "Number of Cases: {}",
                format_unsigned_count(obs.cumulative_cases)
            ),
            format!(
                "Number of Deaths: {}",
                format_unsigned_count(obs.cumulative_deaths)
            ),
        ],
    }
}

#[must_use]
pub fn bar_tooltip(delta: &DeltaObservation) -> Tooltip {
    Tooltip {
        date: delta.date,
        lines: vec![
            format!("Date: {}", format_date_us(delta.date)),
            format!(
                "Rate of Increase from previous day: {} cases",
                format_count(delta.case_delta)
            ),
        ],
    }
}

/// Hover title for one treemap leaf.
#[must_use]
pub fn leaf_title(leaf: &RegionLeaf) -> String {
    format!(
        "State/Territory: {}\nCases: {} case(s)\nPercent of National Cases: {}%",
        leaf.label,
        format_unsigned_count(leaf.cases),
        format_percent(leaf.share_percent)
    )
}
