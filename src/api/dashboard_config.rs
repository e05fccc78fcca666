use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{SeriesError, SeriesResult};

use super::label_format::DEFAULT_AXIS_DATE_PATTERN;

/// Highlighted date range called out on the line charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpikeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub title: String,
    pub national_label: String,
    pub state_label: String,
}

impl Default for SpikeWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2021, 12, 20).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2022, 2, 14).unwrap_or_default(),
            title: "COVID-19 Spike".to_owned(),
            national_label:
                "The major spike in cases occurred between approximately 20-Dec-2021 and 14-Feb-2022"
                    .to_owned(),
            state_label: "All states and territories were also experiencing a spike in cases around this time"
                .to_owned(),
        }
    }
}

/// Dashboard bootstrap configuration.
///
/// Serializable so host applications can persist the setup; every field has
/// a default, so partial JSON documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_plot_width_px")]
    pub plot_width_px: f64,
    #[serde(default = "default_axis_date_pattern")]
    pub axis_date_pattern: String,
    /// Every n-th date gets a bar-chart axis label.
    #[serde(default = "default_bar_tick_stride")]
    pub bar_tick_stride: usize,
    #[serde(default)]
    pub default_state: Option<String>,
    #[serde(default = "default_spike")]
    pub spike: Option<SpikeWindow>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            plot_width_px: default_plot_width_px(),
            axis_date_pattern: default_axis_date_pattern(),
            bar_tick_stride: default_bar_tick_stride(),
            default_state: None,
            spike: default_spike(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_plot_width(mut self, plot_width_px: f64) -> Self {
        self.plot_width_px = plot_width_px;
        self
    }

    #[must_use]
    pub fn with_axis_date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.axis_date_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_bar_tick_stride(mut self, stride: usize) -> Self {
        self.bar_tick_stride = stride;
        self
    }

    #[must_use]
    pub fn with_default_state(mut self, state: impl Into<String>) -> Self {
        self.default_state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_spike(mut self, spike: Option<SpikeWindow>) -> Self {
        self.spike = spike;
        self
    }

    pub fn validate(&self) -> SeriesResult<()> {
        if !self.plot_width_px.is_finite() || self.plot_width_px <= 0.0 {
            return Err(SeriesError::InvalidData(
                "plot width must be finite and > 0".to_owned(),
            ));
        }
        if self.axis_date_pattern.trim().is_empty()
            || StrftimeItems::new(&self.axis_date_pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(SeriesError::InvalidData(format!(
                "invalid axis date pattern: {:?}",
                self.axis_date_pattern
            )));
        }
        if self.bar_tick_stride == 0 {
            return Err(SeriesError::InvalidData(
                "bar tick stride must be > 0".to_owned(),
            ));
        }
        if self.spike.as_ref().is_some_and(|spike| spike.start > spike.end) {
            return Err(SeriesError::InvalidData(
                "spike window start must be <= end".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> SeriesResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| SeriesError::Json(format!("failed to parse dashboard config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> SeriesResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SeriesError::Json(format!("failed to serialize dashboard config: {e}")))
    }
}

fn default_plot_width_px() -> f64 {
    1200.0
}

fn default_axis_date_pattern() -> String {
    DEFAULT_AXIS_DATE_PATTERN.to_owned()
}

fn default_bar_tick_stride() -> usize {
    100
}

fn default_spike() -> Option<SpikeWindow> {
    Some(SpikeWindow::default())
}
