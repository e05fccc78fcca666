use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    DateScale, DeltaObservation, NearestPointIndex, Observation, RegionalBreakdown, Series,
};
use crate::error::{SeriesError, SeriesResult};

use super::dashboard_config::DashboardConfig;
use super::label_format::{Tooltip, format_axis_date, format_date_us, line_tooltip};

/// Callout over the highlighted spike window of a line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpikeAnnotation {
    pub title: String,
    pub label: String,
    pub start: Observation,
    pub end: Observation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub date: NaiveDate,
    pub text: String,
}

/// Render description for a cumulative line chart plus its daily-delta bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartView {
    pub line_title: String,
    pub bar_title: String,
    pub series: Series,
    pub deltas: Vec<DeltaObservation>,
    pub bar_axis_labels: Vec<AxisLabel>,
    pub spike: Option<SpikeAnnotation>,
}

impl ChartView {
    /// Pointer-to-tooltip mapper over this view's line series.
    pub fn pointer(&self, plot_width_px: f64) -> SeriesResult<LinePointer<'_>> {
        LinePointer::new(&self.series, plot_width_px)
    }
}

/// Render description for the per-date regional treemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapView {
    pub title: String,
    pub date: NaiveDate,
    pub breakdown: RegionalBreakdown,
}

/// Maps pointer x coordinates on a line chart to the nearest observation.
///
/// Built once per rendered chart and reused for every pointer-move event.
#[derive(Debug, Clone, Copy)]
pub struct LinePointer<'a> {
    scale: DateScale,
    index: NearestPointIndex<'a>,
}

impl<'a> LinePointer<'a> {
    pub fn new(series: &'a Series, plot_width_px: f64) -> SeriesResult<Self> {
        Ok(Self {
            scale: DateScale::for_series(series, plot_width_px)?,
            index: NearestPointIndex::new(series),
        })
    }

    #[must_use]
    pub fn scale(&self) -> DateScale {
        self.scale
    }

    pub fn observation_at(&self, pointer_x: f64) -> SeriesResult<&'a Observation> {
        let instant = self.scale.pixel_to_instant(pointer_x)?;
        Ok(self.index.lookup(&instant)?.observation)
    }

    pub fn tooltip_at(&self, pointer_x: f64) -> SeriesResult<Tooltip> {
        self.observation_at(pointer_x).map(line_tooltip)
    }
}

/// National and state series plus the pure view builders over them.
///
/// Selection changes (state dropdown, date slider) are expressed as
/// arguments; every call rebuilds its view from the owned series.
#[derive(Debug, Clone)]
pub struct Dashboard {
    national: Series,
    states: Series,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(national: Series, states: Series, config: DashboardConfig) -> SeriesResult<Self> {
        config.validate()?;
        debug!(
            national_count = national.len(),
            state_row_count = states.len(),
            "dashboard initialized"
        );
        Ok(Self {
            national,
            states,
            config,
        })
    }

    #[must_use]
    pub fn national(&self) -> &Series {
        &self.national
    }

    #[must_use]
    pub fn states(&self) -> &Series {
        &self.states
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Dropdown contents: distinct state names, sorted.
    #[must_use]
    pub fn state_labels(&self) -> Vec<String> {
        self.states.entity_labels()
    }

    /// Configured default state, else the first name in the dropdown.
    #[must_use]
    pub fn default_state(&self) -> Option<String> {
        self.config
            .default_state
            .clone()
            .or_else(|| self.state_labels().into_iter().next())
    }

    /// Slider starts on the most recent national date.
    #[must_use]
    pub fn default_slider_index(&self) -> Option<usize> {
        self.national.len().checked_sub(1)
    }

    pub fn national_view(&self) -> SeriesResult<ChartView> {
        let first = self
            .national
            .first()
            .ok_or_else(|| SeriesError::empty_result("national"))?;
        let line_title = "Number of COVID-19 Cases in the U.S.".to_owned();
        let bar_title = format!(
            "Rate of Increase of COVID-19 cases per day in the U.S., {} - Present",
            format_date_us(first.date)
        );
        let label = self.config.spike.as_ref().map(|s| s.national_label.clone());
        Ok(self.chart_view(self.national.clone(), line_title, bar_title, label))
    }

    /// Charts for one state; unknown names yield [`SeriesError::EmptyResult`].
    pub fn state_view(&self, state: &str) -> SeriesResult<ChartView> {
        let series = self.states.filter_by_label(state)?;
        let first = series
            .first()
            .ok_or_else(|| SeriesError::empty_result(state))?;
        let line_title = format!(
            "Number of COVID-19 Cases in {state}, {} - Present",
            format_date_us(first.date)
        );
        let bar_title = format!(
            "Rate of Increase of COVID-19 cases per day in {state}, {} - Present",
            format_date_us(first.date)
        );
        let label = self.config.spike.as_ref().map(|s| s.state_label.clone());
        Ok(self.chart_view(series, line_title, bar_title, label))
    }

    /// Pointer mapper for `view` sized to the configured plot width.
    pub fn line_pointer<'v>(&self, view: &'v ChartView) -> SeriesResult<LinePointer<'v>> {
        view.pointer(self.config.plot_width_px)
    }

    /// Treemap for the national date at `slider_index` (default: latest).
    pub fn treemap_view(&self, slider_index: Option<usize>) -> SeriesResult<TreemapView> {
        let index = match slider_index.or_else(|| self.default_slider_index()) {
            Some(index) => index,
            None => return Err(SeriesError::empty_result("national")),
        };
        let date = self
            .national
            .get(index)
            .map(|obs| obs.date)
            .ok_or_else(|| {
                SeriesError::InvalidData(format!(
                    "slider index {index} out of range for {} dates",
                    self.national.len()
                ))
            })?;
        let breakdown = RegionalBreakdown::for_date(&self.states, date)?;
        Ok(TreemapView {
            title: format!("Treemap of cases in the U.S. on {}", format_date_us(date)),
            date,
            breakdown,
        })
    }

    fn chart_view(
        &self,
        series: Series,
        line_title: String,
        bar_title: String,
        spike_label: Option<String>,
    ) -> ChartView {
        let deltas = series.deltas();
        let bar_axis_labels = deltas
            .iter()
            .step_by(self.config.bar_tick_stride)
            .map(|delta| AxisLabel {
                date: delta.date,
                text: format_axis_date(delta.date, &self.config.axis_date_pattern),
            })
            .collect();
        let spike = spike_label.and_then(|label| self.spike_annotation(&series, label));
        debug!(
            title = %line_title,
            points = series.len(),
            has_spike = spike.is_some(),
            "built chart view"
        );
        ChartView {
            line_title,
            bar_title,
            series,
            deltas,
            bar_axis_labels,
            spike,
        }
    }

    fn spike_annotation(&self, series: &Series, label: String) -> Option<SpikeAnnotation> {
        let window = self.config.spike.as_ref()?;
        let (first, last) = (series.first()?, series.last()?);
        if window.end < first.date || window.start > last.date {
            return None;
        }
        let index = NearestPointIndex::new(series);
        let start = index.lookup(&window.start).ok()?.observation.clone();
        let end = index.lookup(&window.end).ok()?.observation.clone();
        Some(SpikeAnnotation {
            title: window.title.clone(),
            label,
            start,
            end,
        })
    }
}
