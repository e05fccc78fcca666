use chrono::NaiveDate;
use covid_series::api::{Dashboard, DashboardConfig, SpikeWindow, bar_tooltip};
use covid_series::core::{RawRow, Series};
use covid_series::error::SeriesError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn national() -> Series {
    Series::load(&[
        RawRow::national("2020-04-01", 1_000_u64, 50_u64),
        RawRow::national("2020-04-02", 1_500_u64, 80_u64),
        RawRow::national("2020-04-03", 2_100_u64, 95_u64),
        RawRow::national("2020-04-04", 2_600_u64, 120_u64),
    ])
    .expect("national")
}

fn states() -> Series {
    Series::load(&[
        RawRow::state("2020-04-01", "Texas", "48", 100_u64, 2_u64),
        RawRow::state("2020-04-02", "Texas", "48", 180_u64, 3_u64),
        RawRow::state("2020-04-02", "Ohio", "39", 50_u64, 1_u64),
        RawRow::state("2020-04-03", "Texas", "48", 260_u64, 5_u64),
        RawRow::state("2020-04-03", "Ohio", "39", 70_u64, 1_u64),
        RawRow::state("2020-04-04", "Texas", "48", 300_u64, 6_u64),
        RawRow::state("2020-04-04", "Ohio", "39", 90_u64, 2_u64),
    ])
    .expect("states")
}

fn dashboard(config: DashboardConfig) -> Dashboard {
    Dashboard::new(national(), states(), config).expect("dashboard")
}

fn spike(start: NaiveDate, end: NaiveDate) -> SpikeWindow {
    SpikeWindow {
        start,
        end,
        ..SpikeWindow::default()
    }
}

#[test]
fn national_view_carries_series_deltas_and_titles() {
    let view = dashboard(DashboardConfig::default())
        .national_view()
        .expect("national view");

    assert_eq!(view.line_title, "Number of COVID-19 Cases in the U.S.");
    assert_eq!(
        view.bar_title,
        "Rate of Increase of COVID-19 cases per day in the U.S., 4/1/2020 - Present"
    );
    assert_eq!(view.series.len(), 4);
    let case_deltas: Vec<i64> = view.deltas.iter().map(|d| d.case_delta).collect();
    assert_eq!(case_deltas, vec![1_000, 500, 600, 500]);
    // Default spike window (Dec 2021) is outside this data.
    assert!(view.spike.is_none());
}

#[test]
fn bar_axis_labels_follow_stride_and_pattern() {
    let config = DashboardConfig::default()
        .with_bar_tick_stride(2)
        .with_axis_date_pattern("%Y-%m-%d");
    let view = dashboard(config).national_view().expect("view");
    let labels: Vec<&str> = view.bar_axis_labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(labels, vec!["2020-04-01", "2020-04-03"]);

    let default_view = dashboard(DashboardConfig::default())
        .national_view()
        .expect("view");
    assert_eq!(default_view.bar_axis_labels.len(), 1);
    assert_eq!(default_view.bar_axis_labels[0].text, "04/01/2020");
}

#[test]
fn spike_annotation_resolves_window_to_nearest_observations() {
    let config =
        DashboardConfig::default().with_spike(Some(spike(date(2020, 4, 2), date(2020, 4, 10))));
    let dash = dashboard(config);

    let national = dash.national_view().expect("view");
    let annotation = national.spike.expect("spike inside data");
    assert_eq!(annotation.start.date, date(2020, 4, 2));
    assert_eq!(annotation.end.date, date(2020, 4, 4));
    assert_eq!(annotation.title, "COVID-19 Spike");
    assert!(annotation.label.starts_with("The major spike"));

    let ohio = dash.state_view("Ohio").expect("ohio view");
    let annotation = ohio.spike.expect("spike inside data");
    assert!(annotation.label.starts_with("All states and territories"));
}

#[test]
fn state_view_filters_and_titles_by_state() {
    let view = dashboard(DashboardConfig::default())
        .state_view("Ohio")
        .expect("ohio view");
    assert_eq!(
        view.line_title,
        "Number of COVID-19 Cases in Ohio, 4/2/2020 - Present"
    );
    assert_eq!(
        view.bar_title,
        "Rate of Increase of COVID-19 cases per day in Ohio, 4/2/2020 - Present"
    );
    let case_deltas: Vec<i64> = view.deltas.iter().map(|d| d.case_delta).collect();
    assert_eq!(case_deltas, vec![50, 20, 20]);
    assert_eq!(
        bar_tooltip(&view.deltas[1]).text(),
        "Date: 4/3/2020\nRate of Increase from previous day: 20 cases"
    );
}

#[test]
fn unknown_state_is_empty_result() {
    let err = dashboard(DashboardConfig::default())
        .state_view("Atlantis")
        .expect_err("unknown state");
    assert!(matches!(err, SeriesError::EmptyResult { .. }));
}

#[test]
fn dropdown_and_slider_defaults() {
    let dash = dashboard(DashboardConfig::default());
    assert_eq!(dash.state_labels(), vec!["Ohio".to_owned(), "Texas".to_owned()]);
    assert_eq!(dash.default_state().as_deref(), Some("Ohio"));
    assert_eq!(dash.default_slider_index(), Some(3));

    let dash = dashboard(DashboardConfig::default().with_default_state("Texas"));
    assert_eq!(dash.default_state().as_deref(), Some("Texas"));
}

#[test]
fn treemap_view_uses_slider_date() {
    let dash = dashboard(DashboardConfig::default());

    let latest = dash.treemap_view(None).expect("latest treemap");
    assert_eq!(latest.date, date(2020, 4, 4));
    assert_eq!(latest.title, "Treemap of cases in the U.S. on 4/4/2020");
    assert_eq!(latest.breakdown.national_cases, 390);

    let first = dash.treemap_view(Some(0)).expect("first treemap");
    assert_eq!(first.breakdown.leaves().count(), 1);

    let err = dash.treemap_view(Some(99)).expect_err("out of range");
    assert!(matches!(err, SeriesError::InvalidData(_)));
}

#[test]
fn pointer_tooltip_uses_nearest_observation() {
    let dash = dashboard(DashboardConfig::default().with_plot_width(300.0));
    let view = dash.national_view().expect("view");
    let pointer = dash.line_pointer(&view).expect("pointer");
    assert_eq!(pointer.scale().width_px(), 300.0);

    // 3-day domain over 300px: 150px is 4/2 12:00, equidistant from 4/2 and 4/3.
    let tooltip = pointer.tooltip_at(150.0).expect("tooltip");
    assert_eq!(tooltip.date, date(2020, 4, 3));
    assert_eq!(
        tooltip.lines,
        vec![
            "Date: 4/3/2020".to_owned(),
            "Number of Cases: 2,100".to_owned(),
            "Number of Deaths: 95".to_owned(),
        ]
    );

    assert_eq!(pointer.observation_at(-500.0).expect("clamped").date, date(2020, 4, 1));
    assert_eq!(pointer.observation_at(5_000.0).expect("clamped").date, date(2020, 4, 4));
}

#[test]
fn pointer_far_past_the_plot_clamps_to_the_ends() {
    let dash = dashboard(DashboardConfig::default());
    let view = dash.national_view().expect("view");
    let pointer = dash.line_pointer(&view).expect("pointer");

    assert_eq!(pointer.tooltip_at(1e300).expect("tooltip").date, date(2020, 4, 4));
    assert_eq!(pointer.tooltip_at(-1e300).expect("tooltip").date, date(2020, 4, 1));
    assert!(pointer.tooltip_at(f64::NAN).is_err());
}

#[test]
fn line_pointer_follows_configured_plot_width() {
    let narrow = dashboard(DashboardConfig::default().with_plot_width(300.0));
    let wide = dashboard(DashboardConfig::default().with_plot_width(3_000.0));
    let narrow_view = narrow.national_view().expect("view");
    let wide_view = wide.national_view().expect("view");

    // 200px is 4/3 on a 300px plot but still 4/1 on a 3000px plot.
    let on_narrow = narrow.line_pointer(&narrow_view).expect("pointer");
    let on_wide = wide.line_pointer(&wide_view).expect("pointer");
    assert_eq!(on_narrow.observation_at(200.0).expect("lookup").date, date(2020, 4, 3));
    assert_eq!(on_wide.observation_at(200.0).expect("lookup").date, date(2020, 4, 1));
}

#[test]
fn empty_national_series_is_reported() {
    let dash = Dashboard::new(Series::default(), states(), DashboardConfig::default())
        .expect("dashboard");
    assert!(matches!(
        dash.national_view(),
        Err(SeriesError::EmptyResult { .. })
    ));
    assert!(matches!(
        dash.treemap_view(None),
        Err(SeriesError::EmptyResult { .. })
    ));
    assert_eq!(dash.default_slider_index(), None);
}

#[test]
fn invalid_config_is_rejected() {
    let err = Dashboard::new(
        national(),
        states(),
        DashboardConfig::default().with_plot_width(0.0),
    )
    .expect_err("zero width");
    assert!(matches!(err, SeriesError::InvalidData(_)));
}
