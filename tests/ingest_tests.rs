use chrono::NaiveDate;
use covid_series::api::{load_csv_reader, load_json_str, rows_from_csv_reader, rows_from_json_str};
use covid_series::core::{Observation, RawCount};
use covid_series::error::SeriesError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

const US_CSV: &str = "date,cases,deaths
2020-01-22,1,0
2020-01-21,1,0
2020-01-23,1,0
2020-01-24,2,0
";

const STATES_CSV: &str = "date,state,fips,cases,deaths
2020-03-01,New York,36,1,0
2020-03-01,Rhode Island,44,2,0
2020-03-02,New York,36,1,0
2020-03-02,Puerto Rico,72,0,0
";

#[test]
fn national_csv_loads_sorted() {
    let series = load_csv_reader(US_CSV.as_bytes()).expect("load csv");
    assert_eq!(series.len(), 4);
    assert_eq!(series.first().map(|o| o.date), Some(date(2020, 1, 21)));
    let deltas: Vec<i64> = series.deltas().iter().map(|d| d.case_delta).collect();
    assert_eq!(deltas, vec![1, 0, 0, 1]);
}

#[test]
fn state_csv_keeps_labels_and_fips() {
    let series = load_csv_reader(STATES_CSV.as_bytes()).expect("load csv");
    assert_eq!(series.len(), 4);
    assert_eq!(
        series.as_slice()[0],
        Observation::new(date(2020, 3, 1), 1, 0).with_entity("New York", "36")
    );
    assert_eq!(
        series.entity_labels(),
        vec![
            "New York".to_owned(),
            "Puerto Rico".to_owned(),
            "Rhode Island".to_owned()
        ]
    );
}

#[test]
fn csv_columns_may_be_reordered() {
    let input = "deaths,cases,date\n3,10,2020-04-01\n";
    let rows = rows_from_csv_reader(input.as_bytes()).expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cases, RawCount::Text("10".to_owned()));
    assert_eq!(rows[0].deaths, RawCount::Text("3".to_owned()));
    assert_eq!(rows[0].state, None);
}

#[test]
fn csv_missing_column_is_reported() {
    let err = rows_from_csv_reader("date,cases\n2020-04-01,1\n".as_bytes())
        .expect_err("deaths column missing");
    assert!(matches!(err, SeriesError::Csv(_)));
    assert!(format!("{err}").contains("deaths"));
}

#[test]
fn csv_blank_count_is_a_parse_error() {
    let err = load_csv_reader("date,cases,deaths\n2020-04-01,5,\n".as_bytes())
        .expect_err("blank deaths must fail");
    assert!(matches!(
        err,
        SeriesError::Parse {
            row: 0,
            field: "deaths",
            ..
        }
    ));
}

#[test]
fn json_rows_accept_numbers_and_strings() {
    let input = r#"[
        {"date": "2020-04-02", "cases": "150", "deaths": 8},
        {"date": "2020-04-01", "cases": 100, "deaths": "5", "state": "Ohio", "fips": "39"}
    ]"#;
    let rows = rows_from_json_str(input).expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].cases, RawCount::Integer(100));

    let series = load_json_str(input).expect("series");
    assert_eq!(series.first().and_then(|o| o.label.as_deref()), Some("Ohio"));
    assert_eq!(series.last().map(|o| o.cumulative_cases), Some(150));
}

#[test]
fn json_counts_above_i64_max_load_exactly() {
    let input = r#"[{"date": "2020-04-01", "cases": 9223372036854775809, "deaths": 0}]"#;
    let rows = rows_from_json_str(input).expect("rows");
    assert_eq!(rows[0].cases, RawCount::Unsigned(9_223_372_036_854_775_809));

    let series = load_json_str(input).expect("series");
    assert_eq!(series.first().map(|o| o.cumulative_cases), Some(9_223_372_036_854_775_809));
}

#[test]
fn json_with_negative_count_fails_to_load() {
    let input = r#"[{"date": "2020-04-01", "cases": -1, "deaths": 0}]"#;
    let err = load_json_str(input).expect_err("negative cases must fail");
    assert!(matches!(err, SeriesError::Parse { field: "cases", .. }));
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = rows_from_json_str("{not json").expect_err("malformed");
    assert!(matches!(err, SeriesError::Json(_)));
}
