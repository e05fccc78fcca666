//! Loader adapters: turn JSON or CSV text into [`RawRow`]s and hand them to
//! [`Series::load`]. Fetching the bytes is up to the caller.

use std::io::Read;

use tracing::debug;

use crate::core::{RawCount, RawRow, Series};
use crate::error::{SeriesError, SeriesResult};

/// Parses a JSON array of raw rows.
pub fn rows_from_json_str(input: &str) -> SeriesResult<Vec<RawRow>> {
    serde_json::from_str(input)
        .map_err(|e| SeriesError::Json(format!("failed to parse raw rows: {e}")))
}

/// Reads CSV with a header row naming `date`, `cases`, `deaths` and
/// optionally `state` and `fips`. Column order is free; extra columns are ignored.
pub fn rows_from_csv_reader<R: Read>(reader: R) -> SeriesResult<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| SeriesError::Csv(format!("failed to read header row: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let required = |name: &'static str| {
        column(name).ok_or_else(|| SeriesError::Csv(format!("missing required column {name:?}")))
    };
    let date_col = required("date")?;
    let cases_col = required("cases")?;
    let deaths_col = required("deaths")?;
    let state_col = column("state");
    let fips_col = column("fips");

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| SeriesError::Csv(format!("failed to read record {row}: {e}")))?;
        let field = |col: usize| record.get(col).unwrap_or_default().to_owned();
        rows.push(RawRow {
            date: field(date_col),
            cases: RawCount::Text(field(cases_col)),
            deaths: RawCount::Text(field(deaths_col)),
            state: state_col.map(field),
            fips: fips_col.map(field),
        });
    }

    debug!(row_count = rows.len(), "read csv rows");
    Ok(rows)
}

pub fn load_json_str(input: &str) -> SeriesResult<Series> {
    Series::load(&rows_from_json_str(input)?)
}

pub fn load_csv_reader<R: Read>(reader: R) -> SeriesResult<Series> {
    Series::load(&rows_from_csv_reader(reader)?)
}
