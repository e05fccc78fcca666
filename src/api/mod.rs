mod dashboard;
mod dashboard_config;
pub mod ingest;
mod json_contract;
pub mod label_format;

pub use dashboard::{AxisLabel, ChartView, Dashboard, LinePointer, SpikeAnnotation, TreemapView};
pub use dashboard_config::{DashboardConfig, SpikeWindow};
pub use ingest::{load_csv_reader, load_json_str, rows_from_csv_reader, rows_from_json_str};
pub use json_contract::{
    CHART_VIEW_JSON_SCHEMA_V1, ChartViewJsonContractV1, TREEMAP_VIEW_JSON_SCHEMA_V1,
    TreemapViewJsonContractV1,
};
pub use label_format::{
    DEFAULT_AXIS_DATE_PATTERN, Tooltip, bar_tooltip, format_axis_date, format_count,
    format_date_us, format_percent, format_unsigned_count, leaf_title, line_tooltip,
};
