//! covid-series: data core for COVID-19 case/death dashboards.
//!
//! `core` owns the date-sorted series, day-over-day deltas, nearest-date
//! lookup and region bucketing. `api` builds plain view descriptions
//! (charts, treemap, tooltips) for an external renderer.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{Dashboard, DashboardConfig};
pub use crate::core::{
    DeltaObservation, NearestPointIndex, Observation, RawRow, RegionBucket, Series, classify,
    deltas, nearest,
};
pub use error::{SeriesError, SeriesResult};
