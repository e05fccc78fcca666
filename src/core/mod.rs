pub mod date_scale;
pub mod nearest;
pub mod raw;
pub mod region;
pub mod regional;
pub mod series;
pub mod types;

pub use date_scale::DateScale;
pub use nearest::{NearestMatch, NearestPointIndex, max_probes, nearest};
pub use raw::{ISO_DATE_FORMAT, RawCount, RawRow, coerce_count, parse_iso_date};
pub use region::{RegionBucket, classify, classify_optional};
pub use regional::{RegionGroup, RegionLeaf, RegionalBreakdown};
pub use series::{Series, deltas};
pub use types::{DeltaObservation, Observation, SECONDS_PER_DAY, TimelineInstant, TimelineKey};
