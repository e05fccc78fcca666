//! US census-style region buckets keyed by two-digit state FIPS code.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegionBucket {
    Northeast,
    Midwest,
    South,
    West,
    /// Fallback for territories and any code outside the state table.
    Territories,
}

impl RegionBucket {
    /// Buckets in display order.
    pub const ALL: [Self; 5] = [
        Self::Northeast,
        Self::Midwest,
        Self::South,
        Self::West,
        Self::Territories,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Northeast => "Northeast",
            Self::Midwest => "Midwest",
            Self::South => "South",
            Self::West => "West",
            Self::Territories => "Territories",
        }
    }
}

impl fmt::Display for RegionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a FIPS code to its region. Unlisted codes map to
/// [`RegionBucket::Territories`] rather than failing.
#[must_use]
pub fn classify(code: &str) -> RegionBucket {
    match code {
        "09" | "23" | "25" | "33" | "34" | "36" | "42" | "44" | "50" => RegionBucket::Northeast,
        "17" | "18" | "19" | "20" | "26" | "27" | "29" | "31" | "38" | "39" | "46" | "55" => {
            RegionBucket::Midwest
        }
        "01" | "05" | "10" | "11" | "12" | "13" | "21" | "22" | "24" | "28" | "37" | "40"
        | "45" | "47" | "48" | "51" | "54" => RegionBucket::South,
        "02" | "04" | "06" | "08" | "15" | "16" | "30" | "32" | "35" | "41" | "49" | "53"
        | "56" => RegionBucket::West,
        _ => RegionBucket::Territories,
    }
}

/// Like [`classify`], treating a missing code as a territory.
#[must_use]
pub fn classify_optional(code: Option<&str>) -> RegionBucket {
    code.map_or(RegionBucket::Territories, classify)
}
