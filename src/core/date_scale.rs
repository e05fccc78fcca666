use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{Series, TimelineInstant};
use crate::error::{SeriesError, SeriesResult};

/// Linear mapping between calendar dates and horizontal plot pixels.
///
/// Used by the interaction layer to turn a pointer x coordinate back into a
/// [`TimelineInstant`] for nearest-point lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DateScaleFields")]
pub struct DateScale {
    domain_start: TimelineInstant,
    domain_end: TimelineInstant,
    width_px: f64,
}

impl DateScale {
    pub fn new(first: NaiveDate, last: NaiveDate, width_px: f64) -> SeriesResult<Self> {
        if first >= last {
            return Err(SeriesError::InvalidData(
                "date scale domain must span at least one day".to_owned(),
            ));
        }
        Self::from_instants(
            TimelineInstant::from_date(first),
            TimelineInstant::from_date(last),
            width_px,
        )
    }

    fn from_instants(
        domain_start: TimelineInstant,
        domain_end: TimelineInstant,
        width_px: f64,
    ) -> SeriesResult<Self> {
        if domain_start >= domain_end {
            return Err(SeriesError::InvalidData(
                "date scale domain end must be after start".to_owned(),
            ));
        }
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(SeriesError::InvalidData(
                "date scale width must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            width_px,
        })
    }

    /// Fits the domain to the series extent. A single-day series is widened
    /// by one day.
    pub fn for_series(series: &Series, width_px: f64) -> SeriesResult<Self> {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Err(SeriesError::InvalidData(
                "date scale cannot be built from empty data".to_owned(),
            ));
        };
        let last = if last.date > first.date {
            last.date
        } else {
            first.date.checked_add_days(Days::new(1)).ok_or_else(|| {
                SeriesError::InvalidData("date scale domain overflows the calendar".to_owned())
            })?
        };
        Self::new(first.date, last, width_px)
    }

    #[must_use]
    pub fn domain(self) -> (TimelineInstant, TimelineInstant) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.width_px
    }

    #[must_use]
    pub fn date_to_pixel(self, date: NaiveDate) -> f64 {
        self.instant_to_pixel(TimelineInstant::from_date(date))
    }

    #[must_use]
    pub fn instant_to_pixel(self, instant: TimelineInstant) -> f64 {
        let offset = i128::from(instant.seconds()) - i128::from(self.domain_start.seconds());
        let normalized = offset as f64 / self.span();
        normalized * self.width_px
    }

    /// Pixels far outside the plot saturate at the ends of the timeline, so a
    /// nearest lookup on the result clamps to the first or last observation.
    pub fn pixel_to_instant(self, pixel: f64) -> SeriesResult<TimelineInstant> {
        if !pixel.is_finite() {
            return Err(SeriesError::InvalidData("pixel must be finite".to_owned()));
        }
        let normalized = pixel / self.width_px;
        let offset = (normalized * self.span())
            .round()
            .clamp(i64::MIN as f64, i64::MAX as f64) as i64;
        Ok(TimelineInstant(
            self.domain_start.seconds().saturating_add(offset),
        ))
    }

    fn span(self) -> f64 {
        self.domain_end.seconds().abs_diff(self.domain_start.seconds()) as f64
    }
}

#[derive(Deserialize)]
struct DateScaleFields {
    domain_start: TimelineInstant,
    domain_end: TimelineInstant,
    width_px: f64,
}

impl TryFrom<DateScaleFields> for DateScale {
    type Error = SeriesError;

    fn try_from(fields: DateScaleFields) -> SeriesResult<Self> {
        Self::from_instants(fields.domain_start, fields.domain_end, fields.width_px)
    }
}
