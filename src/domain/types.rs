//! Shared domain types.
//!
//! `LoadRecord` is the only type that leaves the crate boundary (as a CSV row);
//! the document types exist only while a response body is being normalized.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::AppError;

/// One normalized load observation.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadRecord {
    pub timestamp: DateTime<Utc>,
    pub load_mw: f64,
}

/// Spacing between consecutive points of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// `PT15M`
    QuarterHour,
}

impl Resolution {
    /// ISO-8601 duration code used by ENTSO-E for 15-minute data.
    pub const QUARTER_HOUR_CODE: &'static str = "PT15M";

    /// Returns `None` for any code other than the supported one.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            Self::QUARTER_HOUR_CODE => Some(Self::QuarterHour),
            _ => None,
        }
    }

    pub fn minutes(self) -> i64 {
        match self {
            Self::QuarterHour => 15,
        }
    }
}

/// A single `(position, quantity)` pair as read from a `Point` element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// 1-based ordinal within the period.
    pub position: u32,
    pub quantity: f64,
}

/// A contiguous span sharing one start instant and one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub resolution: Resolution,
    pub points: Vec<Point>,
}

impl Period {
    /// Absolute timestamp of `position` (`start + step * (position - 1)`).
    ///
    /// `None` when the result falls outside the representable date range.
    pub fn timestamp_at(&self, position: u32) -> Option<DateTime<Utc>> {
        let offset = i64::from(position.saturating_sub(1));
        Duration::try_minutes(self.resolution.minutes() * offset)
            .and_then(|delta| self.start.checked_add_signed(delta))
    }

    /// Records in point order (not yet globally sorted).
    pub fn records(&self) -> impl Iterator<Item = Result<LoadRecord, AppError>> + '_ {
        self.points.iter().map(|p| {
            let timestamp = self.timestamp_at(p.position).ok_or_else(|| {
                AppError::malformed(format!(
                    "`position` {} out of range for period start {}",
                    p.position, self.start
                ))
            })?;
            Ok(LoadRecord {
                timestamp,
                load_mw: p.quantity,
            })
        })
    }
}

/// Parse-time view of a response: one entry per `TimeSeries` that carried a period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesDocument {
    pub periods: Vec<Period>,
}

impl TimeSeriesDocument {
    /// Flatten every period and sort ascending by timestamp.
    ///
    /// The sort is stable, so overlapping series keep document order for
    /// equal timestamps. Duplicates are not removed.
    pub fn into_records(self) -> Result<Vec<LoadRecord>, AppError> {
        let mut out = self
            .periods
            .iter()
            .flat_map(Period::records)
            .collect::<Result<Vec<_>, _>>()?;
        out.sort_by_key(|r| r.timestamp);
        Ok(out)
    }
}
