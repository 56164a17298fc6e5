//! ENTSO-E XML ingest and normalization.
//!
//! Turns a `GL_MarketDocument` response body into a flat, time-ordered
//! `Vec<LoadRecord>`:
//!
//! ```text
//! <GL_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-6:generationloaddocument:3:0">
//!   <TimeSeries>
//!     <Period>
//!       <timeInterval><start>202401010000</start>...</timeInterval>
//!       <resolution>PT15M</resolution>
//!       <Point><position>1</position><quantity>100.0</quantity></Point>
//!       ...
//! ```
//!
//! Documents are assumed to use a single default namespace, taken from the
//! root element and applied to every lookup below it. Mixed-namespace
//! documents are not supported.

use chrono::{DateTime, NaiveDateTime, Utc};
use roxmltree::{Document, Node};

use crate::domain::{LoadRecord, Period, Point, Resolution, TimeSeriesDocument};
use crate::error::AppError;

/// Compact ENTSO-E timestamp, e.g. `202401010000`.
pub const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";
/// Minute-precision ISO form used inside real `timeInterval` elements.
const ISO_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Parse a response body into time-ordered load records.
pub fn normalize(raw: &str) -> Result<Vec<LoadRecord>, AppError> {
    let document = parse_document(raw)?;
    let records = document.into_records()?;
    tracing::debug!(records = records.len(), "normalized ENTSO-E document");
    Ok(records)
}

/// Parse a response body into its periods without flattening.
pub fn parse_document(raw: &str) -> Result<TimeSeriesDocument, AppError> {
    let xml = Document::parse(raw).map_err(|e| AppError::malformed(format!("not well-formed XML: {e}")))?;

    let root = xml.root_element();
    let scope = Scope {
        namespace: root.tag_name().namespace(),
    };

    let mut periods = Vec::new();
    for (index, series) in scope.children(root, "TimeSeries").enumerate() {
        let series_no = index + 1;
        // Only the first period of a series is read.
        let Some(period) = scope.child(series, "Period") else {
            tracing::debug!(series = series_no, "skipping TimeSeries without Period");
            continue;
        };
        periods.push(scope.read_period(period, series_no)?);
    }

    Ok(TimeSeriesDocument { periods })
}

/// Parse a period start in compact `YYYYMMDDHHMM` form (UTC).
///
/// The ISO minute form (`2024-01-01T00:00Z`) is accepted too.
pub fn parse_period_start(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, COMPACT_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, ISO_MINUTE_FORMAT))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Element lookups bound to the document's one namespace.
#[derive(Clone, Copy)]
struct Scope<'a> {
    namespace: Option<&'a str>,
}

impl<'a> Scope<'a> {
    fn matches(&self, node: &Node, local: &str) -> bool {
        node.is_element() && node.tag_name().name() == local && node.tag_name().namespace() == self.namespace
    }

    fn children<'i>(self, parent: Node<'a, 'i>, local: &'static str) -> impl Iterator<Item = Node<'a, 'i>> {
        parent.children().filter(move |n| self.matches(n, local))
    }

    fn child<'i>(&self, parent: Node<'a, 'i>, local: &str) -> Option<Node<'a, 'i>> {
        parent.children().find(|n| self.matches(n, local))
    }

    /// Text of the child at `path`, or a `MalformedDocument` naming the field.
    fn text<'i>(&self, parent: Node<'a, 'i>, path: &[&str], location: &str) -> Result<&'a str, AppError> {
        let mut node = parent;
        for local in path {
            node = self
                .child(node, local)
                .ok_or_else(|| AppError::malformed(format!("{location}: missing `{}`", path.join("/"))))?;
        }
        node.text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::malformed(format!("{location}: empty `{}`", path.join("/"))))
    }

    fn read_period(&self, period: Node<'a, '_>, series_no: usize) -> Result<Period, AppError> {
        let location = format!("TimeSeries {series_no}");

        let start_raw = self.text(period, &["timeInterval", "start"], &location)?;
        let start = parse_period_start(start_raw).ok_or_else(|| {
            AppError::malformed(format!("{location}: invalid `timeInterval/start` '{start_raw}'"))
        })?;

        let code = self.text(period, &["resolution"], &location)?;
        let resolution =
            Resolution::from_code(code).ok_or_else(|| AppError::UnsupportedResolution(code.to_string()))?;

        let mut out = Period {
            start,
            resolution,
            points: Vec::new(),
        };
        for (index, point) in self.children(period, "Point").enumerate() {
            let location = format!("{location}, Point {}", index + 1);
            let point = self.read_point(point, &location)?;
            if out.timestamp_at(point.position).is_none() {
                return Err(AppError::malformed(format!(
                    "{location}: `position` {} out of range",
                    point.position
                )));
            }
            out.points.push(point);
        }

        Ok(out)
    }

    fn read_point(&self, point: Node<'a, '_>, location: &str) -> Result<Point, AppError> {
        let position_raw = self.text(point, &["position"], location)?;
        let position = position_raw
            .parse::<u32>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| AppError::malformed(format!("{location}: invalid `position` '{position_raw}'")))?;

        let quantity_raw = self.text(point, &["quantity"], location)?;
        let quantity = quantity_raw
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite())
            .ok_or_else(|| AppError::malformed(format!("{location}: invalid `quantity` '{quantity_raw}'")))?;

        Ok(Point { position, quantity })
    }
}
