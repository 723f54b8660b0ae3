//! Calendar date ranges used to scope photo searches.
//!
//! A [`DateRange`] is validated once at the boundary. Every later step, from
//! provider range widening to post-filtering, works on this type rather than
//! on raw strings.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors raised while building a [`DateRange`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    /// A supplied date string could not be parsed.
    #[error("invalid {field} date: {value:?}")]
    Unparseable {
        /// Which bound failed (`start` or `end`).
        field: &'static str,
        /// The rejected input.
        value: String,
    },
    /// The end date precedes the start date.
    #[error("start date {start} is after end date {end}")]
    Inverted {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },
}

/// Inclusive calendar range with an optional upper bound.
///
/// ## Invariants
/// - When `end` is present, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from already-parsed dates.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use photo_search::domain::DateRange;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    /// let range = DateRange::new(start, None).expect("open range is valid");
    /// assert!(range.end().is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Inverted`] when `end < start`.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, DateRangeError> {
        match end {
            Some(end) if end < start => Err(DateRangeError::Inverted { start, end }),
            _ => Ok(Self { start, end }),
        }
    }

    /// Parse a range from date strings.
    ///
    /// Each bound accepts `YYYY-MM-DD`, optionally followed by a time part
    /// (`2024-01-02T10:00:00`); only the calendar date is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError`] when a bound does not parse or the range is
    /// inverted.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, DateRangeError> {
        let start_date = parse_local_date(start).ok_or_else(|| DateRangeError::Unparseable {
            field: "start",
            value: start.to_owned(),
        })?;
        let end_date = end
            .map(|raw| {
                parse_local_date(raw).ok_or_else(|| DateRangeError::Unparseable {
                    field: "end",
                    value: raw.to_owned(),
                })
            })
            .transpose()?;
        Self::new(start_date, end_date)
    }

    /// First day included in the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day included in the range, or `None` when open-ended.
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Whether the range covers exactly one day.
    #[must_use]
    pub fn is_single_day(&self) -> bool {
        self.end == Some(self.start)
    }

    /// Inclusive membership test; an absent end is unbounded above.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.is_none_or(|end| date <= end)
    }

    /// Widen both bounds by one day. Open ends stay open.
    ///
    /// Arithmetic saturates at the calendar limits chrono can represent.
    #[must_use]
    pub fn widened_by_one_day(&self) -> Self {
        Self {
            start: day_before(self.start),
            end: self.end.map(day_after),
        }
    }

    /// Move only the start back by one day.
    #[must_use]
    pub fn with_start_one_day_earlier(&self) -> Self {
        Self {
            start: day_before(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}..={}", self.start, end),
            None => write!(f, "{}..", self.start),
        }
    }
}

fn day_before(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Extract the calendar date from a local date or timestamp string.
///
/// The date prefix is read as written, so offsets such as `+05:00` never move
/// the record onto another day.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use photo_search::domain::parse_local_date;
///
/// assert_eq!(
///     parse_local_date("2024-01-03T00:30:00.000Z"),
///     NaiveDate::from_ymd_opt(2024, 1, 3),
/// );
/// assert_eq!(parse_local_date("yesterday"), None);
/// ```
#[must_use]
pub fn parse_local_date(raw: &str) -> Option<NaiveDate> {
    let (date, remainder) = NaiveDate::parse_and_remainder(raw.trim(), DATE_FORMAT).ok()?;
    let accepted = remainder.is_empty()
        || remainder.starts_with('T')
        || remainder.starts_with('t')
        || remainder.starts_with(' ');
    accepted.then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
    }

    #[rstest]
    fn rejects_inverted_range() {
        let err = DateRange::parse("2024-02-02", Some("2024-02-01")).expect_err("inverted");
        assert_eq!(
            err,
            DateRangeError::Inverted {
                start: date(2024, 2, 2),
                end: date(2024, 2, 1),
            }
        );
    }

    #[rstest]
    #[case("", None, "start")]
    #[case("02/01/2024", None, "start")]
    #[case("2024-01-01", Some("2024-13-01"), "end")]
    #[case("2024-01-01x", None, "start")]
    fn rejects_unparseable_bounds(
        #[case] start: &str,
        #[case] end: Option<&str>,
        #[case] expected_field: &str,
    ) {
        let err = DateRange::parse(start, end).expect_err("bad input rejected");
        match err {
            DateRangeError::Unparseable { field, .. } => assert_eq!(field, expected_field),
            DateRangeError::Inverted { .. } => panic!("expected parse failure, got {err}"),
        }
    }

    #[rstest]
    #[case("2024-01-02", Some(date(2024, 1, 2)))]
    #[case("2024-01-02T10:00", Some(date(2024, 1, 2)))]
    #[case("2024-01-01T23:00:00+05:00", Some(date(2024, 1, 1)))]
    #[case("2024-01-03 00:30:00", Some(date(2024, 1, 3)))]
    #[case("  2024-01-03  ", Some(date(2024, 1, 3)))]
    #[case("not a date", None)]
    fn extracts_local_calendar_date(#[case] raw: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_local_date(raw), expected);
    }

    #[rstest]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::parse("2024-01-01", Some("2024-01-31")).expect("valid");
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[rstest]
    fn open_range_is_unbounded_above() {
        let range = DateRange::parse("2024-01-01", None).expect("valid");
        assert!(range.contains(date(2024, 6, 1)));
        assert!(!range.contains(date(2023, 12, 31)));
    }

    #[rstest]
    fn widening_single_day_spans_three_days() {
        let range = DateRange::parse("2024-01-02", Some("2024-01-02")).expect("valid");
        assert!(range.is_single_day());
        let widened = range.widened_by_one_day();
        assert_eq!(widened.start(), date(2024, 1, 1));
        assert_eq!(widened.end(), Some(date(2024, 1, 3)));
    }

    #[rstest]
    fn widening_saturates_at_calendar_limits() {
        let range = DateRange::new(NaiveDate::MIN, Some(NaiveDate::MAX)).expect("valid");
        assert_eq!(range.widened_by_one_day(), range);
    }

    #[rstest]
    fn display_marks_open_ranges() {
        let open = DateRange::parse("2024-01-01", None).expect("valid");
        let closed = DateRange::parse("2024-01-01", Some("2024-01-05")).expect("valid");
        assert_eq!(open.to_string(), "2024-01-01..");
        assert_eq!(closed.to_string(), "2024-01-01..=2024-01-05");
    }
}
