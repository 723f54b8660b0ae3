//! Reconcile a provider's date boundary semantics with the caller's
//! inclusive range.
//!
//! Some providers treat a date-range query as exclusive at one or both ends.
//! For those, the query sent upstream is widened and every returned record is
//! re-checked against the range the caller actually asked for.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use super::DateRange;

/// How a provider's date query must be adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryPolicy {
    /// The provider honours inclusive bounds; query as requested.
    Inclusive,
    /// Widen both bounds by one day, then post-filter against the requested
    /// range.
    #[default]
    WidenAndRefilter,
    /// Shift the start back one day only for single-day ranges, then
    /// post-filter against the requested range.
    ShiftStartOnSingleDay,
}

impl BoundaryPolicy {
    /// Stable kebab-case identifier used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inclusive => "inclusive",
            Self::WidenAndRefilter => "widen-and-refilter",
            Self::ShiftStartOnSingleDay => "shift-start-on-single-day",
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`BoundaryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown boundary policy {0:?}; expected inclusive, widen-and-refilter, or shift-start-on-single-day")]
pub struct UnknownBoundaryPolicy(pub String);

impl FromStr for BoundaryPolicy {
    type Err = UnknownBoundaryPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "inclusive" => Ok(Self::Inclusive),
            "widen-and-refilter" => Ok(Self::WidenAndRefilter),
            "shift-start-on-single-day" => Ok(Self::ShiftStartOnSingleDay),
            _ => Err(UnknownBoundaryPolicy(s.to_owned())),
        }
    }
}

/// Predicate applied to each fetched record's local date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Every record is admitted.
    AdmitAll,
    /// Only records dated inside the range (inclusive) are admitted.
    Within(DateRange),
}

impl PostFilter {
    /// Whether this filter needs to inspect record dates at all.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Within(_))
    }

    /// Apply the predicate to a record's local date.
    #[must_use]
    pub fn admits(&self, date: NaiveDate) -> bool {
        match self {
            Self::AdmitAll => true,
            Self::Within(range) => range.contains(date),
        }
    }
}

/// Query range to send upstream plus the filter to apply on the way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRange {
    /// Range the provider must be called with.
    pub query: DateRange,
    /// Filter re-checking returned records against the requested range.
    pub post_filter: PostFilter,
}

/// Compute the provider query range and post-filter for a requested range.
///
/// # Examples
/// ```
/// use photo_search::domain::{normalize_range, BoundaryPolicy, DateRange};
///
/// let requested = DateRange::parse("2024-01-02", Some("2024-01-02")).expect("valid");
/// let normalized = normalize_range(&requested, BoundaryPolicy::WidenAndRefilter);
/// assert_eq!(normalized.query.to_string(), "2024-01-01..=2024-01-03");
/// assert!(normalized.post_filter.is_active());
/// ```
#[must_use]
pub fn normalize_range(requested: &DateRange, policy: BoundaryPolicy) -> NormalizedRange {
    match policy {
        BoundaryPolicy::Inclusive => NormalizedRange {
            query: *requested,
            post_filter: PostFilter::AdmitAll,
        },
        BoundaryPolicy::WidenAndRefilter => NormalizedRange {
            query: requested.widened_by_one_day(),
            post_filter: PostFilter::Within(*requested),
        },
        BoundaryPolicy::ShiftStartOnSingleDay => {
            let query = if requested.is_single_day() {
                requested.with_start_one_day_earlier()
            } else {
                *requested
            };
            NormalizedRange {
                query,
                post_filter: PostFilter::Within(*requested),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
    }

    fn range(start: &str, end: Option<&str>) -> DateRange {
        DateRange::parse(start, end).expect("valid fixture range")
    }

    #[rstest]
    fn inclusive_policy_passes_range_through() {
        let requested = range("2024-01-01", Some("2024-01-31"));
        let normalized = normalize_range(&requested, BoundaryPolicy::Inclusive);
        assert_eq!(normalized.query, requested);
        assert_eq!(normalized.post_filter, PostFilter::AdmitAll);
        assert!(normalized.post_filter.admits(date(1999, 1, 1)));
    }

    #[rstest]
    fn widen_policy_expands_query_and_filters_to_original() {
        let requested = range("2024-01-10", Some("2024-01-20"));
        let normalized = normalize_range(&requested, BoundaryPolicy::WidenAndRefilter);
        assert_eq!(normalized.query, range("2024-01-09", Some("2024-01-21")));
        assert!(!normalized.post_filter.admits(date(2024, 1, 9)));
        assert!(normalized.post_filter.admits(date(2024, 1, 10)));
        assert!(normalized.post_filter.admits(date(2024, 1, 20)));
        assert!(!normalized.post_filter.admits(date(2024, 1, 21)));
    }

    #[rstest]
    fn widen_policy_narrows_single_day_back_to_that_day() {
        let requested = range("2024-01-02", Some("2024-01-02"));
        let normalized = normalize_range(&requested, BoundaryPolicy::WidenAndRefilter);
        assert_eq!(normalized.query, range("2024-01-01", Some("2024-01-03")));
        assert!(!normalized.post_filter.admits(date(2024, 1, 1)));
        assert!(normalized.post_filter.admits(date(2024, 1, 2)));
        assert!(!normalized.post_filter.admits(date(2024, 1, 3)));
    }

    #[rstest]
    fn widen_policy_keeps_open_end_open() {
        let requested = range("2024-01-01", None);
        let normalized = normalize_range(&requested, BoundaryPolicy::WidenAndRefilter);
        assert_eq!(normalized.query, range("2023-12-31", None));
        assert!(normalized.post_filter.admits(date(2024, 6, 1)));
        assert!(!normalized.post_filter.admits(date(2023, 12, 31)));
    }

    #[rstest]
    #[case(("2024-01-02", Some("2024-01-02")), ("2024-01-01", Some("2024-01-02")))]
    #[case(("2024-01-02", Some("2024-01-05")), ("2024-01-02", Some("2024-01-05")))]
    #[case(("2024-01-02", None), ("2024-01-02", None))]
    fn shift_policy_only_moves_single_day_start(
        #[case] bounds: (&str, Option<&str>),
        #[case] expected_query: (&str, Option<&str>),
    ) {
        let requested = range(bounds.0, bounds.1);
        let normalized = normalize_range(&requested, BoundaryPolicy::ShiftStartOnSingleDay);
        assert_eq!(normalized.query, range(expected_query.0, expected_query.1));
        assert_eq!(normalized.post_filter, PostFilter::Within(requested));
    }

    #[rstest]
    #[case("inclusive", BoundaryPolicy::Inclusive)]
    #[case("Widen_And_Refilter", BoundaryPolicy::WidenAndRefilter)]
    #[case(" shift-start-on-single-day ", BoundaryPolicy::ShiftStartOnSingleDay)]
    fn parses_policy_names(#[case] raw: &str, #[case] expected: BoundaryPolicy) {
        assert_eq!(raw.parse::<BoundaryPolicy>(), Ok(expected));
        assert_eq!(expected.as_str().parse::<BoundaryPolicy>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_policy() {
        assert!("exclusive".parse::<BoundaryPolicy>().is_err());
    }
}
