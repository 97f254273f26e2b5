// Card expiration clock

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default horizon for [`check_expiry`], in years.
pub const DEFAULT_MAX_YEARS_AHEAD: u32 = 15;

/// A calendar month, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a new year/month pair
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The UTC calendar month of `at`
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::new(at.year(), at.month())
    }

    /// The current UTC calendar month.
    ///
    /// Reads the system clock. Validation code takes the month as a
    /// parameter; only call this at the edge of an application.
    pub fn current() -> Self {
        Self::from_datetime(Utc::now())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Where an expiration month sits relative to a reference month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Valid,
    Expired,
    TooFarFuture,
}

/// Classify an expiration month against `as_of`.
///
/// A card stays usable through the last day of its stated month, so it is
/// expired only once `as_of` is strictly later than `(year, month)`. Years
/// beyond `as_of.year + max_years_ahead` are rejected as garbage. A month
/// outside 1..=12 never names a real expiry and counts as expired.
pub fn check_expiry(
    month: u32,
    year: i32,
    as_of: YearMonth,
    max_years_ahead: u32,
) -> ExpiryStatus {
    if !(1..=12).contains(&month) {
        return ExpiryStatus::Expired;
    }

    let expires = YearMonth::new(year, month);
    if as_of > expires {
        ExpiryStatus::Expired
    } else if i64::from(year) > i64::from(as_of.year) + i64::from(max_years_ahead) {
        ExpiryStatus::TooFarFuture
    } else {
        ExpiryStatus::Valid
    }
}

/// Whether a card expiring in `(year, month)` is unusable at `as_of`.
///
/// True for both past dates and dates beyond the default 15 year horizon.
///
/// ```
/// use payform_validation::{is_expired, YearMonth};
///
/// let as_of = YearMonth::new(2026, 1);
/// assert!(!is_expired(1, 2026, as_of));
/// assert!(is_expired(12, 2025, as_of));
/// assert!(is_expired(1, 2099, as_of));
/// ```
pub fn is_expired(month: u32, year: i32, as_of: YearMonth) -> bool {
    check_expiry(month, year, as_of, DEFAULT_MAX_YEARS_AHEAD) != ExpiryStatus::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_same_month_is_valid() {
        let as_of = YearMonth::new(2026, 1);
        assert_eq!(check_expiry(1, 2026, as_of, 15), ExpiryStatus::Valid);
    }

    #[test]
    fn test_previous_month_is_expired() {
        let as_of = YearMonth::new(2026, 1);
        assert_eq!(check_expiry(12, 2025, as_of, 15), ExpiryStatus::Expired);
        assert_eq!(
            check_expiry(5, 2026, YearMonth::new(2026, 6), 15),
            ExpiryStatus::Expired
        );
    }

    #[test]
    fn test_horizon_boundary() {
        let as_of = YearMonth::new(2026, 7);
        assert_eq!(check_expiry(12, 2041, as_of, 15), ExpiryStatus::Valid);
        assert_eq!(check_expiry(1, 2042, as_of, 15), ExpiryStatus::TooFarFuture);
        assert_eq!(check_expiry(1, 2030, as_of, 3), ExpiryStatus::TooFarFuture);
    }

    #[test]
    fn test_invalid_month_is_expired() {
        let as_of = YearMonth::new(2026, 1);
        assert_eq!(check_expiry(0, 2030, as_of, 15), ExpiryStatus::Expired);
        assert_eq!(check_expiry(13, 2030, as_of, 15), ExpiryStatus::Expired);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(YearMonth::new(2026, 1) > YearMonth::new(2025, 12));
        assert!(YearMonth::new(2026, 2) > YearMonth::new(2026, 1));
    }

    #[test]
    fn test_from_datetime_uses_utc() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(YearMonth::from_datetime(at), YearMonth::new(2025, 12));
    }

    #[test]
    fn test_display() {
        assert_eq!(YearMonth::new(2026, 3).to_string(), "2026-03");
    }
}
