//! Unix timestamp type with calendar-date helpers

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Unix timestamp in whole seconds
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use instacard::UnixSeconds;
///
/// let ts = UnixSeconds(1_700_000_000);
/// assert_eq!(
///     ts.calendar_date_in(&Utc),
///     NaiveDate::from_ymd_opt(2023, 11, 14)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixSeconds(pub i64);

impl UnixSeconds {
    /// Current wall-clock time
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.timestamp())
    }

    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Calendar date of this instant as seen in `tz`
    ///
    /// `None` when the timestamp is outside chrono's representable range.
    pub fn calendar_date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        tz.timestamp_opt(self.0, 0)
            .single()
            .map(|dt| dt.date_naive())
    }
}

impl std::fmt::Display for UnixSeconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
