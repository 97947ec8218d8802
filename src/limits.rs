// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-buyer daily purchase limit
//!
//! Each buyer has at most one [`PurchaseRecord`]: the running total bought
//! on the calendar day of their last purchase. Whether that total still
//! counts is derived on every check by comparing calendar dates:
//!
//! ```text
//! NoRecord --first purchase--> SameDay --date changes--> NewDay
//!                                 ^                        |
//!                                 +----next purchase-------+
//! ```
//!
//! Calendar dates are taken in the tracker's timezone, which defaults to the
//! host's local timezone. Two hosts in different timezones can therefore
//! disagree about when a buyer's day resets; pin the timezone with
//! [`DailyLimitTracker::with_timezone`] when that matters.
//!
//! Checks are pure. Persisting the updated record is the caller's job, and
//! must happen only after settlement is confirmed.

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::DailyLimitExceeded;
use crate::tracing::spans;
use crate::types::amount::DecimalAmount;
use crate::types::identity::BuyerId;
use crate::types::timestamp::UnixSeconds;

/// A buyer's accumulated purchases for the day of their last purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Buyer the record belongs to
    pub buyer: BuyerId,
    /// Total bought on the calendar day of `last_purchase_timestamp`
    pub total_bought_today: DecimalAmount,
    /// Time of the most recent accepted purchase
    pub last_purchase_timestamp: UnixSeconds,
}

impl PurchaseRecord {
    pub fn new(
        buyer: BuyerId,
        total_bought_today: DecimalAmount,
        last_purchase_timestamp: UnixSeconds,
    ) -> Self {
        Self {
            buyer,
            total_bought_today,
            last_purchase_timestamp,
        }
    }
}

/// Day relationship between a buyer's last purchase and now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    /// The buyer has never purchased
    NoRecord,
    /// The last purchase was on today's calendar date
    SameDay,
    /// The last purchase was on an earlier (or different) calendar date
    NewDay,
}

/// Daily limit checks against a fixed timezone
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use instacard::{parse_decimal, BuyerId, DailyLimitTracker, PurchaseRecord, UnixSeconds};
///
/// let tracker = DailyLimitTracker::with_timezone(Utc);
/// let morning = UnixSeconds(1_705_305_600); // 2024-01-15T08:00:00Z
/// let record = PurchaseRecord::new(
///     BuyerId::from("buyer-1"),
///     parse_decimal("900", 6).unwrap(),
///     morning,
/// );
///
/// let limit = parse_decimal("1000", 6).unwrap();
/// let evening = UnixSeconds(morning.0 + 10 * 3600);
///
/// let total = tracker
///     .check_and_accumulate(Some(&record), &parse_decimal("50", 6).unwrap(), &limit, evening)
///     .unwrap();
/// assert_eq!(total.to_string(), "950");
///
/// let err = tracker
///     .check_and_accumulate(Some(&record), &parse_decimal("150", 6).unwrap(), &limit, evening)
///     .unwrap_err();
/// assert_eq!(err.projected_total.to_string(), "1050");
/// ```
#[derive(Debug, Clone)]
pub struct DailyLimitTracker<Tz: TimeZone = Local> {
    timezone: Tz,
}

impl DailyLimitTracker<Local> {
    /// Tracker using the host's local calendar
    pub fn local() -> Self {
        Self { timezone: Local }
    }
}

impl Default for DailyLimitTracker<Local> {
    fn default() -> Self {
        Self::local()
    }
}

impl<Tz: TimeZone> DailyLimitTracker<Tz> {
    /// Tracker using the calendar of `timezone`
    pub fn with_timezone(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    /// Calendar date of `ts` in this tracker's timezone
    pub fn calendar_date(&self, ts: UnixSeconds) -> Option<NaiveDate> {
        ts.calendar_date_in(&self.timezone)
    }

    /// Classify `record` relative to `now`
    ///
    /// Timestamps outside the representable calendar range count as
    /// [`DayState::SameDay`], so an unreadable timestamp can never reset a
    /// buyer's total.
    pub fn day_state(&self, record: Option<&PurchaseRecord>, now: UnixSeconds) -> DayState {
        let Some(record) = record else {
            return DayState::NoRecord;
        };

        match (
            self.calendar_date(record.last_purchase_timestamp),
            self.calendar_date(now),
        ) {
            (Some(last), Some(today)) if last == today => DayState::SameDay,
            (Some(_), Some(_)) => DayState::NewDay,
            _ => {
                warn!(
                    buyer = %record.buyer,
                    last_purchase = %record.last_purchase_timestamp,
                    now = %now,
                    "Timestamp outside calendar range; keeping accumulated total"
                );
                DayState::SameDay
            }
        }
    }

    /// Project the buyer's daily total with `new_amount` and enforce `limit`
    ///
    /// Returns the total to persist on success. A purchase exactly reaching
    /// the limit is allowed.
    pub fn check_and_accumulate(
        &self,
        record: Option<&PurchaseRecord>,
        new_amount: &DecimalAmount,
        limit: &DecimalAmount,
        now: UnixSeconds,
    ) -> Result<DecimalAmount, DailyLimitExceeded> {
        let state = self.day_state(record, now);
        let span = spans::check_daily_limit(record.map(|r| &r.buyer), state);
        let _guard = span.enter();

        let projected_total = match (state, record) {
            (DayState::SameDay, Some(record)) => &record.total_bought_today + new_amount,
            _ => new_amount.clone(),
        };

        if &projected_total > limit {
            debug!(
                projected_total = %projected_total,
                limit = %limit,
                "Daily limit exceeded"
            );
            return Err(DailyLimitExceeded {
                limit: limit.clone(),
                projected_total,
            });
        }

        debug!(projected_total = %projected_total, "Daily limit check passed");
        Ok(projected_total)
    }
}

/// Check the daily limit using the host's local calendar
///
/// Free-function form of [`DailyLimitTracker::check_and_accumulate`].
pub fn check_and_accumulate(
    record: Option<&PurchaseRecord>,
    new_amount: &DecimalAmount,
    limit: &DecimalAmount,
    now: UnixSeconds,
) -> Result<DecimalAmount, DailyLimitExceeded> {
    DailyLimitTracker::local().check_and_accumulate(record, new_amount, limit, now)
}
