// SPDX-License-Identifier: Apache-2.0

//! Calendar-day arithmetic and the timestamp encoding shared by every
//! component that touches the store.
//!
//! Timestamps are persisted as RFC 3339 UTC text with a fixed sub-second
//! width so that lexicographic comparison in SQL matches chronological
//! order. Calendar dates coming from clients are interpreted in the
//! server's local timezone: a work date of `2025-01-09` means the local
//! day, wherever the crew is.

use crate::error::Error;
use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Encode a timestamp for storage. Fixed width keeps `>=`/`<` on the
/// TEXT column equivalent to chronological comparison.
#[must_use]
pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time, truncated to the stored (microsecond) precision so that
/// in-memory values compare equal to their persisted round trip.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let wall = Utc::now();
    DateTime::from_timestamp_micros(wall.timestamp_micros()).unwrap_or(wall)
}

pub fn decode_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp {
            field,
            value: raw.to_string(),
        })
}

pub fn parse_calendar_date(field: &'static str, raw: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

/// Local midnight of `date`, as a UTC instant. Falls back to the earliest
/// valid interpretation around DST transitions.
#[must_use]
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(ts) | LocalResult::Ambiguous(ts, _) => ts.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&midnight),
    }
}

/// The day after `date`; saturates at the calendar's end.
#[must_use]
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

/// Exclusive upper bound that makes an inclusive `dateTo` cover the whole
/// end date: start of the following local day.
#[must_use]
pub fn day_end_exclusive(date: NaiveDate) -> DateTime<Utc> {
    day_start(next_day(date))
}

#[must_use]
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}
