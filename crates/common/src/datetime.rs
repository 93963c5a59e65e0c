//! DateTime utilities.
//!
//! Storage keeps zone-naive timestamps; the wire carries offset timestamps.
//! Both sides agree on one process-wide [`FixedOffset`].

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeZone, Utc};

/// Build a fixed offset from seconds east of UTC.
///
/// # Examples
///
/// ```
/// use brewery_common::datetime::offset_from_seconds;
///
/// let cet = offset_from_seconds(3600).unwrap();
/// assert_eq!(cet.local_minus_utc(), 3600);
/// assert!(offset_from_seconds(86_400).is_err());
/// ```
pub fn offset_from_seconds(seconds: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| anyhow!("Zone offset {} seconds is out of range", seconds))
}

/// Current wall-clock time in the given offset, without the zone.
pub fn now_local(offset: &FixedOffset) -> NaiveDateTime {
    Utc::now().with_timezone(offset).naive_local()
}

/// Attach `offset` to a naive local timestamp.
///
/// A fixed offset has no gaps or folds, so this never fails in practice;
/// `None` is only returned for values at the edge of the representable range.
///
/// # Examples
///
/// ```
/// use brewery_common::datetime::{attach_offset, offset_from_seconds};
/// use chrono::NaiveDate;
///
/// let naive = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let wire = attach_offset(naive, &offset_from_seconds(7200).unwrap()).unwrap();
/// assert_eq!(wire.to_rfc3339(), "2024-05-01T12:00:00+02:00");
/// ```
pub fn attach_offset(naive: NaiveDateTime, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    match offset.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        _ => None,
    }
}

/// Convert an offset timestamp to the naive local time in `offset`.
///
/// The instant is preserved; only the zone is dropped.
pub fn to_local_naive(datetime: &DateTime<FixedOffset>, offset: &FixedOffset) -> NaiveDateTime {
    datetime.with_timezone(offset).naive_local()
}
