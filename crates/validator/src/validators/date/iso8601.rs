//! ISO-8601 date and date-time scanner.
//!
//! Supports:
//! - `YYYY`, `YYYY-MM`, `YYYY-MM-DD` / `YYYYMMDD`
//! - `YYYY-DDD` / `YYYYDDD` (ordinal day)
//! - `YYYY-Www`, `YYYY-Www-D` / `YYYYWwwD` (week date)
//! - Optional time after `T` or a space: `HH`, `HH:MM`, `HH:MM:SS` or the
//!   compact `HHMM` / `HHMMSS`, where the last field may carry a `.` or `,`
//!   decimal fraction
//! - Optional zone after the time: `Z`, `+HH`, `+HH:MM`, `+HHMM`
//!
//! The date separator must be used consistently (`2009-0519` is rejected),
//! as must the time separator (`14:3924` is rejected).

use chrono::{DateTime, Utc};

use super::Cursor;
use super::calendar::{self, DatePart, DateParts, Fraction, FractionUnit, Offset, TimePart};
use crate::foundation::{Validate, ValidationError};

// ============================================================================
// SCANNER
// ============================================================================

/// Scans `input` as ISO-8601. Returns `None` if the shape does not match;
/// range checks are left to [`calendar::resolve`].
pub(crate) fn scan(input: &str) -> Option<DateParts> {
    let mut cursor = Cursor::new(input);

    let negative = cursor.eat_if(|b| b == b'+' || b == b'-') == Some(b'-');
    let year = cursor.number(4)? as i32;
    let year = if negative { -year } else { year };

    if cursor.is_done() {
        return Some(DateParts::date(DatePart::Year(year)));
    }

    let date = if cursor.eat(b'-') {
        scan_extended_date(&mut cursor, year)?
    } else {
        scan_basic_date(&mut cursor, year)?
    };

    let mut parts = DateParts::date(date);
    if cursor.is_done() {
        return Some(parts);
    }

    // Time requires a separator and at least an hour.
    cursor.eat_if(|b| b == b'T' || b.is_ascii_whitespace())?;
    parts.time = Some(scan_time(&mut cursor)?);

    if !cursor.is_done() {
        parts.offset = Some(scan_zone(&mut cursor)?);
    }

    cursor.is_done().then_some(parts)
}

/// `-MM`, `-MM-DD`, `-DDD`, `-Www`, `-Www-D`, `-WwwD` (leading `-` consumed).
fn scan_extended_date(cursor: &mut Cursor<'_>, year: i32) -> Option<DatePart> {
    if cursor.eat(b'W') {
        let week = cursor.number(2)?;
        let weekday = if cursor.eat(b'-') {
            Some(cursor.number(1)?)
        } else if cursor.digit_run() == 1 {
            cursor.number(1)
        } else {
            None
        };
        return week_part(cursor, year, week, weekday);
    }

    match cursor.digit_run() {
        3 => Some(DatePart::Ordinal {
            year,
            day: cursor.number(3)?,
        }),
        2 => {
            let month = cursor.number(2)?;
            if !cursor.eat(b'-') {
                return Some(DatePart::YearMonth { year, month });
            }
            let day = cursor.number(2)?;
            (cursor.digit_run() == 0).then_some(DatePart::Ymd { year, month, day })
        }
        _ => None,
    }
}

/// `MMDD`, `DDD`, `Www`, `WwwD` directly after the year.
fn scan_basic_date(cursor: &mut Cursor<'_>, year: i32) -> Option<DatePart> {
    if cursor.eat(b'W') {
        let week = cursor.number(2)?;
        let weekday = if cursor.digit_run() == 1 {
            cursor.number(1)
        } else {
            None
        };
        return week_part(cursor, year, week, weekday);
    }

    match cursor.digit_run() {
        4 => Some(DatePart::Ymd {
            year,
            month: cursor.number(2)?,
            day: cursor.number(2)?,
        }),
        3 => Some(DatePart::Ordinal {
            year,
            day: cursor.number(3)?,
        }),
        _ => None,
    }
}

fn week_part(
    cursor: &Cursor<'_>,
    year: i32,
    week: u32,
    weekday: Option<u32>,
) -> Option<DatePart> {
    if cursor.digit_run() != 0 || !(1..=7).contains(&weekday.unwrap_or(1)) {
        return None;
    }
    Some(DatePart::Week {
        year,
        week,
        weekday: weekday.unwrap_or(1),
    })
}

/// `HH[(:)MM[(:)SS]]` with an optional fraction on the last field.
fn scan_time(cursor: &mut Cursor<'_>) -> Option<TimePart> {
    let mut time = TimePart {
        hour: cursor.number(2)?,
        ..TimePart::default()
    };

    let extended = cursor.eat(b':');
    if extended || cursor.digit_run() >= 2 {
        time.minute = cursor.number(2)?;
    } else {
        time.fraction = scan_fraction(cursor, FractionUnit::Hour)?;
        return Some(time);
    }

    if let Some(fraction) = scan_fraction(cursor, FractionUnit::Minute)? {
        time.fraction = Some(fraction);
        return Some(time);
    }

    let has_seconds = if extended {
        cursor.eat(b':')
    } else {
        cursor.digit_run() >= 2
    };
    if has_seconds {
        time.second = cursor.number(2)?;
        time.fraction = scan_fraction(cursor, FractionUnit::Second)?;
    }

    Some(time)
}

/// Optional `.ddd` / `,ddd`. The outer `None` is a structural failure: a
/// separator without digits, or a fraction followed by `:`.
fn scan_fraction(cursor: &mut Cursor<'_>, unit: FractionUnit) -> Option<Option<Fraction>> {
    if cursor.eat_if(|b| b == b'.' || b == b',').is_none() {
        return Some(None);
    }
    let digits = cursor.digits();
    if digits.is_empty() || cursor.peek() == Some(b':') {
        return None;
    }
    Some(Some(Fraction::from_digits(unit, digits)))
}

/// `Z`, `z`, `+HH`, `+HH:MM`, `+HHMM` (and the `-` forms).
fn scan_zone(cursor: &mut Cursor<'_>) -> Option<Offset> {
    if cursor.eat(b'Z') || cursor.eat(b'z') {
        return Some(Offset::UTC);
    }

    let negative = cursor.eat_if(|b| b == b'+' || b == b'-')? == b'-';
    let hours = cursor.number(2)?;
    let minutes = if cursor.eat(b':') {
        cursor.number(2)?
    } else if cursor.digit_run() == 2 {
        cursor.number(2)?
    } else {
        0
    };

    Some(Offset {
        negative,
        hours,
        minutes,
    })
}

// ============================================================================
// ISO-8601 VALIDATOR
// ============================================================================

/// Parses an ISO-8601 string to a UTC instant.
pub fn parse_iso8601(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::empty("Date"));
    }
    let parts = scan(input).ok_or_else(|| {
        ValidationError::new("invalid_iso8601", "Not an ISO-8601 date")
    })?;
    calendar::resolve(&parts)
}

/// Validates ISO-8601 dates, week dates, ordinal dates and date-times.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::Iso8601;
/// use formcheck_validator::foundation::Validate;
///
/// assert!(Iso8601.is_valid("2009-W21-2T01:22"));
/// assert!(Iso8601.is_valid("2010-02-18T16:23:48,3-06:00"));
/// assert!(!Iso8601.is_valid("2009-0519"));
/// assert!(!Iso8601.is_valid("2007-04-05T24:50"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso8601;

impl Validate for Iso8601 {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        parse_iso8601(input).map(|_| ())
    }
}

/// Returns `true` if `input` is an ISO-8601 date or date-time.
#[must_use]
pub fn is_iso8601(input: &str) -> bool {
    parse_iso8601(input).is_ok()
}

// ============================================================================
// TESTS
// ============================================================================
