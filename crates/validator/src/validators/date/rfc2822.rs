//! RFC-2822 date scanner.
//!
//! Accepts the email-header form `[Day,] DD Mon YYYY HH:MM[:SS] [zone]` and
//! the `Day Mon DD YYYY ...` variant common in log and browser output.
//! Comments (`(...)`, nested, with `\` escapes) and folding whitespace may
//! appear between any two tokens. The day name is not cross-checked against
//! the date.

use chrono::{DateTime, Utc};

use super::Cursor;
use super::calendar::{self, DatePart, DateParts, Offset, TimePart, expand_two_digit_year};
use crate::foundation::{Validate, ValidationError};

const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

// ============================================================================
// TOKENS
// ============================================================================

/// Full name or its three-letter abbreviation, case-insensitive.
fn matches_name(word: &[u8], name: &str) -> bool {
    (word.len() == 3 || word.len() == name.len())
        && name.as_bytes()[..word.len()].eq_ignore_ascii_case(word)
}

fn is_day_name(word: &[u8]) -> bool {
    DAY_NAMES.iter().any(|name| matches_name(word, name))
}

fn month_number(word: &[u8]) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|name| matches_name(word, name))
        .map(|index| index as u32 + 1)
}

/// Named zones from RFC 2822 section 4.3 plus `UTC` and `Z`.
fn zone_offset(word: &[u8]) -> Option<Offset> {
    let upper = word.to_ascii_uppercase();
    let hours = match upper.as_slice() {
        b"GMT" | b"UT" | b"UTC" | b"Z" => 0,
        b"EST" => -5,
        b"EDT" => -4,
        b"CST" => -6,
        b"CDT" => -5,
        b"MST" => -7,
        b"MDT" => -6,
        b"PST" => -8,
        b"PDT" => -7,
        _ => return None,
    };
    Some(Offset::hours(hours))
}

fn is_universal(word: &[u8]) -> bool {
    matches!(word.to_ascii_uppercase().as_slice(), b"GMT" | b"UT" | b"UTC")
}

/// Skips comments and folding whitespace. Returns whether anything was
/// skipped, or `None` for an unterminated comment.
fn skip_cfws(cursor: &mut Cursor<'_>) -> Option<bool> {
    let mut skipped = false;
    loop {
        if cursor.eat_if(|b| b.is_ascii_whitespace()).is_some() {
            skipped = true;
        } else if cursor.eat(b'(') {
            skip_comment(cursor)?;
            skipped = true;
        } else {
            return Some(skipped);
        }
    }
}

fn skip_comment(cursor: &mut Cursor<'_>) -> Option<()> {
    let mut depth = 1usize;
    while depth > 0 {
        match cursor.eat_if(|_| true)? {
            b'\\' => {
                cursor.eat_if(|_| true)?;
            }
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
    }
    Some(())
}

/// CFWS that must be present between two tokens.
fn separator(cursor: &mut Cursor<'_>) -> Option<()> {
    skip_cfws(cursor)?.then_some(())
}

/// `[+-]HHMM` with nothing but a separator after it.
fn numeric_zone(cursor: &mut Cursor<'_>) -> Option<Offset> {
    let negative = cursor.eat_if(|b| b == b'+' || b == b'-')? == b'-';
    let hours = cursor.number(2)?;
    let minutes = cursor.number(2)?;
    (cursor.digit_run() == 0).then_some(Offset {
        negative,
        hours,
        minutes,
    })
}

// ============================================================================
// SCANNER
// ============================================================================

/// Scans `input` as an RFC-2822 date. Returns `None` if the shape does not
/// match; range checks are left to [`calendar::resolve`].
pub(crate) fn scan(input: &str) -> Option<DateParts> {
    let mut cursor = Cursor::new(input);
    skip_cfws(&mut cursor)?;

    let mut word = cursor.letters();
    if !word.is_empty() && is_day_name(word) {
        skip_cfws(&mut cursor)?;
        cursor.eat(b',');
        skip_cfws(&mut cursor)?;
        word = cursor.letters();
    }

    let (day, month) = if word.is_empty() {
        let day = day_of_month(&mut cursor)?;
        separator(&mut cursor)?;
        (day, month_number(cursor.letters())?)
    } else {
        let month = month_number(word)?;
        separator(&mut cursor)?;
        (day_of_month(&mut cursor)?, month)
    };
    separator(&mut cursor)?;

    let year = year(&mut cursor)?;
    separator(&mut cursor)?;

    let time = time_of_day(&mut cursor)?;
    let spaced = skip_cfws(&mut cursor)?;

    let mut parts = DateParts::date(DatePart::Ymd { year, month, day });
    parts.time = Some(time);

    if !cursor.is_done() {
        if !spaced {
            return None;
        }
        parts.offset = Some(zone(&mut cursor)?);
        skip_cfws(&mut cursor)?;
    }

    cursor.is_done().then_some(parts)
}

fn day_of_month(cursor: &mut Cursor<'_>) -> Option<u32> {
    match cursor.digit_run() {
        len @ (1 | 2) => cursor.number(len),
        _ => None,
    }
}

/// Two-digit years pivot at 50, three-digit years count from 1900.
fn year(cursor: &mut Cursor<'_>) -> Option<i32> {
    let len = cursor.digit_run();
    if !(2..=4).contains(&len) {
        return None;
    }
    let value = cursor.number(len)? as i32;
    Some(match len {
        2 => expand_two_digit_year(value),
        3 => 1900 + value,
        _ => value,
    })
}

fn time_of_day(cursor: &mut Cursor<'_>) -> Option<TimePart> {
    let hour = cursor.number(2)?;
    cursor.eat(b':').then_some(())?;
    let minute = cursor.number(2)?;
    let second = if cursor.eat(b':') {
        cursor.number(2)?
    } else {
        0
    };
    Some(TimePart {
        hour,
        minute,
        second,
        fraction: None,
    })
}

/// A zone name, a numeric offset, or `GMT` followed by a numeric offset.
fn zone(cursor: &mut Cursor<'_>) -> Option<Offset> {
    let word = cursor.letters();
    if word.is_empty() {
        return numeric_zone(cursor);
    }

    let named = zone_offset(word)?;
    if is_universal(word) {
        skip_cfws(cursor)?;
        if matches!(cursor.peek(), Some(b'+' | b'-')) {
            return numeric_zone(cursor);
        }
    }
    Some(named)
}

// ============================================================================
// RFC-2822 VALIDATOR
// ============================================================================

/// Parses an RFC-2822 date to a UTC instant.
pub fn parse_rfc2822(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::empty("Date"));
    }
    let parts = scan(input).ok_or_else(|| {
        ValidationError::new("invalid_rfc2822", "Not an RFC-2822 date")
    })?;
    calendar::resolve(&parts)
}

/// Validates RFC-2822 dates as found in email headers.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::Rfc2822;
/// use formcheck_validator::foundation::Validate;
///
/// assert!(Rfc2822.is_valid("Tue, 1 Jul 2003 10:52:37 +0200"));
/// assert!(Rfc2822.is_valid("Mon Sep 28 1964 00:05:49 GMT+1100 (AEDST)"));
/// assert!(!Rfc2822.is_valid("Fri, 31 Nov 1997 09:55:06 -0600"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rfc2822;

impl Validate for Rfc2822 {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        parse_rfc2822(input).map(|_| ())
    }
}

/// Returns `true` if `input` is an RFC-2822 date.
#[must_use]
pub fn is_rfc2822(input: &str) -> bool {
    parse_rfc2822(input).is_ok()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    // --- Valid ---

    #[test]
    fn valid_header_dates() {
        assert!(is_rfc2822("Fri, 21 Nov 1997 09:55:06 -0600"));
        assert!(is_rfc2822("Tue, 15 Nov 1994 12:45:26 GMT"));
        assert!(is_rfc2822("Tue, 1 Jul 2003 10:52:37 +0200"));
        assert!(is_rfc2822("Thu, 13 Feb 1969 23:32:54 -0330"));
        assert!(is_rfc2822("Mon, 24 Nov 1997 14:22:01 -0800"));
        assert!(is_rfc2822("24 Nov 1997 14:22:01 -0800"));
        assert!(is_rfc2822("Wed, 10 Apr 2014 08:21:03 +0000"));
        assert!(is_rfc2822("Wed, 9 Apr 2014 06:21:03 -0200"));
    }

    #[test]
    fn valid_month_first_variant() {
        assert!(is_rfc2822("Mon Sep 28 1964 00:05:49 GMT+1100 (AEDST)"));
        assert!(is_rfc2822("Mon Sep 28 1964 00:05:49 +1100 (AEDST)"));
        assert!(is_rfc2822("Mon Sep 28 1964 00:05:49 +1100"));
        assert!(is_rfc2822("Mon Aug 17 2015 00:24:56 GMT-0500 (CDT)"));
    }

    #[test]
    fn valid_folding_whitespace() {
        assert!(is_rfc2822("Mon Sep 28 1964 00:05:49 \nGMT\n+1100\n"));
        assert!(is_rfc2822("Mon Sep 28 1964 00:05:49 \nGMT\n+1100\n(AEDST)"));
        assert!(is_rfc2822(
            "Thu,          13\n     Feb\n  1969\n        23:32\n     -0330"
        ));
        assert!(is_rfc2822(
            "Thu,          13\n     Feb\n  1969\n        23:32\n     -0330 (Newfoundland Time)"
        ));
        assert!(is_rfc2822(
            "Thu,          29\n     Feb\n  1968\n        13:32\n     -0330"
        ));
    }

    #[test]
    fn valid_full_names_and_named_zones() {
        assert!(is_rfc2822("Thursday, 13 February 1969 23:32:54 EST"));
        assert!(is_rfc2822("13 feb 69 23:32 pdt"));
        assert!(is_rfc2822("(sent) 13 Feb 1969 (late) 23:32 ((nested) comment)"));
    }

    #[test]
    fn day_name_is_not_cross_checked() {
        assert!(is_rfc2822("Fri, 30 Nov 1997 09:55:06 -0600"));
    }

    // --- Invalid ---

    #[test]
    fn invalid_calendar() {
        assert!(!is_rfc2822("Thu,          29\n     Feb\n  1969\n        13:32\n     -0330"));
        assert!(!is_rfc2822("Fri, 31 Nov 1997 09:55:06 -0600"));
        assert_eq!(
            Rfc2822
                .validate("Fri, 31 Nov 1997 09:55:06 -0600")
                .unwrap_err()
                .code,
            "invalid_day"
        );
    }

    #[test]
    fn invalid_shapes() {
        assert!(!is_rfc2822("GMT"));
        assert!(!is_rfc2822("foo"));
        assert!(!is_rfc2822("Fri, 21 Nov 1997"));
        assert!(!is_rfc2822("Fri, 21 Foo 1997 09:55:06 GMT"));
        assert!(!is_rfc2822("Fri, 21 Nov 1997 09:55:06GMT"));
        assert!(!is_rfc2822("Fri, 21 Nov 1997 09:55:06 XYZ"));
        assert!(!is_rfc2822("Fri, 21 Nov 1997 09:55:06 -06000"));
        assert!(!is_rfc2822("Fri, 21 Nov 1997 09:55:06 (unterminated"));
        assert!(!is_rfc2822("Fri, 21Nov 1997 09:55:06 GMT"));
    }

    // --- Instants ---

    #[test]
    fn zones_resolve_to_utc() {
        let expected = Utc.with_ymd_and_hms(1997, 11, 21, 15, 55, 6).unwrap();
        assert_eq!(parse_rfc2822("Fri, 21 Nov 1997 09:55:06 -0600").unwrap(), expected);
        assert_eq!(parse_rfc2822("Fri, 21 Nov 1997 09:55:06 CST").unwrap(), expected);
    }

    #[test]
    fn short_years() {
        let instant = parse_rfc2822("13 Feb 69 23:32 GMT").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(1969, 2, 13, 23, 32, 0).unwrap());
        let instant = parse_rfc2822("13 Feb 103 23:32 GMT").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2003, 2, 13, 23, 32, 0).unwrap());
        let instant = parse_rfc2822("13 Feb 24 23:32 GMT").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 2, 13, 23, 32, 0).unwrap());
    }
}
