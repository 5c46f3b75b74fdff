//! Gregorian calendar rules and resolution of scanned dates to instants.
//!
//! The scanners only check shape; every range check (month, day of month,
//! ordinal day, ISO week, hour, minute, second, zone offset) happens here.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc, Weekday};

use crate::foundation::ValidationError;

const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

// ============================================================================
// CALENDAR RULES
// ============================================================================

/// Gregorian leap year: divisible by 4, except centuries not divisible by 400.
///
/// ```
/// use formcheck_validator::validators::date::is_leap_year;
///
/// assert!(is_leap_year(2008));
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(!is_leap_year(2011));
/// ```
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-based), or `None` for a month outside `1..=12`.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Number of days in `year`.
#[must_use]
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Expands a two-digit year: `00..=49` is 20xx, `50..=99` is 19xx.
#[must_use]
pub const fn expand_two_digit_year(year: i32) -> i32 {
    if year < 50 { 2000 + year } else { 1900 + year }
}

// ============================================================================
// SCANNED PARTS
// ============================================================================

/// Date portion of a scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DatePart {
    /// Year only; resolves to January 1.
    Year(i32),
    /// Year and month; resolves to the first of the month.
    YearMonth { year: i32, month: u32 },
    /// Calendar date.
    Ymd { year: i32, month: u32, day: u32 },
    /// Day of year, 1-based.
    Ordinal { year: i32, day: u32 },
    /// ISO week date; `weekday` is 1 (Monday) through 7 (Sunday).
    Week { year: i32, week: u32, weekday: u32 },
}

/// Which field a decimal fraction extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FractionUnit {
    Hour,
    Minute,
    Second,
}

/// Decimal fraction of a time field: `numerator / scale` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fraction {
    pub unit: FractionUnit,
    pub numerator: u64,
    pub scale: u64,
}

impl Fraction {
    /// Builds a fraction from its digits, keeping at most 18 of them.
    pub fn from_digits(unit: FractionUnit, digits: &[u8]) -> Self {
        let (numerator, scale) = digits
            .iter()
            .take(18)
            .fold((0u64, 1u64), |(n, s), d| (n * 10 + u64::from(d - b'0'), s * 10));
        Self {
            unit,
            numerator,
            scale,
        }
    }

    fn nanos(self) -> u64 {
        let unit = match self.unit {
            FractionUnit::Hour => NANOS_PER_HOUR,
            FractionUnit::Minute => NANOS_PER_MINUTE,
            FractionUnit::Second => NANOS_PER_SECOND,
        };
        (u128::from(self.numerator) * u128::from(unit) / u128::from(self.scale)) as u64
    }
}

/// Time-of-day portion of a scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TimePart {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub fraction: Option<Fraction>,
}

/// Zone offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Offset {
    pub negative: bool,
    pub hours: u32,
    pub minutes: u32,
}

impl Offset {
    pub const UTC: Self = Self {
        negative: false,
        hours: 0,
        minutes: 0,
    };

    /// Offset of `hours` west (negative) or east of UTC.
    pub const fn hours(hours: i32) -> Self {
        Self {
            negative: hours < 0,
            hours: hours.unsigned_abs(),
            minutes: 0,
        }
    }
}

/// Everything a date scanner extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateParts {
    pub date: DatePart,
    pub time: Option<TimePart>,
    pub offset: Option<Offset>,
}

impl DateParts {
    pub const fn date(date: DatePart) -> Self {
        Self {
            date,
            time: None,
            offset: None,
        }
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Applies calendar rules and converts to a UTC instant.
///
/// Inputs without a zone are read as UTC.
pub(crate) fn resolve(parts: &DateParts) -> Result<DateTime<Utc>, ValidationError> {
    let date = resolve_date(parts.date)?;

    let nanos = match parts.time {
        Some(time) => time_nanos(time)?,
        None => 0,
    };

    let offset_seconds = match parts.offset {
        Some(offset) => offset_seconds(offset)?,
        None => 0,
    };

    let local = date
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.checked_add_signed(TimeDelta::nanoseconds(nanos as i64)));
    let utc = local.and_then(|local| {
        TimeDelta::try_seconds(offset_seconds).and_then(|delta| local.checked_sub_signed(delta))
    });

    utc.map(|naive| naive.and_utc()).ok_or_else(out_of_range)
}

fn out_of_range() -> ValidationError {
    ValidationError::new("date_out_of_range", "Date is outside the supported range")
}

fn resolve_date(date: DatePart) -> Result<NaiveDate, ValidationError> {
    match date {
        DatePart::Year(year) => NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range),
        DatePart::YearMonth { year, month } => {
            check_month(year, month)?;
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)
        }
        DatePart::Ymd { year, month, day } => {
            let last = check_month(year, month)?;
            if day == 0 || day > last {
                return Err(ValidationError::new(
                    "invalid_day",
                    format!("Day {day} does not exist in {year}-{month:02}"),
                )
                .with_param("max", last.to_string()));
            }
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)
        }
        DatePart::Ordinal { year, day } => {
            let last = days_in_year(year);
            if day == 0 || day > last {
                return Err(ValidationError::new(
                    "invalid_ordinal_day",
                    format!("Day {day} does not exist in {year}"),
                )
                .with_param("max", last.to_string()));
            }
            NaiveDate::from_yo_opt(year, day).ok_or_else(out_of_range)
        }
        DatePart::Week {
            year,
            week,
            weekday,
        } => weekday_from_number(weekday)
            .and_then(|weekday| NaiveDate::from_isoywd_opt(year, week, weekday))
            .ok_or_else(|| {
                ValidationError::new(
                    "invalid_week",
                    format!("Week {week} does not exist in {year}"),
                )
            }),
    }
}

fn check_month(year: i32, month: u32) -> Result<u32, ValidationError> {
    days_in_month(year, month).ok_or_else(|| {
        ValidationError::new("invalid_month", format!("Month {month} is not in 1..=12"))
    })
}

const fn weekday_from_number(day: u32) -> Option<Weekday> {
    Some(match day {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => return None,
    })
}

fn time_nanos(time: TimePart) -> Result<u64, ValidationError> {
    if time.hour > 24 {
        return Err(ValidationError::new(
            "invalid_hour",
            format!("Hour {} is not in 0..=24", time.hour),
        ));
    }
    if time.minute > 59 {
        return Err(ValidationError::new(
            "invalid_minute",
            format!("Minute {} is not in 0..=59", time.minute),
        ));
    }
    if time.second > 59 {
        return Err(ValidationError::new(
            "invalid_second",
            format!("Second {} is not in 0..=59", time.second),
        ));
    }

    let fraction = time.fraction.map_or(0, Fraction::nanos);
    if time.hour == 24 && (time.minute != 0 || time.second != 0 || fraction != 0) {
        return Err(ValidationError::new(
            "invalid_hour",
            "Hour 24 is only valid as 24:00",
        ));
    }

    Ok(u64::from(time.hour) * NANOS_PER_HOUR
        + u64::from(time.minute) * NANOS_PER_MINUTE
        + u64::from(time.second) * NANOS_PER_SECOND
        + fraction)
}

fn offset_seconds(offset: Offset) -> Result<i64, ValidationError> {
    if offset.hours > 23 || offset.minutes > 59 {
        return Err(ValidationError::new(
            "invalid_offset",
            format!(
                "Zone offset {:02}:{:02} is out of range",
                offset.hours, offset.minutes
            ),
        ));
    }
    let seconds = i64::from(offset.hours * 3600 + offset.minutes * 60);
    Ok(if offset.negative { -seconds } else { seconds })
}

// ============================================================================
// TESTS
// ============================================================================
