//! Date validators.
//!
//! Three grammar families are tried in priority order and the first one that
//! structurally matches decides the verdict:
//!
//! 1. ISO-8601 calendar, ordinal and week dates with optional time and zone
//!    ([`iso8601`])
//! 2. RFC-2822 email-header dates, tolerant of comments and folding
//!    whitespace ([`rfc2822`])
//! 3. Common locale patterns such as `MM/DD/YYYY` ([`locale`])
//!
//! After the structural match, calendar rules are applied ([`calendar`]):
//! Gregorian leap years, days per month, ISO week existence, and time-of-day
//! ranges.
//!
//! [`is_after`] / [`is_before`] compare instants parsed through the same
//! grammar; an operand that fails to parse makes the comparison `false`.

pub mod calendar;
pub mod compare;
pub mod iso8601;
pub mod locale;
pub mod rfc2822;

pub use calendar::{days_in_month, days_in_year, expand_two_digit_year, is_leap_year};
pub use compare::{After, Before, is_after, is_before};
pub use iso8601::{Iso8601, is_iso8601};
pub use rfc2822::{Rfc2822, is_rfc2822};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::foundation::{Validate, ValidationError};

// ============================================================================
// OPTIONS
// ============================================================================

/// Options for [`Date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOptions {
    /// Try the ISO-8601 grammar.
    pub iso8601: bool,
    /// Try the RFC-2822 grammar.
    pub rfc2822: bool,
    /// Try the locale patterns.
    pub locale_patterns: bool,
    /// Read ambiguous locale dates (`04/08/2011`) as day first.
    pub day_first: bool,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            iso8601: true,
            rfc2822: true,
            locale_patterns: true,
            day_first: false,
        }
    }
}

impl DateOptions {
    /// Sets [`iso8601`](Self::iso8601).
    #[must_use = "builder methods must be chained or built"]
    pub fn iso8601(mut self, yes: bool) -> Self {
        self.iso8601 = yes;
        self
    }

    /// Sets [`rfc2822`](Self::rfc2822).
    #[must_use = "builder methods must be chained or built"]
    pub fn rfc2822(mut self, yes: bool) -> Self {
        self.rfc2822 = yes;
        self
    }

    /// Sets [`locale_patterns`](Self::locale_patterns).
    #[must_use = "builder methods must be chained or built"]
    pub fn locale_patterns(mut self, yes: bool) -> Self {
        self.locale_patterns = yes;
        self
    }

    /// Sets [`day_first`](Self::day_first).
    #[must_use = "builder methods must be chained or built"]
    pub fn day_first(mut self, yes: bool) -> Self {
        self.day_first = yes;
        self
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parses `input` to a UTC instant using the enabled grammar families.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::date::{parse_date, DateOptions};
///
/// let options = DateOptions::default();
/// let a = parse_date("2009-05-19 14:39:22-06:00", &options).unwrap();
/// let b = parse_date("Tue, 19 May 2009 20:39:22 GMT", &options).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_date(input: &str, options: &DateOptions) -> Result<DateTime<Utc>, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::empty("Date"));
    }

    let scanned = options
        .iso8601
        .then(|| iso8601::scan(input))
        .flatten()
        .or_else(|| options.rfc2822.then(|| rfc2822::scan(input)).flatten())
        .or_else(|| {
            options
                .locale_patterns
                .then(|| locale::scan(input, options.day_first))
                .flatten()
        });

    match scanned {
        Some(parts) => calendar::resolve(&parts),
        None => Err(ValidationError::new(
            "unrecognized_date",
            "Not a recognized date format",
        )),
    }
}

// ============================================================================
// DATE VALIDATOR
// ============================================================================

/// Validates dates in any enabled grammar family.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::Date;
/// use formcheck_validator::foundation::Validate;
///
/// let v = Date::new();
/// assert!(v.is_valid("2008-02-29"));
/// assert!(v.is_valid("Fri, 21 Nov 1997 09:55:06 -0600"));
/// assert!(v.is_valid("08/04/2011"));
/// assert!(!v.is_valid("2011-09-31"));
/// assert!(!v.is_valid("1900-02-29"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Date {
    options: DateOptions,
}

impl Date {
    /// Creates a validator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given options.
    #[must_use]
    pub fn with_options(options: DateOptions) -> Self {
        Self { options }
    }

    /// The options this validator applies.
    #[must_use]
    pub fn options(&self) -> &DateOptions {
        &self.options
    }
}

impl Validate for Date {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        parse_date(input, &self.options).map(|_| ())
    }
}

/// Creates a new [`Date`] validator with default options.
#[must_use]
pub fn date() -> Date {
    Date::new()
}

/// Returns `true` if `input` is a date under `options`.
#[must_use]
pub fn is_date(input: &str, options: &DateOptions) -> bool {
    parse_date(input, options).is_ok()
}

// ============================================================================
// BYTE CURSOR
// ============================================================================

/// Forward-only cursor over the bytes of a date string.
///
/// All grammar tokens are ASCII, so non-ASCII bytes simply fail to match.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Consumes `byte` if it is next.
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the next byte if it satisfies `pred`.
    pub fn eat_if(&mut self, pred: impl Fn(u8) -> bool) -> Option<u8> {
        let byte = self.peek().filter(|&b| pred(b))?;
        self.pos += 1;
        Some(byte)
    }

    /// Length of the run of ASCII digits at the cursor.
    pub fn digit_run(&self) -> usize {
        self.bytes[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    }

    /// Consumes exactly `len` digits and returns their value.
    pub fn number(&mut self, len: usize) -> Option<u32> {
        let digits = self.bytes.get(self.pos..self.pos + len)?;
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos += len;
        Some(
            digits
                .iter()
                .fold(0, |acc, d| acc * 10 + u32::from(d - b'0')),
        )
    }

    /// Consumes the whole run of digits at the cursor.
    pub fn digits(&mut self) -> &'a [u8] {
        let len = self.digit_run();
        let run = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        run
    }

    /// Consumes the run of ASCII letters at the cursor.
    pub fn letters(&mut self) -> &'a [u8] {
        let len = self.bytes[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let run = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        run
    }
}

// ============================================================================
// TESTS
// ============================================================================
