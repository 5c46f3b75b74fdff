//! Instant comparison against a reference date.

use chrono::{DateTime, Utc};

use super::{DateOptions, parse_date};
use crate::foundation::{ConfigError, Validate, ValidationError};

/// Reference point for [`After`] and [`Before`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference {
    /// The current time, read at each validation.
    Now,
    At(DateTime<Utc>),
}

impl Reference {
    fn parse(reference: &str) -> Result<Self, ConfigError> {
        parse_date(reference, &DateOptions::default())
            .map(Self::At)
            .map_err(|_| ConfigError::InvalidReferenceDate(reference.to_owned()))
    }

    fn instant(self) -> DateTime<Utc> {
        match self {
            Self::Now => Utc::now(),
            Self::At(instant) => instant,
        }
    }
}

fn parse_input(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_date(input, &DateOptions::default())
}

/// Parses both sides and applies `cmp`. `None` as the reference means now.
fn compare(
    input: &str,
    reference: Option<&str>,
    cmp: impl Fn(DateTime<Utc>, DateTime<Utc>) -> bool,
) -> bool {
    let reference = match reference.map(Reference::parse) {
        None => Reference::Now,
        Some(Ok(reference)) => reference,
        Some(Err(err)) => {
            tracing::debug!(error = %err, "date comparison with unparseable reference");
            return false;
        }
    };
    parse_input(input).is_ok_and(|instant| cmp(instant, reference.instant()))
}

/// Returns `true` if `input` is strictly after `reference` (now if `None`).
///
/// Either side failing to parse makes the result `false`.
///
/// ```
/// use formcheck_validator::validators::is_after;
///
/// assert!(is_after("2011-08-04", Some("2011-08-03")));
/// assert!(!is_after("2011-08-03", Some("2011-08-03")));
/// assert!(!is_after("2015-09-17", Some("invalid date")));
/// ```
#[must_use]
pub fn is_after(input: &str, reference: Option<&str>) -> bool {
    compare(input, reference, |a, b| a > b)
}

/// Returns `true` if `input` is strictly before `reference` (now if `None`).
///
/// Either side failing to parse makes the result `false`.
#[must_use]
pub fn is_before(input: &str, reference: Option<&str>) -> bool {
    compare(input, reference, |a, b| a < b)
}

// ============================================================================
// VALIDATORS
// ============================================================================

macro_rules! comparison_validator {
    ($(#[$meta:meta])* $name:ident, $op:tt, $code:literal, $relation:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            reference: Reference,
        }

        impl $name {
            /// Compares against the current time at each validation.
            #[must_use]
            pub const fn now() -> Self {
                Self { reference: Reference::Now }
            }

            /// Compares against a fixed instant.
            #[must_use]
            pub const fn at(instant: DateTime<Utc>) -> Self {
                Self { reference: Reference::At(instant) }
            }

            /// Compares against a date string in any supported format.
            ///
            /// # Errors
            ///
            /// Returns [`ConfigError::InvalidReferenceDate`] if `reference`
            /// does not parse.
            pub fn parse(reference: &str) -> Result<Self, ConfigError> {
                Reference::parse(reference).map(|reference| Self { reference })
            }

            /// The fixed reference instant, or `None` when comparing to now.
            #[must_use]
            pub const fn reference(&self) -> Option<DateTime<Utc>> {
                match self.reference {
                    Reference::Now => None,
                    Reference::At(instant) => Some(instant),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::now()
            }
        }

        impl Validate for $name {
            type Input = str;

            fn validate(&self, input: &str) -> Result<(), ValidationError> {
                let instant = parse_input(input)?;
                let reference = self.reference.instant();
                if instant $op reference {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        $code,
                        format!(concat!("Date must be ", $relation, " {}"), reference.to_rfc3339()),
                    )
                    .with_param("reference", reference.to_rfc3339()))
                }
            }
        }
    };
}

comparison_validator!(
    /// Accepts dates strictly after a reference instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck_validator::validators::After;
    /// use formcheck_validator::foundation::Validate;
    ///
    /// let v = After::parse("2011-08-03").unwrap();
    /// assert!(v.is_valid("2011-08-04"));
    /// assert!(!v.is_valid("2011-08-03"));
    /// assert!(!v.is_valid("foo"));
    /// ```
    After, >, "date_not_after", "after"
);

comparison_validator!(
    /// Accepts dates strictly before a reference instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck_validator::validators::Before;
    /// use formcheck_validator::foundation::Validate;
    ///
    /// let v = Before::parse("08/04/2011").unwrap();
    /// assert!(v.is_valid("2010-08-04"));
    /// assert!(!v.is_valid("08/04/2011"));
    /// ```
    Before, <, "date_not_before", "before"
);
