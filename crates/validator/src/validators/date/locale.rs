//! Locale date patterns.
//!
//! | Pattern                      | Example            |
//! |------------------------------|--------------------|
//! | `M/D/YY`, `M-D-YYYY`         | `2/29/24`          |
//! | the above with `H:MM[:SS]`   | `11/2/23 12:24`    |
//! | `M. D. YYYY.` with `GMT`     | `4. 8. 2011. GMT`  |
//! | `YYYY.MM.DD`, `YYYY/MM/DD`   | `2011.08.04`       |
//!
//! The first two rows read month first unless `day_first` is set.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::calendar::{DatePart, DateParts, TimePart, expand_two_digit_year};

static SLASHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{1,2})([/-])([0-9]{1,2})([/-])([0-9]{2}|[0-9]{4})(?: ([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?)?$",
    )
    .expect("slashed date pattern is valid")
});

static DOTTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})\. ([0-9]{1,2})\. ([0-9]{4})\.(?: GMT)?$")
        .expect("dotted date pattern is valid")
});

static YEAR_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})([./])([0-9]{2})([./])([0-9]{2})$")
        .expect("year-first date pattern is valid")
});

/// Scans `input` against the locale patterns.
pub(crate) fn scan(input: &str, day_first: bool) -> Option<DateParts> {
    if let Some(caps) = SLASHED.captures(input) {
        return slashed(&caps, day_first);
    }
    if let Some(caps) = DOTTED.captures(input) {
        let (month, day) = order(number(&caps, 1)?, number(&caps, 2)?, day_first);
        let year = number(&caps, 3)? as i32;
        return Some(DateParts::date(DatePart::Ymd { year, month, day }));
    }
    if let Some(caps) = YEAR_FIRST.captures(input) {
        if caps[2] != caps[4] {
            return None;
        }
        return Some(DateParts::date(DatePart::Ymd {
            year: number(&caps, 1)? as i32,
            month: number(&caps, 3)?,
            day: number(&caps, 5)?,
        }));
    }
    None
}

fn slashed(caps: &Captures<'_>, day_first: bool) -> Option<DateParts> {
    if caps[2] != caps[4] {
        return None;
    }

    let (month, day) = order(number(caps, 1)?, number(caps, 3)?, day_first);
    let year = number(caps, 5)? as i32;
    let year = if caps[5].len() == 2 {
        expand_two_digit_year(year)
    } else {
        year
    };

    let mut parts = DateParts::date(DatePart::Ymd { year, month, day });
    if caps.get(6).is_some() {
        parts.time = Some(TimePart {
            hour: number(caps, 6)?,
            minute: number(caps, 7)?,
            second: number(caps, 8).unwrap_or(0),
            fraction: None,
        });
    }
    Some(parts)
}

/// Returns `(month, day)` from the first and second fields.
const fn order(first: u32, second: u32, day_first: bool) -> (u32, u32) {
    if day_first {
        (second, first)
    } else {
        (first, second)
    }
}

fn number(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> DatePart {
        DatePart::Ymd { year, month, day }
    }

    #[test]
    fn slashed_month_first() {
        let parts = scan("08/04/2011", false).unwrap();
        assert_eq!(parts.date, ymd(2011, 8, 4));
        assert_eq!(scan("2/29/24", false).unwrap().date, ymd(2024, 2, 29));
        assert_eq!(scan("2-23-22", false).unwrap().date, ymd(2022, 2, 23));
        assert_eq!(scan("2/22/97", false).unwrap().date, ymd(1997, 2, 22));
    }

    #[test]
    fn slashed_day_first() {
        assert_eq!(scan("08/04/2011", true).unwrap().date, ymd(2011, 4, 8));
    }

    #[test]
    fn slashed_with_time() {
        let parts = scan("2/22/23 23:24:26", false).unwrap();
        assert_eq!(
            parts.time,
            Some(TimePart {
                hour: 23,
                minute: 24,
                second: 26,
                fraction: None,
            })
        );
        let parts = scan("11/2/23 12:24", false).unwrap();
        assert_eq!(parts.time.map(|t| (t.hour, t.minute, t.second)), Some((12, 24, 0)));
    }

    #[test]
    fn mixed_separators_rejected() {
        assert_eq!(scan("08/04-2011", false), None);
        assert_eq!(scan("2011.08/04", false), None);
    }

    #[test]
    fn dotted() {
        assert_eq!(scan("04. 08. 2011.", false).unwrap().date, ymd(2011, 4, 8));
        assert_eq!(scan("4. 8. 2011. GMT", false).unwrap().date, ymd(2011, 4, 8));
        assert_eq!(scan("4. 8. 2011 GMT", false), None);
    }

    #[test]
    fn year_first() {
        assert_eq!(scan("2011.08.04", false).unwrap().date, ymd(2011, 8, 4));
        assert_eq!(scan("2011/08/04", true).unwrap().date, ymd(2011, 8, 4));
    }

    #[test]
    fn unmatched() {
        assert_eq!(scan("foo", false), None);
        assert_eq!(scan("2011-08-04", false), None);
        assert_eq!(scan("12", false), None);
        assert_eq!(scan("1/2/123", false), None);
    }
}
