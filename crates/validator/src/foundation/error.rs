//! Error types for validation failures and rejected configuration.
//!
//! [`ValidationError`] is the diagnostic side channel of every validator: a
//! stable machine code plus an English message. Callers of the boolean
//! predicates never see it.
//!
//! [`ConfigError`] is the only condition distinguished from an ordinary
//! non-match: an option value outside its declared domain.
//!
//! All string fields of `ValidationError` use `Cow<'static, str>` so the
//! common case of static codes and messages does not allocate.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Parameter storage; validators attach at most a couple of values.
pub type ErrorParams = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

/// A structured non-conformance report.
///
/// # Examples
///
/// ```
/// use formcheck_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("label_too_long", "Domain labels are limited to 63 octets")
///     .with_param("max", "63");
///
/// assert_eq!(error.code, "label_too_long");
/// assert_eq!(error.param("max"), Some("63"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    ///
    /// Examples: "invalid_local_part", "port_out_of_range", "invalid_day"
    pub code: Cow<'static, str>,

    /// Human-readable message in English.
    pub message: Cow<'static, str>,

    /// Ordered key-value parameters (typically 0-2).
    pub params: ErrorParams,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: SmallVec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates an "empty" error for a blank input.
    pub fn empty(what: &'static str) -> Self {
        Self::new("empty", format!("{what} cannot be empty"))
    }

    /// Creates a "too_long" error carrying the ceiling and the actual size.
    pub fn too_long(code: &'static str, max: usize, actual: usize) -> Self {
        Self::new(code, format!("Length {actual} exceeds the maximum of {max}"))
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates an "invalid_utf8" error for byte input that is not UTF-8.
    pub fn invalid_utf8() -> Self {
        Self::new("invalid_utf8", "Input is not valid UTF-8")
    }
}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// An option value outside its declared domain.
///
/// Returned by constructors whose options can be checked independently of
/// any input (`Currency::new`, `IpVersion::try_from`, `After::parse`). The
/// boolean predicates never surface it: they fail closed and return `false`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IP family other than 4 or 6.
    #[error("unsupported IP version {0}; expected 4 or 6")]
    UnsupportedIpVersion(u8),

    /// Two options that express mutually exclusive intents were both set.
    #[error("options `{first}` and `{second}` are mutually exclusive")]
    ConflictingOptions {
        /// The option that takes effect in the documented precedence.
        first: &'static str,
        /// The conflicting option.
        second: &'static str,
    },

    /// Decimals are allowed but no fractional digit count is.
    #[error("`digits_after_decimal` must not be empty when decimals are allowed")]
    EmptyDigitsAfterDecimal,

    /// A fractional digit count of zero.
    #[error("`digits_after_decimal` entries must be at least 1, got {0}")]
    InvalidDigitsAfterDecimal(usize),

    /// Currency symbol that is empty or contains digits.
    #[error("invalid currency symbol {0:?}")]
    InvalidSymbol(String),

    /// Separator that is empty, a digit, a minus sign, or equal to the other separator.
    #[error("invalid {name} {value:?}")]
    InvalidSeparator {
        /// Which separator was rejected.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Reference date for a comparison validator did not parse.
    #[error("reference date {0:?} is not a recognized date")]
    InvalidReferenceDate(String),

    /// The composed grammar failed to compile.
    #[error("grammar construction failed: {0}")]
    Pattern(#[from] regex::Error),

    /// Options JSON was malformed or had ill-typed fields.
    #[error("malformed options: {0}")]
    Options(#[from] serde_json::Error),
}

// ============================================================================
// TESTS
// ============================================================================
