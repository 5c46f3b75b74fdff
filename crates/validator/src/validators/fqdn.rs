//! Fully qualified domain name validator.
//!
//! Validates domain names the way mail and web hosts spell them:
//! - Total length: at most 254 octets
//! - Split by `.` into labels of 1..=63 octets
//! - Label characters: ASCII alphanumerics, `-`, and non-ASCII letters
//! - Labels must not start or end with a hyphen, nor contain `---` unless
//!   they carry the `xn--` punycode prefix
//! - Top-level label (when required): two or more letters, or punycode
//!
//! Full-width forms of ASCII (`ｇｍａｉｌ`) are rejected even though they
//! look like domain labels.

use serde::{Deserialize, Serialize};

use crate::foundation::{Validate, ValidationError};
use crate::validators::charclass::is_full_width_ascii_variant;

/// Longest accepted name, in octets, including a trailing dot.
pub const MAX_FQDN_LENGTH: usize = 254;

/// Longest accepted label, in octets.
pub const MAX_LABEL_LENGTH: usize = 63;

const PUNYCODE_PREFIX: &str = "xn--";

// ============================================================================
// OPTIONS
// ============================================================================

/// Options for [`Fqdn`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FqdnOptions {
    /// Require at least two labels, the last being a valid top-level label.
    pub require_tld: bool,
    /// Permit `_` inside labels (never leading, trailing, or doubled).
    pub allow_underscores: bool,
    /// Permit a single trailing `.`.
    pub allow_trailing_dot: bool,
}

impl Default for FqdnOptions {
    fn default() -> Self {
        Self {
            require_tld: true,
            allow_underscores: false,
            allow_trailing_dot: false,
        }
    }
}

impl FqdnOptions {
    /// Sets [`require_tld`](Self::require_tld).
    #[must_use = "builder methods must be chained or built"]
    pub fn require_tld(mut self, yes: bool) -> Self {
        self.require_tld = yes;
        self
    }

    /// Sets [`allow_underscores`](Self::allow_underscores).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_underscores(mut self, yes: bool) -> Self {
        self.allow_underscores = yes;
        self
    }

    /// Sets [`allow_trailing_dot`](Self::allow_trailing_dot).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_trailing_dot(mut self, yes: bool) -> Self {
        self.allow_trailing_dot = yes;
        self
    }
}

// ============================================================================
// FQDN VALIDATOR
// ============================================================================

/// Validates fully qualified domain names.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::{Fqdn, FqdnOptions};
/// use formcheck_validator::foundation::Validate;
///
/// let v = Fqdn::new();
/// assert!(v.is_valid("domain.com"));
/// assert!(v.is_valid("xn--froschgrn-x9a.com"));
/// assert!(!v.is_valid("abc"));
/// assert!(!v.is_valid("example.com."));
///
/// let relaxed = Fqdn::with_options(FqdnOptions::default().allow_trailing_dot(true));
/// assert!(relaxed.is_valid("example.com."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fqdn {
    options: FqdnOptions,
}

impl Fqdn {
    /// Creates a validator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given options.
    #[must_use]
    pub fn with_options(options: FqdnOptions) -> Self {
        Self { options }
    }

    /// The options this validator applies.
    #[must_use]
    pub fn options(&self) -> &FqdnOptions {
        &self.options
    }
}

impl Validate for Fqdn {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        check_fqdn(input, &self.options)
    }
}

/// Creates a new [`Fqdn`] validator with default options.
#[must_use]
pub fn fqdn() -> Fqdn {
    Fqdn::new()
}

/// Returns `true` if `input` is a fully qualified domain name under `options`.
#[must_use]
pub fn is_fqdn(input: &str, options: &FqdnOptions) -> bool {
    check_fqdn(input, options).is_ok()
}

pub(crate) fn check_fqdn(input: &str, options: &FqdnOptions) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::empty("Domain name"));
    }

    if input.len() > MAX_FQDN_LENGTH {
        return Err(ValidationError::too_long(
            "domain_too_long",
            MAX_FQDN_LENGTH,
            input.len(),
        ));
    }

    let name = match input.strip_suffix('.') {
        Some(stripped) if options.allow_trailing_dot => stripped,
        Some(_) => {
            return Err(ValidationError::new(
                "trailing_dot",
                "Domain name must not end with a dot",
            ));
        }
        None => input,
    };

    let labels: Vec<&str> = name.split('.').collect();

    if options.require_tld {
        check_tld(&labels)?;
    }

    for label in labels {
        check_label(label, options.allow_underscores)?;
    }

    Ok(())
}

fn check_tld(labels: &[&str]) -> Result<(), ValidationError> {
    let [_, .., tld] = labels else {
        return Err(ValidationError::new(
            "missing_tld",
            "Domain name must have a top-level domain",
        ));
    };

    let valid = if let Some(body) = tld.strip_prefix(PUNYCODE_PREFIX) {
        !body.is_empty()
            && body
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    } else {
        tld.chars().count() >= 2 && tld.chars().all(is_tld_letter)
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(
            "invalid_tld",
            format!("'{tld}' is not a valid top-level domain"),
        ))
    }
}

fn is_tld_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (c >= '\u{A1}' && !is_full_width_ascii_variant(c))
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || (c >= '\u{A1}' && !is_full_width_ascii_variant(c))
}

fn check_label(label: &str, allow_underscores: bool) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::new(
            "empty_label",
            "Domain labels must not be empty",
        ));
    }

    if label.len() > MAX_LABEL_LENGTH {
        return Err(ValidationError::too_long(
            "label_too_long",
            MAX_LABEL_LENGTH,
            label.len(),
        ));
    }

    if label.starts_with('-') {
        return Err(ValidationError::new(
            "label_starts_with_hyphen",
            format!("Label '{label}' must not start with a hyphen"),
        ));
    }

    if label.ends_with('-') {
        return Err(ValidationError::new(
            "label_ends_with_hyphen",
            format!("Label '{label}' must not end with a hyphen"),
        ));
    }

    if let Some(body) = label.strip_prefix(PUNYCODE_PREFIX) {
        if body.is_empty() || !label.is_ascii() {
            return Err(ValidationError::new(
                "invalid_punycode_label",
                format!("Label '{label}' is not a valid punycode label"),
            ));
        }
    } else if label.contains("---") {
        return Err(ValidationError::new(
            "consecutive_hyphens",
            format!("Label '{label}' must not contain '---'"),
        ));
    }

    if label.contains('_')
        && (!allow_underscores
            || label.starts_with('_')
            || label.ends_with('_')
            || label.contains("__"))
    {
        return Err(ValidationError::new(
            "invalid_underscore",
            format!("Label '{label}' has a misplaced underscore"),
        ));
    }

    if let Some(ch) = label.chars().find(|&c| c != '_' && !is_label_char(c)) {
        return Err(ValidationError::new(
            "invalid_label_character",
            format!("Label '{label}' contains invalid character '{ch}'"),
        )
        .with_param("character", ch.to_string()));
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
