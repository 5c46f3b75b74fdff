//! Email address validator.
//!
//! A relaxed RFC 5321/5322 grammar:
//!
//! ```text
//! address      = local-part "@" domain
//! local-part   = dot-atom / quoted-string
//! domain       = fqdn / "[" ip-literal "]"
//! display-form = [ name-token *( SP name-token ) SP ] "<" address ">"
//! ```
//!
//! The address is split at the last `@`, so an `@` may appear inside a
//! quoted local part. Length ceilings (64 octets of local part, 254 of
//! domain) are checked after the grammar and override any match.

use serde::{Deserialize, Serialize};

use crate::foundation::{Validate, ValidationError};
use crate::validators::fqdn::{FqdnOptions, MAX_FQDN_LENGTH, check_fqdn};
use crate::validators::ip_address::is_ip;

/// Longest accepted local part, in octets.
pub const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Domains whose mailboxes ignore dots in the local part.
const DOT_INSENSITIVE_DOMAINS: [&str; 2] = ["gmail.com", "googlemail.com"];

// ============================================================================
// OPTIONS
// ============================================================================

/// Options for [`Email`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOptions {
    /// Accept `Display Name <addr>` as well as a bare address.
    pub allow_display_name: bool,
    /// Require the `Display Name <addr>` form. Implies `allow_display_name`.
    pub require_display_name: bool,
    /// Accept non-ASCII characters in the local part.
    pub allow_utf8_local_part: bool,
    /// Require the domain to end in a top-level label.
    pub require_tld: bool,
    /// Accept a bracketed IP literal (`[192.168.0.1]`) as the domain.
    pub allow_ip_domain: bool,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            allow_display_name: false,
            require_display_name: false,
            allow_utf8_local_part: true,
            require_tld: true,
            allow_ip_domain: true,
        }
    }
}

impl EmailOptions {
    /// Sets [`allow_display_name`](Self::allow_display_name).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_display_name(mut self, yes: bool) -> Self {
        self.allow_display_name = yes;
        self
    }

    /// Sets [`require_display_name`](Self::require_display_name).
    #[must_use = "builder methods must be chained or built"]
    pub fn require_display_name(mut self, yes: bool) -> Self {
        self.require_display_name = yes;
        self
    }

    /// Sets [`allow_utf8_local_part`](Self::allow_utf8_local_part).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_utf8_local_part(mut self, yes: bool) -> Self {
        self.allow_utf8_local_part = yes;
        self
    }

    /// Sets [`require_tld`](Self::require_tld).
    #[must_use = "builder methods must be chained or built"]
    pub fn require_tld(mut self, yes: bool) -> Self {
        self.require_tld = yes;
        self
    }

    /// Sets [`allow_ip_domain`](Self::allow_ip_domain).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_ip_domain(mut self, yes: bool) -> Self {
        self.allow_ip_domain = yes;
        self
    }
}

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

/// Validates email addresses.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::{Email, EmailOptions};
/// use formcheck_validator::foundation::Validate;
///
/// let v = Email::new();
/// assert!(v.is_valid("foo@bar.com"));
/// assert!(v.is_valid("\"foo\\@bar\"@example.com"));
/// assert!(!v.is_valid("invalidemail@"));
/// assert!(!v.is_valid("foo@bar.com."));
///
/// let named = Email::with_options(EmailOptions::default().allow_display_name(true));
/// assert!(named.is_valid("Some Name <foo@bar.com>"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Email {
    options: EmailOptions,
}

impl Email {
    /// Creates a validator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given options.
    #[must_use]
    pub fn with_options(options: EmailOptions) -> Self {
        Self { options }
    }

    /// The options this validator applies.
    #[must_use]
    pub fn options(&self) -> &EmailOptions {
        &self.options
    }
}

impl Validate for Email {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        check_email(input, &self.options)
    }
}

/// Creates a new [`Email`] validator with default options.
#[must_use]
pub fn email() -> Email {
    Email::new()
}

/// Returns `true` if `input` is an email address under `options`.
///
/// ```
/// use formcheck_validator::validators::{is_email, EmailOptions};
///
/// let ascii_only = EmailOptions::default().allow_utf8_local_part(false);
/// assert!(!is_email("hans.müller@test.com", &ascii_only));
/// assert!(is_email("hans@müller.com", &ascii_only));
/// ```
#[must_use]
pub fn is_email(input: &str, options: &EmailOptions) -> bool {
    check_email(input, options).is_ok()
}

fn check_email(input: &str, options: &EmailOptions) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::empty("Email address"));
    }

    let address = if options.allow_display_name || options.require_display_name {
        strip_display_name(input, options.require_display_name)?
    } else {
        input
    };

    let Some((local, domain)) = address.rsplit_once('@') else {
        return Err(ValidationError::new(
            "missing_at",
            "Email address must contain '@'",
        ));
    };

    if local.is_empty() {
        return Err(ValidationError::empty("Local part"));
    }
    if domain.is_empty() {
        return Err(ValidationError::empty("Domain"));
    }

    if local.starts_with('"') {
        check_quoted_local_part(local, options.allow_utf8_local_part)?;
    } else if is_dot_insensitive(domain) {
        check_dot_atom(&local.replace('.', ""), options.allow_utf8_local_part)?;
    } else {
        check_dot_atom(local, options.allow_utf8_local_part)?;
    }

    check_domain(domain, options)?;

    if local.len() > MAX_LOCAL_PART_LENGTH {
        return Err(ValidationError::too_long(
            "local_part_too_long",
            MAX_LOCAL_PART_LENGTH,
            local.len(),
        ));
    }
    if domain.len() > MAX_FQDN_LENGTH {
        return Err(ValidationError::too_long(
            "domain_too_long",
            MAX_FQDN_LENGTH,
            domain.len(),
        ));
    }

    Ok(())
}

fn is_dot_insensitive(domain: &str) -> bool {
    DOT_INSENSITIVE_DOMAINS
        .iter()
        .any(|d| d.eq_ignore_ascii_case(domain))
}

// ============================================================================
// DISPLAY NAME
// ============================================================================

/// Unwraps `Name <addr>`, returning `addr`.
///
/// Input that does not end in `>` is a bare address unless the wrapper is
/// required.
fn strip_display_name(input: &str, required: bool) -> Result<&str, ValidationError> {
    let Some(body) = input.strip_suffix('>') else {
        if required {
            return Err(ValidationError::new(
                "display_name_required",
                "Email address must be of the form 'Name <address>'",
            ));
        }
        return Ok(input);
    };

    let malformed = || {
        ValidationError::new(
            "malformed_display_name",
            "Display name wrapper is malformed",
        )
    };

    if input.contains(['\r', '\n']) {
        return Err(malformed());
    }

    let Some((name_part, address)) = body.rsplit_once('<') else {
        return Err(malformed());
    };

    if address.contains('>') {
        return Err(malformed());
    }

    if name_part.is_empty() {
        if required {
            return Err(ValidationError::new(
                "display_name_required",
                "Display name must not be empty",
            ));
        }
        return Ok(address);
    }

    let name = name_part.strip_suffix(' ').ok_or_else(malformed)?;
    check_display_name(name)?;

    Ok(address)
}

/// A display name is one or more space-separated tokens, each a bare word or
/// a quoted string.
fn check_display_name(name: &str) -> Result<(), ValidationError> {
    let invalid = || {
        ValidationError::new(
            "invalid_display_name",
            "Display name contains invalid characters",
        )
    };

    if name.is_empty() || name.starts_with(' ') || name.ends_with(' ') {
        return Err(invalid());
    }

    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        match c {
            ' ' => {}
            '"' => {
                let mut escaped = false;
                let mut closed = false;
                for q in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if q == '\\' {
                        escaped = true;
                    } else if q == '"' {
                        closed = true;
                        break;
                    } else if q.is_control() && q != '\t' {
                        return Err(invalid());
                    }
                }
                if !closed {
                    return Err(invalid());
                }
            }
            c if is_atext(c) || c == '.' || (!c.is_ascii() && !c.is_control()) => {}
            _ => return Err(invalid()),
        }
    }

    Ok(())
}

// ============================================================================
// LOCAL PART
// ============================================================================

/// RFC 5322 `atext`: letters, digits and a fixed punctuation set.
fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
        )
}

/// Non-ASCII code points accepted in a UTF-8 local part.
fn is_utf8_atext(c: char) -> bool {
    matches!(
        c,
        '\u{00A0}'..='\u{D7FF}' | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFEF}'
    )
}

fn utf8_not_allowed() -> ValidationError {
    ValidationError::new(
        "utf8_local_part_not_allowed",
        "Local part must contain only ASCII characters",
    )
}

fn check_dot_atom(local: &str, allow_utf8: bool) -> Result<(), ValidationError> {
    for segment in local.split('.') {
        if segment.is_empty() {
            return Err(ValidationError::new(
                "invalid_local_part",
                "Local part must not contain empty dot-separated segments",
            ));
        }

        for c in segment.chars() {
            if is_atext(c) {
                continue;
            }
            if !c.is_ascii() && !allow_utf8 {
                return Err(utf8_not_allowed());
            }
            if !is_utf8_atext(c) {
                return Err(ValidationError::new(
                    "invalid_local_part",
                    format!("Local part contains invalid character '{}'", c.escape_default()),
                ));
            }
        }
    }

    Ok(())
}

fn check_quoted_local_part(local: &str, allow_utf8: bool) -> Result<(), ValidationError> {
    let invalid = |message: &'static str| ValidationError::new("invalid_quoted_local_part", message);

    let inner = &local[1..];
    let mut escaped = false;
    let mut chars = inner.char_indices();

    while let Some((i, c)) = chars.next() {
        if !c.is_ascii() && !allow_utf8 {
            return Err(utf8_not_allowed());
        }
        if c.is_control() && c != '\t' {
            return Err(invalid("Quoted local part contains a control character"));
        }

        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return if i + 1 == inner.len() {
                Ok(())
            } else {
                Err(invalid("Quoted local part must end at the closing quote"))
            };
        }
    }

    Err(invalid("Quoted local part is not terminated"))
}

// ============================================================================
// DOMAIN
// ============================================================================

fn check_domain(domain: &str, options: &EmailOptions) -> Result<(), ValidationError> {
    let fqdn_options = FqdnOptions::default().require_tld(options.require_tld);

    let Err(fqdn_error) = check_fqdn(domain, &fqdn_options) else {
        return Ok(());
    };

    if options.allow_ip_domain {
        if let Some(literal) = domain
            .strip_prefix('[')
            .and_then(|d| d.strip_suffix(']'))
        {
            return if is_ip(literal, None) {
                Ok(())
            } else {
                Err(ValidationError::new(
                    "invalid_ip_domain",
                    "Bracketed domain is not a valid IP address",
                ))
            };
        }
    }

    Err(ValidationError::new(
        "invalid_domain",
        format!("Invalid domain: {}", fqdn_error.message),
    )
    .with_param("reason", fqdn_error.code))
}

// ============================================================================
// TESTS
// ============================================================================
