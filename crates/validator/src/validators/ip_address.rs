//! IP address validators for IPv4 and IPv6 literals.
//!
//! IPv4 is the dotted quad with decimal octets `0..=255` and no leading
//! zeros. IPv6 is eight hexadecimal groups, optionally compressed with a
//! single `::`, optionally ending in an embedded dotted quad that fills the
//! last two group slots.

use std::fmt;

use crate::foundation::{ConfigError, Validate, ValidationError};

// ============================================================================
// IP VERSION
// ============================================================================

/// Address family of an IP literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum IpVersion {
    /// Dotted-quad IPv4.
    V4,
    /// Colon-separated IPv6.
    V6,
}

impl TryFrom<u8> for IpVersion {
    type Error = ConfigError;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        match version {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(ConfigError::UnsupportedIpVersion(other)),
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => f.write_str("IPv4"),
            Self::V6 => f.write_str("IPv6"),
        }
    }
}

// ============================================================================
// SCANNERS
// ============================================================================

/// Returns `true` if `input` is a dotted-quad IPv4 address.
#[must_use]
pub fn is_ipv4(input: &str) -> bool {
    let mut groups = 0;
    for group in input.split('.') {
        groups += 1;
        if groups > 4 || !is_ipv4_octet(group) {
            return false;
        }
    }
    groups == 4
}

fn is_ipv4_octet(group: &str) -> bool {
    let bytes = group.as_bytes();
    if bytes.is_empty() || bytes.len() > 3 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    let value = bytes
        .iter()
        .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
    value <= 255
}

/// Returns `true` if `input` is an IPv6 address in full or compressed form.
#[must_use]
pub fn is_ipv6(input: &str) -> bool {
    if input == "::" {
        return true;
    }

    match input.split_once("::") {
        Some((head, tail)) => {
            if tail.contains("::") {
                return false;
            }
            let Some(head_groups) = count_groups(head, false) else {
                return false;
            };
            let Some(tail_groups) = count_groups(tail, true) else {
                return false;
            };
            // `::` stands for at least one zero group.
            head_groups + tail_groups <= 7
        }
        None => count_groups(input, true) == Some(8),
    }
}

/// Counts the 16-bit groups in a colon-separated run.
///
/// An empty run has zero groups. An embedded IPv4 suffix counts as two and is
/// only accepted as the final group of the address (`ipv4_allowed`).
fn count_groups(run: &str, ipv4_allowed: bool) -> Option<usize> {
    if run.is_empty() {
        return Some(0);
    }

    let mut count = 0;
    let mut parts = run.split(':').peekable();
    while let Some(group) = parts.next() {
        let last = parts.peek().is_none();
        if group.contains('.') {
            if !(last && ipv4_allowed && is_ipv4(group)) {
                return None;
            }
            count += 2;
        } else if group.is_empty()
            || group.len() > 4
            || !group.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return None;
        } else {
            count += 1;
        }
    }
    Some(count)
}

/// Classifies `input` as IPv4, IPv6, or neither.
///
/// The families are disjoint: no string is both.
#[must_use]
pub fn ip_version(input: &str) -> Option<IpVersion> {
    if is_ipv4(input) {
        Some(IpVersion::V4)
    } else if is_ipv6(input) {
        Some(IpVersion::V6)
    } else {
        None
    }
}

/// Returns `true` if `input` is an IP address of the given family, or of
/// either family when `version` is `None`.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::{is_ip, IpVersion};
///
/// assert!(is_ip("::1", None));
/// assert!(!is_ip("::1::", None));
/// assert!(!is_ip("127.0.0.1", Some(IpVersion::V6)));
/// ```
#[must_use]
pub fn is_ip(input: &str, version: Option<IpVersion>) -> bool {
    match version {
        None => ip_version(input).is_some(),
        Some(IpVersion::V4) => is_ipv4(input),
        Some(IpVersion::V6) => is_ipv6(input),
    }
}

/// Numeric-version form of [`is_ip`]. Versions other than 4 and 6 are a
/// configuration error and reject every input.
#[must_use]
pub fn is_ip_version(input: &str, version: u8) -> bool {
    match IpVersion::try_from(version) {
        Ok(version) => is_ip(input, Some(version)),
        Err(err) => {
            tracing::debug!(error = %err, "ip address check failing closed");
            false
        }
    }
}

// ============================================================================
// IP ADDRESS VALIDATOR
// ============================================================================

/// Validates IP addresses (both IPv4 and IPv6 unless restricted).
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::IpAddress;
/// use formcheck_validator::foundation::Validate;
///
/// let validator = IpAddress::new();
///
/// assert!(validator.is_valid("192.168.1.1"));
/// assert!(validator.is_valid("2001:41d0:2:a141::1"));
/// assert!(validator.is_valid("::ffff:127.0.0.1"));
///
/// assert!(!validator.is_valid("256.0.0.0"));
/// assert!(!IpAddress::new().v4_only().is_valid("::1"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpAddress {
    version: Option<IpVersion>,
}

impl IpAddress {
    /// Creates a new IP address validator (allows both IPv4 and IPv6).
    #[must_use]
    pub const fn new() -> Self {
        Self { version: None }
    }

    /// Creates a validator restricted to one family given by number.
    pub fn with_version(version: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            version: Some(IpVersion::try_from(version)?),
        })
    }

    /// Only allow IPv4 addresses.
    #[must_use = "builder methods must be chained or built"]
    pub const fn v4_only(mut self) -> Self {
        self.version = Some(IpVersion::V4);
        self
    }

    /// Only allow IPv6 addresses.
    #[must_use = "builder methods must be chained or built"]
    pub const fn v6_only(mut self) -> Self {
        self.version = Some(IpVersion::V6);
        self
    }

    /// The family restriction, if any.
    #[must_use]
    pub const fn version(&self) -> Option<IpVersion> {
        self.version
    }
}

impl Validate for IpAddress {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::empty("IP address"));
        }

        match (ip_version(input), self.version) {
            (None, _) => Err(ValidationError::new(
                "invalid_ip_address",
                "Not a valid IP address",
            )),
            (Some(found), Some(wanted)) if found != wanted => Err(ValidationError::new(
                "ip_version_not_allowed",
                format!("{found} addresses are not allowed"),
            )
            .with_param("expected", wanted.to_string())),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// IPV4 / IPV6 VALIDATORS
// ============================================================================

/// Validates IPv4 addresses only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ipv4;

impl Validate for Ipv4 {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if is_ipv4(input) {
            Ok(())
        } else {
            Err(ValidationError::new("invalid_ipv4", "Not a valid IPv4 address"))
        }
    }
}

/// Validates IPv6 addresses only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ipv6;

impl Validate for Ipv6 {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if is_ipv6(input) {
            Ok(())
        } else {
            Err(ValidationError::new("invalid_ipv6", "Not a valid IPv6 address"))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Valid IPv4 ---

    #[test]
    fn ipv4_bounds() {
        assert!(is_ipv4("0.0.0.0"));
        assert!(is_ipv4("255.255.255.255"));
        assert!(is_ipv4("1.2.3.4"));
    }

    // --- Invalid IPv4 ---

    #[test]
    fn ipv4_out_of_range() {
        assert!(!is_ipv4("256.0.0.0"));
        assert!(!is_ipv4("0.0.0.256"));
        assert!(!is_ipv4("26.0.0.256"));
    }

    #[test]
    fn ipv4_leading_zero() {
        assert!(!is_ipv4("01.2.3.4"));
        assert!(!is_ipv4("1.2.3.00"));
    }

    #[test]
    fn ipv4_wrong_group_count() {
        assert!(!is_ipv4("1.2.3"));
        assert!(!is_ipv4("1.2.3.4.5"));
        assert!(!is_ipv4("1.2..4"));
        assert!(!is_ipv4(""));
    }

    #[test]
    fn ipv4_non_ascii_digits() {
        assert!(!is_ipv4("１.2.3.4"));
        assert!(!is_ipv4("+1.2.3.4"));
    }

    // --- Valid IPv6 ---

    #[test]
    fn ipv6_compressed() {
        assert!(is_ipv6("::"));
        assert!(is_ipv6("::1"));
        assert!(is_ipv6("1::"));
        assert!(is_ipv6("::0000"));
        assert!(is_ipv6("0000::"));
        assert!(is_ipv6("2001:41d0:2:a141::1"));
        assert!(is_ipv6("fe80::a6db:30ff:fe98:e946"));
    }

    #[test]
    fn ipv6_full() {
        assert!(is_ipv6("2001:db8:0000:1:1:1:1:1"));
        assert!(is_ipv6("1111:1:1:1:1:1:1:1"));
    }

    #[test]
    fn ipv6_embedded_ipv4() {
        assert!(is_ipv6("::ffff:127.0.0.1"));
        assert!(is_ipv6("0:0:0:0:0:ffff:127.0.0.1"));
    }

    // --- Invalid IPv6 ---

    #[test]
    fn ipv6_double_compression() {
        assert!(!is_ipv6("::1::"));
        assert!(!is_ipv6("1::2::3"));
    }

    #[test]
    fn ipv6_stray_colons() {
        assert!(!is_ipv6("1:"));
        assert!(!is_ipv6(":1"));
        assert!(!is_ipv6(":1:1:1::2"));
        assert!(!is_ipv6(":::1"));
    }

    #[test]
    fn ipv6_bad_groups() {
        assert!(!is_ipv6("::banana"));
        assert!(!is_ipv6("banana::"));
        assert!(!is_ipv6("::1banana"));
        assert!(!is_ipv6("::11111"));
        assert!(!is_ipv6("11111:1:1:1:1:1:1:1"));
    }

    #[test]
    fn ipv6_too_many_groups() {
        assert!(!is_ipv6("1:1:1:1:1:1:1:1:1:1:1:1:1:1:1:1"));
        assert!(!is_ipv6("2001:db8:0000:1:1:1:1::1"));
        assert!(!is_ipv6("0:0:0:0:0:0:ffff:127.0.0.1"));
    }

    #[test]
    fn ipv6_embedded_ipv4_misplaced_or_short() {
        assert!(!is_ipv6("0:0:0:0:ffff:127.0.0.1"));
        assert!(!is_ipv6("::127.0.0.1:ffff"));
        assert!(!is_ipv6("127.0.0.1::"));
        assert!(!is_ipv6("::ffff:287.0.0.1"));
    }

    // --- Versions ---

    #[test]
    fn version_restriction() {
        assert!(is_ip("127.0.0.1", Some(IpVersion::V4)));
        assert!(!is_ip("127.0.0.1", Some(IpVersion::V6)));
        assert!(is_ip("::ffff:127.0.0.1", Some(IpVersion::V6)));
        assert!(!is_ip("::ffff:127.0.0.1", Some(IpVersion::V4)));
    }

    #[test]
    fn unsupported_version_fails_closed() {
        assert!(!is_ip_version("127.0.0.1", 10));
        assert!(!is_ip_version("::1", 10));
        assert!(is_ip_version("::1", 6));
    }

    #[test]
    fn unsupported_version_is_a_config_error() {
        assert!(matches!(
            IpVersion::try_from(5),
            Err(ConfigError::UnsupportedIpVersion(5))
        ));
        assert!(IpAddress::with_version(7).is_err());
    }

    // --- Validator ---

    #[test]
    fn validator_error_codes() {
        let v = IpAddress::new().v4_only();
        assert_eq!(v.validate("").unwrap_err().code, "empty");
        assert_eq!(v.validate("abc").unwrap_err().code, "invalid_ip_address");

        let err = v.validate("::1").unwrap_err();
        assert_eq!(err.code, "ip_version_not_allowed");
        assert_eq!(err.param("expected"), Some("IPv4"));
    }

    #[test]
    fn family_validators() {
        assert!(Ipv4.is_valid("10.0.0.0"));
        assert!(!Ipv4.is_valid("::"));
        assert!(Ipv6.is_valid("::"));
        assert!(!Ipv6.is_valid("10.0.0.0"));
    }
}
