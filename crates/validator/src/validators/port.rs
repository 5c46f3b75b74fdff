//! Decimal port number validator (1-65535).

use crate::foundation::{Validate, ValidationError};

/// Longest decimal spelling of a valid port.
const MAX_PORT_DIGITS: usize = 5;

// ============================================================================
// PORT VALIDATOR
// ============================================================================

/// Validates TCP/UDP port numbers written as decimal strings.
///
/// Accepts ASCII digits only, with no sign, no leading zero, and a value in
/// `1..=65535`.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::Port;
/// use formcheck_validator::foundation::Validate;
///
/// let validator = Port::new();
///
/// assert!(validator.is_valid("80"));
/// assert!(validator.is_valid("65535"));
///
/// assert!(!validator.is_valid("0"));
/// assert!(!validator.is_valid("070"));
/// assert!(!validator.is_valid("70000"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Port;

impl Port {
    /// Creates a new port validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses a conforming port string.
    pub fn parse(input: &str) -> Result<u16, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::empty("Port"));
        }

        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::new(
                "invalid_port",
                "Port must contain only decimal digits",
            ));
        }

        if input.len() > 1 && input.starts_with('0') {
            return Err(ValidationError::new(
                "port_leading_zero",
                "Port must not have leading zeros",
            ));
        }

        let value = if input.len() > MAX_PORT_DIGITS {
            None
        } else {
            input.parse::<u32>().ok()
        };

        match value.and_then(|v| u16::try_from(v).ok()) {
            Some(port) if port != 0 => Ok(port),
            _ => Err(ValidationError::new(
                "port_out_of_range",
                "Port number must be between 1 and 65535",
            )
            .with_param("min", "1")
            .with_param("max", "65535")),
        }
    }
}

impl Validate for Port {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        Self::parse(input).map(|_| ())
    }
}

/// Creates a new [`Port`] validator.
#[must_use]
pub const fn port() -> Port {
    Port
}

// ============================================================================
// TESTS
// ============================================================================
