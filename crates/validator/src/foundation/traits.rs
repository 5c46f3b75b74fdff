//! Core traits for the validation system
//!
//! This module defines the trait every validator implements and the
//! extension trait that adapts string validators to raw bytes.

use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The core trait that all validators implement.
///
/// Validators are immutable values: `validate` takes `&self`, holds no
/// interior state and may be called from any number of threads at once.
///
/// # Examples
///
/// ```
/// use formcheck_validator::foundation::{Validate, ValidationError};
///
/// struct NoSpaces;
///
/// impl Validate for NoSpaces {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.contains(' ') {
///             Err(ValidationError::new("contains_space", "Spaces are not allowed"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NoSpaces.is_valid("abc"));
/// assert!(!NoSpaces.is_valid("a c"));
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str`.
    type Input: ?Sized;

    /// Validates the input value.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the input conforms
    /// * `Err(ValidationError)` describing the first violated rule
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Boolean verdict: `true` iff `validate` succeeds.
    fn is_valid(&self, input: &Self::Input) -> bool {
        self.validate(input).is_ok()
    }
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Extension methods for string validators.
///
/// Automatically implemented for every `Validate<Input = str>`. Byte input
/// that is not UTF-8 is a non-conformance, never a panic.
///
/// # Examples
///
/// ```
/// use formcheck_validator::foundation::ValidateExt;
/// use formcheck_validator::validators::Email;
///
/// let email = Email::new();
/// assert!(email.is_valid_bytes(b"foo@bar.com"));
/// assert!(!email.is_valid_bytes(&[0x66, 0xff, 0x40, 0x62, 0x2e, 0x63, 0x6f]));
/// ```
pub trait ValidateExt: Validate<Input = str> {
    /// Validates raw bytes, rejecting anything that is not UTF-8.
    fn validate_bytes(&self, input: &[u8]) -> Result<(), ValidationError> {
        let text = std::str::from_utf8(input).map_err(|_| ValidationError::invalid_utf8())?;
        self.validate(text)
    }

    /// Boolean verdict over raw bytes.
    fn is_valid_bytes(&self, input: &[u8]) -> bool {
        self.validate_bytes(input).is_ok()
    }
}

impl<T: Validate<Input = str> + ?Sized> ValidateExt for T {}

// ============================================================================
// TESTS
// ============================================================================
