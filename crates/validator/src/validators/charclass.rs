//! Character width classification.
//!
//! Code point lookups shared by the domain and address validators, plus
//! string-level validators built on them.
//!
//! Half-width characters are printable ASCII and the half-width forms block
//! (`U+FF61..=U+FFDC`, `U+FFE8..=U+FFEE`). Every other printable character is
//! full-width.

use crate::foundation::ValidationError;

// ============================================================================
// CODE POINT CLASSIFICATION
// ============================================================================

/// Returns `true` for half-width characters.
#[must_use]
pub const fn is_half_width_char(c: char) -> bool {
    matches!(
        c,
        '\u{0020}'..='\u{007E}'
            | '\u{FF61}'..='\u{FF9F}'
            | '\u{FFA0}'..='\u{FFDC}'
            | '\u{FFE8}'..='\u{FFEE}'
    )
}

/// Returns `true` for full-width characters: printable and not half-width.
#[must_use]
pub fn is_full_width_char(c: char) -> bool {
    !is_half_width_char(c) && !c.is_control()
}

/// Returns `true` for characters encoded in more than one UTF-8 byte.
#[must_use]
pub const fn is_multibyte_char(c: char) -> bool {
    !c.is_ascii()
}

/// Returns `true` for characters outside the Basic Multilingual Plane, which
/// UTF-16 encodes as a surrogate pair.
#[must_use]
pub const fn is_surrogate_pair_char(c: char) -> bool {
    c as u32 > 0xFFFF
}

/// Returns `true` for the full-width forms of printable ASCII
/// (`U+FF01..=U+FF5E`), the usual confusables in domain names.
#[must_use]
pub const fn is_full_width_ascii_variant(c: char) -> bool {
    matches!(c, '\u{FF01}'..='\u{FF5E}')
}

// ============================================================================
// STRING PREDICATES
// ============================================================================

/// Returns `true` if `input` contains at least one full-width character.
#[must_use]
pub fn is_full_width(input: &str) -> bool {
    input.chars().any(is_full_width_char)
}

/// Returns `true` if `input` contains at least one half-width character.
#[must_use]
pub fn is_half_width(input: &str) -> bool {
    input.chars().any(is_half_width_char)
}

/// Returns `true` if `input` mixes full-width and half-width characters.
#[must_use]
pub fn is_variable_width(input: &str) -> bool {
    is_full_width(input) && is_half_width(input)
}

/// Returns `true` if `input` contains at least one non-ASCII character.
#[must_use]
pub fn is_multibyte(input: &str) -> bool {
    input.chars().any(is_multibyte_char)
}

/// Returns `true` if `input` contains a character outside the BMP.
#[must_use]
pub fn is_surrogate_pair(input: &str) -> bool {
    input.chars().any(is_surrogate_pair_char)
}

/// Returns `true` if `input` is non-empty and entirely ASCII.
#[must_use]
pub fn is_ascii(input: &str) -> bool {
    !input.is_empty() && input.is_ascii()
}

// ============================================================================
// VALIDATORS
// ============================================================================

crate::validator! {
    /// Requires at least one full-width character.
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck_validator::validators::full_width;
    /// use formcheck_validator::foundation::Validate;
    ///
    /// assert!(full_width().is_valid("Good＝Parts"));
    /// assert!(!full_width().is_valid("abc123"));
    /// ```
    pub FullWidth for str;
    rule(input) { is_full_width(input) }
    error(input) { ValidationError::new("not_full_width", "Must contain a full-width character") }
    fn full_width();
}

crate::validator! {
    /// Requires at least one half-width character.
    pub HalfWidth for str;
    rule(input) { is_half_width(input) }
    error(input) { ValidationError::new("not_half_width", "Must contain a half-width character") }
    fn half_width();
}

crate::validator! {
    /// Requires both full-width and half-width characters.
    pub VariableWidth for str;
    rule(input) { is_variable_width(input) }
    error(input) {
        ValidationError::new(
            "not_variable_width",
            "Must mix full-width and half-width characters",
        )
    }
    fn variable_width();
}

crate::validator! {
    /// Requires at least one non-ASCII character.
    pub Multibyte for str;
    rule(input) { is_multibyte(input) }
    error(input) { ValidationError::new("not_multibyte", "Must contain a multibyte character") }
    fn multibyte();
}

crate::validator! {
    /// Requires at least one character outside the Basic Multilingual Plane.
    pub SurrogatePair for str;
    rule(input) { is_surrogate_pair(input) }
    error(input) {
        ValidationError::new(
            "no_surrogate_pair",
            "Must contain a character outside the Basic Multilingual Plane",
        )
    }
    fn surrogate_pair();
}

crate::validator! {
    /// Requires a non-empty, all-ASCII string.
    pub Ascii for str;
    rule(input) { is_ascii(input) }
    error(input) {
        if input.is_empty() {
            ValidationError::empty("Input")
        } else {
            ValidationError::new("not_ascii", "Must contain only ASCII characters")
        }
    }
    fn ascii();
}

// ============================================================================
// TESTS
// ============================================================================
