//! Prelude module for convenient imports.
//!
//! Provides a single `use formcheck_validator::prelude::*;` import that
//! brings in the traits, error types, options structs, validators, and
//! predicates.
//!
//! # Examples
//!
//! ```
//! use formcheck_validator::prelude::*;
//!
//! let v = Currency::new(CurrencyOptions::default().symbol("¥").negative_sign_before_digits(true))
//!     .unwrap();
//! assert!(v.is_valid("¥-10,123.45"));
//! assert!(is_after("2100-01-01", None));
//! assert!(!Ipv4.is_valid("::1"));
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, configuration
// ============================================================================

pub use crate::foundation::{ConfigError, Validate, ValidateExt, ValidationError, options_from_json};

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;
