//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: [`Validate`], [`ValidateExt`]
//! - **Errors**: [`ValidationError`], [`ConfigError`]
//! - **Configuration**: [`options_from_json`]
//!
//! # Architecture
//!
//! ## 1. Boolean contract, structured diagnostics
//!
//! Every validator answers `is_valid(input) -> bool`. The richer
//! `validate(input) -> Result<(), ValidationError>` explains the first
//! violated rule; the reason is informational and never part of the contract.
//!
//! ## 2. Immutable configuration
//!
//! Validators are built from plain option structs with documented defaults.
//! Options are checked for consistency when the validator is constructed,
//! never while matching input.
//!
//! ## 3. Precompiled grammars
//!
//! Fixed grammar tables are compiled once per process (`LazyLock`) and are
//! read-only afterwards, so validators are `Send + Sync` and lock-free.

pub mod error;
pub mod traits;

pub use error::{ConfigError, ErrorParams, ValidationError};
pub use traits::{Validate, ValidateExt};

use serde::de::DeserializeOwned;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Loads an options struct from JSON text.
///
/// Missing fields take their defaults and unrecognized keys are ignored, so
/// option documents written for a newer release still load.
///
/// # Examples
///
/// ```
/// use formcheck_validator::foundation::options_from_json;
/// use formcheck_validator::validators::UrlOptions;
///
/// let options: UrlOptions =
///     options_from_json(r#"{ "require_protocol": true, "future_flag": 1 }"#).unwrap();
/// assert!(options.require_protocol);
/// assert!(options.require_tld);
/// ```
pub fn options_from_json<T: DeserializeOwned>(json: &str) -> Result<T, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// TESTS
// ============================================================================
