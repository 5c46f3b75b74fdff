//! # formcheck-validator
//!
//! Grammar-based validators for user-supplied text: email addresses, URLs,
//! IP addresses, domain names, dates, and locale-formatted currency amounts.
//!
//! Every check is a pure function of its input and options. Validators never
//! normalize or rewrite the input; they only answer whether it conforms.
//!
//! ## Quick Start
//!
//! ```
//! use formcheck_validator::prelude::*;
//!
//! assert!(email().is_valid("foo@bar.com"));
//! assert!(!email().is_valid("foo@bar"));
//!
//! let options = UrlOptions::default().require_protocol(true);
//! assert!(is_url("https://example.com/a?b=c", &options));
//! assert!(!is_url("example.com", &options));
//!
//! let err = email().validate("multiple..dots@x.com").unwrap_err();
//! assert_eq!(err.code, "invalid_local_part");
//! ```
//!
//! ## Two shapes per validator
//!
//! - A validator value implementing [`Validate`](foundation::Validate), whose
//!   `validate` explains the first violated rule with a [`ValidationError`](foundation::ValidationError).
//! - A free `is_*` predicate returning `bool`.
//!
//! Options structs derive `serde` traits with defaults for every field, so
//! they load from partial JSON via [`options_from_json`](foundation::options_from_json).
//!
//! ## Built-in Validators
//!
//! - **Network**: [`Email`](validators::Email), [`Url`](validators::Url),
//!   [`IpAddress`](validators::IpAddress), [`Fqdn`](validators::Fqdn),
//!   [`Port`](validators::Port)
//! - **Date**: [`Date`](validators::Date), [`Iso8601`](validators::Iso8601),
//!   [`Rfc2822`](validators::Rfc2822), [`After`](validators::After),
//!   [`Before`](validators::Before)
//! - **Numeric**: [`Currency`](validators::Currency)
//! - **Text**: [`FullWidth`](validators::FullWidth), [`HalfWidth`](validators::HalfWidth),
//!   [`VariableWidth`](validators::VariableWidth), [`Multibyte`](validators::Multibyte),
//!   [`SurrogatePair`](validators::SurrogatePair), [`Ascii`](validators::Ascii)

// ValidationError is returned by value from every validator.
#![allow(clippy::result_large_err)]

pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;
