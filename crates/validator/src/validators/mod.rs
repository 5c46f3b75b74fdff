//! Built-in validators
//!
//! Each module implements one grammar and exposes it twice: as a validator
//! value implementing [`Validate`](crate::foundation::Validate) and as a free
//! `is_*` predicate returning `bool`.
//!
//! # Categories
//!
//! - **Network**: email address, URL, IP address, FQDN, port
//! - **Date**: ISO-8601, RFC-2822, locale patterns, before/after comparison
//! - **Numeric**: locale-configurable currency amounts
//! - **Text**: character width and encoding classes
//!
//! # Examples
//!
//! ```
//! use formcheck_validator::prelude::*;
//!
//! assert!(email().is_valid("foo@bar.com"));
//! assert!(url().is_valid("https://www.example.com:8080/path?q=1"));
//! assert!(is_ip("::ffff:127.0.0.1", None));
//! assert!(date().is_valid("2009-05-19T14:39Z"));
//! assert!(currency().is_valid("-$10,123.45"));
//! assert!(is_full_width("ひらがな"));
//! ```

// Network validators
pub mod email;
pub mod fqdn;
pub mod ip_address;
pub mod port;
pub mod url;

// Date validators
pub mod date;

// Numeric validators
pub mod currency;

// Text validators
pub mod charclass;

// ============================================================================
// RE-EXPORTS: Network validators
// ============================================================================

pub use email::{Email, EmailOptions, email, is_email};
pub use fqdn::{Fqdn, FqdnOptions, fqdn, is_fqdn};
pub use ip_address::{IpAddress, IpVersion, Ipv4, Ipv6, ip_version, is_ip, is_ip_version, is_ipv4, is_ipv6};
pub use port::{Port, port};
pub use url::{Url, UrlOptions, is_url, url};

// ============================================================================
// RE-EXPORTS: Date validators
// ============================================================================

pub use date::{
    After, Before, Date, DateOptions, Iso8601, Rfc2822, date, is_after, is_before, is_date,
    is_iso8601, is_rfc2822, parse_date,
};

// ============================================================================
// RE-EXPORTS: Numeric validators
// ============================================================================

pub use currency::{Currency, CurrencyOptions, currency, is_currency};

// ============================================================================
// RE-EXPORTS: Text validators
// ============================================================================

pub use charclass::{
    Ascii, FullWidth, HalfWidth, Multibyte, SurrogatePair, VariableWidth, ascii, full_width,
    half_width, is_ascii, is_full_width, is_half_width, is_multibyte, is_surrogate_pair,
    is_variable_width, multibyte, surrogate_pair, variable_width,
};
