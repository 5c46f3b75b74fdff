//! Macros for creating validators with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`validator!`]: a stateless validator (struct, Validate impl, factory fn)
//!
//! # Examples
//!
//! ```rust
//! use formcheck_validator::validator;
//! use formcheck_validator::foundation::{Validate, ValidationError};
//!
//! validator! {
//!     /// Accepts strings without a trailing newline.
//!     pub NoTrailingNewline for str;
//!     rule(input) { !input.ends_with('\n') }
//!     error(input) { ValidationError::new("trailing_newline", "must not end with a newline") }
//!     fn no_trailing_newline();
//! }
//!
//! assert!(no_trailing_newline().is_valid("line"));
//! assert!(!NoTrailingNewline.is_valid("line\n"));
//! ```

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// Creates a stateless validator: a unit struct, its `Validate`
/// implementation, and optionally a `const` factory function.
///
/// `Debug, Clone, Copy, PartialEq, Eq, Hash, Default` are always derived.
///
/// # Variants
///
/// **With factory fn**:
/// ```rust,ignore
/// validator! {
///     pub Ascii for str;
///     rule(input) { input.is_ascii() }
///     error(input) { ValidationError::new("not_ascii", "must be ASCII") }
///     fn ascii();
/// }
/// ```
///
/// **Without factory fn**: omit the trailing `fn name();` line.
#[macro_export]
macro_rules! validator {
    // ── Unit validator + factory fn ──────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name for $input;
            rule($inp) $rule
            error($einp) $err
        }

        #[doc = concat!("Creates a [`", stringify!($name), "`] validator.")]
        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Unit validator, no factory ───────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&self, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };
}
