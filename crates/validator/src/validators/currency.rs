//! Locale-configurable currency amount validator.
//!
//! A [`Currency`] validator compiles its [`CurrencyOptions`] into a single
//! anchored grammar once, at construction. The grammar covers symbol
//! placement, digit grouping, decimal digits and the negative-amount
//! conventions (leading sign, trailing sign, parentheses, and the
//! `R 123` / `R-123` sign placeholder).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::foundation::{ConfigError, Validate, ValidationError};

// ============================================================================
// OPTIONS
// ============================================================================

/// Options for [`Currency`].
///
/// The defaults describe `-$##,###.##` (en-US and friends).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyOptions {
    /// Currency symbol, matched literally.
    pub symbol: String,
    /// The symbol must be present.
    pub require_symbol: bool,
    /// Permit one space between a leading symbol and the amount.
    pub allow_space_after_symbol: bool,
    /// The symbol follows the amount (`10,03 €`).
    pub symbol_after_digits: bool,
    /// Permit negative amounts.
    pub allow_negatives: bool,
    /// Negative amounts are wrapped in parentheses (`($1.00)`).
    pub parens_for_negatives: bool,
    /// The minus sign sits between the symbol and the digits (`¥-100`).
    pub negative_sign_before_digits: bool,
    /// The minus sign follows the digits (`100-`).
    pub negative_sign_after_digits: bool,
    /// Positive amounts may put a space where a negative amount has its
    /// sign (`R 123` next to `R-123`).
    pub allow_negative_sign_placeholder: bool,
    /// Separator between groups of three whole digits.
    pub thousands_separator: String,
    /// Separator between whole and fractional digits.
    pub decimal_separator: String,
    /// Permit a fractional part.
    pub allow_decimal: bool,
    /// Require a fractional part.
    pub require_decimal: bool,
    /// Accepted counts of fractional digits.
    pub digits_after_decimal: Vec<usize>,
    /// Permit one space between the amount and a trailing symbol.
    pub allow_space_after_digits: bool,
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self {
            symbol: "$".to_owned(),
            require_symbol: false,
            allow_space_after_symbol: false,
            symbol_after_digits: false,
            allow_negatives: true,
            parens_for_negatives: false,
            negative_sign_before_digits: false,
            negative_sign_after_digits: false,
            allow_negative_sign_placeholder: false,
            thousands_separator: ",".to_owned(),
            decimal_separator: ".".to_owned(),
            allow_decimal: true,
            require_decimal: false,
            digits_after_decimal: vec![2],
            allow_space_after_digits: false,
        }
    }
}

impl CurrencyOptions {
    /// Sets [`symbol`](Self::symbol).
    #[must_use = "builder methods must be chained or built"]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Sets [`require_symbol`](Self::require_symbol).
    #[must_use = "builder methods must be chained or built"]
    pub fn require_symbol(mut self, yes: bool) -> Self {
        self.require_symbol = yes;
        self
    }

    /// Sets [`allow_space_after_symbol`](Self::allow_space_after_symbol).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_space_after_symbol(mut self, yes: bool) -> Self {
        self.allow_space_after_symbol = yes;
        self
    }

    /// Sets [`symbol_after_digits`](Self::symbol_after_digits).
    #[must_use = "builder methods must be chained or built"]
    pub fn symbol_after_digits(mut self, yes: bool) -> Self {
        self.symbol_after_digits = yes;
        self
    }

    /// Sets [`allow_negatives`](Self::allow_negatives).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_negatives(mut self, yes: bool) -> Self {
        self.allow_negatives = yes;
        self
    }

    /// Sets [`parens_for_negatives`](Self::parens_for_negatives).
    #[must_use = "builder methods must be chained or built"]
    pub fn parens_for_negatives(mut self, yes: bool) -> Self {
        self.parens_for_negatives = yes;
        self
    }

    /// Sets [`negative_sign_before_digits`](Self::negative_sign_before_digits).
    #[must_use = "builder methods must be chained or built"]
    pub fn negative_sign_before_digits(mut self, yes: bool) -> Self {
        self.negative_sign_before_digits = yes;
        self
    }

    /// Sets [`negative_sign_after_digits`](Self::negative_sign_after_digits).
    #[must_use = "builder methods must be chained or built"]
    pub fn negative_sign_after_digits(mut self, yes: bool) -> Self {
        self.negative_sign_after_digits = yes;
        self
    }

    /// Sets [`allow_negative_sign_placeholder`](Self::allow_negative_sign_placeholder).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_negative_sign_placeholder(mut self, yes: bool) -> Self {
        self.allow_negative_sign_placeholder = yes;
        self
    }

    /// Sets [`thousands_separator`](Self::thousands_separator).
    #[must_use = "builder methods must be chained or built"]
    pub fn thousands_separator(mut self, separator: impl Into<String>) -> Self {
        self.thousands_separator = separator.into();
        self
    }

    /// Sets [`decimal_separator`](Self::decimal_separator).
    #[must_use = "builder methods must be chained or built"]
    pub fn decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = separator.into();
        self
    }

    /// Sets [`allow_decimal`](Self::allow_decimal).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_decimal(mut self, yes: bool) -> Self {
        self.allow_decimal = yes;
        self
    }

    /// Sets [`require_decimal`](Self::require_decimal).
    #[must_use = "builder methods must be chained or built"]
    pub fn require_decimal(mut self, yes: bool) -> Self {
        self.require_decimal = yes;
        self
    }

    /// Sets [`digits_after_decimal`](Self::digits_after_decimal).
    #[must_use = "builder methods must be chained or built"]
    pub fn digits_after_decimal(mut self, counts: impl IntoIterator<Item = usize>) -> Self {
        self.digits_after_decimal = counts.into_iter().collect();
        self
    }

    /// Sets [`allow_space_after_digits`](Self::allow_space_after_digits).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_space_after_digits(mut self, yes: bool) -> Self {
        self.allow_space_after_digits = yes;
        self
    }

    /// Checks that the options describe one consistent format.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.parens_for_negatives {
            for (set, name) in [
                (self.negative_sign_before_digits, "negative_sign_before_digits"),
                (self.negative_sign_after_digits, "negative_sign_after_digits"),
            ] {
                if set {
                    return Err(ConfigError::ConflictingOptions {
                        first: "parens_for_negatives",
                        second: name,
                    });
                }
            }
        }
        if self.negative_sign_before_digits && self.negative_sign_after_digits {
            return Err(ConfigError::ConflictingOptions {
                first: "negative_sign_before_digits",
                second: "negative_sign_after_digits",
            });
        }

        if (self.allow_decimal || self.require_decimal) && self.digits_after_decimal.is_empty() {
            return Err(ConfigError::EmptyDigitsAfterDecimal);
        }
        if self.digits_after_decimal.contains(&0) {
            return Err(ConfigError::InvalidDigitsAfterDecimal(0));
        }

        if self.symbol.is_empty() || self.symbol.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidSymbol(self.symbol.clone()));
        }

        for (name, value) in [
            ("thousands_separator", &self.thousands_separator),
            ("decimal_separator", &self.decimal_separator),
        ] {
            if value.is_empty() || value == "-" || value.chars().any(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidSeparator {
                    name,
                    value: value.clone(),
                });
            }
        }
        if self.thousands_separator == self.decimal_separator {
            return Err(ConfigError::InvalidSeparator {
                name: "decimal_separator",
                value: self.decimal_separator.clone(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// GRAMMAR
// ============================================================================

/// Builds the anchored grammar for `options`. Assumes [`CurrencyOptions::check`]
/// has passed.
fn compose(options: &CurrencyOptions) -> String {
    let symbol = format!("(?:{})", regex::escape(&options.symbol));
    let symbol_opt = if options.require_symbol {
        symbol.clone()
    } else {
        format!("{symbol}?")
    };

    let thousands = regex::escape(&options.thousands_separator);
    let mut amount = format!("(?:0|[1-9][0-9]*|[1-9][0-9]{{0,2}}(?:{thousands}[0-9]{{3}})*)?");
    if options.allow_decimal || options.require_decimal {
        let counts = options
            .digits_after_decimal
            .iter()
            .map(|n| format!("[0-9]{{{n}}}"))
            .collect::<Vec<_>>()
            .join("|");
        amount.push_str(&format!(
            "(?:{}(?:{counts}))",
            regex::escape(&options.decimal_separator)
        ));
        if !options.require_decimal {
            amount.push('?');
        }
    }

    let signed = options.allow_negatives && !options.parens_for_negatives;
    let leading_sign =
        signed && !options.negative_sign_after_digits && options.negative_sign_before_digits;
    let mut body = amount.clone();
    if signed && options.negative_sign_after_digits {
        body.push_str("-?");
    } else if leading_sign {
        body = format!("-?{body}");
    }

    // Space flags in precedence order.
    let mut space_after_digits = false;
    if options.allow_negative_sign_placeholder {
        body = if leading_sign {
            format!("(?: {amount}|{body})")
        } else {
            format!(" ?{body}")
        };
    } else if options.allow_space_after_symbol {
        body = format!(" ?{body}");
    } else {
        space_after_digits = options.allow_space_after_digits;
    }

    // A space after the digits must be followed by something: the symbol
    // or, inside parentheses, the closing paren.
    let plain = match (options.symbol_after_digits, space_after_digits) {
        (true, true) => format!("{body}(?: {symbol}|{symbol_opt})"),
        (true, false) => format!("{body}{symbol_opt}"),
        (false, _) => format!("{symbol_opt}{body}"),
    };

    let pattern = if options.allow_negatives && options.parens_for_negatives {
        let space = if space_after_digits { " ?" } else { "" };
        let wrapped = if options.symbol_after_digits {
            format!("{body}{space}{symbol_opt}")
        } else {
            format!("{symbol_opt}{body}{space}")
        };
        format!(r"(?:\({wrapped}\)|{plain})")
    } else if options.allow_negatives
        && !options.negative_sign_before_digits
        && !options.negative_sign_after_digits
    {
        format!("-?{plain}")
    } else {
        plain
    };

    format!("^{pattern}$")
}

// ============================================================================
// CURRENCY VALIDATOR
// ============================================================================

static DEFAULT_CURRENCY: LazyLock<Currency> = LazyLock::new(|| {
    Currency::new(CurrencyOptions::default()).expect("default currency options are consistent")
});

/// Validates currency amounts in a configurable locale format.
///
/// # Examples
///
/// ```
/// use formcheck_validator::validators::{Currency, CurrencyOptions};
/// use formcheck_validator::foundation::Validate;
///
/// let usd = Currency::default();
/// assert!(usd.is_valid("-$10,123.45"));
/// assert!(!usd.is_valid("$ 32.50"));
///
/// let eur = Currency::new(
///     CurrencyOptions::default()
///         .symbol("€")
///         .thousands_separator(".")
///         .decimal_separator(",")
///         .allow_space_after_symbol(true),
/// )
/// .unwrap();
/// assert!(eur.is_valid("-€ 896.954.231"));
/// assert!(!eur.is_valid("12.34,56"));
/// ```
#[derive(Debug, Clone)]
pub struct Currency {
    options: CurrencyOptions,
    grammar: Regex,
}

impl Currency {
    /// Checks `options` and compiles their grammar.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the options are inconsistent.
    pub fn new(options: CurrencyOptions) -> Result<Self, ConfigError> {
        options.check()?;
        let pattern = compose(&options);
        tracing::trace!(pattern = %pattern, "composed currency grammar");
        let grammar = Regex::new(&pattern)?;
        Ok(Self { options, grammar })
    }

    /// The options this validator applies.
    #[must_use]
    pub fn options(&self) -> &CurrencyOptions {
        &self.options
    }

    /// The compiled grammar, for diagnostics.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.grammar.as_str()
    }
}

impl Default for Currency {
    fn default() -> Self {
        DEFAULT_CURRENCY.clone()
    }
}

impl Validate for Currency {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::empty("Amount"));
        }
        if input.starts_with(' ') || input.starts_with("- ") {
            return Err(ValidationError::new(
                "leading_space",
                "Amount must not start with a space",
            ));
        }
        if !input.bytes().any(|b| b.is_ascii_digit()) {
            return Err(ValidationError::new(
                "missing_digits",
                "Amount must contain at least one digit",
            ));
        }
        if !self.grammar.is_match(input) {
            return Err(ValidationError::new(
                "invalid_currency",
                "Amount does not match the configured currency format",
            )
            .with_param("symbol", self.options.symbol.clone()));
        }
        Ok(())
    }
}

/// Creates a [`Currency`] validator with default options.
#[must_use]
pub fn currency() -> Currency {
    Currency::default()
}

/// Returns `true` if `input` is a currency amount under `options`.
///
/// Inconsistent options make every input fail.
///
/// Default options reuse a shared grammar. Any other options compile a
/// fresh grammar on every call; callers checking many inputs against one
/// format should build a [`Currency`] once with [`Currency::new`] and keep it.
///
/// ```
/// use formcheck_validator::prelude::*;
///
/// let options = CurrencyOptions::default().symbol("€").symbol_after_digits(true);
/// assert!(is_currency("12.50€", &options));
///
/// let stored = Currency::new(options).unwrap();
/// assert!(["1.00€", "2,000.00€"].iter().all(|amount| stored.is_valid(amount)));
/// ```
#[must_use]
pub fn is_currency(input: &str, options: &CurrencyOptions) -> bool {
    if *options == CurrencyOptions::default() {
        return DEFAULT_CURRENCY.is_valid(input);
    }
    match Currency::new(options.clone()) {
        Ok(validator) => validator.is_valid(input),
        Err(err) => {
            tracing::debug!(error = %err, "currency options rejected, failing closed");
            false
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
