//! Basic usage example for formcheck-validator
//!
//! Run with `RUST_LOG=formcheck_validator=trace` to see composed grammars and
//! fail-closed configuration errors.

use formcheck_validator::prelude::*;
use tracing_subscriber::EnvFilter;

fn report(label: &str, result: Result<(), ValidationError>) {
    match result {
        Ok(()) => println!("✓ {label}"),
        Err(e) => println!("✗ {label}: {e}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Email with an optional display name
    let named = Email::with_options(EmailOptions::default().allow_display_name(true));
    report("Some Name <foo@bar.com>", named.validate("Some Name <foo@bar.com>"));
    report("foo..bar@bar.com", named.validate("foo..bar@bar.com"));

    // URL restricted to https hosts on a whitelist
    let options = UrlOptions::default()
        .protocols(["https"])
        .require_protocol(true)
        .host_whitelist(["example.com"]);
    let link = Url::with_options(options);
    report("https://example.com/docs", link.validate("https://example.com/docs"));
    report("http://example.com/docs", link.validate("http://example.com/docs"));

    // IP families
    report("::ffff:127.0.0.1", IpAddress::new().validate("::ffff:127.0.0.1"));
    report("::1 as IPv4", IpAddress::new().v4_only().validate("::1"));

    // Dates in three grammar families, resolved to the same instant
    let formats = [
        "2009-05-19 14:39:22-06:00",
        "Tue, 19 May 2009 20:39:22 GMT",
        "5/19/2009 20:39:22",
    ];
    for input in formats {
        match parse_date(input, &DateOptions::default()) {
            Ok(instant) => println!("✓ {input} -> {}", instant.to_rfc3339()),
            Err(e) => println!("✗ {input}: {e}"),
        }
    }
    report("2011-09-31", date().validate("2011-09-31"));
    println!("2100-01-01 is in the future: {}", is_after("2100-01-01", None));

    // Currency for a few locales
    let locales = [
        ("en-US", CurrencyOptions::default(), "-$10,123.45"),
        (
            "it-IT",
            CurrencyOptions::default()
                .symbol("€")
                .thousands_separator(".")
                .decimal_separator(",")
                .allow_space_after_symbol(true),
            "-€ 896.954.231",
        ),
        (
            "el-ZA",
            CurrencyOptions::default()
                .symbol("R")
                .negative_sign_before_digits(true)
                .thousands_separator(" ")
                .decimal_separator(",")
                .allow_negative_sign_placeholder(true),
            "R 10 123",
        ),
    ];
    for (locale, options, input) in locales {
        match Currency::new(options) {
            Ok(validator) => report(&format!("{locale} {input}"), validator.validate(input)),
            Err(e) => println!("✗ {locale}: {e}"),
        }
    }

    // Inconsistent options fail closed; the reason is logged at debug level
    let conflicting = CurrencyOptions::default()
        .parens_for_negatives(true)
        .negative_sign_before_digits(true);
    println!("conflicting currency options accept $1.00: {}", is_currency("$1.00", &conflicting));

    // Character classes
    println!("'ひらがなABC' is variable width: {}", is_variable_width("ひらがなABC"));
}
