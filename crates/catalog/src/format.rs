//! Localized price display.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::iso::{self, Currency};
use rusty_money::{Formatter, LocalFormat, Locale, Money, Params, Position};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Turns an amount into a display string. Implementations must be pure.
pub trait PriceFormatter {
    fn format(&self, amount: Decimal) -> String;
}

/// Currency display options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    /// BCP 47 tag, e.g. `ru-RU`. Picks the separator style and symbol position.
    pub locale: String,
    /// ISO 4217 code, e.g. `KZT`.
    pub currency_code: String,
    pub max_fraction_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            locale: "ru-RU".to_string(),
            currency_code: "KZT".to_string(),
            max_fraction_digits: 0,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown ISO 4217 currency code {0:?}")]
pub struct UnknownCurrency(pub String);

/// Maps a BCP 47 tag onto one of the separator conventions `rusty-money` knows.
fn money_locale(tag: &str) -> Locale {
    let mut parts = tag.split(['-', '_']);
    let language = parts.next().unwrap_or_default().to_ascii_lowercase();
    let region = parts.next().unwrap_or_default().to_ascii_uppercase();

    match (language.as_str(), region.as_str()) {
        ("en", "IN") | ("hi", _) => Locale::EnIn,
        ("ru" | "kk" | "uk" | "be" | "fr" | "pl" | "cs", _) => Locale::EnBy,
        ("de" | "es" | "it" | "pt" | "nl" | "tr", _) => Locale::EnEu,
        _ => Locale::EnUs,
    }
}

/// [`PriceFormatter`] backed by `rusty-money`'s ISO currency table.
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    currency: &'static Currency,
    locale: Locale,
    max_fraction_digits: u32,
}

impl LocaleFormatter {
    pub fn new(format: &CurrencyFormat) -> Result<Self, UnknownCurrency> {
        let code = format.currency_code.trim().to_ascii_uppercase();
        let currency = iso::find(&code).ok_or(UnknownCurrency(code))?;

        Ok(Self {
            currency,
            locale: money_locale(&format.locale),
            max_fraction_digits: format.max_fraction_digits,
        })
    }

    pub fn currency_code(&self) -> &'static str {
        self.currency.iso_alpha_code
    }

    fn params(&self) -> Params {
        let local = LocalFormat::from_locale(self.locale);

        // English conventions follow the currency ("$1,200", "1,200 ₸"); the
        // others always print the symbol after the amount.
        let symbol_first = matches!(self.locale, Locale::EnUs | Locale::EnIn)
            && self.currency.symbol_first;
        let positions: &'static [Position] = if !symbol_first {
            &[Position::Sign, Position::Amount, Position::Space, Position::Symbol]
        } else if self.currency.symbol.chars().count() > 1 {
            &[Position::Sign, Position::Symbol, Position::Space, Position::Amount]
        } else {
            &[Position::Sign, Position::Symbol, Position::Amount]
        };

        Params {
            digit_separator: local.digit_separator,
            exponent_separator: local.exponent_separator,
            separator_pattern: local.digit_separator_pattern,
            positions,
            rounding: Some(self.max_fraction_digits),
            symbol: Some(self.currency.symbol),
            code: Some(self.currency.iso_alpha_code),
            ..Params::default()
        }
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self {
            currency: iso::KZT,
            locale: Locale::EnBy,
            max_fraction_digits: 0,
        }
    }
}

impl PriceFormatter for LocaleFormatter {
    fn format(&self, amount: Decimal) -> String {
        // Pre-round half away from zero; the formatter's own rounding is then a
        // no-op and only pads the fraction.
        let mut rounded = amount
            .round_dp_with_strategy(self.max_fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }

        let money = Money::from_decimal(rounded, self.currency);
        Formatter::money(&money, self.params())
    }
}
